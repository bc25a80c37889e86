#![no_main]

use libfuzzer_sys::fuzz_target;
use papersearch_mcp::models::SearchRequest;
use papersearch_mcp::search::query::{self, QuerySpec};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the topic, the rest are keywords
    let mut lines = text.lines();
    let request = SearchRequest {
        query_type: lines.next().unwrap_or_default().to_string(),
        keywords: Some(lines.map(str::to_string).collect()),
        ..SearchRequest::default()
    };
    let Ok(request) = request.normalized() else {
        return;
    };

    match query::build(&request) {
        QuerySpec::IdentifierLookup { id } => assert!(query::is_identifier(&id)),
        QuerySpec::Search { expression } => assert!(!expression.is_empty()),
    }
});
