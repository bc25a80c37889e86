#![no_main]

use libfuzzer_sys::fuzz_target;
use papersearch_mcp::models::SearchRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = serde_json::from_slice::<SearchRequest>(data) {
        let _ = request.normalized();
    }
});
