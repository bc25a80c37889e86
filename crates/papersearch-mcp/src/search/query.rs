//! Query construction: tool parameters to an arXiv query.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::search;
use crate::models::SearchRequest;

/// New-style arXiv identifier: `YYMM.NNNN[N]` with an optional version.
static ARXIV_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}\.[0-9]{4,5}(v[0-9]+)?$").expect("arXiv identifier pattern is valid")
});

/// What to ask the paper source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySpec {
    /// Fetch one paper by its arXiv identifier; all other filters are ignored.
    IdentifierLookup {
        /// Identifier exactly as supplied (e.g., "2103.03404v2").
        id: String,
    },
    /// Run a boolean search expression.
    Search {
        /// arXiv `search_query` expression.
        expression: String,
    },
}

/// Returns true if `query_type` is an arXiv identifier.
#[must_use]
pub fn is_identifier(query_type: &str) -> bool {
    ARXIV_ID.is_match(query_type.trim())
}

/// Build the query for a request.
///
/// Clauses are AND-ed in a fixed order: topic, category, keywords. Free text
/// is passed through untouched; arXiv validates the syntax.
#[must_use]
pub fn build(request: &SearchRequest) -> QuerySpec {
    let query_type = request.query_type.trim();
    if is_identifier(query_type) {
        return QuerySpec::IdentifierLookup { id: query_type.to_string() };
    }

    let mut clauses: Vec<String> = Vec::new();

    if request.query_type == search::MOE_INFERENCE {
        clauses.push(search::MOE_INFERENCE_EXPRESSION.to_string());
    } else if !query_type.is_empty() {
        clauses.push(request.query_type.clone());
    }

    if let Some(field) = &request.field {
        clauses.push(format!("(cat:\"{field}\")"));
    }

    let keywords = request.keywords();
    if !keywords.is_empty() {
        let any_keyword = keywords
            .iter()
            .map(|k| format!("(ti:\"{k}\" OR abs:\"{k}\")"))
            .collect::<Vec<_>>()
            .join(" OR ");
        clauses.push(format!("({any_keyword})"));
    }

    let expression =
        if clauses.is_empty() { search::MATCH_ALL.to_string() } else { clauses.join(" AND ") };

    QuerySpec::Search { expression }
}
