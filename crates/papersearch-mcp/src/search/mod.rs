//! Paper search pipeline: query building, retrieval and ranking.
//!
//! ```text
//! SearchRequest -> query::build -> PaperSource -> rank::rank -> Vec<PaperRecord>
//! ```

pub mod query;
pub mod rank;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use futures::stream::BoxStream;

use crate::error::ClientResult;
use crate::models::{Paper, PaperRecord, SearchRequest};

pub use query::QuerySpec;

/// Source of raw paper records (the arXiv API in production).
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch a single paper by identifier. A miss is `Ok(None)`.
    async fn fetch_by_id(&self, id: &str) -> ClientResult<Option<Paper>>;

    /// Stream up to `max_results` papers matching `expression`, newest submissions first.
    fn search<'a>(
        &'a self,
        expression: &'a str,
        max_results: usize,
    ) -> BoxStream<'a, ClientResult<Paper>>;
}

/// Run a request end to end against `source`.
///
/// `now` anchors the recency window.
///
/// # Errors
///
/// Returns the first error reported by the source.
pub async fn search_papers(
    source: &dyn PaperSource,
    request: &SearchRequest,
    now: DateTime<Utc>,
) -> ClientResult<Vec<PaperRecord>> {
    match query::build(request) {
        QuerySpec::IdentifierLookup { id } => {
            tracing::debug!(%id, "Looking up paper by identifier");
            let paper = source.fetch_by_id(&id).await?;
            Ok(paper.map(PaperRecord::exact_match).into_iter().collect())
        }
        QuerySpec::Search { expression } => {
            let wanted = rank::candidate_count(request.max_results);
            tracing::debug!(%expression, candidates = wanted, "Searching papers");

            let candidates: Vec<Paper> = source.search(&expression, wanted).try_collect().await?;
            tracing::debug!(received = candidates.len(), "Received candidate papers");

            Ok(rank::rank(
                candidates,
                request.keywords(),
                request.days,
                request.max_results,
                now,
            ))
        }
    }
}
