//! Search pipeline tests against an in-memory paper source.
//!
//! Exercises query building, identifier bypass and ranking without HTTP.

use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use futures::stream::{self, BoxStream, StreamExt};

use papersearch_mcp::error::{ClientError, ClientResult};
use papersearch_mcp::models::{Paper, SearchRequest};
use papersearch_mcp::search::{self, PaperSource};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn make_paper(id: &str, title: &str, summary: &str, days_ago: i64) -> Paper {
    Paper {
        id: format!("http://arxiv.org/abs/{id}v1"),
        title: title.to_string(),
        authors: vec!["Test Author".to_string()],
        summary: summary.to_string(),
        pdf_url: Some(format!("http://arxiv.org/pdf/{id}v1")),
        abs_url: Some(format!("http://arxiv.org/abs/{id}v1")),
        published: now() - TimeDelta::days(days_ago),
        categories: vec!["cs.LG".to_string()],
        primary_category: Some("cs.LG".to_string()),
    }
}

/// What the pipeline asked the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Lookup(String),
    Search { expression: String, max_results: usize },
}

/// Paper source serving canned papers and recording every call.
#[derive(Default)]
struct FakeSource {
    papers: Vec<Paper>,
    fail: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeSource {
    fn with_papers(papers: Vec<Paper>) -> Self {
        Self { papers, ..Self::default() }
    }

    fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PaperSource for FakeSource {
    async fn fetch_by_id(&self, id: &str) -> ClientResult<Option<Paper>> {
        self.calls.lock().unwrap().push(Call::Lookup(id.to_string()));
        if self.fail {
            return Err(ClientError::bad_request(format!("incorrect id format for {id}")));
        }
        Ok(self.papers.iter().find(|p| p.id.contains(id)).cloned())
    }

    fn search<'a>(
        &'a self,
        expression: &'a str,
        max_results: usize,
    ) -> BoxStream<'a, ClientResult<Paper>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search { expression: expression.to_string(), max_results });
        if self.fail {
            return stream::iter(vec![Err(ClientError::server(503, "unavailable"))]).boxed();
        }
        stream::iter(self.papers.iter().take(max_results).cloned().map(Ok)).boxed()
    }
}

#[tokio::test]
async fn test_identifier_bypasses_search_and_filters() {
    let source = FakeSource::with_papers(vec![make_paper("2103.03404", "Old Paper", "", 1500)]);
    let request = SearchRequest {
        query_type: " 2103.03404 ".to_string(),
        days: 1,
        keywords: Some(vec!["unrelated".to_string()]),
        field: Some("cs.CL".to_string()),
        ..SearchRequest::default()
    };

    let results = search::search_papers(&source, &request, now()).await.unwrap();

    assert_eq!(source.calls(), vec![Call::Lookup("2103.03404".to_string())]);
    assert_eq!(results.len(), 1);
    assert!((results[0].relevance_score - 1.0).abs() < f64::EPSILON);
    assert_eq!(results[0].url, "http://arxiv.org/pdf/2103.03404v1");
}

#[tokio::test]
async fn test_identifier_miss_is_empty() {
    let source = FakeSource::default();
    let request = SearchRequest { query_type: "2501.99999".to_string(), ..SearchRequest::default() };

    let results = search::search_papers(&source, &request, now()).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_requests_overfetched_candidates() {
    let source = FakeSource::default();

    let request = SearchRequest { max_results: 10, ..SearchRequest::default() };
    search::search_papers(&source, &request, now()).await.unwrap();

    let request = SearchRequest { max_results: 75, ..SearchRequest::default() };
    search::search_papers(&source, &request, now()).await.unwrap();

    assert_eq!(
        source.calls(),
        vec![
            Call::Search { expression: "moe".to_string(), max_results: 100 },
            Call::Search { expression: "moe".to_string(), max_results: 150 },
        ]
    );
}

#[tokio::test]
async fn test_search_expression_includes_filters() {
    let source = FakeSource::default();
    let request = SearchRequest {
        query_type: "transformers".to_string(),
        field: Some("cs.CL".to_string()),
        keywords: Some(vec!["pruning".to_string()]),
        ..SearchRequest::default()
    };

    search::search_papers(&source, &request, now()).await.unwrap();

    assert_eq!(
        source.calls(),
        vec![Call::Search {
            expression: "transformers AND (cat:\"cs.CL\") AND \
                         ((ti:\"pruning\" OR abs:\"pruning\"))"
                .to_string(),
            max_results: 200,
        }]
    );
}

#[tokio::test]
async fn test_window_applies_without_keywords() {
    let source = FakeSource::with_papers(vec![
        make_paper("2505.00001", "Recent", "", 2),
        make_paper("2401.00001", "Ancient", "", 500),
    ]);

    let request = SearchRequest { days: 7, ..SearchRequest::default() };
    let results = search::search_papers(&source, &request, now()).await.unwrap();

    let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Recent"]);
}

#[tokio::test]
async fn test_keywords_rank_and_disable_window() {
    let source = FakeSource::with_papers(vec![
        make_paper("2505.00001", "Dense Models", "No experts here.", 1),
        make_paper("2505.00002", "Sparse Experts", "Expert routing for sparse layers.", 2),
        make_paper("2001.00001", "Routing Networks", "Routing between modules.", 2000),
    ]);

    let request = SearchRequest {
        days: 7,
        keywords: Some(vec!["routing".to_string(), "sparse".to_string()]),
        ..SearchRequest::default()
    };
    let results = search::search_papers(&source, &request, now()).await.unwrap();

    let ranked: Vec<_> = results.iter().map(|r| (r.title.as_str(), r.relevance_score)).collect();
    assert_eq!(ranked.len(), 3);
    // Sparse Experts: sparse in title (2) + routing and sparse in summary (2) = 4/6
    assert_eq!(ranked[0].0, "Sparse Experts");
    assert!((ranked[0].1 - 4.0 / 6.0).abs() < 1e-9);
    // Routing Networks: routing in title and summary = 3/6
    assert_eq!(ranked[1].0, "Routing Networks");
    assert!((ranked[1].1 - 0.5).abs() < 1e-9);
    assert_eq!(ranked[2].0, "Dense Models");
    assert!(ranked[2].1.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_blank_keywords_behave_as_none() {
    let source = FakeSource::with_papers(vec![make_paper("2401.00001", "Ancient", "", 500)]);

    let request = SearchRequest {
        days: 7,
        keywords: Some(vec![String::new(), "   ".to_string()]),
        ..SearchRequest::default()
    }
    .normalized()
    .unwrap();
    let results = search::search_papers(&source, &request, now()).await.unwrap();

    // Window applies again, and the expression has no keyword clause
    assert!(results.is_empty());
    assert_eq!(
        source.calls(),
        vec![Call::Search { expression: "moe".to_string(), max_results: 200 }]
    );
}

#[tokio::test]
async fn test_source_errors_propagate() {
    let source = FakeSource::failing();

    let search_err = search::search_papers(&source, &SearchRequest::default(), now())
        .await
        .unwrap_err();
    assert!(matches!(search_err, ClientError::Server { status: 503, .. }));

    let request = SearchRequest { query_type: "2103.03404".to_string(), ..SearchRequest::default() };
    let lookup_err = search::search_papers(&source, &request, now()).await.unwrap_err();
    assert!(matches!(lookup_err, ClientError::BadRequest { .. }));
}
