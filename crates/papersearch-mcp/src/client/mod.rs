//! arXiv export API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Paged search streamed lazily, with a pause between pages

pub mod feed;

use std::time::Duration;

use async_stream::try_stream;
use futures::Stream;
use futures::stream::BoxStream;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::Paper;
use crate::search::PaperSource;

pub use feed::{Feed, parse_feed};

/// arXiv API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Query endpoint.
    api_url: String,

    /// Entries requested per page.
    page_size: usize,

    /// Pause between page requests.
    page_delay: Duration,
}

impl ArxivClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/atom+xml, application/xml;q=0.9"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_url: config.api_url,
            page_size: config.page_size.max(1),
            page_delay: config.page_delay,
        })
    }

    /// Query endpoint this client talks to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get a single paper by arXiv identifier.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or when arXiv rejects the identifier.
    pub async fn get_paper(&self, id: &str) -> ClientResult<Option<Paper>> {
        let params = [("id_list", id.to_string()), ("max_results", "1".to_string())];
        let feed = self.get_feed(&params).await?;
        Ok(feed.entries.into_iter().next())
    }

    /// Fetch one page of search results, newest submissions first.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_page(
        &self,
        expression: &str,
        start: usize,
        page_size: usize,
    ) -> ClientResult<Feed> {
        let params = [
            ("search_query", expression.to_string()),
            ("start", start.to_string()),
            ("max_results", page_size.to_string()),
            ("sortBy", "submittedDate".to_string()),
            ("sortOrder", "descending".to_string()),
        ];
        self.get_feed(&params).await
    }

    /// Stream up to `max_results` papers, fetching pages lazily.
    ///
    /// Stops early on an empty page or once `totalResults` is exhausted.
    pub fn search_papers<'a>(
        &'a self,
        expression: &'a str,
        max_results: usize,
    ) -> impl Stream<Item = ClientResult<Paper>> + Send + 'a {
        try_stream! {
            let mut start = 0;
            let mut yielded = 0;

            while start < max_results {
                if start > 0 && !self.page_delay.is_zero() {
                    tokio::time::sleep(self.page_delay).await;
                }

                let page_size = self.page_size.min(max_results - start);
                let feed = self.search_page(expression, start, page_size).await?;
                let received = feed.entries.len();
                tracing::debug!(start, received, total = ?feed.total_results, "Fetched arXiv page");

                for paper in feed.entries {
                    if yielded == max_results {
                        break;
                    }
                    yielded += 1;
                    yield paper;
                }

                start += page_size;
                if received == 0 || feed.total_results.is_some_and(|total| start >= total) {
                    break;
                }
            }
        }
    }

    /// Make a GET request and parse the Atom body.
    async fn get_feed(&self, params: &[(&str, String)]) -> ClientResult<Feed> {
        let response = self.client.get(self.api_url.as_str()).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let body = response.text().await?;

        parse_feed(&body)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            400 => {
                // arXiv explains rejected queries in an Atom error entry
                let text = response.text().await.unwrap_or_default();
                match parse_feed(&text) {
                    Err(err @ ClientError::BadRequest { .. }) => Err(err),
                    _ => Err(ClientError::bad_request(text)),
                }
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl PaperSource for ArxivClient {
    async fn fetch_by_id(&self, id: &str) -> ClientResult<Option<Paper>> {
        self.get_paper(id).await
    }

    fn search<'a>(
        &'a self,
        expression: &'a str,
        max_results: usize,
    ) -> BoxStream<'a, ClientResult<Paper>> {
        Box::pin(self.search_papers(expression, max_results))
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient")
            .field("api_url", &self.api_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}
