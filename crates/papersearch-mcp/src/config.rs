//! Configuration for the paper search MCP server.

use std::time::Duration;

/// arXiv export API constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Entries requested per page.
    pub const PAGE_SIZE: usize = 100;

    /// Pause between consecutive page requests (arXiv asks for one request every 3s).
    pub const PAGE_DELAY: Duration = Duration::from_secs(3);

    /// Retries for transient failures (5xx, timeouts, 429).
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("papersearch-mcp/", env!("CARGO_PKG_VERSION"));
}

/// Search policy constants.
pub mod search {
    /// Recency window in days when the caller omits `days`.
    pub const DEFAULT_DAYS: u32 = 7;

    /// Recency window advertised in the tool schema.
    pub const ADVERTISED_DAYS: u32 = 180;

    /// Topic used when the caller omits `queryType`.
    pub const DEFAULT_QUERY_TYPE: &str = "moe";

    /// Result cap when the caller omits `maxResults`.
    pub const DEFAULT_MAX_RESULTS: usize = 100;

    /// Topic sentinel expanded into a fixed mixture-of-experts inference query.
    pub const MOE_INFERENCE: &str = "moe inference";

    /// Expression the `moe inference` sentinel expands to.
    pub const MOE_INFERENCE_EXPRESSION: &str = "(ti:\"mixture of experts\" OR ti:moe) AND \
        (ti:deployment OR abs:deployment OR ti:inference OR abs:inference \
        OR ti:efficient OR abs:efficient)";

    /// Expression used when no clause could be built.
    pub const MATCH_ALL: &str = "*:*";

    /// Candidates requested from the source are `maxResults` times this factor...
    pub const OVERFETCH_FACTOR: usize = 2;

    /// ...but never fewer than this.
    pub const MIN_CANDIDATES: usize = 100;
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// arXiv query endpoint (overridable for mock servers).
    pub api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Entries requested per page.
    pub page_size: usize,

    /// Pause between page requests.
    pub page_delay: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// User agent header.
    pub user_agent: String,
}

impl Config {
    /// Create the production configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_url: api::ARXIV_API_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::PAGE_SIZE,
            page_delay: api::PAGE_DELAY,
            max_retries: api::MAX_RETRIES,
            user_agent: api::USER_AGENT.to_string(),
        }
    }

    /// Replace the arXiv endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if `api_url` is not an absolute http(s) URL.
    pub fn with_api_url(mut self, api_url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(api_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("unsupported scheme '{}' in arXiv API URL", parsed.scheme());
        }
        self.api_url = parsed.to_string();
        Ok(self)
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_url: format!("{}/api/query", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            page_size: api::PAGE_SIZE,
            page_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 0,
            user_agent: api::USER_AGENT.to_string(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `ARXIV_API_URL` when set.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("ARXIV_API_URL") {
            Ok(api_url) => Self::new().with_api_url(&api_url),
            Err(_) => Ok(Self::new()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
