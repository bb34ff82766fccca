//! Paginated UniProtKB fetch client
//!
//! Retrieves the full result set of a search query split across arbitrarily
//! many pages, surfacing a flat sequence of [`Page`] values. Transient server
//! errors are retried with exponential backoff against the *same* URL; any
//! other unsuccessful status aborts the whole fetch.
//!
//! The client is explicitly constructed and passed by reference; there is no
//! process-wide session, which keeps tests free to inject a mock server URL.

use crate::error::{HarvestError, Result};
use crate::record::{ProteinEntry, SearchPage};
use futures::Stream;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

// ============================================================================
// Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via SPD_API_TIMEOUT_SECS environment variable.
/// Generous because a 500-entry page with sequences is a large body.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Response header carrying the total number of entries in the search
pub const TOTAL_RESULTS_HEADER: &str = "x-total-results";

/// Retry policy for transient server errors
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt
    pub max_retries: u32,

    /// Base backoff duration; retry `i` (0-based) sleeps `base * 2^i`
    pub backoff_base: Duration,

    /// Status codes considered transient
    pub retryable: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_base: Duration::from_millis(250),
            retryable: vec![500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// Whether a status code is worth retrying
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retryable.contains(&status.as_u16())
    }

    /// Backoff before the given 0-based retry attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}

/// One batch of search results
#[derive(Debug)]
pub struct Page {
    /// The entries of this batch, in API order
    pub results: Vec<ProteinEntry>,

    /// Total number of entries in the whole search, per response header
    /// (0 when the header is missing or unparseable)
    pub total: u64,
}

/// HTTP client for the UniProtKB search API
pub struct UniProtClient {
    client: Client,
    policy: RetryPolicy,
}

impl UniProtClient {
    /// Create a new client with the given retry policy
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let timeout_secs = std::env::var("SPD_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, policy })
    }

    /// Create a new client with the default retry policy
    pub fn with_defaults() -> Result<Self> {
        Self::new(RetryPolicy::default())
    }

    /// Begin paginating from the given search URL
    pub fn fetch_pages(&self, url: impl Into<String>) -> Pager<'_> {
        Pager {
            client: self,
            next_url: Some(url.into()),
        }
    }

    /// Issue a GET, retrying transient server errors against the same URL
    ///
    /// Returns the first successful response. Fails with
    /// [`HarvestError::RetriesExhausted`] once the retry budget is spent,
    /// or [`HarvestError::Status`] immediately for any other unsuccessful
    /// status.
    pub async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;

        loop {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if !self.policy.is_retryable(status) {
                return Err(HarvestError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            if attempt >= self.policy.max_retries {
                return Err(HarvestError::RetriesExhausted {
                    url: url.to_string(),
                    status: status.as_u16(),
                    attempts: attempt + 1,
                });
            }

            let delay = self.policy.backoff(attempt);
            warn!(
                %status,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Transient server error, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Lazy, finite, non-restartable sequence of result pages
///
/// Pagination ends when a response carries no `Link: <...>; rel="next"`
/// header; a malformed header is treated as end-of-results, not an error.
pub struct Pager<'a> {
    client: &'a UniProtClient,
    next_url: Option<String>,
}

impl<'a> Pager<'a> {
    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let response = self.client.get_with_retry(&url).await?;

        let total = response
            .headers()
            .get(TOTAL_RESULTS_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        self.next_url = next_link(response.headers());
        if let Some(ref next) = self.next_url {
            debug!(next = %next, "Following pagination link");
        }

        let body = response.text().await?;
        let page: SearchPage = serde_json::from_str(&body)?;

        Ok(Some(Page {
            results: page.results,
            total,
        }))
    }

    /// Adapt the pager into a `Stream` of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + 'a {
        futures::stream::try_unfold(self, |mut pager| async move {
            Ok(pager.next_page().await?.map(|page| (page, pager)))
        })
    }
}

/// Extract the URL annotated `rel="next"` from a `Link` response header
///
/// Returns `None` for a missing or malformed header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get("link").and_then(|v| v.to_str().ok())?;

    for part in link.split(',') {
        let part = part.trim();
        let rest = part.strip_prefix('<')?;
        let (url, params) = rest.split_once('>')?;
        if params.contains(r#"rel="next""#) {
            return Some(url.to_string());
        }
    }

    None
}
