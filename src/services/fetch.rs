//! Rate-limited catalog fetch.
//!
//! Walks a server-paginated result set sequentially, keeping request spacing
//! under the external ceiling, and hands back everything collected up to the
//! first unrecoverable failure instead of discarding it.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::constants::limits;
use crate::models::anime::AnimeRecord;

/// One page as delivered by the upstream API.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub records: Vec<AnimeRecord>,
    pub has_next_page: bool,
    /// Server-reported catalog size, when the API sends one. Logged once.
    pub total: Option<i32>,
}

/// Failure of a single page request, before it is tagged with the page
/// number by the fetcher.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("malformed page payload: {0}")]
    Parse(String),
}

/// Fatal fetch failure, tagged with the page it happened on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error on page {page}: {message}")]
    Transport { page: u32, message: String },

    #[error("HTTP status {status} on page {page}")]
    Http { page: u32, status: u16 },

    #[error("malformed response on page {page}: {message}")]
    Parse { page: u32, message: String },

    #[error(
        "stalled pagination: server reported more pages but delivered \
         {empty_pages} empty pages in a row (last page {page})"
    )]
    Stalled { page: u32, empty_pages: u32 },
}

impl FetchError {
    fn tag(page: u32, err: PageError) -> Self {
        match err {
            PageError::Transport(message) => Self::Transport { page, message },
            PageError::Http(status) => Self::Http { page, status },
            PageError::Parse(message) => Self::Parse { page, message },
        }
    }

    /// Page the fetch died on.
    #[must_use]
    pub const fn page(&self) -> u32 {
        match self {
            Self::Transport { page, .. }
            | Self::Http { page, .. }
            | Self::Parse { page, .. }
            | Self::Stalled { page, .. } => *page,
        }
    }
}

/// Source of catalog pages. The production implementation is
/// [`crate::clients::anilist::AnilistClient`]; tests script one in memory.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<CatalogPage, PageError>;
}

/// Spacing between consecutive page requests.
///
/// [`RatePolicy::per_minute`] pads the exact interval by 5% so a configured
/// ceiling is never sat on directly: 90 req/min yields 700 ms spacing
/// (≈85 req/min effective) rather than 666 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    interval: Duration,
}

impl RatePolicy {
    #[must_use]
    pub fn per_minute(max_requests_per_minute: u32) -> Self {
        let exact_ms = 60_000.0 / f64::from(max_requests_per_minute.max(1));
        let padded_ms = (exact_ms * 1.05).ceil() as u64;
        Self {
            interval: Duration::from_millis(padded_ms),
        }
    }

    /// No delay at all. For tests.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            interval: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Everything a fetch run produced. `records` holds whatever was collected
/// up to the failure point when `error` is set; callers decide whether a
/// partial result is acceptable.
#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<AnimeRecord>,
    pub pages_fetched: u32,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Sequential pager over a [`PageSource`].
pub struct CatalogFetcher<S> {
    source: S,
    page_size: u32,
    rate: RatePolicy,
}

impl<S: PageSource> CatalogFetcher<S> {
    pub const fn new(source: S, page_size: u32, rate: RatePolicy) -> Self {
        Self {
            source,
            page_size,
            rate,
        }
    }

    /// Fetches the complete result set, page-ascending, preserving source
    /// order. Stops on the first transport/HTTP/parse failure and returns
    /// the records accumulated so far together with the error.
    pub async fn fetch_all(&self) -> FetchOutcome {
        let mut current_page: u32 = 1;
        let mut has_more = true;
        let mut accumulated: Vec<AnimeRecord> = Vec::new();
        let mut pages_fetched: u32 = 0;
        let mut consecutive_empty: u32 = 0;
        let mut total_seen = false;

        while has_more {
            debug!("requesting page {current_page}");

            let page = match self.source.fetch_page(current_page, self.page_size).await {
                Ok(page) => page,
                Err(err) => {
                    let error = FetchError::tag(current_page, err);
                    error!("{error}");
                    return FetchOutcome {
                        records: accumulated,
                        pages_fetched,
                        error: Some(error),
                    };
                }
            };

            pages_fetched += 1;

            if !total_seen && let Some(total) = page.total {
                info!("catalog reports {total} entries");
                total_seen = true;
            }

            if page.records.is_empty() {
                consecutive_empty += 1;
            } else {
                consecutive_empty = 0;
                accumulated.extend(page.records);
                info!(
                    "page {current_page} collected, {} records accumulated",
                    accumulated.len()
                );
            }

            has_more = page.has_next_page;

            // The continuation flag is honored literally, but a server that
            // keeps claiming more pages without delivering any gets cut off.
            if has_more && consecutive_empty >= limits::MAX_CONSECUTIVE_EMPTY_PAGES {
                let error = FetchError::Stalled {
                    page: current_page,
                    empty_pages: consecutive_empty,
                };
                warn!("{error}");
                return FetchOutcome {
                    records: accumulated,
                    pages_fetched,
                    error: Some(error),
                };
            }

            current_page += 1;

            if has_more {
                self.rate.pause().await;
            }
        }

        FetchOutcome {
            records: accumulated,
            pages_fetched,
            error: None,
        }
    }
}
