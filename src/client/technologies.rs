//! Refresh of the technology allow-list from the Stack Exchange tags API.

use crate::error::{RefreshError, StorageError};
use crate::metrics::{HttpTimer, Metrics};
use crate::verifiers::{TechnologyCatalog, VALID_TECHNOLOGIES_KEY};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Public Stack Exchange API endpoint.
pub const STACK_EXCHANGE_API_URL: &str = "https://api.stackexchange.com";

const PAGES: u32 = 5;
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    items: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Rebuilds the list read by [`TechnologyCatalog`] from the most popular
/// Stack Overflow tags.
///
/// Scheduling is left to the caller.
#[derive(Clone)]
pub struct TechnologyCatalogRefresher {
    base_url: String,
    agent: Arc<ureq::Agent>,
    catalog: TechnologyCatalog,
    metrics: Metrics,
}

impl TechnologyCatalogRefresher {
    pub fn new(catalog: TechnologyCatalog, timeout: Duration) -> Self {
        Self::build(STACK_EXCHANGE_API_URL.to_string(), catalog, timeout)
    }

    /// Create a refresher with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, catalog: TechnologyCatalog) -> Self {
        Self::build(base_url, catalog, Duration::from_secs(10))
    }

    fn build(base_url: String, catalog: TechnologyCatalog, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            catalog,
            metrics: Metrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Fetch five pages of popular tags, store them and reset the catalog.
    ///
    /// Returns the number of stored names. Nothing is written unless every
    /// page was fetched.
    pub fn refresh(&self) -> Result<usize, RefreshError> {
        let mut tags = Vec::with_capacity((PAGES * PAGE_SIZE) as usize);

        for page in 1..=PAGES {
            tags.extend(self.fetch_page(page)?.items.into_iter().map(|tag| tag.name));
        }

        let payload = serde_json::to_string(&tags).map_err(StorageError::from)?;
        self.catalog.store().put(VALID_TECHNOLOGIES_KEY, &payload)?;
        self.catalog.invalidate();

        tracing::info!(
            "Valid technology list cache has been updated ({} names).",
            tags.len()
        );
        Ok(tags.len())
    }

    fn fetch_page(&self, page: u32) -> Result<TagsResponse, RefreshError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = format!(
            "{}/2.3/tags?page={}&pagesize={}&order=desc&sort=popular&site=stackoverflow",
            self.base_url.trim_end_matches('/'),
            page,
            PAGE_SIZE
        );
        tracing::debug!("GET {}", url);

        let result = self.agent.get(&url).call();

        timer.finish(&result);

        let body = result
            .map_err(|e| RefreshError::HttpError(e.to_string()))?
            .into_string()
            .map_err(|e| RefreshError::HttpError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| RefreshError::InvalidResponse(e.to_string()))
    }
}
