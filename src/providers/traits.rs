//! Provider traits and types

use crate::error::Result;
use crate::search::{LookupTarget, Page, TrackDetails};
use async_trait::async_trait;

/// HTTP request to be made for a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Fully substituted URL
    pub url: String,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// HTTP response handed back to a provider for parsing
#[derive(Debug)]
pub struct ProviderResponse {
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// A paginated upstream the aggregation engine can drive.
///
/// Implementations own transport and markup parsing. The engine only relies
/// on [`first_page`](Self::first_page) yielding an initial total and on page
/// indices increasing by one from there.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Index of the provider's first page
    fn first_page(&self) -> u32 {
        1
    }

    /// Fetch one page of raw items. A page past the last result resolves
    /// to [`Page::empty`], not an error.
    async fn fetch_page(&self, term: &str, page_index: u32) -> Result<Page>;

    /// Fetch extended info for one identifier or track
    async fn lookup_one(&self, target: &LookupTarget) -> Result<TrackDetails>;
}
