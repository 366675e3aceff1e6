//! Incremental fetch-filter-accumulate loop
//!
//! Providers return fixed-size pages with no quality-aware query, so filling
//! a window of `results_count` items above `min_quality` means over-fetching
//! an unknown number of pages. The loop is bounded by a wall-clock budget
//! that is checked between fetches; a single slow fetch may overrun it.

use super::filter::QualityFilter;
use super::models::{Page, SearchRequest, Track};
use crate::error::{Result, SearchError};
use crate::providers::SearchProvider;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of one accumulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulation {
    /// Filtered tracks in provider order, append-only during the run
    pub tracks: Vec<Track>,
    /// Last provider total observed
    pub total_count: u64,
    pub pages_fetched: u32,
    /// The budget ran out before the window was satisfied
    pub timed_out: bool,
    /// The provider ran out of pages before the window was satisfied
    pub exhausted: bool,
}

/// Drives sequential page fetches against one provider
pub struct PageAccumulator<'a> {
    provider: &'a dyn SearchProvider,
    cancel: &'a CancellationToken,
}

impl<'a> PageAccumulator<'a> {
    pub fn new(provider: &'a dyn SearchProvider, cancel: &'a CancellationToken) -> Self {
        Self { provider, cancel }
    }

    /// Collect enough filtered tracks to cover `request`'s window, or as many
    /// as the budget allows. Fetch errors abort the run; running out of time
    /// does not.
    pub async fn accumulate(&self, request: &SearchRequest) -> Result<Accumulation> {
        let filter = QualityFilter::new(request.min_quality);
        let mut page_index = self.provider.first_page();

        let first = self.fetch(&request.term, page_index).await?;
        if first.total_count < 1 {
            debug!("{}: no results for '{}'", self.provider.name(), request.term);
            return Ok(Accumulation {
                pages_fetched: 1,
                ..Default::default()
            });
        }

        let requested = request.requested_tracks_count();
        let mut acc = Accumulation {
            exhausted: first.items.is_empty(),
            total_count: first.total_count,
            tracks: filter.apply(first.items),
            pages_fetched: 1,
            timed_out: false,
        };
        page_index += 1;
        let start = Instant::now();

        loop {
            if acc.tracks.len() >= requested {
                break;
            }
            if start.elapsed() > request.timeout {
                warn!(
                    "{}: timed out after {} pages with {}/{} tracks for '{}'",
                    self.provider.name(),
                    acc.pages_fetched,
                    acc.tracks.len(),
                    requested,
                    request.term
                );
                acc.timed_out = true;
                break;
            }
            if acc.exhausted {
                debug!(
                    "{}: exhausted after {} pages for '{}'",
                    self.provider.name(),
                    acc.pages_fetched,
                    request.term
                );
                break;
            }

            let page = self.fetch(&request.term, page_index).await?;
            page_index += 1;
            acc.pages_fetched += 1;

            // An empty page marks the end of results rather than a new total
            if page.items.is_empty() {
                acc.exhausted = true;
                continue;
            }
            acc.total_count = page.total_count;
            acc.tracks.extend(filter.apply(page.items));
        }

        Ok(acc)
    }

    async fn fetch(&self, term: &str, page_index: u32) -> Result<Page> {
        debug!("{}: fetching page {} of '{}'", self.provider.name(), page_index, term);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SearchError::Cancelled),
            page = self.provider.fetch_page(term, page_index) => page,
        }
    }
}
