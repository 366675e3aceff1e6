//! Search orchestration: accumulate, slice, enrich

use super::accumulator::PageAccumulator;
use super::enricher::Enricher;
use super::models::{
    LookupTarget, OneOrMany, SearchDefaults, SearchOptions, SearchRequest, SearchResult, Track,
};
use super::window::shape_result;
use crate::error::{Result, SearchError};
use crate::providers::SearchProvider;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Public entry point bound to one provider.
///
/// Every call is an independent run: nothing is cached or shared between
/// calls, so a `Search` can be cloned and used concurrently.
#[derive(Clone)]
pub struct Search {
    provider: Arc<dyn SearchProvider>,
    defaults: SearchDefaults,
}

impl Search {
    /// Create a search over `provider` with the built-in defaults
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            defaults: SearchDefaults::default(),
        }
    }

    /// Replace the option defaults
    pub fn with_defaults(mut self, defaults: SearchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }

    /// Search `term` and return the requested window
    pub async fn search(&self, term: &str, options: SearchOptions) -> Result<SearchResult> {
        self.search_with_cancel(term, options, &CancellationToken::new())
            .await
    }

    /// [`search`](Self::search) that aborts in-flight requests once `cancel`
    /// fires
    pub async fn search_with_cancel(
        &self,
        term: &str,
        options: SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchResult> {
        let request = SearchRequest::resolve(term, options, &self.defaults)?;
        let start = Instant::now();

        let acc = PageAccumulator::new(self.provider.as_ref(), cancel)
            .accumulate(&request)
            .await?;

        if acc.total_count == 0 && acc.tracks.is_empty() {
            info!("{}: '{}' has no matches", self.provider.name(), request.term);
            return Ok(SearchResult::empty());
        }

        let pages_fetched = acc.pages_fetched;
        let mut result = shape_result(acc.tracks, acc.total_count, &request);

        if request.extended_info {
            let targets = result.tracks.into_iter().map(LookupTarget::Track).collect();
            result.tracks = Enricher::new(self.provider.as_ref(), cancel)
                .enrich_all(targets)
                .await?;
        }

        info!(
            "{}: '{}' window {:?} -> {} tracks from {} pages in {:?}",
            self.provider.name(),
            request.term,
            request.window(),
            result.tracks.len(),
            pages_fetched,
            start.elapsed()
        );

        Ok(result)
    }

    /// Fetch extended info for one or more identifiers or tracks, bypassing
    /// search. The output has the shape of the input.
    ///
    /// An empty sequence is rejected with [`SearchError::EmptyResult`] rather
    /// than answered with an empty one. Enriching an empty search window goes
    /// through [`Enricher::enrich_all`] instead and yields `[]`.
    pub async fn lookup(&self, targets: OneOrMany<LookupTarget>) -> Result<OneOrMany<Track>> {
        self.lookup_with_cancel(targets, &CancellationToken::new())
            .await
    }

    /// [`lookup`](Self::lookup) that aborts in-flight requests once `cancel`
    /// fires
    pub async fn lookup_with_cancel(
        &self,
        targets: OneOrMany<LookupTarget>,
        cancel: &CancellationToken,
    ) -> Result<OneOrMany<Track>> {
        debug!("{}: lookup of {} targets", self.provider.name(), targets.len());

        let tracks = Enricher::new(self.provider.as_ref(), cancel)
            .enrich(targets)
            .await?;

        if tracks.is_empty() {
            return Err(SearchError::EmptyResult(
                "lookup produced no tracks".to_string(),
            ));
        }

        Ok(tracks)
    }
}
