//! Concurrent per-item enrichment

use super::models::{LookupTarget, OneOrMany, Track};
use crate::error::{Result, SearchError};
use crate::providers::SearchProvider;
use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fans out single-item lookups and joins them, failing fast
pub struct Enricher<'a> {
    provider: &'a dyn SearchProvider,
    cancel: &'a CancellationToken,
}

impl<'a> Enricher<'a> {
    pub fn new(provider: &'a dyn SearchProvider, cancel: &'a CancellationToken) -> Self {
        Self { provider, cancel }
    }

    /// Enrich a scalar or a sequence, returning the same shape
    pub async fn enrich(&self, targets: OneOrMany<LookupTarget>) -> Result<OneOrMany<Track>> {
        match targets {
            OneOrMany::One(target) => Ok(OneOrMany::One(self.enrich_one(target).await?)),
            OneOrMany::Many(targets) => Ok(OneOrMany::Many(self.enrich_all(targets).await?)),
        }
    }

    /// Enrich every target concurrently, preserving input order. The first
    /// failure drops the outstanding lookups and is returned as is; an empty
    /// input yields an empty output.
    pub async fn enrich_all(&self, targets: Vec<LookupTarget>) -> Result<Vec<Track>> {
        if targets.is_empty() {
            return Ok(vec![]);
        }
        debug!(
            "{}: looking up {} items",
            self.provider.name(),
            targets.len()
        );
        try_join_all(targets.into_iter().map(|target| self.enrich_one(target))).await
    }

    async fn enrich_one(&self, target: LookupTarget) -> Result<Track> {
        let details = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SearchError::Cancelled),
            details = self.provider.lookup_one(&target) => details,
        }?;
        Ok(target.into_enriched(details))
    }
}
