//! Metrics collection module
//!
//! Tracks per-provider call counts, error rates and response times.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Kind of call being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Search,
    Lookup,
}

#[derive(Debug, Default)]
struct ProviderCounters {
    searches: u64,
    lookups: u64,
    errors: u64,
    successes: u64,
    /// Last 100 response times in ms
    response_times: Vec<u64>,
}

/// In-process metrics collector shared by the web layer
#[derive(Debug, Default)]
pub struct Metrics {
    total_calls: AtomicU64,
    providers: RwLock<HashMap<String, ProviderCounters>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished call and its outcome
    pub fn record(&self, provider: &str, kind: CallKind, elapsed: Duration, ok: bool) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);

        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let counters = providers.entry(provider.to_string()).or_default();

        match kind {
            CallKind::Search => counters.searches += 1,
            CallKind::Lookup => counters.lookups += 1,
        }
        if ok {
            counters.successes += 1;
        } else {
            counters.errors += 1;
        }

        if counters.response_times.len() >= 100 {
            counters.response_times.remove(0);
        }
        counters.response_times.push(elapsed.as_millis() as u64);
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    /// Snapshot of every provider seen so far
    pub fn provider_stats(&self) -> HashMap<String, ProviderStats> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        providers
            .iter()
            .map(|(name, c)| {
                let total = c.successes + c.errors;
                let stats = ProviderStats {
                    searches: c.searches,
                    lookups: c.lookups,
                    errors: c.errors,
                    avg_response_time_ms: (!c.response_times.is_empty()).then(|| {
                        c.response_times.iter().sum::<u64>() / c.response_times.len() as u64
                    }),
                    reliability: if total == 0 {
                        100.0
                    } else {
                        (c.successes as f64 / total as f64) * 100.0
                    },
                };
                (name.clone(), stats)
            })
            .collect()
    }
}

/// Statistics for a single provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStats {
    pub searches: u64,
    pub lookups: u64,
    pub errors: u64,
    pub avg_response_time_ms: Option<u64>,
    /// Success percentage
    pub reliability: f64,
}
