//! Application state shared across handlers

use crate::config::Settings;
use crate::error::SearchError;
use crate::metrics::Metrics;
use crate::providers::ProviderRegistry;
use crate::search::{Search, SearchDefaults};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Loaded providers
    pub registry: Arc<ProviderRegistry>,
    /// Option defaults handed to every search
    pub defaults: SearchDefaults,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry) -> Self {
        let defaults = SearchDefaults::from(&settings.search);
        Self {
            settings: Arc::new(settings),
            registry: Arc::new(registry),
            defaults,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Search bound to the named provider, or the configured default
    pub fn search_for(&self, provider: Option<&str>) -> Result<Search, SearchError> {
        let name = provider.unwrap_or(&self.settings.search.default_provider);
        let provider = self
            .registry
            .get(name)
            .ok_or_else(|| SearchError::InvalidRequest(format!("unknown provider '{}'", name)))?;
        Ok(Search::new(provider.clone()).with_defaults(self.defaults.clone()))
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
