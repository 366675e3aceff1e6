//! Provider loader for initializing providers from configuration

use super::goear::GoEar;
use super::registry::ProviderRegistry;
use super::traits::SearchProvider;
use crate::config::{ProviderConfig, Settings};
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Load all enabled providers from settings
    pub fn load(settings: &Settings, client: &HttpClient) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();

        for config in &settings.providers.0 {
            if config.disabled {
                info!("Skipping disabled provider: {}", config.name);
                continue;
            }
            if registry.contains(&config.name) {
                warn!("Skipping duplicate provider name: {}", config.name);
                continue;
            }

            match Self::create_provider(config, client) {
                Ok(provider) => {
                    info!("Loaded provider: {} ({})", config.name, config.provider);
                    registry.register(provider, config.clone());
                }
                Err(e) => {
                    warn!("Failed to load provider {}: {}", config.name, e);
                }
            }
        }

        if registry.is_empty() {
            anyhow::bail!("no usable providers configured");
        }

        Ok(registry)
    }

    /// Create a provider instance by implementation type
    fn create_provider(
        config: &ProviderConfig,
        client: &HttpClient,
    ) -> Result<Arc<dyn SearchProvider>> {
        let provider: Arc<dyn SearchProvider> = match config.provider.as_str() {
            "goear" => Arc::new(GoEar::from_config(config, client.clone())?),
            other => anyhow::bail!(
                "Unknown provider type: {} (available: {})",
                other,
                Self::available_providers().join(", ")
            ),
        };
        Ok(provider)
    }

    /// Get list of available provider types
    pub fn available_providers() -> Vec<&'static str> {
        vec!["goear"]
    }
}
