//! Settings structures for goear-rs configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub providers: ProvidersSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (GOEAR_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GOEAR_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("GOEAR_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("GOEAR_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("GOEAR_DEFAULT_PROVIDER") {
            self.search.default_provider = val;
        }
        if let Ok(val) = std::env::var("GOEAR_SEARCH_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.search.timeout = secs;
            }
        }
    }

    /// Reject settings the search engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.results_count == 0 {
            anyhow::bail!("search.results_count must be at least 1");
        }
        if search.offset == 0 {
            anyhow::bail!("search.offset must be at least 1");
        }
        if !(search.timeout.is_finite() && search.timeout > 0.0) {
            anyhow::bail!("search.timeout must be a positive number of seconds");
        }
        if !(search.max_timeout.is_finite() && search.max_timeout >= search.timeout) {
            anyhow::bail!("search.max_timeout must be finite and not below search.timeout");
        }
        let request_timeout = self.outgoing.request_timeout;
        if !(request_timeout.is_finite() && request_timeout > 0.0) {
            anyhow::bail!("outgoing.request_timeout must be a positive number of seconds");
        }
        if self.get_provider(&search.default_provider).is_none() {
            anyhow::bail!(
                "default provider '{}' is not configured or is disabled",
                search.default_provider
            );
        }
        Ok(())
    }

    /// Get an enabled provider config by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.enabled_providers().into_iter().find(|p| p.name == name)
    }

    /// Get all enabled providers
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.0.iter().filter(|p| !p.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the API
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "goear-rs".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Default search options and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Items per window
    pub results_count: u32,
    /// 1-based window index
    pub offset: u32,
    /// Minimum bitrate an item must have
    pub min_quality: u32,
    /// Enrich the returned window with per-item lookups
    pub extended_info: bool,
    /// Pagination budget in seconds
    pub timeout: f64,
    /// Upper bound for caller-supplied budgets, in seconds
    pub max_timeout: f64,
    /// Provider used when the caller does not name one
    pub default_provider: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            results_count: 10,
            offset: 1,
            min_quality: 0,
            extended_info: false,
            timeout: 15.0,
            max_timeout: 60.0,
            default_provider: "goear".to_string(),
        }
    }
}

/// Configured providers, in declaration order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvidersSettings(pub Vec<ProviderConfig>);

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self(vec![ProviderConfig::default()])
    }
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name (unique identifier)
    pub name: String,
    /// Implementation to instantiate
    pub provider: String,
    pub disabled: bool,
    /// Search page template, `{searchTerm}` and `{pageIndex}` placeholders
    pub search_url: String,
    /// Extended info template, `{trackId}` placeholder
    pub lookup_url: String,
    /// Playable link template, `{trackId}` placeholder
    pub track_link_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "goear".to_string(),
            provider: "goear".to_string(),
            disabled: false,
            search_url: "http://www.goear.com/search/{searchTerm}/{pageIndex}".to_string(),
            lookup_url: "http://www.goear.com/playersong/{trackId}".to_string(),
            track_link_url: "http://www.goear.com/action/sound/get/{trackId}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert_eq!(settings.search.results_count, 10);
        assert_eq!(settings.search.offset, 1);
        assert_eq!(settings.search.min_quality, 0);
        assert!(!settings.search.extended_info);
        assert_eq!(settings.search.timeout, 15.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_provider_lookup() {
        let settings = Settings::default();
        let goear = settings.get_provider("goear");
        assert!(goear.is_some());
        assert!(goear.unwrap().search_url.contains("{searchTerm}"));
        assert!(settings.get_provider("missing").is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9000
search:
  min_quality: 192
providers:
  - name: mirror
    search_url: "http://localhost/search/{searchTerm}/{pageIndex}"
"#;
        let mut settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.search.min_quality, 192);
        assert_eq!(settings.search.results_count, 10);

        let mirror = settings.get_provider("mirror").unwrap();
        assert_eq!(mirror.provider, "goear");
        assert!(mirror.lookup_url.contains("playersong"));

        // "goear" is no longer declared
        assert!(settings.validate().is_err());
        settings.search.default_provider = "mirror".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_defaults() {
        let mut settings = Settings::default();
        settings.search.results_count = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.search.timeout = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.providers.0[0].disabled = true;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_timeouts() {
        let settings =
            Settings::from_yaml("search:\n  timeout: .inf\n  max_timeout: .inf\n").unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_yaml("search:\n  max_timeout: .inf\n").unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_yaml("search:\n  timeout: .nan\n").unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_yaml("outgoing:\n  request_timeout: .inf\n").unwrap();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.outgoing.request_timeout = 0.0;
        assert!(settings.validate().is_err());
    }
}
