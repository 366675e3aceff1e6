//! HTTP client for making requests to upstream providers

use super::user_agent::{accept_html, generate_user_agent};
use crate::config::OutgoingSettings;
use crate::error::Result;
use crate::providers::{ProviderRequest, ProviderResponse};
use anyhow::Context;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper shared by all providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> anyhow::Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .ok()
            .filter(|t| !t.is_zero())
            .with_context(|| {
                format!("invalid outgoing.request_timeout: {}", settings.request_timeout)
            })?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        Ok(Self {
            client: builder.build()?,
            default_timeout: timeout,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute a provider request.
    ///
    /// Only connection-level failures are errors here; status codes are left
    /// for the provider to interpret.
    pub async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(self.default_timeout)
            .header("User-Agent", generate_user_agent())
            .header("Accept", accept_html())
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("DNT", "1");

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        debug!("GET {}", request.url);
        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<ProviderResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ProviderResponse { status, text, url })
    }
}
