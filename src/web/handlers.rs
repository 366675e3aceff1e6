//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::metrics::CallKind;
use crate::providers::ProviderLoader;
use crate::search::{LookupTarget, OneOrMany, SearchOptions, SearchResult, Track};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search term
    pub q: Option<String>,
    pub offset: Option<u32>,
    pub results_count: Option<u32>,
    pub min_quality: Option<u32>,
    pub extended_info: Option<bool>,
    /// Pagination budget in seconds
    pub timeout: Option<f64>,
    pub provider: Option<String>,
}

impl SearchParams {
    fn options(&self) -> Result<SearchOptions, SearchError> {
        let timeout = self
            .timeout
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .ok()
                    .filter(|d| !d.is_zero())
                    .ok_or_else(|| {
                        SearchError::InvalidRequest(format!("invalid timeout: {}", secs))
                    })
            })
            .transpose()?;

        Ok(SearchOptions {
            offset: self.offset,
            results_count: self.results_count,
            min_quality: self.min_quality,
            extended_info: self.extended_info,
            timeout,
        })
    }
}

/// Query parameters for identifier lookups
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    /// One identifier or a comma-separated list
    pub id: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderParams {
    pub provider: Option<String>,
}

/// Error response carrying a [`SearchError`]
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            SearchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SearchError::NotFound(_) | SearchError::EmptyResult(_) => StatusCode::NOT_FOUND,
            SearchError::Transport(_) | SearchError::Upstream { .. } | SearchError::Parse(_) => {
                StatusCode::BAD_GATEWAY
            }
            SearchError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            SearchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self.0);
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, ApiError> {
    let term = match params.q {
        Some(ref q) if !q.trim().is_empty() => q.clone(),
        _ => {
            return Err(SearchError::InvalidRequest("missing search term".to_string()).into())
        }
    };
    let options = params.options()?;
    let search = state.search_for(params.provider.as_deref())?;

    let start = Instant::now();
    let result = search.search(&term, options).await;
    state.metrics.record(
        search.provider_name(),
        CallKind::Search,
        start.elapsed(),
        result.is_ok(),
    );

    Ok(Json(result?))
}

/// Lookup by identifier(s) given in the query string
pub async fn lookup_by_id(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<OneOrMany<Track>>, ApiError> {
    let mut ids: Vec<LookupTarget> = params
        .id
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(LookupTarget::from)
        .collect();

    let targets = match ids.len() {
        0 => {
            return Err(SearchError::InvalidRequest("missing track id".to_string()).into())
        }
        1 => OneOrMany::One(ids.remove(0)),
        _ => OneOrMany::Many(ids),
    };

    run_lookup(&state, params.provider.as_deref(), targets).await
}

/// Lookup with identifiers and/or tracks in a JSON body
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<ProviderParams>,
    Json(targets): Json<OneOrMany<LookupTarget>>,
) -> Result<Json<OneOrMany<Track>>, ApiError> {
    run_lookup(&state, params.provider.as_deref(), targets).await
}

async fn run_lookup(
    state: &AppState,
    provider: Option<&str>,
    targets: OneOrMany<LookupTarget>,
) -> Result<Json<OneOrMany<Track>>, ApiError> {
    let search = state.search_for(provider)?;

    let start = Instant::now();
    let result = search.lookup(targets).await;
    state.metrics.record(
        search.provider_name(),
        CallKind::Lookup,
        start.elapsed(),
        result.is_ok(),
    );

    Ok(Json(result?))
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "instance_name": state.instance_name(),
        "providers": state.registry.names(),
        "available_providers": ProviderLoader::available_providers(),
        "total_calls": state.metrics.total_calls(),
        "provider_stats": state.metrics.provider_stats(),
    }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
