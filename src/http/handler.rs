//! The script request handler.
//!
//! # Flow
//! ```text
//! request
//!     → RoutingContext::from_parts      (path, User-Agent, beta flag)
//!     → ScriptRouter::route             (404 for unknown paths)
//!     → ScriptFetcher::request_for      (URL + freshness hint)
//!     → ScriptFetcher::fetch            (one GET, bounded; 500 on failure)
//!     → into_script_response            (rewritten headers, streamed body)
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::error::RouterResult;
use crate::http::request::request_id;
use crate::http::response::{into_script_response, ScriptResponsePolicy};
use crate::routing::{RoutingContext, ScriptRouter};
use crate::upstream::ScriptFetcher;

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ScriptRouter>,
    pub fetcher: ScriptFetcher,
    pub policy: Arc<ScriptResponsePolicy>,
}

impl AppState {
    pub fn new(router: ScriptRouter, fetcher: ScriptFetcher) -> Self {
        let policy = ScriptResponsePolicy::new(fetcher.ttl());
        Self {
            router: Arc::new(router),
            fetcher,
            policy: Arc::new(policy),
        }
    }
}

/// Map one inbound request to one response. Never fails: every error is
/// rendered as a plain-text response.
pub async fn handle(state: &AppState, request: Request<Body>) -> Response {
    match proxy_script(state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

/// Axum entry point; every path and method lands here.
pub async fn script_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    handle(&state, request).await
}

async fn proxy_script(state: &AppState, request: Request<Body>) -> RouterResult<Response> {
    let start = Instant::now();
    // The inbound body is never forwarded.
    let (parts, _) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();

    let ctx = RoutingContext::from_parts(&parts, state.router.beta_param());
    let selection = state.router.route(&ctx)?;

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %ctx.path(),
        rule = %selection.rule,
        resource = %selection.resource,
        beta = selection.beta,
        "Selected script"
    );

    let upstream_request = state.fetcher.request_for(&selection.resource)?;
    let upstream = state.fetcher.fetch(&upstream_request).await?;

    tracing::info!(
        request_id = %request_id,
        path = %ctx.path(),
        resource = %selection.resource,
        status = upstream.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Proxying script"
    );

    Ok(into_script_response(upstream, &state.policy))
}
