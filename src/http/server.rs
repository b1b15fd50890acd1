//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile configuration into the router and upstream fetcher
//! - Create the Axum Router with the script handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown signal, then drain

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::error::RouterResult;
use crate::http::handler::{script_handler, AppState};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::lifecycle::ShutdownSignal;
use crate::routing::ScriptRouter;
use crate::upstream::ScriptFetcher;

/// HTTP server for the install router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream client cannot be built.
    pub fn new(config: RouterConfig) -> RouterResult<Self> {
        let script_router = ScriptRouter::from_config(&config.routing);
        let fetcher = ScriptFetcher::new(&config.upstream)?;

        tracing::debug!(
            paths = ?script_router.table().paths(),
            upstream = %fetcher.base(),
            beta = script_router.beta_enabled(),
            "Routing table compiled"
        );

        let state = AppState::new(script_router, fetcher);
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Everything goes through the fallback so that unknown paths get the
    /// same plain-text 404 as the route table produces.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .fallback(script_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered application, for embedding or in-process tests.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are allowed to finish.
    pub async fn run(self, listener: TcpListener, mut shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}
