//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both relay handlers
//! - Wire up middleware (tracing, request ID, CORS, request timeout)
//! - Build the outbound clients from the configured deadlines
//! - Serve on a listener until shutdown is signalled

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::{check, icon};
use crate::security::cors_layer;
use crate::upstream::{UpstreamClient, CHECK_USER_AGENT, ICON_USER_AGENT};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub check_client: UpstreamClient,
    pub icon_client: UpstreamClient,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            check_client: UpstreamClient::new(
                Duration::from_secs(config.timeouts.check_secs),
                CHECK_USER_AGENT,
            )?,
            icon_client: UpstreamClient::new(
                Duration::from_secs(config.timeouts.icon_secs),
                ICON_USER_AGENT,
            )?,
        })
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/check",
                post(check::check).fallback(check::method_not_allowed),
            )
            .route(
                "/get-icon",
                get(icon::get_icon).fallback(icon::method_not_allowed),
            )
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(cors_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.server_secs,
                    ))),
            )
    }

    /// The fully layered router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            check_timeout_secs = self.config.timeouts.check_secs,
            icon_timeout_secs = self.config.timeouts.icon_secs,
            "HTTP server starting"
        );
        tracing::info!(" - Check endpoint: http://{}/check", addr);
        tracing::info!(" - Icon endpoint:  http://{}/get-icon", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
