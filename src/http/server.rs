//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the upstream fallback
//! - Wire up middleware (security.txt, request ID, timeout, tracing)
//! - Bind server to listener
//! - Graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn_with_state, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::middleware::security_txt_middleware;
use crate::http::proxy::{proxy_handler, Upstream, UpstreamError};
use crate::security_txt::SecurityTxt;

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    interceptor: Arc<SecurityTxt>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let upstream = config
            .upstream
            .as_ref()
            .map(Upstream::from_config)
            .transpose()?;

        let interceptor = Arc::new(SecurityTxt::from_config(
            &config.interceptor,
            config.security_txt.clone(),
        ));

        let router = Self::build_router(&config, upstream, interceptor.clone());
        Ok(Self {
            router,
            config,
            interceptor,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &GatewayConfig,
        upstream: Option<Upstream>,
        interceptor: Arc<SecurityTxt>,
    ) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(upstream)
            .layer(from_fn_with_state(interceptor, security_txt_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            interceptor = %self.interceptor.name(),
            cache_mode = self.interceptor.mode().as_str(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The interceptor shared by every request this server handles.
    pub fn interceptor(&self) -> &Arc<SecurityTxt> {
        &self.interceptor
    }
}
