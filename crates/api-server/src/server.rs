//! HTTP server assembly: router, middleware, metrics exporter.

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use supacheck_core::AppConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::audit::FileAuditLog;
use crate::rest::{self, AppState};

pub struct ApiServer {
    config: AppConfig,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the application router. Split out from [`start_http`] so tests
    /// can drive it without binding a socket.
    ///
    /// [`start_http`]: ApiServer::start_http
    pub fn router(&self) -> Router {
        let state = AppState {
            supabase_base_url: self.config.supabase.base_url.clone(),
            audit: Arc::new(FileAuditLog::new(&self.config.audit.log_path)),
            start_time: Instant::now(),
        };

        Router::new()
            // Compliance checks
            .route("/api/compliance/mfa-check", get(rest::mfa_check))
            .route("/api/compliance/rls-check", get(rest::rls_check))
            .route("/api/compliance/pitr-check", get(rest::pitr_check))
            .route("/api/compliance/fix-rls", post(rest::fix_rls))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server and serve until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.port);
        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
