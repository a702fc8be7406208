//! HTTP Server
//!
//! Binds the listen address and serves the router until Ctrl+C.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::catalog::ShardCatalog;
use crate::config::Config;
use crate::error::{NcprError, Result};

use super::handlers::{handle_fallback, handle_status, STATUS_PATH};

/// HTTP query service
pub struct Server {
    config: Config,
    catalog: Arc<ShardCatalog>,
}

impl Server {
    /// Create a server over an already loaded catalog
    pub fn new(config: Config, catalog: Arc<ShardCatalog>) -> Self {
        Self { config, catalog }
    }

    /// Routes: the status lookup, plus `{}` for everything else
    pub fn router(&self) -> Router {
        Router::new()
            .route(STATUS_PATH, get(handle_status).fallback(handle_fallback))
            .fallback(handle_fallback)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.catalog))
    }

    /// Bind `config.listen_addr` and serve (blocking until shutdown)
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(|e| {
                NcprError::Server(format!("Failed to bind {}: {}", self.config.listen_addr, e))
            })?;

        self.run_on(listener).await
    }

    /// Serve on an existing listener until Ctrl+C
    pub async fn run_on(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, initiating shutdown...");
}
