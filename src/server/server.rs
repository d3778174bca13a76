use crate::core::LedgerEngine;
use crate::server::config::ServerConfig;
use crate::server::router::build_router;
use crate::types::LedgerError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// HTTP front end of a ledger engine.
pub struct LedgerServer {
    config: ServerConfig,
    engine: Arc<LedgerEngine>,
}

impl LedgerServer {
    pub fn new(config: ServerConfig, engine: Arc<LedgerEngine>) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.engine))
    }

    /// Serve on a dedicated multi-thread runtime until Ctrl-C.
    pub fn run(self) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .enable_all()
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(self.serve())
    }

    /// Start serving requests.
    pub async fn serve(self) -> Result<(), LedgerError> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(addr = %self.config.bind_addr, "ledger server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("ledger server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
