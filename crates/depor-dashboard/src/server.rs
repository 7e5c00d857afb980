//! Dashboard server implementation.

use crate::error::DashboardError;
use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;

/// The dashboard server.
pub struct DashboardServer {
    state: AppState,
}

impl DashboardServer {
    /// Create a new dashboard server over prepared state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Address the server binds to.
    pub fn bind_address(&self) -> String {
        self.state.config().dashboard.bind_address()
    }

    /// Serve until Ctrl-C.
    pub async fn run(&self) -> Result<(), DashboardError> {
        let addr = self.bind_address();
        tracing::info!(address = %addr, "Starting Depor dashboard");

        let app = routes::create_router(self.state.clone());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| DashboardError::StartupFailed(e.to_string()))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashboardError::StartupFailed(e.to_string()))?;

        tracing::info!("Depor dashboard stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
