//! Error types for the dashboard crate.

use crate::pages;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use depor_session::SessionError;
use depor_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to start the server.
    #[error("failed to start dashboard: {0}")]
    StartupFailed(String),

    /// The credential store cannot serve the request.
    #[error("Servicio no disponible: {0}")]
    ServiceUnavailable(#[from] StoreError),

    /// Session token could not be minted.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        match &self {
            DashboardError::ServiceUnavailable(source) => {
                tracing::error!(error = %source, "credential store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Html(pages::service_unavailable_page()),
                )
                    .into_response()
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
