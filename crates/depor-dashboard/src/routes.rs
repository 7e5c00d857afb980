//! Route definitions for the dashboard.

use crate::state::AppState;
use crate::{auth, handlers};
use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

/// Create the dashboard router.
///
/// Explicit routes cover login, logout, the admin form and health. Every
/// other path goes to the page handler, which consults the access policy.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/admin", get(handlers::page).post(handlers::admin_create))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::page)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
