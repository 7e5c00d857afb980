//! # depor-dashboard
//!
//! Staff web dashboard for the club's performance area.
//!
//! - Login/logout against the credential store, with the session carried
//!   in a signed cookie
//! - Role-gated report pages; the sidebar shows exactly the pages the
//!   caller may open
//! - User administration for the `admin` role
//!
//! ## Tech Stack
//!
//! - Axum for HTTP, `tower-http` tracing
//! - Server-rendered HTML, Tailwind CSS and Alpine.js from CDNs

pub mod auth;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

pub use error::DashboardError;
pub use routes::create_router;
pub use server::DashboardServer;
pub use state::AppState;
