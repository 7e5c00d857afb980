//! # depor-store
//!
//! Staff credentials for the Depor dashboard.
//!
//! - [`CredentialStore`]: the persistence seam, implemented over SQLite by
//!   [`SqliteCredentialStore`]
//! - [`Authenticator`]: username/password check returning the granted roles
//! - [`create_user`] and [`bootstrap`]: account creation and first-run setup
//!
//! Passwords are stored as salted Argon2 PHC strings and never logged.

pub mod authenticator;
pub mod bootstrap;
pub mod error;
pub mod models;
pub mod password;
pub mod sqlite;
pub mod store;
pub mod users;

pub use authenticator::Authenticator;
pub use bootstrap::{BootstrapReport, bootstrap};
pub use error::StoreError;
pub use models::{AuthenticatedUser, NewUser, UserRecord};
pub use sqlite::SqliteCredentialStore;
pub use store::CredentialStore;
pub use users::create_user;
