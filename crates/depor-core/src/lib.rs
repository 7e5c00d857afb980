//! # depor-core
//!
//! Types shared across the Depor crates:
//! - the fixed staff [`Role`] catalog and [`RoleSet`]
//! - the [`DeporConfig`] tree loaded from `depor.yaml`

pub mod config;
pub mod role;

pub use config::{
    BootstrapConfig, ConfigError, DashboardConfig, DeporConfig, LoggingConfig, SessionConfig,
    StoreConfig,
};
pub use role::{Role, RoleSet, UnknownRole, parse_role_list};
