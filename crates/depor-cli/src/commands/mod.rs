//! CLI command implementations for the Depor dashboard.

pub mod access;
pub mod init;
pub mod keys;
pub mod serve;
pub mod users;
