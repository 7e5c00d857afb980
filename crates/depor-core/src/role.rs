//! The staff role catalog.
//!
//! Roles are a closed set seeded once into the credential store. A user holds
//! zero or more of them. `admin` and `direccion` are super-roles: they pass
//! every role-gated page except user administration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A permission label from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Direccion,
    Preparador,
    Nutricion,
    Medico,
    Analista,
    Psicologo,
}

/// An ordered set of roles.
pub type RoleSet = BTreeSet<Role>;

impl Role {
    /// Every role in the catalog, in seeding order.
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Direccion,
        Role::Preparador,
        Role::Nutricion,
        Role::Medico,
        Role::Analista,
        Role::Psicologo,
    ];

    /// The lowercase label stored in the database and in session tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Direccion => "direccion",
            Role::Preparador => "preparador",
            Role::Nutricion => "nutricion",
            Role::Medico => "medico",
            Role::Analista => "analista",
            Role::Psicologo => "psicologo",
        }
    }

    /// Human label used in the admin form.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Direccion => "Dirección",
            Role::Preparador => "Preparador",
            Role::Nutricion => "Nutrición",
            Role::Medico => "Médico",
            Role::Analista => "Analista",
            Role::Psicologo => "Psicólogo",
        }
    }

    /// Description seeded alongside the role.
    pub fn description(&self) -> String {
        format!("Rol {}", self.as_str())
    }

    /// Whether this role passes every role-gated page except `/admin`.
    pub fn is_super(&self) -> bool {
        matches!(self, Role::Admin | Role::Direccion)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == label)
            .ok_or_else(|| UnknownRole(s.trim().to_string()))
    }
}

/// Parse a comma separated list such as `"medico, analista"`.
///
/// Blank items are skipped; the first unknown label is an error.
pub fn parse_role_list(raw: &str) -> Result<RoleSet, UnknownRole> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Role::from_str)
        .collect()
}
