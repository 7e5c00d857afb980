//! Session lifecycle.
//!
//! Two states only: `Anonymous` and `Authenticated`. Login and logout are
//! the only transitions, and each carries its navigation side effect.

use depor_core::{Role, RoleSet};
use serde::{Deserialize, Serialize};

/// Where a successful login lands.
pub const LOGIN_REDIRECT: &str = "/inicio";

/// Where logout lands.
pub const LOGOUT_REDIRECT: &str = "/";

/// Shown on any failed login. Never says which factor was wrong.
pub const LOGIN_FAILED_MESSAGE: &str = "Credenciales incorrectas";

/// The authenticated identity inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub roles: RoleSet,
}

impl Principal {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Client-held session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

/// Result of a login or logout: the next state plus its side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    /// Path the client should navigate to, if any.
    pub redirect: Option<&'static str>,
    /// User-visible message, if any.
    pub message: Option<&'static str>,
}

/// The conceptual payload: `{logged_in, user, roles}` plus the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPayload {
    pub logged_in: bool,
    pub user: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub user_id: Option<i64>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(principal) => Some(principal),
        }
    }

    /// Granted roles, or `None` when not authenticated.
    pub fn roles(&self) -> Option<&RoleSet> {
        self.principal().map(|p| &p.roles)
    }

    /// Apply the outcome of an authenticator call.
    ///
    /// `Some` replaces whatever identity the session held and redirects home.
    /// `None` leaves the state untouched and surfaces the generic error.
    pub fn login(self, outcome: Option<Principal>) -> Transition {
        match outcome {
            Some(principal) => Transition {
                session: Session::Authenticated(principal),
                redirect: Some(LOGIN_REDIRECT),
                message: None,
            },
            None => Transition {
                session: self,
                redirect: None,
                message: Some(LOGIN_FAILED_MESSAGE),
            },
        }
    }

    /// Clear every session field and redirect to the root.
    pub fn logout(self) -> Transition {
        Transition {
            session: Session::Anonymous,
            redirect: Some(LOGOUT_REDIRECT),
            message: None,
        }
    }

    pub fn payload(&self) -> SessionPayload {
        match self {
            Session::Anonymous => SessionPayload {
                logged_in: false,
                user: None,
                roles: None,
                user_id: None,
            },
            Session::Authenticated(p) => SessionPayload {
                logged_in: true,
                user: Some(p.username.clone()),
                roles: Some(p.roles.iter().copied().collect()),
                user_id: Some(p.user_id),
            },
        }
    }
}
