//! Session token minting and verification.
//!
//! Token layout (authority block only):
//!
//! ```text
//! user("laura");
//! user_id(7);
//! full_name("Laura Pérez");      // optional
//! role("medico");                // one fact per role
//! session_id("<uuid v4>");
//! issued_at(1718000000);
//! expires_at(1718043200);
//! check if time($time), $time < 1718043200;
//! ```

use crate::error::SessionError;
use crate::keys::KeyPair;
use crate::session::Principal;
use biscuit_auth::builder::AuthorizerBuilder;
use biscuit_auth::macros::{check, fact};
use biscuit_auth::{Authorizer, Biscuit, PublicKey};
use chrono::{DateTime, Duration, Utc};
use depor_core::{Role, RoleSet};
use uuid::Uuid;

/// Mints session tokens for authenticated principals.
pub struct SessionIssuer {
    keypair: KeyPair,
    lifetime: Duration,
}

impl SessionIssuer {
    /// Create an issuer whose tokens live for `lifetime`.
    ///
    /// The lifetime must be at least one second, since the cookie `Max-Age`
    /// is carried in whole seconds.
    pub fn new(keypair: KeyPair, lifetime: std::time::Duration) -> Result<Self, SessionError> {
        let lifetime = Duration::from_std(lifetime)
            .map_err(|e| SessionError::InvalidLifetime(e.to_string()))?;
        if lifetime.num_seconds() < 1 {
            return Err(SessionError::InvalidLifetime(format!(
                "{}ms is shorter than 1s",
                lifetime.num_milliseconds()
            )));
        }
        Ok(Self { keypair, lifetime })
    }

    /// A verifier for tokens minted by this issuer.
    pub fn verifier(&self) -> SessionVerifier {
        SessionVerifier::new(self.keypair.public_key())
    }

    /// Session lifetime in whole seconds (cookie `Max-Age`).
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Mint a token valid for the configured lifetime.
    pub fn issue(&self, principal: &Principal) -> Result<String, SessionError> {
        self.issue_until(principal, Utc::now() + self.lifetime)
    }

    /// Mint a token that expires at a fixed instant.
    pub fn issue_until(
        &self,
        principal: &Principal,
        expires_at: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let err = |e: biscuit_auth::error::Token| SessionError::TokenCreationFailed(e.to_string());

        let mut builder = Biscuit::builder()
            .fact(fact!("user({user})", user = principal.username.clone()))
            .map_err(err)?
            .fact(fact!("user_id({id})", id = principal.user_id))
            .map_err(err)?;

        if let Some(full_name) = &principal.full_name {
            builder = builder
                .fact(fact!("full_name({name})", name = full_name.clone()))
                .map_err(err)?;
        }

        for role in &principal.roles {
            builder = builder
                .fact(fact!("role({role})", role = role.as_str()))
                .map_err(err)?;
        }

        let session_id = Uuid::new_v4().to_string();
        let expires = expires_at.timestamp();
        builder = builder
            .fact(fact!("session_id({sid})", sid = session_id))
            .map_err(err)?
            .fact(fact!("issued_at({ts})", ts = Utc::now().timestamp()))
            .map_err(err)?
            .fact(fact!("expires_at({ts})", ts = expires))
            .map_err(err)?
            .check(check!(
                "check if time($time), $time < {expires_at}",
                expires_at = expires
            ))
            .map_err(err)?;

        let biscuit = builder.build(self.keypair.inner()).map_err(err)?;

        biscuit
            .to_base64()
            .map_err(|e| SessionError::TokenCreationFailed(e.to_string()))
    }
}

/// Verifies session tokens and rebuilds the principal.
#[derive(Clone)]
pub struct SessionVerifier {
    public_key: PublicKey,
}

/// A token that passed signature and expiry checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub principal: Principal,
    pub session_id: String,
    pub expires_at: i64,
}

impl SessionVerifier {
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    /// Verify a token minted by the matching issuer.
    pub fn verify(&self, token: &str) -> Result<VerifiedSession, SessionError> {
        let biscuit = Biscuit::from_base64(token, self.public_key.clone())
            .map_err(|e| SessionError::TokenParseFailed(e.to_string()))?;

        let now = Utc::now().timestamp();
        let mut authorizer = AuthorizerBuilder::new()
            .code(format!(
                r#"
                time({now});
                allow if user($u);
                "#
            ))
            .map_err(|e| SessionError::Rejected(e.to_string()))?
            .build(&biscuit)
            .map_err(|e| SessionError::Rejected(e.to_string()))?;

        authorizer
            .authorize()
            .map_err(|e| SessionError::Rejected(e.to_string()))?;

        let username = first(query_strings(&mut authorizer, "user")?, "user")?;
        let user_id = first(query_ints(&mut authorizer, "user_id")?, "user_id")?;
        let session_id = first(query_strings(&mut authorizer, "session_id")?, "session_id")?;
        let expires_at = first(query_ints(&mut authorizer, "expires_at")?, "expires_at")?;
        let full_name = query_strings(&mut authorizer, "full_name")?.into_iter().next();

        let roles = query_strings(&mut authorizer, "role")?
            .into_iter()
            .map(|label| {
                label
                    .parse::<Role>()
                    .map_err(|_| SessionError::UnknownRole(label))
            })
            .collect::<Result<RoleSet, _>>()?;

        Ok(VerifiedSession {
            principal: Principal {
                user_id,
                username,
                full_name,
                roles,
            },
            session_id,
            expires_at,
        })
    }
}

fn first<T>(values: Vec<T>, claim: &str) -> Result<T, SessionError> {
    values
        .into_iter()
        .next()
        .ok_or_else(|| SessionError::MissingClaim {
            claim: claim.to_string(),
        })
}

fn claim_rule(name: &str) -> Result<biscuit_auth::builder::Rule, SessionError> {
    format!("data($x) <- {}($x)", name)
        .parse()
        .map_err(|e: biscuit_auth::error::Token| SessionError::Rejected(e.to_string()))
}

fn query_strings(authorizer: &mut Authorizer, name: &str) -> Result<Vec<String>, SessionError> {
    let results: Vec<(String,)> = authorizer
        .query(claim_rule(name)?)
        .map_err(|e| SessionError::Rejected(e.to_string()))?;
    Ok(results.into_iter().map(|(s,)| s).collect())
}

fn query_ints(authorizer: &mut Authorizer, name: &str) -> Result<Vec<i64>, SessionError> {
    let results: Vec<(i64,)> = authorizer
        .query(claim_rule(name)?)
        .map_err(|e| SessionError::Rejected(e.to_string()))?;
    Ok(results.into_iter().map(|(n,)| n).collect())
}
