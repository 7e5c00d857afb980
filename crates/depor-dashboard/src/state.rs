//! Dashboard application state.

use depor_core::DeporConfig;
use depor_session::{KeyPair, SessionIssuer, SessionVerifier};
use depor_store::{Authenticator, CredentialStore};
use std::sync::Arc;

use crate::error::DashboardError;

/// Shared application state for the dashboard.
///
/// Everything inside is immutable after startup; the credential store is
/// the only shared resource with state of its own.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DeporConfig,
    store: Arc<dyn CredentialStore>,
    authenticator: Authenticator,
    issuer: SessionIssuer,
    verifier: SessionVerifier,
}

impl AppState {
    /// Build the state from a loaded config, an opened store and the
    /// session signing key.
    pub fn new(
        config: DeporConfig,
        store: Arc<dyn CredentialStore>,
        keypair: KeyPair,
    ) -> Result<Self, DashboardError> {
        let lifetime = config
            .session
            .lifetime()
            .map_err(|e| DashboardError::StartupFailed(e.to_string()))?;
        let issuer = SessionIssuer::new(keypair, lifetime)?;
        let verifier = issuer.verifier();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                authenticator: Authenticator::new(store.clone()),
                config,
                store,
                issuer,
                verifier,
            }),
        })
    }

    pub fn config(&self) -> &DeporConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    pub fn issuer(&self) -> &SessionIssuer {
        &self.inner.issuer
    }

    pub fn verifier(&self) -> &SessionVerifier {
        &self.inner.verifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depor_store::SqliteCredentialStore;

    #[tokio::test]
    async fn test_zero_lifetime_refused_at_startup() {
        let store = SqliteCredentialStore::in_memory().await.unwrap();
        let mut config = DeporConfig::default();
        config.session.lifetime = "0s".to_string();

        let result = AppState::new(config, Arc::new(store), KeyPair::generate().unwrap());
        assert!(matches!(
            result,
            Err(DashboardError::Session(depor_session::SessionError::InvalidLifetime(_)))
        ));
    }
}
