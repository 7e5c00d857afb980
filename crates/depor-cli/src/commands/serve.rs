//! Serve command for starting the dashboard.
//!
//! `depor serve` - Bootstrap the credential store and start the HTTP server.

use depor_core::DeporConfig;
use depor_dashboard::{AppState, DashboardServer};
use depor_session::KeyPair;
use depor_store::{SqliteCredentialStore, bootstrap};
use std::sync::Arc;

/// Run the dashboard until Ctrl-C.
pub async fn run(config: DeporConfig) -> anyhow::Result<()> {
    let store = SqliteCredentialStore::open(&config.store).await?;
    tracing::info!(
        path = %config.store.sqlite_path.display(),
        "credential store ready"
    );

    let report = bootstrap(&store, &config.bootstrap).await?;
    if let Some(username) = &report.admin_created {
        println!("✔ Created administrator '{}'", username);
    }

    let keypair = KeyPair::from_config(&config.session)?;
    let state = AppState::new(config, Arc::new(store), keypair)?;
    let server = DashboardServer::new(state);

    println!("Depor dashboard listening on http://{}", server.bind_address());
    server.run().await?;
    Ok(())
}
