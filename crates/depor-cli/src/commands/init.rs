//! Init command.
//!
//! `depor init` - Create the credential schema, seed the role catalog and
//! create the administrator account.

use depor_core::DeporConfig;
use depor_store::{CredentialStore, SqliteCredentialStore, bootstrap};

/// Prepare the credential store without starting the server.
pub async fn run(config: &DeporConfig) -> anyhow::Result<()> {
    let store = SqliteCredentialStore::open(&config.store).await?;
    let report = bootstrap(&store, &config.bootstrap).await?;

    println!(
        "✔ Credential store initialized at {}",
        config.store.sqlite_path.display()
    );
    println!("  Roles: {}", store.list_roles().await?.join(", "));

    match report.admin_created {
        Some(username) => {
            println!("  Created administrator '{}'.", username);
            println!();
            println!("⚠️  Change the administrator password before exposing the dashboard.");
        }
        None => println!(
            "  Administrator '{}' already exists; left unchanged.",
            config.bootstrap.admin_username
        ),
    }

    Ok(())
}
