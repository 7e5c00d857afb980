//! Key management commands.
//!
//! `depor keys generate` - Generate a session signing keypair.

use depor_session::KeyPair;
use std::fs;
use std::path::PathBuf;

const PRIVATE_KEY_FILE: &str = "session.key";
const PUBLIC_KEY_FILE: &str = "session.pub";

/// Generate a new session signing keypair.
pub fn generate(output: Option<PathBuf>) -> anyhow::Result<()> {
    let keypair = KeyPair::generate()?;

    if let Some(output_dir) = output {
        fs::create_dir_all(&output_dir)?;

        let private_path = output_dir.join(PRIVATE_KEY_FILE);
        let public_path = output_dir.join(PUBLIC_KEY_FILE);
        keypair.save_to_files(&private_path, &public_path)?;

        println!("✔ Generated session signing keypair:");
        println!("  Private key: {}", private_path.display());
        println!("  Public key:  {}", public_path.display());
        println!();
        println!("⚠️  Keep your private key secure! Never commit it to version control.");
        println!();
        println!("Reference it from depor.yaml:");
        println!("  session:");
        println!("    private_key_file: {}", private_path.display());
    } else {
        println!("Private key (keep secure!):");
        println!("{}", keypair.private_key_hex());
        println!();
        println!("Public key:");
        println!("{}", keypair.public_key_hex());
        println!();
        println!("Use --output <dir> to save keys to files.");
    }

    Ok(())
}
