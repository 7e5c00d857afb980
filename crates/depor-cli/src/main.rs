use clap::{Parser, Subcommand};
use depor_core::DeporConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "depor", version, about = "Depor performance dashboard")]
struct Cli {
    /// Configuration file (defaults to $DEPOR_CONFIG, then ./depor.yaml)
    #[arg(long, short = 'c', global = true, env = "DEPOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap the credential store and start the dashboard.
    Serve,

    /// Create the credential schema, seed roles and create the administrator.
    Init,

    /// Dashboard user management.
    Users {
        #[command(subcommand)]
        cmd: UsersCommand,
    },

    /// Session signing key management.
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Show the access decision and sidebar for a path.
    Access {
        /// Request path, e.g. /estado-funcional/medico
        path: String,

        /// Comma-separated role labels, e.g. medico,nutricion
        #[arg(long)]
        roles: Option<String>,

        /// Evaluate as a caller without a session
        #[arg(long, default_value_t = false, conflicts_with = "roles")]
        anonymous: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// Create a user. Fails if the username already exists.
    Create {
        username: String,
        password: String,

        #[arg(long = "full-name")]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Comma-separated role labels
        #[arg(long)]
        roles: Option<String>,
    },

    /// List the role catalog.
    Roles,
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a new keypair.
    Generate {
        /// Directory to write session.key and session.pub into
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = DeporConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.cmd {
        Command::Serve => commands::serve::run(config).await?,
        Command::Init => commands::init::run(&config).await?,
        Command::Users { cmd } => match cmd {
            UsersCommand::Create {
                username,
                password,
                full_name,
                email,
                roles,
            } => {
                let args = commands::users::CreateArgs {
                    username,
                    password,
                    full_name,
                    email,
                    roles,
                };
                commands::users::create(&config, args).await?
            }
            UsersCommand::Roles => commands::users::roles(&config).await?,
        },
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { output } => commands::keys::generate(output)?,
        },
        Command::Access {
            path,
            roles,
            anonymous,
            json,
        } => commands::access::run(&commands::access::AccessArgs {
            path,
            roles,
            anonymous,
            json,
        })?,
    }

    Ok(())
}

fn init_tracing(config: &DeporConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_users_create() {
        let cli = Cli::try_parse_from([
            "depor", "users", "create", "laura", "pw", "--roles", "medico,nutricion",
        ])
        .unwrap();
        match cli.cmd {
            Command::Users {
                cmd: UsersCommand::Create { username, roles, .. },
            } => {
                assert_eq!(username, "laura");
                assert_eq!(roles.as_deref(), Some("medico,nutricion"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_anonymous_conflicts_with_roles() {
        let result = Cli::try_parse_from([
            "depor", "access", "/inicio", "--anonymous", "--roles", "admin",
        ]);
        assert!(result.is_err());
    }
}
