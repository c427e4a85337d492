//! `labtrack` command-line entry point.
//!
//! # Responsibility
//! - Resolve layered configuration and initialize logging.
//! - Run the HTTP server, schema migrations and account bootstrap.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use labtrack_core::db::migrations::current_version;
use labtrack_core::repo::user_repo::SqliteUserRepository;
use labtrack_core::{core_version, init_logging, open_db, RegisterRequest, Role, UserService};
use log::info;
use std::net::ToSocketAddrs;
use std::path::PathBuf;

mod config;

use config::Settings;

#[derive(Parser)]
#[command(name = "labtrack")]
#[command(version)]
#[command(about = "Lab inventory and maintenance tracking server", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./labtrack.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create or upgrade the database schema and exit
    Migrate {
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create a user account (admin accounts are always allowed here)
    CreateUser {
        username: String,

        #[arg(long, default_value = "")]
        email: String,

        /// admin or technician
        #[arg(long, default_value = "technician")]
        role: String,

        #[arg(long)]
        password: String,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the version
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration with secrets redacted
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        println!("labtrack {}", core_version());
        return Ok(());
    }
    let mut settings = Settings::load(cli.config.as_deref()).wrap_err("invalid configuration")?;

    match cli.command {
        Commands::Version => {}
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
        }
        Commands::Migrate { db } => {
            settings.apply_overrides(None, None, db);
            start_logging(&settings)?;
            let conn = open_db(&settings.db_path)
                .wrap_err_with(|| format!("failed to open {}", settings.db_path.display()))?;
            println!(
                "database {} at schema version {}",
                settings.db_path.display(),
                current_version(&conn)?
            );
        }
        Commands::CreateUser {
            username,
            email,
            role,
            password,
            db,
        } => {
            settings.apply_overrides(None, None, db);
            start_logging(&settings)?;
            let role = Role::parse(&role).ok_or_else(|| eyre!("unknown role `{role}`"))?;
            let conn = open_db(&settings.db_path)?;
            let user = UserService::new(SqliteUserRepository::new(&conn)).register(
                RegisterRequest {
                    username,
                    email,
                    password,
                    role,
                },
                true,
            )?;
            println!("created {} `{}` (id {})", user.role.as_str(), user.username, user.id);
        }
        Commands::Serve { host, port, db } => {
            settings.apply_overrides(host, port, db);
            start_logging(&settings)?;
            serve(settings).await?;
        }
    }

    Ok(())
}

fn start_logging(settings: &Settings) -> Result<()> {
    init_logging(&settings.log_level, settings.log_dir.as_deref())
        .map_err(|message| eyre!(message))
}

async fn serve(settings: Settings) -> Result<()> {
    if settings.jwt_secret.trim().is_empty() {
        bail!("jwt_secret must be set (config file or LABTRACK_JWT_SECRET) before serving");
    }
    let addr = (settings.host.as_str(), settings.port)
        .to_socket_addrs()
        .wrap_err("invalid listen address")?
        .next()
        .ok_or_else(|| eyre!("`{}` did not resolve to an address", settings.host))?;

    let conn = open_db(&settings.db_path)
        .wrap_err_with(|| format!("failed to open {}", settings.db_path.display()))?;
    info!(
        "event=serve_config module=cli status=ok cors={} allow_admin_signup={}",
        settings.cors, settings.allow_admin_signup
    );
    let state = labtrack_api::AppContext::new(conn, settings.api_config());

    eprintln!("LabTrack listening on http://{addr}");
    labtrack_api::serve(state, addr).await?;
    Ok(())
}
