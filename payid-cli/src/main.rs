//! PayID CLI
//!
//! Command-line interface for managing PayID records in a local store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use payid_lib::config::{StoreBackend, StoreConfig};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "payid")]
#[command(about = "PayID CLI - Register, resolve and manage PayIDs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for the file backend (can also be set via PAYID_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Deployment stage (can also be set via PAYID_STAGE env var)
    #[arg(long, global = true)]
    stage: Option<String>,

    /// Use the in-memory backend. Each invocation starts with an empty store
    /// and nothing is kept after it exits
    #[arg(long, global = true)]
    memory: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new PayID
    Create {
        /// PayID to register (user$host)
        pay_id: String,

        /// Address as NETWORK:ENVIRONMENT:DETAILS (repeatable)
        #[arg(short, long = "address")]
        addresses: Vec<String>,

        /// Base64-encoded identity key
        #[arg(long)]
        identity_key: Option<String>,
    },

    /// Show a PayID record
    Show {
        /// PayID to show
        pay_id: String,
    },

    /// Check whether a PayID exists (exit code 1 when it does not)
    Exists {
        /// PayID to check
        pay_id: String,
    },

    /// List the payment addresses of a PayID
    Addresses {
        /// PayID to resolve
        pay_id: String,

        /// Only addresses on this payment network
        #[arg(short, long)]
        network: Option<String>,

        /// Only addresses in this environment (requires --network)
        #[arg(short, long, requires = "network")]
        environment: Option<String>,
    },

    /// Move a PayID record to a new PayID
    Rename {
        /// Current PayID
        old: String,

        /// New PayID
        new: String,
    },

    /// Delete a PayID and its addresses
    Delete {
        /// PayID to delete
        pay_id: String,
    },

    /// Show the effective store configuration
    Config,
}

impl Cli {
    /// Resolve configuration: file or defaults, then environment, then flags.
    fn store_config(&self) -> Result<StoreConfig> {
        let base = match &self.config {
            Some(path) => StoreConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => StoreConfig::new().with_data_dir(
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("payid"),
            ),
        };

        let mut config = base.merge_env();
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(stage) = &self.stage {
            config = config.with_stage(stage);
        }
        if self.memory {
            config = config.with_backend(StoreBackend::Memory);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("payid_cli=debug,payid_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("payid_cli=info,payid_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = cli.store_config()?;
    let json = cli.json;

    let repo = || commands::open_repository(&config);

    match cli.command {
        Commands::Create {
            pay_id,
            addresses,
            identity_key,
        } => {
            commands::create::run(&repo()?, &pay_id, &addresses, identity_key, json).await?;
        }
        Commands::Show { pay_id } => {
            commands::show::run(&repo()?, &pay_id, json).await?;
        }
        Commands::Exists { pay_id } => {
            if !commands::show::exists(&repo()?, &pay_id, json).await? {
                std::process::exit(1);
            }
        }
        Commands::Addresses {
            pay_id,
            network,
            environment,
        } => {
            commands::addresses::run(
                &repo()?,
                &pay_id,
                network.as_deref(),
                environment.as_deref(),
                json,
            )
            .await?;
        }
        Commands::Rename { old, new } => {
            commands::rename::run(&repo()?, &old, &new, json).await?;
        }
        Commands::Delete { pay_id } => {
            commands::delete::run(&repo()?, &pay_id, json).await?;
        }
        Commands::Config => {
            commands::config::run(&config, json)?;
        }
    }

    Ok(())
}
