//! # Mehndi Studio API Server
//!
//! Serves the back-office REST API and hosts the administrative commands.
//!
//! ## Usage
//!
//! ```bash
//! # Run the API server (migrations are applied on startup)
//! mehndi-api serve
//!
//! # Run against an in-memory store (no database, data is lost on exit)
//! mehndi-api serve --in-memory
//!
//! # Create the first admin account
//! mehndi-api create-admin -e owner@mehndi.studio -p 'Henna#2025'
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mehndi-api")]
#[command(author, version, about = "Mehndi Studio back-office API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Keep data in memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Create an admin user
    CreateAdmin {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mehndi_api=info,mehndi_shared=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { in_memory } => commands::serve::run(in_memory).await,
        Commands::CreateAdmin { email, password } => {
            commands::admin::create_admin(&email, &password).await
        }
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }

    result
}
