//! Weft CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version)]
#[command(about = "Directive-driven static site builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (Markdown conversion, then every configured page)
    Build {
        /// Path to the site config file
        #[arg(long, default_value = "weft.json")]
        config: PathBuf,

        /// Substitute an empty string for unset {@ENV('...')} variables
        /// instead of failing the page
        #[arg(long)]
        allow_missing_env: bool,
    },

    /// Delete the site's output directory
    Clean {
        /// Path to the site config file
        #[arg(long, default_value = "weft.json")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weft=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            allow_missing_env,
        } => commands::build::execute(&config, allow_missing_env),
        Commands::Clean { config } => commands::clean::execute(&config),
    }
}
