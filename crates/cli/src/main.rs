//! waguide CLI, a thin front end over the guidance chat library.
//!
//! Commands:
//! - `init`      Write a default config file
//! - `ask`       Ask one question about a topic
//! - `topics`    List topics and the guidance cited for each
//! - `metadata`  Show version information for the guidance set
//! - `status`    Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "waguide",
    about = "Washington ESSB 5814 interim guidance assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.wa-guidance/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Guidance root directory, overriding the config file
    #[arg(short, long, global = true, env = "WA_GUIDANCE_DIR")]
    guidance_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,

    /// Ask a question about one topic
    Ask {
        /// Topic identifier (see `waguide topics`)
        #[arg(short, long)]
        topic: String,

        /// JSON file holding earlier messages as [{"role", "content"}, ...]
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,

        /// The question
        question: String,
    },

    /// List topics and their guidance documents
    Topics,

    /// Show guidance metadata
    Metadata,

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let load_config = || commands::load_config(cli.config.as_deref(), cli.guidance_dir.clone());

    match cli.command {
        Commands::Init => commands::init::run()?,
        Commands::Ask {
            topic,
            history,
            json,
            question,
        } => commands::ask::run(load_config()?, topic, history, question, json).await?,
        Commands::Topics => commands::topics::run(),
        Commands::Metadata => commands::metadata::run(load_config()?).await?,
        Commands::Status => commands::status::run(&load_config()?),
    }

    Ok(())
}
