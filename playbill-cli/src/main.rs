//! playbill CLI - trivia and venue booking API
//!
//! Entry point for:
//! - Running the HTTP API (`serve`)
//! - Creating the schema (`migrate`) and default categories (`seed`)
//! - Inspecting configuration (`config`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "playbill",
    author,
    version,
    about = "Trivia questions, quizzes and venue booking over a JSON API",
    long_about = "Serve the trivia and booking API backed by PostgreSQL, \
                  create its schema and seed the default trivia categories."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.playbill/config.toml)
    #[arg(long, global = true, env = "PLAYBILL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and indexes (idempotent)
    Migrate(commands::DatabaseArgs),
    /// Insert the default trivia categories when none exist
    Seed(commands::DatabaseArgs),
    /// Show configuration file location or effective values
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, config_path).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args, config_path).await,
        Commands::Seed(args) => commands::seed::run_seed(args, config_path).await,
        Commands::Config(args) => commands::config::run_config(args, config_path),
    };

    tracing_setup::shutdown_otel();
    result
}
