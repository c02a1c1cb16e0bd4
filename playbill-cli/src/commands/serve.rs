//! HTTP server command

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use playbill_server::db::migrations;
use playbill_server::{run_server, AppState, ServerConfig};

use super::{connect, load_config, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server].bind, then 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allowed CORS origin; repeat for several (default: any origin)
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,

    /// Skip creating missing tables on startup
    #[arg(long)]
    pub no_migrate: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let pool = connect(&args.database, &config).await?;

    if !args.no_migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_origins: if args.cors_origins.is_empty() {
            config.server.cors_origins
        } else {
            args.cors_origins
        },
    };

    tracing::info!("Starting playbill server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(AppState::postgres(pool), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
