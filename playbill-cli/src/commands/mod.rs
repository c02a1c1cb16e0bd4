//! Subcommand implementations

pub mod config;
pub mod migrate;
pub mod seed;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use playbill_core::PlaybillConfig;
use playbill_server::db::{create_pool_with_options, PgPool};

/// Database connection flags shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Load the config file (explicit path or default) with env overrides.
pub fn load_config(path: Option<&Path>) -> Result<PlaybillConfig> {
    match path {
        Some(path) => {
            let mut config = PlaybillConfig::load_from(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            Ok(config)
        }
        None => Ok(PlaybillConfig::load()?),
    }
}

/// Connect using the flag, then the config file.
pub async fn connect(args: &DatabaseArgs, config: &PlaybillConfig) -> Result<PgPool> {
    let url = args
        .database_url
        .clone()
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or [database].url in the config file")?;

    create_pool_with_options(&url, config.database.max_connections)
        .await
        .context("Failed to create database pool")
}
