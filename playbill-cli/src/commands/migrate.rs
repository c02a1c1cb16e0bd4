//! Schema migration command

use std::path::Path;

use anyhow::{Context, Result};

use playbill_server::db::migrations;

use super::{connect, load_config, DatabaseArgs};

pub async fn run_migrate(args: DatabaseArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let pool = connect(&args, &config).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("Schema is up to date");
    Ok(())
}
