//! Default category seeding

use std::path::Path;

use anyhow::{Context, Result};

use playbill_server::db::migrations;

use super::{connect, load_config, DatabaseArgs};

/// Create the schema if needed, then insert the default categories.
pub async fn run_seed(args: DatabaseArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let pool = connect(&args, &config).await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    let inserted = migrations::seed_categories(&pool)
        .await
        .context("Failed to seed categories")?;

    if inserted == 0 {
        println!("Categories already present, nothing to seed");
    } else {
        println!("Seeded {inserted} categories");
    }
    Ok(())
}
