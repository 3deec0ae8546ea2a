//! `pmos init` — create the project directory, config, and database.

use anyhow::{Context, Result};
use clap::Args;

use super::{load_config, open_database};
use crate::domain::models::Config;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InitArgs, json: bool) -> Result<()> {
    let config_path = std::path::Path::new(".pmos/config.yaml");

    if config_path.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", config_path.display());
    }

    std::fs::create_dir_all(".pmos").context("failed to create .pmos directory")?;
    let defaults =
        serde_yaml::to_string(&Config::default()).context("failed to render default config")?;
    std::fs::write(config_path, defaults).context("failed to write config file")?;

    // Create the database and apply the schema.
    let config = load_config()?;
    let pool = open_database(&config).await?;
    pool.close().await;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "initialized": true,
                "config": config_path.display().to_string(),
                "database": config.database.path,
            })
        );
    } else {
        println!(
            "{} wrote {} and initialized {}",
            console::style("ok:").green().bold(),
            config_path.display(),
            config.database.path
        );
    }
    Ok(())
}
