//! `pmos run` — the full pipeline including specialist execution.

use anyhow::Result;
use clap::Args;

use super::{build_router, load_config};
use crate::cli::display;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// The query to run
    pub query: String,

    /// Session to run within (a new one is created when unknown or omitted)
    #[arg(long, short, default_value = "")]
    pub session: String,
}

pub async fn execute(args: RunArgs, json: bool) -> Result<()> {
    let config = load_config()?;
    let router = build_router(&config).await?;

    let outcome = router.run(&args.query, &args.session).await?;
    display::print_outcome(&outcome, json)
}
