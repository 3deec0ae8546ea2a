//! `pmos route` — classify + enforce without running specialists.

use anyhow::Result;
use clap::Args;

use super::{build_router, load_config};
use crate::cli::display;

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// The query to route
    pub query: String,

    /// Session to route within (a new one is created when unknown or omitted)
    #[arg(long, short, default_value = "")]
    pub session: String,
}

pub async fn execute(args: RouteArgs, json: bool) -> Result<()> {
    let config = load_config()?;
    let router = build_router(&config).await?;

    let outcome = router.route(&args.query, &args.session).await?;
    display::print_outcome(&outcome, json)
}
