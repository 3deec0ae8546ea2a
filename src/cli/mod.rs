//! Command-line interface.

pub mod commands;
pub mod display;

use clap::{Parser, Subcommand};

/// E-commerce PM agent router.
#[derive(Debug, Parser)]
#[command(name = "pmos", version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize the project directory and database
    Init(commands::init::InitArgs),
    /// Classify and sequence a query without running specialists
    Route(commands::route::RouteArgs),
    /// Run the full pipeline including specialist execution
    Run(commands::run::RunArgs),
    /// Inspect session state and the turn log
    Session(commands::session::SessionArgs),
}

/// Print a top-level error and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
