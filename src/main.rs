//! Pmos CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pmos::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => pmos::cli::commands::init::execute(args, cli.json).await,
        Commands::Route(args) => pmos::cli::commands::route::execute(args, cli.json).await,
        Commands::Run(args) => pmos::cli::commands::run::execute(args, cli.json).await,
        Commands::Session(args) => pmos::cli::commands::session::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        pmos::cli::handle_error(&err, cli.json);
    }
}
