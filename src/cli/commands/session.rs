//! `pmos session` — inspect session state and the turn log.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{load_config, open_database};
use crate::cli::display;
use crate::domain::ports::SessionStore;
use crate::infrastructure::database::SqliteSessionStore;

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Show a session's state
    Show {
        /// Session id
        id: String,
    },
    /// List a session's recorded turns
    Turns {
        /// Session id
        id: String,

        /// Maximum turns to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

pub async fn execute(args: SessionArgs, json: bool) -> Result<()> {
    let config = load_config()?;
    let pool = open_database(&config).await?;
    let store: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(pool));

    match args.command {
        SessionCommands::Show { id } => {
            let session = store
                .get_session(&id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("session not found: {id}"))?;
            display::print_session(&session, json)
        }
        SessionCommands::Turns { id, limit } => {
            let turns = store.recent_turns(&id, limit).await?;
            display::print_turns(&turns, json)
        }
    }
}
