//! Command-line interface

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::RelationType;
use crate::store::ItemStore;

#[derive(Parser, Debug)]
#[command(name = "inventory-cli", version, about = "Manage items in a Nextcloud-style inventory")]
pub struct Cli {
    /// Path to a config file (defaults to <config dir>/inventory-cli/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items, optionally filtered by a search such as `categories:tools drill`
    List {
        /// Search terms; `field:value` restricts a term to one field
        search: Vec<String>,

        /// Only print the number of matching items
        #[arg(long)]
        count: bool,
    },
    /// Show one item with its parent, sub and related items
    Show {
        id: String,
    },
    /// List items that could be linked to an item
    Candidates {
        id: String,

        /// parent, sub or related
        relation: RelationType,
    },
    /// Create items from tab-separated rows (`-` reads stdin)
    Create {
        file: PathBuf,
    },
    /// Delete items by id, or every item matching a search
    Delete {
        ids: Vec<String>,

        /// Delete every item matching this search instead of explicit ids
        #[arg(long, conflicts_with = "ids")]
        search: Option<String>,
    },
}

impl Cli {
    /// Log filter implied by `-v`; `RUST_LOG` still takes precedence
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Run the parsed command line against the configured server
pub async fn run(cli: Cli) -> Result<()> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    let client = config.build_client()?;
    let store = ItemStore::with_concurrency(client, config.concurrency.clone());

    match cli.command {
        Commands::List { search, count } => commands::list::handle(&store, &search, count).await,
        Commands::Show { id } => commands::show::handle(&store, &id).await,
        Commands::Candidates { id, relation } => {
            commands::candidates::handle(&store, &id, relation).await
        }
        Commands::Create { file } => commands::create::handle(&store, &file).await,
        Commands::Delete { ids, search } => {
            commands::delete::handle(&store, &ids, search.as_deref()).await
        }
    }
}
