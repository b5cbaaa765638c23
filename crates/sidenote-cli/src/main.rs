//! Sidenote CLI
//!
//! Command-line interface for sidenote - file-backed side-context entries.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use sidenote_core::{Config, EntryStatus, EntryStore};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "sidenote")]
#[command(about = "Sidenote - persistent side-context entries beside your work")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the base storage directory
    #[arg(long, global = true, value_name = "PATH")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one or more entries
    #[command(alias = "add")]
    Create {
        /// Entry title
        #[arg(long)]
        title: Option<String>,
        /// Optional note body
        #[arg(long)]
        note: Option<String>,
        /// JSON file holding an array of {title, note?} definitions
        #[arg(long, conflicts_with_all = ["title", "note"])]
        file: Option<PathBuf>,
    },
    /// List entries
    #[command(alias = "ls")]
    List {
        /// Include entries whose status is done
        #[arg(long)]
        include_done: bool,
        /// Output format for this listing
        #[arg(long, value_enum)]
        format: Option<ListFormat>,
    },
    /// Show or change the active entry
    Active {
        #[command(subcommand)]
        command: Option<ActiveCommands>,
    },
    /// Update an entry's note and/or status
    Update {
        /// Entry ID (e.g. entry_00001)
        id: String,
        /// New note body (empty string clears the note)
        #[arg(long)]
        note: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<EntryStatus>,
    },
    /// Delete entries
    #[command(alias = "rm")]
    Delete {
        /// Entry IDs to delete
        ids: Vec<String>,
        /// JSON file holding an array of entry IDs
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone)]
enum ActiveCommands {
    /// Show the currently active entry
    Show,
    /// Make an entry active
    Set {
        /// Entry ID (e.g. entry_00001)
        id: String,
    },
    /// Clear the active entry
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = match &cli.home {
        Some(home) => Config::new(home),
        None => Config::load()?,
    };
    tracing::debug!(base_dir = ?config.base_dir, "resolved store root");
    let store = EntryStore::new(config);

    match cli.command {
        Commands::Create { title, note, file } => {
            commands::entry::create(&store, title, note, file.as_deref(), &output).await
        }
        Commands::List {
            include_done,
            format,
        } => {
            // A per-command format wins over the global flags
            let output = match format {
                Some(ListFormat::Json) => Output::new(OutputFormat::Json),
                Some(ListFormat::Table) => Output::new(OutputFormat::Human),
                None => output,
            };
            commands::entry::list(&store, include_done, &output).await
        }
        Commands::Active { command } => match command.unwrap_or(ActiveCommands::Show) {
            ActiveCommands::Show => commands::active::show(&store, &output).await,
            ActiveCommands::Set { id } => commands::active::set(&store, id, &output).await,
            ActiveCommands::Clear => commands::active::clear(&store, &output).await,
        },
        Commands::Update { id, note, status } => {
            commands::entry::update(&store, id, note, status, &output).await
        }
        Commands::Delete { ids, file } => {
            commands::entry::delete(&store, ids, file.as_deref(), &output).await
        }
    }
}
