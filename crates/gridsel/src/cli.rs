//! Command line entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;

use crate::app::datagrid::{Datagrid, RowAction};
use crate::app::replay;
use crate::app::selection::{build_selection_message, reduce_selection};
use crate::app::store::SelectionStore;
use crate::domain::model::{Message, RowId, SelectionDirective};
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about = "Row selection state for resource list views", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the user and workspace locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level written to stderr (error, warn, info, debug, trace, off).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print single-line JSON.
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a selection directive into a selection message
    Select {
        #[arg(long)]
        resource: Option<String>,
        /// Displayed row identifiers, in order
        #[arg(long, value_delimiter = ',')]
        ids: Vec<RowId>,
        /// `all`, `none`, or comma-separated row indices
        directive: SelectionDirective,
    },
    /// Apply a message to a selection state
    Reduce {
        /// Previous selection as a JSON array; omitted means no prior state
        #[arg(long)]
        state: Option<String>,
        /// Message as JSON
        #[arg(long)]
        message: String,
    },
    /// Replay a message script and print every resource's selection
    Replay {
        /// JSON array, JSON lines (.jsonl) or YAML (.yaml) file of messages
        file: PathBuf,
    },
    /// Select rows and run a row action over them
    Bulk {
        #[arg(long)]
        resource: Option<String>,
        #[arg(long, value_delimiter = ',')]
        ids: Vec<RowId>,
        /// Row actions offered by the grid
        #[arg(long = "actions", value_delimiter = ',', required = true)]
        row_actions: Vec<String>,
        /// Which rows to select before running the action
        #[arg(long, default_value = "all")]
        select: SelectionDirective,
        /// Label of the row action to run
        action: String,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

/// Parse arguments, set up logging and run the requested command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let level = cli.log_level.unwrap_or_else(|| config.logging.level());
    crate::init(&level);

    let pretty = config.defaults.pretty() && !cli.compact;
    let default_resource = config.defaults.resource();

    match cli.command {
        Commands::Select {
            resource,
            ids,
            directive,
        } => {
            let resource = resource.unwrap_or(default_resource);
            let message = build_selection_message(&ids, &resource, &directive);
            print_json(&message, pretty)
        }
        Commands::Reduce { state, message } => {
            let previous = state
                .map(|raw| serde_json::from_str::<Vec<RowId>>(&raw))
                .transpose()
                .context("--state must be a JSON array of row identifiers")?;
            let message: Message =
                serde_json::from_str(&message).context("--message must be a JSON message")?;
            print_json(&reduce_selection(previous, &message), pretty)
        }
        Commands::Replay { file } => {
            let messages = replay::load_script(&file)?;
            let mut store = SelectionStore::new();
            replay::replay(&mut store, &messages);
            print_json(&store.snapshot(), pretty)
        }
        Commands::Bulk {
            resource,
            ids,
            row_actions,
            select,
            action,
        } => {
            let grid = Datagrid::new(resource.unwrap_or(default_resource), ids)
                .with_row_actions(row_actions.into_iter().map(RowAction::new).collect());
            let mut store = SelectionStore::new();
            store.dispatch(&grid.on_selection_change(&select).into());
            let action = grid.row_action(&action)?;
            let request = grid.row_action_click(action, store.selection(grid.resource()));
            print_json(&request, pretty)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gridsel", &mut io::stdout());
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = match pretty {
        true => serde_json::to_string_pretty(value),
        false => serde_json::to_string(value),
    };
    let rendered = rendered.context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
