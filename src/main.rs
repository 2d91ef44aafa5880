mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use squadcal_core::config::CalendarConfig;
use squadcal_core::filter::Facet;
use squadcal_core::presenter::EventAction;
use tracing_subscriber::EnvFilter;

use commands::list::ListArgs;
use commands::new::NewArgs;

#[derive(Parser)]
#[command(name = "squadcal")]
#[command(about = "Create, filter and inspect team calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a training session or game and print it as JSON
    New(NewArgs),
    /// List the events that pass the given filters
    List(ListArgs),
    /// Show an event's details, optionally running one of its actions
    Show {
        id: String,

        /// Events file (JSON array); defaults to events_file in config
        #[arg(short, long)]
        events: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        action: Option<ActionArg>,
    },
    /// List the options of a filter facet
    Options {
        #[arg(value_enum)]
        facet: FacetArg,

        /// Only show options containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Mark this option as selected (repeatable)
        #[arg(long = "select", value_name = "VALUE")]
        selected: Vec<String>,

        /// Events file used to fill in options missing from config
        #[arg(short, long)]
        events: Option<PathBuf>,
    },
    /// Print a normalized athlete roster
    Roster {
        /// Athletes file (JSON array)
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FacetArg {
    Squads,
    Types,
    Locations,
}

impl From<FacetArg> for Facet {
    fn from(arg: FacetArg) -> Self {
        match arg {
            FacetArg::Squads => Facet::Squads,
            FacetArg::Types => Facet::Types,
            FacetArg::Locations => Facet::Locations,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Edit,
    Delete,
    Duplicate,
    MoreDetails,
}

impl From<ActionArg> for EventAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Edit => EventAction::Edit,
            ActionArg::Delete => EventAction::Delete,
            ActionArg::Duplicate => EventAction::Duplicate,
            ActionArg::MoreDetails => EventAction::MoreDetails,
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = CalendarConfig::load()?;

    match cli.command {
        Commands::New(args) => commands::new::run(&config, args),
        Commands::List(args) => commands::list::run(&config, args),
        Commands::Show { id, events, action } => {
            commands::show::run(&config, &id, events, action.map(Into::into))
        }
        Commands::Options {
            facet,
            search,
            selected,
            events,
        } => commands::options::run(&config, facet.into(), search, selected, events),
        Commands::Roster { file } => commands::roster::run(&file),
    }
}

/// Log to stderr, filtered by SQUADCAL_LOG (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("SQUADCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
