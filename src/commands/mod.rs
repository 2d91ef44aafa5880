pub mod list;
pub mod new;
pub mod options;
pub mod roster;
pub mod show;

use std::path::PathBuf;

use anyhow::{Context, Result};
use squadcal_core::CalendarEvent;
use squadcal_core::config::CalendarConfig;

/// Events file from the command line, else from config.
fn events_path(config: &CalendarConfig, arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| config.events_path())
}

/// Load the events a command operates on.
pub fn load_events(config: &CalendarConfig, arg: Option<PathBuf>) -> Result<Vec<CalendarEvent>> {
    let Some(path) = events_path(config, arg) else {
        anyhow::bail!(
            "No events file given.\n\n\
            Pass one with:\n  \
            squadcal list --events <file>\n\n\
            or set events_file in {}",
            CalendarConfig::config_path()?.display()
        );
    };

    CalendarEvent::load_all(&path)
        .with_context(|| format!("Could not load events from {}", path.display()))
}

/// Like `load_events`, but no events file at all is not an error.
pub fn load_events_if_any(
    config: &CalendarConfig,
    arg: Option<PathBuf>,
) -> Result<Vec<CalendarEvent>> {
    match events_path(config, arg) {
        Some(path) => load_events(config, Some(path)),
        None => Ok(Vec::new()),
    }
}
