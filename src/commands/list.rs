use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Args;
use owo_colors::OwoColorize;
use squadcal_core::CalendarEvent;
use squadcal_core::config::CalendarConfig;
use squadcal_core::filter::{Facet, FilterStore};
use squadcal_core::visibility::visible_events;

#[derive(Args)]
pub struct ListArgs {
    /// Events file (JSON array); defaults to events_file in config
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Only show events for this squad (repeatable)
    #[arg(long = "squad", value_name = "SQUAD")]
    squads: Vec<String>,

    /// Only show events of this type, e.g. GAME (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Only show events at this location (repeatable)
    #[arg(long = "location", value_name = "LOCATION")]
    locations: Vec<String>,

    #[arg(long)]
    all_squads: bool,

    #[arg(long)]
    all_types: bool,

    #[arg(long)]
    all_locations: bool,
}

pub fn run(config: &CalendarConfig, args: ListArgs) -> Result<()> {
    let tz = config.tz()?;
    let events = super::load_events(config, args.events)?;

    let options = config.catalog.clone().or_from_events(&events);
    let mut store = FilterStore::new(options)
        .on_change(|selection| tracing::debug!(?selection, "filters changed"));

    select(&mut store, Facet::Squads, args.all_squads, &args.squads)?;
    select(&mut store, Facet::Types, args.all_types, &args.types)?;
    select(&mut store, Facet::Locations, args.all_locations, &args.locations)?;

    let mut visible = visible_events(&events, store.selection());
    visible.sort_by_key(|event| event.start);

    if visible.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for event in &visible {
        let date_label = format_date_label(&event.start, tz);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        println!("{}", format_event_line(event, tz));
    }

    println!();
    println!(
        "{}",
        format!("Showing {} of {} events", visible.len(), events.len()).dimmed()
    );

    Ok(())
}

/// Apply one facet's command-line filters to the store.
pub(super) fn select(
    store: &mut FilterStore,
    facet: Facet,
    all: bool,
    values: &[String],
) -> Result<()> {
    if all {
        store.select_all(facet);
    }

    for value in values {
        let catalog = store.options().catalog(facet);
        if !catalog.contains(value) {
            anyhow::bail!(
                "{} '{}' not found. Available: {}",
                facet,
                value,
                catalog.join(", ")
            );
        }
        if !store.is_selected(facet, value) {
            store.toggle(facet, value);
        }
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(start: &DateTime<Utc>, tz: Tz) -> String {
    let today = Utc::now().with_timezone(&tz).date_naive();
    let date = start.with_timezone(&tz).date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

fn format_event_line(event: &CalendarEvent, tz: Tz) -> String {
    let start = event.start.with_timezone(&tz).format("%H:%M");
    let end = event.end.with_timezone(&tz).format("%H:%M");

    let mut tags = vec![event.category.label().to_string()];
    if !event.extended.squad.is_empty() {
        tags.push(event.extended.squad.to_string());
    }
    if !event.extended.location.is_empty() {
        tags.push(event.extended.location.to_string());
    }

    format!(
        "  {}-{} {} {}",
        start,
        end,
        event.title,
        format!("[{}]", tags.join(" · ")).dimmed()
    )
}
