use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use squadcal_core::config::CalendarConfig;
use squadcal_core::filter::{AvailableOptions, Facet, FilterStore};
use squadcal_core::search::FacetSearch;

pub fn run(
    config: &CalendarConfig,
    facet: Facet,
    search: Option<String>,
    selected: Vec<String>,
    events: Option<PathBuf>,
) -> Result<()> {
    let events = super::load_events_if_any(config, events)?;
    let store = selected_store(config.catalog.clone().or_from_events(&events), facet, &selected)?;

    let mut facet_search = FacetSearch::default();
    if let Some(term) = search {
        facet_search.set_term(facet, term);
    }

    for line in option_lines(&store, &facet_search, facet) {
        println!("{line}");
    }

    Ok(())
}

/// A store over `available` with `selected` already chosen for `facet`.
fn selected_store(
    available: AvailableOptions,
    facet: Facet,
    selected: &[String],
) -> Result<FilterStore> {
    let mut store = FilterStore::new(available);
    super::list::select(&mut store, facet, false, selected)?;
    Ok(store)
}

fn option_lines(store: &FilterStore, search: &FacetSearch, facet: Facet) -> Vec<String> {
    let count = store.count(facet);
    let header = if count > 0 {
        format!("{} ({} selected)", facet.label().bold(), count)
    } else {
        facet.label().bold().to_string()
    };

    let mut lines = vec![header];
    let listed = search.options(facet, store.options());

    if listed.is_empty() {
        lines.push(format!("  {}", "No results".dimmed()));
    }

    for option in listed {
        let mark = if store.is_selected(facet, option) {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        lines.push(format!("  {mark} {option}"));
    }

    lines
}
