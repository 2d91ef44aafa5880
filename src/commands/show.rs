use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use squadcal_core::CalendarEvent;
use squadcal_core::compose::duplicate;
use squadcal_core::config::CalendarConfig;
use squadcal_core::presenter::{ActionHandler, EventAction, EventPresenter};

use crate::render::Render;

pub fn run(
    config: &CalendarConfig,
    id: &str,
    events: Option<PathBuf>,
    action: Option<EventAction>,
) -> Result<()> {
    let tz = config.tz()?;
    let events = super::load_events(config, events)?;

    let event = events.iter().find(|e| e.id == id).ok_or_else(|| {
        anyhow::anyhow!("Event '{}' not found ({} events loaded)", id, events.len())
    })?;

    let presenter = EventPresenter::new(event, tz);
    println!("{}", presenter.details().render());

    if let Some(action) = action {
        let mut handler = PrintActions {
            events: &events,
            result: Ok(()),
        };
        presenter.dispatch(action, &mut handler);
        handler.result?;
    }

    Ok(())
}

/// Answers event actions by printing the resulting records as JSON. Nothing
/// is written back to the events file.
struct PrintActions<'a> {
    events: &'a [CalendarEvent],
    result: Result<()>,
}

impl PrintActions<'_> {
    fn respond(&self, action: EventAction, event: &CalendarEvent) -> Result<()> {
        println!();
        println!("{}", action.label().bold());

        let json = match action {
            EventAction::Edit | EventAction::MoreDetails => serde_json::to_string_pretty(event)?,
            EventAction::Delete => {
                let remaining: Vec<&CalendarEvent> =
                    self.events.iter().filter(|e| e.id != event.id).collect();
                serde_json::to_string_pretty(&remaining)?
            }
            EventAction::Duplicate => serde_json::to_string_pretty(&duplicate(event, Utc::now()))?,
        };
        println!("{json}");

        Ok(())
    }
}

impl ActionHandler for PrintActions<'_> {
    fn handle(&mut self, action: EventAction, event: &CalendarEvent) {
        self.result = self.respond(action, event);
    }
}
