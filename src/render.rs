//! Terminal output for event details and roster entries.

use owo_colors::OwoColorize;
use squadcal_core::presenter::{EventAction, EventDetails};
use squadcal_core::roster::{AvailabilityStatus, RosterAthlete};

/// Colored rendering for terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventDetails {
    fn render(&self) -> String {
        let mut lines = vec![
            self.title.bold().to_string(),
            self.date_label.dimmed().to_string(),
            self.time_range.dimmed().to_string(),
            String::new(),
            self.category_label.clone(),
        ];

        if let Some(squad) = &self.squad {
            lines.push(squad.clone());
        }
        if let Some(recurrence) = &self.recurrence {
            lines.push(format!("↻ {}", recurrence).dimmed().to_string());
        }

        let actions: Vec<_> = EventAction::ALL.iter().map(|a| a.label()).collect();
        lines.push(String::new());
        lines.push(actions.join(" | ").dimmed().to_string());

        lines.join("\n")
    }
}

impl Render for AvailabilityStatus {
    fn render(&self) -> String {
        match self {
            AvailabilityStatus::Injured => "injured".red().to_string(),
            AvailabilityStatus::Available => "available".green().to_string(),
        }
    }
}

impl Render for RosterAthlete {
    fn render(&self) -> String {
        format!(
            "{:<24} {:<14} {:<5} {} {}",
            self.name,
            self.position,
            self.age_group,
            self.status.render(),
            format!("({})", self.id).dimmed()
        )
    }
}
