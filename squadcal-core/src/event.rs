//! Calendar event types.
//!
//! Events arrive from two places: the composition flow in `compose`, and
//! pre-existing data loaded by the presentation layer. Both end up as the
//! same `CalendarEvent`, with squad and location normalized to plain
//! strings at deserialization time.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_DURATION_MINUTES, EVENT_TEXT_COLOR};
use crate::error::{CalendarError, CalendarResult};

/// A calendar entry (training session, game, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub category: EventCategory,
    /// Colors are fixed per category, so a record without styling gets the category's.
    #[serde(default)]
    pub styling: Option<EventStyling>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended: ExtendedAttributes,
}

/// Category-specific metadata attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedAttributes {
    pub squad: FacetValue,
    pub location: FacetValue,
    #[serde(deserialize_with = "null_as_default")]
    pub coach: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opposition: Option<String>,
}

/// Background, border and text color tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStyling {
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
}

impl EventStyling {
    fn chart(token: &str) -> Self {
        let color = format!("var(--color-{token})");
        EventStyling {
            background_color: color.clone(),
            border_color: color,
            text_color: EVENT_TEXT_COLOR.to_string(),
        }
    }
}

/// The fixed set of event kinds.
///
/// Only `TrainingSession` and `Game` can be composed; the others come from
/// existing data. `Other` keeps whatever unknown code the data carried (empty
/// when the record had none).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EventCategory {
    TrainingSession,
    Game,
    TestSession,
    RecurringEvent,
    SeriesEvent,
    Other(String),
}

impl EventCategory {
    pub fn from_code(code: &str) -> Self {
        match code {
            "TRAINING_SESSION" => EventCategory::TrainingSession,
            "GAME" => EventCategory::Game,
            "TEST_SESSION" => EventCategory::TestSession,
            "RECURRING_EVENT" => EventCategory::RecurringEvent,
            "SERIES_EVENT" => EventCategory::SeriesEvent,
            other => EventCategory::Other(other.to_string()),
        }
    }

    /// Wire code, also the value matched by the "types" filter facet.
    pub fn code(&self) -> &str {
        match self {
            EventCategory::TrainingSession => "TRAINING_SESSION",
            EventCategory::Game => "GAME",
            EventCategory::TestSession => "TEST_SESSION",
            EventCategory::RecurringEvent => "RECURRING_EVENT",
            EventCategory::SeriesEvent => "SERIES_EVENT",
            EventCategory::Other(raw) => raw,
        }
    }

    /// Human label shown in event details.
    pub fn label(&self) -> &str {
        match self {
            EventCategory::TrainingSession => "Training Session",
            EventCategory::Game => "Game",
            EventCategory::TestSession => "Test Session",
            EventCategory::RecurringEvent => "Recurring Event",
            EventCategory::SeriesEvent => "Series Event",
            EventCategory::Other(raw) if raw.is_empty() => "Event",
            EventCategory::Other(raw) => raw,
        }
    }

    pub fn is_composable(&self) -> bool {
        matches!(self, EventCategory::TrainingSession | EventCategory::Game)
    }

    /// Prefix used when generating ids for this category.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EventCategory::TrainingSession => "session",
            EventCategory::Game => "game",
            _ => "event",
        }
    }

    pub fn styling(&self) -> EventStyling {
        match self {
            EventCategory::TrainingSession => EventStyling::chart("chart-1"),
            EventCategory::TestSession => EventStyling::chart("chart-2"),
            EventCategory::RecurringEvent => EventStyling::chart("chart-3"),
            EventCategory::Game => EventStyling::chart("chart-4"),
            EventCategory::SeriesEvent => EventStyling::chart("chart-5"),
            EventCategory::Other(_) => EventStyling::chart("neutral"),
        }
    }
}

impl Default for EventCategory {
    fn default() -> Self {
        EventCategory::Other(String::new())
    }
}

impl From<String> for EventCategory {
    fn from(code: String) -> Self {
        EventCategory::from_code(&code)
    }
}

impl From<Option<String>> for EventCategory {
    fn from(code: Option<String>) -> Self {
        code.map(EventCategory::from).unwrap_or_default()
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        category.code().to_string()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A squad or location value.
///
/// Source data carries these either as a plain string or as an object with a
/// `name` field; both collapse into this one string form when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FacetValue(String);

impl FacetValue {
    pub fn new(value: impl Into<String>) -> Self {
        FacetValue(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FacetValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Named { name: Option<String> },
        }

        let value = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Plain(s)) => s,
            Some(Raw::Named { name }) => name.unwrap_or_default(),
            None => String::new(),
        };
        Ok(FacetValue(value))
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        FacetValue(value.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(value: String) -> Self {
        FacetValue(value)
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl CalendarEvent {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn styling(&self) -> EventStyling {
        self.styling
            .clone()
            .unwrap_or_else(|| self.category.styling())
    }

    /// Repair an event whose end does not come after its start by giving it
    /// the default duration.
    ///
    /// Fails when the repaired end would be past the latest representable time.
    pub fn normalize_span(&mut self) -> CalendarResult<()> {
        if self.end > self.start {
            return Ok(());
        }

        tracing::warn!(
            id = %self.id,
            "event ends before it starts, applying default duration"
        );
        self.end = self
            .start
            .checked_add_signed(Duration::minutes(DEFAULT_DURATION_MINUTES))
            .ok_or_else(|| {
                CalendarError::Validation(format!(
                    "event '{}' starts too late to be given a duration",
                    self.id
                ))
            })?;
        Ok(())
    }

    /// Load a JSON array of events, normalizing each one.
    pub fn load_all(path: &Path) -> CalendarResult<Vec<CalendarEvent>> {
        let content = std::fs::read_to_string(path)?;
        let mut events: Vec<CalendarEvent> = serde_json::from_str(&content).map_err(|e| {
            CalendarError::Serialization(format!("{}: {e}", path.display()))
        })?;

        for event in &mut events {
            event.normalize_span()?;
        }

        Ok(events)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
