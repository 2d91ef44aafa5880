//! Building new calendar events from user input.
//!
//! Composition is lenient by default: a blank title, a missing start or a
//! duration that is not a positive number of minutes is replaced by a
//! default instead of being rejected. `EventFactory::compose_strict` is the
//! variant that reports bad durations and non-composable kinds as errors.
//!
//! An event whose end would fall past the latest instant chrono can hold is
//! rejected by the strict path. The lenient path instead moves it to the
//! last default-length slot, ending at `DateTime::<Utc>::MAX_UTC`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COACH, DEFAULT_DURATION_MINUTES, DEFAULT_GAME_TITLE, DEFAULT_SESSION_TITLE,
    DEFAULT_SQUAD,
};
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventCategory, ExtendedAttributes, FacetValue};

/// The duration field as the user left it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DurationInput {
    #[default]
    Missing,
    Minutes(i64),
    /// Raw text field contents, parsed on use.
    Text(String),
}

/// Whether a composed event got the duration the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSource {
    Supplied,
    Defaulted,
}

impl DurationInput {
    /// Positive whole minutes, if the input holds any.
    ///
    /// Decimal text is truncated toward zero, so "0.5" counts as non-positive.
    pub fn minutes(&self) -> Option<i64> {
        let minutes = match self {
            DurationInput::Missing => None,
            DurationInput::Minutes(m) => Some(*m),
            DurationInput::Text(text) => parse_minutes(text),
        }?;
        (minutes > 0).then_some(minutes)
    }

    pub fn source(&self) -> DurationSource {
        match self.minutes() {
            Some(_) => DurationSource::Supplied,
            None => DurationSource::Defaulted,
        }
    }

    /// Minutes to use for a new event.
    pub fn resolve(&self) -> i64 {
        self.minutes().unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

fn parse_minutes(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(minutes) = text.parse::<i64>() {
        return Some(minutes);
    }
    text.parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .map(|m| m.trunc() as i64)
}

impl From<i64> for DurationInput {
    fn from(minutes: i64) -> Self {
        DurationInput::Minutes(minutes)
    }
}

impl From<&str> for DurationInput {
    fn from(text: &str) -> Self {
        DurationInput::Text(text.to_string())
    }
}

impl From<String> for DurationInput {
    fn from(text: String) -> Self {
        DurationInput::Text(text)
    }
}

impl<T: Into<DurationInput>> From<Option<T>> for DurationInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl fmt::Display for DurationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationInput::Missing => write!(f, "nothing"),
            DurationInput::Minutes(m) => write!(f, "{m}"),
            DurationInput::Text(text) => write!(f, "\"{text}\""),
        }
    }
}

/// What the creation form collected.
#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub title: Option<String>,
    /// Defaults to the composition time.
    pub start: Option<DateTime<Utc>>,
    pub duration: DurationInput,
    /// Only used for games.
    pub opposition: Option<String>,
    pub squad: Option<String>,
    pub location: Option<String>,
    pub coach: Option<String>,
}

/// Squad, location and coach given to events whose input leaves them blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionDefaults {
    pub squad: String,
    pub location: String,
    pub coach: String,
}

impl Default for CompositionDefaults {
    fn default() -> Self {
        CompositionDefaults {
            squad: DEFAULT_SQUAD.to_string(),
            location: String::new(),
            coach: DEFAULT_COACH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFactory {
    defaults: CompositionDefaults,
}

impl EventFactory {
    pub fn new(defaults: CompositionDefaults) -> Self {
        EventFactory { defaults }
    }

    pub fn defaults(&self) -> &CompositionDefaults {
        &self.defaults
    }

    pub fn compose(&self, category: &EventCategory, input: EventInput) -> CalendarEvent {
        self.compose_at(category, input, Utc::now())
    }

    /// Lenient composition with an explicit creation time.
    ///
    /// Kinds that cannot be created are built as training sessions.
    pub fn compose_at(
        &self,
        category: &EventCategory,
        input: EventInput,
        now: DateTime<Utc>,
    ) -> CalendarEvent {
        let category = if category.is_composable() {
            category.clone()
        } else {
            tracing::debug!(kind = category.code(), "not composable, using training session");
            EventCategory::TrainingSession
        };

        if input.duration.source() == DurationSource::Defaulted {
            tracing::debug!(
                duration = %input.duration,
                "duration is not a positive number of minutes, using {DEFAULT_DURATION_MINUTES}"
            );
        }
        let minutes = input.duration.resolve();
        let start = input.start.unwrap_or(now);

        let (start, end) = match end_after(start, minutes) {
            Some(end) => (start, end),
            None => {
                tracing::warn!(%start, minutes, "event ends past the latest representable time");
                latest_slot()
            }
        };

        self.build(category, input, start, end, now)
    }

    pub fn compose_strict(
        &self,
        category: &EventCategory,
        input: EventInput,
    ) -> CalendarResult<CalendarEvent> {
        self.compose_strict_at(category, input, Utc::now())
    }

    /// Like `compose_at`, but rejects bad durations and non-composable kinds.
    pub fn compose_strict_at(
        &self,
        category: &EventCategory,
        input: EventInput,
        now: DateTime<Utc>,
    ) -> CalendarResult<CalendarEvent> {
        if !category.is_composable() {
            return Err(CalendarError::NotComposable(category.code().to_string()));
        }

        let minutes = input.duration.minutes().ok_or_else(|| {
            CalendarError::Validation(format!(
                "duration must be a positive number of minutes, got {}",
                input.duration
            ))
        })?;

        let start = input.start.unwrap_or(now);
        let end = end_after(start, minutes).ok_or_else(|| {
            CalendarError::Validation(format!(
                "{start} plus {minutes} minutes is past the latest representable time"
            ))
        })?;

        Ok(self.build(category.clone(), input, start, end, now))
    }

    fn build(
        &self,
        category: EventCategory,
        input: EventInput,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> CalendarEvent {
        let opposition = match category {
            EventCategory::Game => non_blank(input.opposition),
            _ => None,
        };

        let title = non_blank(input.title)
            .unwrap_or_else(|| default_title(&category, opposition.as_deref()));

        let extended = ExtendedAttributes {
            squad: FacetValue::new(
                non_blank(input.squad).unwrap_or_else(|| self.defaults.squad.clone()),
            ),
            location: FacetValue::new(
                non_blank(input.location).unwrap_or_else(|| self.defaults.location.clone()),
            ),
            coach: non_blank(input.coach).unwrap_or_else(|| self.defaults.coach.clone()),
            opposition,
        };

        CalendarEvent {
            id: generate_id(&category, now),
            title,
            start,
            end,
            styling: Some(category.styling()),
            category,
            extended,
        }
    }
}

/// Compose with the built-in defaults.
pub fn compose_event(category: &EventCategory, input: EventInput) -> CalendarEvent {
    EventFactory::default().compose(category, input)
}

/// Copy an event under a fresh id.
pub fn duplicate(event: &CalendarEvent, now: DateTime<Utc>) -> CalendarEvent {
    let mut id = generate_id(&event.category, now);
    if id == event.id {
        id.push_str("-copy");
    }
    CalendarEvent {
        id,
        ..event.clone()
    }
}

fn end_after(start: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    Duration::try_minutes(minutes).and_then(|length| start.checked_add_signed(length))
}

fn latest_slot() -> (DateTime<Utc>, DateTime<Utc>) {
    let end = DateTime::<Utc>::MAX_UTC;
    (end - Duration::minutes(DEFAULT_DURATION_MINUTES), end)
}

fn generate_id(category: &EventCategory, now: DateTime<Utc>) -> String {
    format!("{}-{}", category.id_prefix(), now.timestamp_millis())
}

fn default_title(category: &EventCategory, opposition: Option<&str>) -> String {
    match (category, opposition) {
        (EventCategory::Game, Some(opposition)) => format!("vs {opposition}"),
        (EventCategory::Game, None) => DEFAULT_GAME_TITLE.to_string(),
        _ => DEFAULT_SESSION_TITLE.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 15, 0, 0).unwrap()
    }

    fn input(duration: DurationInput) -> EventInput {
        EventInput {
            start: Some(kickoff()),
            duration,
            ..Default::default()
        }
    }

    fn timed(minutes: i64) -> EventInput {
        input(DurationInput::Minutes(minutes))
    }

    fn compose(category: EventCategory, input: EventInput) -> CalendarEvent {
        EventFactory::default().compose_at(&category, input, now())
    }

    // --- duration ---

    #[test]
    fn positive_durations_are_kept_exactly() {
        for minutes in [1, 45, 90, 120, 600] {
            let event = compose(EventCategory::TrainingSession, timed(minutes));
            assert_eq!(event.end - event.start, Duration::minutes(minutes));
        }
    }

    #[test]
    fn non_positive_durations_become_default() {
        for minutes in [0, -1, -90] {
            let event = compose(EventCategory::TrainingSession, timed(minutes));
            assert_eq!(event.end - event.start, Duration::minutes(90));
        }
    }

    #[test]
    fn non_numeric_durations_become_default() {
        for text in ["", "abc", "  ", "NaN", "inf", "0.5"] {
            let event = compose(EventCategory::Game, input(text.into()));
            assert_eq!(event.end - event.start, Duration::minutes(90), "input {text:?}");
        }
    }

    #[test]
    fn missing_duration_becomes_default() {
        let event = compose(EventCategory::Game, input(DurationInput::Missing));
        assert_eq!(event.duration(), Duration::minutes(90));
    }

    #[test]
    fn very_long_durations_are_kept_exactly() {
        let event = compose(EventCategory::TrainingSession, timed(3_000_000_000));
        assert_eq!(event.duration(), Duration::minutes(3_000_000_000));
        assert_eq!(DurationInput::from("3000000000").minutes(), Some(3_000_000_000));
    }

    #[test]
    fn end_past_latest_time_moves_to_last_slot() {
        let latest = DateTime::<Utc>::MAX_UTC;
        for start in [latest - Duration::minutes(10), latest] {
            let event = compose(
                EventCategory::Game,
                EventInput {
                    start: Some(start),
                    ..timed(60)
                },
            );
            assert_eq!(event.end, latest);
            assert_eq!(event.duration(), Duration::minutes(90));
            assert!(event.end > event.start);
        }
    }

    #[test]
    fn unrepresentable_duration_moves_to_last_slot() {
        let event = compose(EventCategory::Game, timed(i64::MAX));
        assert_eq!(event.end, DateTime::<Utc>::MAX_UTC);
        assert!(event.end > event.start);
    }

    #[test]
    fn strict_rejects_end_past_latest_time() {
        let factory = EventFactory::default();
        let late = EventInput {
            start: Some(DateTime::<Utc>::MAX_UTC - Duration::minutes(10)),
            ..timed(60)
        };
        let result = factory.compose_strict_at(&EventCategory::Game, late, now());
        assert!(matches!(result, Err(CalendarError::Validation(_))));

        let result = factory.compose_strict_at(&EventCategory::Game, timed(i64::MAX), now());
        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(DurationInput::from(" 60 ").minutes(), Some(60));
        assert_eq!(DurationInput::from("45.9").minutes(), Some(45));
        assert_eq!(DurationInput::from("-5").minutes(), None);
    }

    #[test]
    fn duration_source_distinguishes_defaulted_input() {
        assert_eq!(DurationInput::Minutes(90).source(), DurationSource::Supplied);
        assert_eq!(DurationInput::from("x").source(), DurationSource::Defaulted);
        assert_eq!(DurationInput::Missing.source(), DurationSource::Defaulted);
    }

    #[test]
    fn optional_duration_converts() {
        assert_eq!(DurationInput::from(None::<String>), DurationInput::Missing);
        assert_eq!(
            DurationInput::from(Some("30".to_string())),
            DurationInput::Text("30".into())
        );
    }

    // --- titles ---

    #[test]
    fn blank_session_title_uses_default() {
        let event = compose(EventCategory::TrainingSession, timed(60));
        assert_eq!(event.title, "New session");
    }

    #[test]
    fn blank_game_title_uses_opposition() {
        let event = compose(
            EventCategory::Game,
            EventInput {
                title: Some("   ".into()),
                opposition: Some("Rivals FC".into()),
                ..timed(90)
            },
        );
        assert_eq!(event.title, "vs Rivals FC");
        assert_eq!(event.extended.opposition.as_deref(), Some("Rivals FC"));
    }

    #[test]
    fn blank_game_title_without_opposition() {
        let event = compose(EventCategory::Game, timed(90));
        assert_eq!(event.title, "New game");
        assert_eq!(event.extended.opposition, None);
    }

    #[test]
    fn explicit_title_wins() {
        let event = compose(
            EventCategory::Game,
            EventInput {
                title: Some("Cup final".into()),
                opposition: Some("Rivals FC".into()),
                ..timed(90)
            },
        );
        assert_eq!(event.title, "Cup final");
    }

    #[test]
    fn sessions_ignore_opposition() {
        let event = compose(
            EventCategory::TrainingSession,
            EventInput {
                opposition: Some("Rivals FC".into()),
                ..timed(90)
            },
        );
        assert_eq!(event.extended.opposition, None);
        assert_eq!(event.title, "New session");
    }

    // --- other fields ---

    #[test]
    fn id_uses_category_prefix_and_creation_time() {
        let session = compose(EventCategory::TrainingSession, timed(90));
        let game = compose(EventCategory::Game, timed(90));
        assert_eq!(session.id, format!("session-{}", now().timestamp_millis()));
        assert_eq!(game.id, format!("game-{}", now().timestamp_millis()));
    }

    #[test]
    fn missing_start_defaults_to_now() {
        let event = compose(EventCategory::TrainingSession, EventInput::default());
        assert_eq!(event.start, now());
        assert_eq!(event.end, now() + Duration::minutes(90));
    }

    #[test]
    fn attributes_fall_back_to_defaults() {
        let event = compose(EventCategory::TrainingSession, timed(90));
        assert_eq!(event.extended.squad.as_str(), "First Team");
        assert_eq!(event.extended.location.as_str(), "");
        assert_eq!(event.extended.coach, "Coach");
        assert_eq!(event.styling, Some(EventCategory::TrainingSession.styling()));
    }

    #[test]
    fn attributes_from_input_and_configured_defaults() {
        let factory = EventFactory::new(CompositionDefaults {
            squad: "U21".into(),
            location: "Main Pitch".into(),
            coach: "Head Coach".into(),
        });
        let event = factory.compose_at(
            &EventCategory::TrainingSession,
            EventInput {
                location: Some("Gym".into()),
                ..timed(90)
            },
            now(),
        );
        assert_eq!(event.extended.squad.as_str(), "U21");
        assert_eq!(event.extended.location.as_str(), "Gym");
        assert_eq!(event.extended.coach, "Head Coach");
    }

    #[test]
    fn lenient_factory_builds_sessions_for_other_kinds() {
        let event = compose(EventCategory::TestSession, timed(90));
        assert_eq!(event.category, EventCategory::TrainingSession);
    }

    // --- strict ---

    #[test]
    fn strict_rejects_bad_durations() {
        let factory = EventFactory::default();
        for duration in [
            DurationInput::Missing,
            DurationInput::Minutes(0),
            DurationInput::Minutes(-3),
            DurationInput::from("soon"),
        ] {
            let result = factory.compose_strict_at(&EventCategory::Game, input(duration), now());
            assert!(matches!(result, Err(CalendarError::Validation(_))));
        }
    }

    #[test]
    fn strict_rejects_non_composable_kinds() {
        let result = EventFactory::default().compose_strict_at(
            &EventCategory::SeriesEvent,
            timed(60),
            now(),
        );
        assert!(
            matches!(result, Err(CalendarError::NotComposable(code)) if code == "SERIES_EVENT")
        );
    }

    #[test]
    fn strict_accepts_valid_input() {
        let event = EventFactory::default()
            .compose_strict_at(&EventCategory::Game, input("75".into()), now())
            .unwrap();
        assert_eq!(event.duration(), Duration::minutes(75));
    }

    // --- duplicate ---

    #[test]
    fn duplicate_gets_fresh_id() {
        let original = compose(EventCategory::Game, timed(90));
        let later = now() + Duration::seconds(5);
        let copy = duplicate(&original, later);
        assert_eq!(copy.id, format!("game-{}", later.timestamp_millis()));
        assert_eq!(copy.title, original.title);
        assert_eq!(copy.start, original.start);
    }

    #[test]
    fn duplicate_in_same_millisecond_still_differs() {
        let original = compose(EventCategory::Game, timed(90));
        let copy = duplicate(&original, now());
        assert_ne!(copy.id, original.id);
    }
}
