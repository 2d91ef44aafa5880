use anyhow::{Context, Result};
use chrono::{DateTime, Month, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use squadcal_core::EventCategory;
use squadcal_core::compose::{DurationInput, DurationSource, EventInput};
use squadcal_core::config::CalendarConfig;
use squadcal_core::constants::DEFAULT_DURATION_MINUTES;

#[derive(Args)]
pub struct NewArgs {
    #[arg(value_enum)]
    kind: Kind,

    #[arg(short, long)]
    title: Option<String>,

    /// Start date/time (e.g. "tomorrow 6pm", "2026-03-20T15:00:00Z"); defaults to now
    #[arg(short, long)]
    start: Option<String>,

    /// Duration in minutes
    #[arg(short, long, allow_hyphen_values = true)]
    duration: Option<String>,

    /// Opposing team (games only)
    #[arg(long)]
    opposition: Option<String>,

    #[arg(long)]
    squad: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    coach: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Session,
    Game,
}

impl From<Kind> for EventCategory {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Session => EventCategory::TrainingSession,
            Kind::Game => EventCategory::Game,
        }
    }
}

pub fn run(config: &CalendarConfig, args: NewArgs) -> Result<()> {
    let tz = config.tz()?;

    let start = args
        .start
        .as_deref()
        .map(|s| parse_start(s, tz))
        .transpose()?;

    let duration = DurationInput::from(args.duration);
    let coerced =
        duration != DurationInput::Missing && duration.source() == DurationSource::Defaulted;

    let input = EventInput {
        title: args.title,
        start,
        duration: duration.clone(),
        opposition: args.opposition,
        squad: args.squad,
        location: args.location,
        coach: args.coach,
    };

    let category = EventCategory::from(args.kind);
    let factory = config.factory();
    let event = if config.strict_durations {
        factory.compose_strict(&category, input)?
    } else {
        factory.compose(&category, input)
    };

    if coerced && !config.strict_durations {
        let note = format!(
            "Duration {} is not a positive number of minutes, using {}",
            duration, DEFAULT_DURATION_MINUTES
        );
        eprintln!("  {}", note.yellow());
    }

    println!("{}", serde_json::to_string_pretty(&event)?);
    eprintln!("{}", format!("  Created: {}", event.title).green());

    Ok(())
}

/// RFC 3339 timestamps are taken as-is; anything else is read as natural
/// language in the configured time zone.
fn parse_start(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = parse_datetime(input)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("\"{}\" does not exist in {}", input, tz))
}

/// Spell out short weekday and month names ("sat", "Mar") so fuzzydate
/// can read them.
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            if let Ok(day) = word.parse::<Weekday>() {
                weekday_name(day).to_string()
            } else if let Ok(month) = word.parse::<Month>() {
                month.name().to_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parse a natural language date/time string ("sat 3pm", "tomorrow 18:00").
fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    // --- expand_abbreviations ---

    #[test]
    fn matchday_shorthand_is_spelled_out() {
        assert_eq!(expand_abbreviations("Sat 15:00"), "saturday 15:00");
        assert_eq!(expand_abbreviations("next wed 6pm"), "next wednesday 6pm");
    }

    #[test]
    fn fixture_dates_get_full_month_names() {
        assert_eq!(expand_abbreviations("7 MAR 18:00"), "7 march 18:00");
        assert_eq!(expand_abbreviations("aug 12 10am"), "august 12 10am");
    }

    #[test]
    fn full_names_and_other_words_pass_through() {
        assert_eq!(expand_abbreviations("Tomorrow 6pm"), "tomorrow 6pm");
        assert_eq!(expand_abbreviations("friday may 1"), "friday may 1");
    }

    // --- parse_start ---

    #[test]
    fn rfc3339_start_is_used_as_is() {
        let start = parse_start("2026-03-20T15:00:00+02:00", Tz::UTC).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 20, 13, 0, 0).unwrap());
    }

    #[test]
    fn natural_language_start_uses_timezone() {
        let utc = parse_start("tomorrow 3pm", Tz::UTC).unwrap();
        let plus_two = parse_start("tomorrow 3pm", Tz::Etc__GMTMinus2).unwrap();
        assert_eq!(utc.hour(), 15);
        assert_eq!(plus_two.hour(), 13);
        assert_eq!(utc - plus_two, chrono::Duration::hours(2));
    }

    #[test]
    fn unparsable_start_is_an_error() {
        assert!(parse_start("not a date at all xyz", Tz::UTC).is_err());
    }

    #[test]
    fn kinds_map_to_composable_categories() {
        assert!(EventCategory::from(Kind::Session).is_composable());
        assert_eq!(EventCategory::from(Kind::Game), EventCategory::Game);
    }
}
