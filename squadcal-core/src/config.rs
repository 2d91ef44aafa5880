//! squadcal configuration at ~/.config/squadcal/config.toml

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::compose::{CompositionDefaults, EventFactory};
use crate::error::{CalendarError, CalendarResult};
use crate::filter::AvailableOptions;

static DEFAULT_TIMEZONE: &str = "UTC";

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// IANA zone used when showing and entering times.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Reject bad durations instead of replacing them with the default.
    #[serde(default)]
    pub strict_durations: bool,

    #[serde(default)]
    pub defaults: CompositionDefaults,

    /// Filter options. Facets left empty are filled from the loaded events.
    #[serde(default)]
    pub catalog: AvailableOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            timezone: default_timezone(),
            strict_durations: false,
            defaults: CompositionDefaults::default(),
            catalog: AvailableOptions::default(),
            events_file: None,
        }
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("squadcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file first
    /// if there is none.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (if it exists), then `SQUADCAL_*` environment
    /// variables, e.g. `SQUADCAL_TIMEZONE` or `SQUADCAL_DEFAULTS__SQUAD`.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("SQUADCAL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn tz(&self) -> CalendarResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| CalendarError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Configured events file with `~` expanded.
    pub fn events_path(&self) -> Option<PathBuf> {
        self.events_file.as_ref().map(|p| {
            PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned())
        })
    }

    pub fn factory(&self) -> EventFactory {
        EventFactory::new(self.defaults.clone())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# squadcal configuration

# Time zone for showing and entering event times:
# timezone = \"{DEFAULT_TIMEZONE}\"

# Reject non-positive or non-numeric durations instead of using 90 minutes:
# strict_durations = false

# Events file read by `squadcal list` and `squadcal show`:
# events_file = \"~/squadcal/events.json\"

# Values given to new events when left blank:
# [defaults]
# squad = \"First Team\"
# location = \"\"
# coach = \"Coach\"

# Filter options (taken from the events file when empty):
# [catalog]
# squads = [\"First Team\", \"U21\", \"U18\"]
# types = [\"TRAINING_SESSION\", \"GAME\"]
# locations = [\"Main Pitch\", \"Gym\"]
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
