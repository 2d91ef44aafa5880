//! Athlete roster records as handed to the creation drawers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AGE_GROUP;
use crate::error::{CalendarError, CalendarResult};

/// A roster entry as it comes from the athletes data source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AthleteRecord {
    pub id: Option<serde_json::Value>,
    pub firstname: String,
    pub lastname: String,
    pub position: Option<String>,
    pub position_group: Option<String>,
    pub squad_name: Option<String>,
    pub availability_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Injured,
    Available,
}

/// Normalized athlete used by the drawers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterAthlete {
    pub id: String,
    pub name: String,
    pub position: String,
    pub age_group: String,
    pub status: AvailabilityStatus,
}

impl From<AthleteRecord> for RosterAthlete {
    fn from(record: AthleteRecord) -> Self {
        let id = match record.id {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => {
                format!("{}-{}", record.firstname, record.lastname)
            }
            Some(other) => other.to_string(),
        };

        let position = [record.position, record.position_group]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .unwrap_or_else(|| "—".to_string());

        let age_group = record
            .squad_name
            .as_deref()
            .and_then(age_group_token)
            .unwrap_or(DEFAULT_AGE_GROUP)
            .to_string();

        let status = match record.availability_status.as_deref() {
            Some("Injured") => AvailabilityStatus::Injured,
            _ => AvailabilityStatus::Available,
        };

        RosterAthlete {
            id,
            name: format!("{} {}", record.firstname, record.lastname)
                .trim()
                .to_string(),
            position,
            age_group,
            status,
        }
    }
}

/// First `U<digits>` token in a squad name (e.g. "U18" in "Academy U18 Boys").
fn age_group_token(squad_name: &str) -> Option<&str> {
    let bytes = squad_name.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'U' {
            continue;
        }
        let digits = bytes[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits > 0 {
            return Some(&squad_name[i..i + 1 + digits]);
        }
    }
    None
}

/// Load a JSON array of athlete records and normalize them.
pub fn load_roster(path: &Path) -> CalendarResult<Vec<RosterAthlete>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<AthleteRecord> = serde_json::from_str(&content)
        .map_err(|e| CalendarError::Serialization(format!("{}: {e}", path.display())))?;
    Ok(records.into_iter().map(RosterAthlete::from).collect())
}
