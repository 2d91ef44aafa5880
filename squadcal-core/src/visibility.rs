//! Deciding which events pass the active filters.

use crate::event::CalendarEvent;
use crate::filter::{Facet, FilterSelection};

/// The event attribute a facet filters on.
///
/// Types match against the category's wire code.
pub fn facet_attribute(event: &CalendarEvent, facet: Facet) -> &str {
    match facet {
        Facet::Squads => event.extended.squad.as_str(),
        Facet::Types => event.category.code(),
        Facet::Locations => event.extended.location.as_str(),
    }
}

/// An empty selection set places no constraint on its facet; a non-empty one
/// requires the event's attribute to be a member.
pub fn is_visible(event: &CalendarEvent, selection: &FilterSelection) -> bool {
    Facet::ALL.iter().all(|&facet| {
        let selected = selection.get(facet);
        selected.is_empty() || selected.contains(facet_attribute(event, facet))
    })
}

/// Events passing `selection`, in their original order.
pub fn visible_events<'a>(
    events: &'a [CalendarEvent],
    selection: &FilterSelection,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| is_visible(event, selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventCategory, ExtendedAttributes, FacetValue};
    use crate::filter::SelectionSet;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, category: EventCategory, squad: &str, location: &str) -> CalendarEvent {
        let start = Utc.with_ymd_and_hms(2026, 3, 3, 10, 0, 0).unwrap();
        CalendarEvent {
            id: id.into(),
            title: id.into(),
            start,
            end: start + chrono::Duration::minutes(90),
            category,
            styling: None,
            extended: ExtendedAttributes {
                squad: FacetValue::new(squad),
                location: FacetValue::new(location),
                ..Default::default()
            },
        }
    }

    fn set(values: &[&str]) -> SelectionSet {
        values.iter().copied().collect()
    }

    #[test]
    fn empty_selection_shows_everything() {
        let selection = FilterSelection::default();
        for e in [
            event("a", EventCategory::TrainingSession, "U21", "Gym"),
            event("b", EventCategory::Other(String::new()), "", ""),
            event("c", EventCategory::SeriesEvent, "U18", "Main Pitch"),
        ] {
            assert!(is_visible(&e, &selection));
        }
    }

    #[test]
    fn squad_filter() {
        let selection = FilterSelection {
            squads: set(&["U21"]),
            ..Default::default()
        };
        assert!(is_visible(&event("a", EventCategory::Game, "U21", ""), &selection));
        assert!(!is_visible(&event("b", EventCategory::Game, "U18", ""), &selection));
    }

    #[test]
    fn single_facet_excludes_non_members() {
        let u21_gym = event("a", EventCategory::TrainingSession, "U21", "Gym");

        let by_type = FilterSelection {
            types: set(&["GAME"]),
            ..Default::default()
        };
        let by_location = FilterSelection {
            locations: set(&["Main Pitch"]),
            ..Default::default()
        };
        assert!(!is_visible(&u21_gym, &by_type));
        assert!(!is_visible(&u21_gym, &by_location));
    }

    #[test]
    fn facets_combine_with_and() {
        let selection = FilterSelection {
            squads: set(&["U21", "U18"]),
            types: set(&["TRAINING_SESSION"]),
            locations: SelectionSet::default(),
        };
        assert!(is_visible(&event("a", EventCategory::TrainingSession, "U18", "Gym"), &selection));
        assert!(!is_visible(&event("b", EventCategory::Game, "U18", "Gym"), &selection));
        assert!(!is_visible(
            &event("c", EventCategory::TrainingSession, "First Team", "Gym"),
            &selection
        ));
    }

    #[test]
    fn empty_location_does_not_match_location_filter() {
        let selection = FilterSelection {
            locations: set(&["Gym"]),
            ..Default::default()
        };
        assert!(!is_visible(&event("a", EventCategory::Game, "U21", ""), &selection));
    }

    #[test]
    fn visible_events_keeps_order() {
        let events = vec![
            event("a", EventCategory::Game, "U21", ""),
            event("b", EventCategory::Game, "U18", ""),
            event("c", EventCategory::TrainingSession, "U21", ""),
        ];
        let selection = FilterSelection {
            squads: set(&["U21"]),
            ..Default::default()
        };
        let ids: Vec<_> = visible_events(&events, &selection)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
