//! Filter selection for the calendar's filter panel.
//!
//! Each facet (squads, types, locations) has its own selection set, always a
//! subset of that facet's catalog of available options. The store mutates
//! the selection only through toggle, select-all and clear, and hands every
//! resulting snapshot to its owner. It never looks at events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

/// One independent filtering dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Squads,
    Types,
    Locations,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Squads, Facet::Types, Facet::Locations];

    /// Section title in the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Squads => "Squads",
            Facet::Types => "Types",
            Facet::Locations => "Location",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of selected values for one facet.
///
/// Iterates in the order values were added. Equality ignores that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn toggle(&mut self, value: &str) {
        if let Some(pos) = self.0.iter().position(|v| v == value) {
            self.0.remove(pos);
        } else {
            self.0.push(value.to_string());
        }
    }

    fn retain_in(&mut self, catalog: &[String]) {
        self.0.retain(|v| catalog.contains(v));
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl Eq for SelectionSet {}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::default();
        for value in iter {
            let value = value.into();
            if !set.contains(&value) {
                set.0.push(value);
            }
        }
        set
    }
}

impl From<Vec<String>> for SelectionSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<SelectionSet> for Vec<String> {
    fn from(set: SelectionSet) -> Self {
        set.0
    }
}

/// The active filters across all facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub squads: SelectionSet,
    pub types: SelectionSet,
    pub locations: SelectionSet,
}

impl FilterSelection {
    pub fn get(&self, facet: Facet) -> &SelectionSet {
        match facet {
            Facet::Squads => &self.squads,
            Facet::Types => &self.types,
            Facet::Locations => &self.locations,
        }
    }

    fn get_mut(&mut self, facet: Facet) -> &mut SelectionSet {
        match facet {
            Facet::Squads => &mut self.squads,
            Facet::Types => &mut self.types,
            Facet::Locations => &mut self.locations,
        }
    }

    /// True when no facet filters anything.
    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&facet| self.get(facet).is_empty())
    }
}

/// Catalog of values offered for selection, per facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableOptions {
    pub squads: Vec<String>,
    pub types: Vec<String>,
    pub locations: Vec<String>,
}

impl AvailableOptions {
    pub fn catalog(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Squads => &self.squads,
            Facet::Types => &self.types,
            Facet::Locations => &self.locations,
        }
    }

    fn catalog_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Squads => &mut self.squads,
            Facet::Types => &mut self.types,
            Facet::Locations => &mut self.locations,
        }
    }

    /// Distinct non-empty attribute values of `events`, in first-seen order.
    pub fn from_events(events: &[CalendarEvent]) -> Self {
        let mut options = AvailableOptions::default();
        for event in events {
            for facet in Facet::ALL {
                let value = crate::visibility::facet_attribute(event, facet);
                let catalog = options.catalog_mut(facet);
                if !value.is_empty() && !catalog.iter().any(|v| v == value) {
                    catalog.push(value.to_string());
                }
            }
        }
        options
    }

    /// Fill facets that have no configured catalog from `events`.
    pub fn or_from_events(mut self, events: &[CalendarEvent]) -> Self {
        let derived = AvailableOptions::from_events(events);
        for facet in Facet::ALL {
            if self.catalog(facet).is_empty() {
                *self.catalog_mut(facet) = derived.catalog(facet).to_vec();
            }
        }
        self
    }
}

type ChangeListener = Box<dyn FnMut(&FilterSelection)>;

/// Single-owner mutable filter state.
pub struct FilterStore {
    options: AvailableOptions,
    selection: FilterSelection,
    on_change: Option<ChangeListener>,
}

impl FilterStore {
    /// A store with nothing selected.
    pub fn new(options: AvailableOptions) -> Self {
        FilterStore {
            options,
            selection: FilterSelection::default(),
            on_change: None,
        }
    }

    /// Rehydrate from a caller-supplied selection, dropping values that are
    /// not in the corresponding catalog.
    pub fn with_selection(options: AvailableOptions, initial: FilterSelection) -> Self {
        let mut selection = initial;
        for facet in Facet::ALL {
            let set = selection.get_mut(facet);
            let before = set.len();
            set.retain_in(options.catalog(facet));
            if set.len() != before {
                tracing::warn!(
                    facet = %facet,
                    dropped = before - set.len(),
                    "initial selection had values outside the catalog"
                );
            }
        }

        FilterStore {
            options,
            selection,
            on_change: None,
        }
    }

    /// Register the owner's callback, replacing any previous one.
    pub fn on_change(mut self, listener: impl FnMut(&FilterSelection) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn options(&self) -> &AvailableOptions {
        &self.options
    }

    /// Number of selected values in a facet (the badge count).
    pub fn count(&self, facet: Facet) -> usize {
        self.selection.get(facet).len()
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.selection.get(facet).contains(value)
    }

    /// Flip membership of `value`. Values missing from the catalog are ignored.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> &FilterSelection {
        if self.options.catalog(facet).iter().any(|v| v == value) {
            self.selection.get_mut(facet).toggle(value);
        } else {
            tracing::warn!(facet = %facet, value, "ignoring toggle of value not in catalog");
        }
        self.notify()
    }

    /// Select every value in the facet's catalog.
    pub fn select_all(&mut self, facet: Facet) -> &FilterSelection {
        *self.selection.get_mut(facet) = self.options.catalog(facet).iter().cloned().collect();
        self.notify()
    }

    pub fn clear(&mut self, facet: Facet) -> &FilterSelection {
        *self.selection.get_mut(facet) = SelectionSet::default();
        self.notify()
    }

    /// Replace a facet's catalog, pruning selected values it no longer has.
    pub fn set_catalog(&mut self, facet: Facet, values: Vec<String>) -> &FilterSelection {
        *self.options.catalog_mut(facet) = values;
        self.selection
            .get_mut(facet)
            .retain_in(self.options.catalog(facet));
        self.notify()
    }

    fn notify(&mut self) -> &FilterSelection {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.selection);
        }
        &self.selection
    }
}

impl fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStore")
            .field("options", &self.options)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
