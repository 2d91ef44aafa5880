//! Narrowing the facet options offered in the filter panel.
//!
//! Searching only changes which options are listed; it never touches the
//! filter selection.

use crate::filter::{AvailableOptions, Facet};

/// Catalog entries containing `term`, ignoring case, in catalog order.
pub fn filter_options<'a, S: AsRef<str>>(catalog: &'a [S], term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    catalog
        .iter()
        .map(|option| option.as_ref())
        .filter(|option| needle.is_empty() || option.to_lowercase().contains(&needle))
        .collect()
}

/// Search terms typed into each facet's search box while the panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSearch {
    squads: String,
    types: String,
    locations: String,
}

impl FacetSearch {
    pub fn term(&self, facet: Facet) -> &str {
        match facet {
            Facet::Squads => &self.squads,
            Facet::Types => &self.types,
            Facet::Locations => &self.locations,
        }
    }

    pub fn set_term(&mut self, facet: Facet, term: impl Into<String>) {
        let slot = match facet {
            Facet::Squads => &mut self.squads,
            Facet::Types => &mut self.types,
            Facet::Locations => &mut self.locations,
        };
        *slot = term.into();
    }

    /// Options to list for `facet` under its current term.
    pub fn options<'a>(&self, facet: Facet, available: &'a AvailableOptions) -> Vec<&'a str> {
        filter_options(available.catalog(facet), self.term(facet))
    }

    /// Forget all terms (the panel was closed).
    pub fn reset(&mut self) {
        *self = FacetSearch::default();
    }
}
