//! Filter selection state and the parent→child cascade reset rule.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::protocol::YearRange;

/// Current filter selections. Every set is unordered with unique members;
/// an empty set means "no constraint at this level", never "match
/// nothing".
///
/// Invariant: a non-empty child-level set only contains values reachable
/// from the current parent selections. [`SearchFilters::apply`] enforces
/// this by clearing child levels whenever a parent level changes, so
/// consumers never have to revalidate dangling children.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub work_types: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub locations: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub production_lines: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub equipment1s: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub equipment2s: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub equipment3s: BTreeSet<String>,
}

/// A single filter edit: which key changed and its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    YearRange(Option<YearRange>),
    Categories(BTreeSet<String>),
    WorkTypes(BTreeSet<String>),
    Locations(BTreeSet<String>),
    ProductionLines(BTreeSet<String>),
    Equipment1s(BTreeSet<String>),
    Equipment2s(BTreeSet<String>),
    Equipment3s(BTreeSet<String>),
}

impl SearchFilters {
    /// Apply one edit, cascading resets to child levels.
    ///
    /// Changing a hierarchy level clears every deeper level; year range,
    /// categories, and work types sit outside the hierarchy and clear
    /// nothing. Resets depend only on which key changed, so repeating the
    /// same change is idempotent.
    #[must_use]
    pub fn apply(&self, change: FilterChange) -> SearchFilters {
        let mut next = self.clone();
        match change {
            FilterChange::YearRange(value) => next.year_range = value,
            FilterChange::Categories(value) => next.categories = value,
            FilterChange::WorkTypes(value) => next.work_types = value,
            FilterChange::Locations(value) => {
                next.locations = value;
                next.production_lines.clear();
                next.equipment1s.clear();
                next.equipment2s.clear();
                next.equipment3s.clear();
            }
            FilterChange::ProductionLines(value) => {
                next.production_lines = value;
                next.equipment1s.clear();
                next.equipment2s.clear();
                next.equipment3s.clear();
            }
            FilterChange::Equipment1s(value) => {
                next.equipment1s = value;
                next.equipment2s.clear();
                next.equipment3s.clear();
            }
            FilterChange::Equipment2s(value) => {
                next.equipment2s = value;
                next.equipment3s.clear();
            }
            FilterChange::Equipment3s(value) => next.equipment3s = value,
        }
        next
    }

    /// True when any selection is active.
    pub fn is_active(&self) -> bool {
        self.year_range.is_some()
            || !self.categories.is_empty()
            || !self.work_types.is_empty()
            || !self.locations.is_empty()
            || !self.production_lines.is_empty()
            || !self.equipment1s.is_empty()
            || !self.equipment2s.is_empty()
            || !self.equipment3s.is_empty()
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        *self = SearchFilters::default();
    }
}

/// Build a selection set from string-ish values. Test and call-site sugar.
pub fn selection<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SearchFilters {
        let mut filters = SearchFilters::default();
        filters.year_range = Some(YearRange { start_year: 2020, end_year: 2024 });
        filters.categories = selection(["電気"]);
        filters.work_types = selection(["修理票"]);
        filters.locations = selection(["A"]);
        filters.production_lines = selection(["L1"]);
        filters.equipment1s = selection(["E1"]);
        filters.equipment2s = selection(["E2a"]);
        filters.equipment3s = selection(["E3x"]);
        filters
    }

    #[test]
    fn changing_locations_clears_all_child_levels() {
        let next = populated().apply(FilterChange::Locations(selection(["B"])));
        assert_eq!(next.locations, selection(["B"]));
        assert!(next.production_lines.is_empty());
        assert!(next.equipment1s.is_empty());
        assert!(next.equipment2s.is_empty());
        assert!(next.equipment3s.is_empty());
        // Non-hierarchy keys survive.
        assert_eq!(next.categories, selection(["電気"]));
        assert!(next.year_range.is_some());
    }

    #[test]
    fn changing_production_lines_clears_equipment_levels_only() {
        let next = populated().apply(FilterChange::ProductionLines(selection(["L2"])));
        assert_eq!(next.locations, selection(["A"]));
        assert_eq!(next.production_lines, selection(["L2"]));
        assert!(next.equipment1s.is_empty());
        assert!(next.equipment2s.is_empty());
        assert!(next.equipment3s.is_empty());
    }

    #[test]
    fn changing_equipment2_clears_equipment3_only() {
        let next = populated().apply(FilterChange::Equipment2s(selection(["E2b"])));
        assert_eq!(next.equipment1s, selection(["E1"]));
        assert_eq!(next.equipment2s, selection(["E2b"]));
        assert!(next.equipment3s.is_empty());
    }

    #[test]
    fn non_hierarchy_changes_clear_nothing() {
        let next = populated().apply(FilterChange::Categories(selection(["機械"])));
        assert_eq!(next.equipment3s, selection(["E3x"]));
        let next = next.apply(FilterChange::YearRange(None));
        assert_eq!(next.production_lines, selection(["L1"]));
        assert!(next.year_range.is_none());
    }

    #[test]
    fn apply_is_idempotent_per_key() {
        let change = FilterChange::Equipment1s(selection(["E9"]));
        let once = populated().apply(change.clone());
        let twice = once.apply(change);
        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_sets() {
        let mut filters = SearchFilters::default();
        filters.work_types = selection(["作業票"]);
        let json = serde_json::to_value(&filters).expect("serialize");
        assert_eq!(json, serde_json::json!({"workTypes": ["作業票"]}));
    }
}
