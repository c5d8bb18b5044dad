//! Selected values per filter dimension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter_dimension::FilterDimension;

/// Values chosen per dimension.
///
/// A dimension with no values is never stored, so "never set" and "set to
/// nothing" compare, hash and serialize identically. Values keep the order in
/// which they were selected; duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterSelection {
    filters: BTreeMap<FilterDimension, Vec<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: FilterDimension) -> &[String] {
        self.filters.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the values of one dimension. Returns whether anything changed.
    pub fn set<I, S>(&mut self, dimension: FilterDimension, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if value.is_empty() || normalized.contains(&value) {
                continue;
            }
            normalized.push(value);
        }

        if normalized.is_empty() {
            return self.filters.remove(&dimension).is_some();
        }
        if self.filters.get(&dimension) == Some(&normalized) {
            return false;
        }
        self.filters.insert(dimension, normalized);
        true
    }

    /// Adds the value if absent, removes it otherwise.
    pub fn toggle(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        let mut values = self.get(dimension).to_vec();
        if let Some(position) = values.iter().position(|v| *v == value) {
            values.remove(position);
        } else {
            values.push(value);
        }
        self.set(dimension, values);
    }

    pub fn clear(&mut self, dimension: FilterDimension) -> bool {
        self.filters.remove(&dimension).is_some()
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Constrained dimensions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterDimension, &[String])> {
        self.filters.iter().map(|(dimension, values)| (*dimension, values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FilterDimension as D;

    #[test]
    fn empty_set_is_the_same_as_never_set() {
        let mut a = FilterSelection::new();
        a.set(D::Skills, ["AutoCAD"]);
        a.set(D::Skills, Vec::<String>::new());
        assert_eq!(a, FilterSelection::new());
        assert!(a.get(D::Skills).is_empty());
    }

    #[test]
    fn set_keeps_selection_order_and_drops_duplicates() {
        let mut selection = FilterSelection::new();
        let changed = selection.set(D::Skills, ["Revit", "AutoCAD", "Revit", ""]);
        assert!(changed);
        assert_eq!(selection.get(D::Skills), ["Revit", "AutoCAD"]);
        assert!(!selection.set(D::Skills, ["Revit", "AutoCAD"]));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FilterSelection::new();
        selection.toggle(D::HeadCountRanges, "1-10");
        selection.toggle(D::HeadCountRanges, "11-50");
        assert_eq!(selection.get(D::HeadCountRanges), ["1-10", "11-50"]);
        selection.toggle(D::HeadCountRanges, "1-10");
        selection.toggle(D::HeadCountRanges, "11-50");
        assert!(selection.is_empty());
    }

    #[test]
    fn iteration_order_ignores_insertion_order() {
        let mut a = FilterSelection::new();
        a.set(D::Skills, ["BIM"]);
        a.set(D::State, ["Kerala"]);
        let mut b = FilterSelection::new();
        b.set(D::State, ["Kerala"]);
        b.set(D::Skills, ["BIM"]);
        assert_eq!(a, b);
        let order: Vec<_> = a.iter().map(|(d, _)| d).collect();
        assert_eq!(order, vec![D::State, D::Skills]);
    }
}
