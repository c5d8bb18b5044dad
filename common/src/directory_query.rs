//! Query state of one directory: term, filters and pagination.

use serde::{Deserialize, Serialize};

use crate::{
    directory::Directory,
    directory_const::DEFAULT_PAGE_SIZE,
    filter_dimension::{Cardinality, FilterDimension},
    filter_selection::FilterSelection,
    query_descriptor::{self, QueryDescriptor, normalize_page, normalize_term},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("{dimension} is not a filter of the {directory} directory")]
    UnknownDimension { directory: Directory, dimension: FilterDimension },

    #[error("{dimension} accepts a single value, got {count}")]
    TooManyValues { dimension: FilterDimension, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryQuery {
    pub directory: Directory,
    pub search_term: String,
    pub selection: FilterSelection,
    pub page: u32,
    pub page_size: u32,
}

impl DirectoryQuery {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            search_term: String::new(),
            selection: FilterSelection::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn check_dimension(&self, dimension: FilterDimension) -> Result<Cardinality, FilterError> {
        self.directory
            .cardinality(dimension)
            .ok_or(FilterError::UnknownDimension { directory: self.directory, dimension })
    }

    /// Replaces one dimension's values; a real change sends pagination back to page 1.
    pub fn set_filter<I, S>(&mut self, dimension: FilterDimension, values: I) -> Result<bool, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cardinality = self.check_dimension(dimension)?;
        let mut distinct: Vec<String> = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if !value.is_empty() && !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        let values = distinct;
        if cardinality == Cardinality::Single && values.len() > 1 {
            return Err(FilterError::TooManyValues { dimension, count: values.len() });
        }
        let changed = self.selection.set(dimension, values);
        if changed {
            self.page = 1;
        }
        Ok(changed)
    }

    /// Checkbox-style toggle. On a single-select dimension the value replaces the current one.
    pub fn toggle_filter(&mut self, dimension: FilterDimension, value: impl Into<String>) -> Result<bool, FilterError> {
        let value = value.into();
        let cardinality = self.check_dimension(dimension)?;
        let current = self.selection.get(dimension);
        let next: Vec<String> = if current.contains(&value) {
            current.iter().filter(|v| **v != value).cloned().collect()
        } else if cardinality == Cardinality::Single {
            vec![value]
        } else {
            current.iter().cloned().chain(std::iter::once(value)).collect()
        };
        self.set_filter(dimension, next)
    }

    pub fn clear_filter(&mut self, dimension: FilterDimension) -> Result<bool, FilterError> {
        self.set_filter(dimension, Vec::<String>::new())
    }

    pub fn clear_all_filters(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.selection.clear_all();
        self.page = 1;
        true
    }

    /// Stores the trimmed term; a different term resets pagination.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        let term = normalize_term(&term).unwrap_or_default();
        if term == self.search_term {
            return false;
        }
        self.search_term = term.to_string();
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = normalize_page(Some(page));
        let changed = page != self.page;
        self.page = page;
        changed
    }

    pub fn descriptor(&self) -> QueryDescriptor {
        query_descriptor::build(
            &self.directory.listing_path(),
            &self.search_term,
            &self.selection,
            Some(self.page),
            Some(self.page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FilterDimension as D;

    #[test]
    fn selecting_a_filter_resets_to_first_page() {
        let mut query = DirectoryQuery::new(Directory::Students);
        query.set_page(3);
        assert_eq!(query.descriptor().page(), 3);

        query.set_filter(D::FieldOfStudy, ["Civil Engineering"]).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.descriptor().page(), 1);
    }

    #[test]
    fn changing_the_term_resets_to_first_page() {
        let mut query = DirectoryQuery::new(Directory::Colleges);
        query.set_page(5);
        assert!(!query.set_search_term("  "));
        assert_eq!(query.page, 5);
        assert!(query.set_search_term("IIT"));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn term_is_stored_trimmed() {
        let mut query = DirectoryQuery::new(Directory::Students);
        assert!(query.set_search_term("  ada "));
        assert_eq!(query.search_term, "ada");
        query.set_page(2);
        assert!(!query.set_search_term("ada  "));
        assert_eq!(query.page, 2);
    }

    #[test]
    fn unchanged_filter_keeps_the_page() {
        let mut query = DirectoryQuery::new(Directory::Professionals);
        query.set_filter(D::Skills, ["BIM"]).unwrap();
        query.set_page(2);
        assert_eq!(query.set_filter(D::Skills, ["BIM"]), Ok(false));
        assert_eq!(query.page, 2);
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        let mut query = DirectoryQuery::new(Directory::Colleges);
        let err = query.set_filter(D::Skills, ["Revit"]).unwrap_err();
        assert_eq!(err, FilterError::UnknownDimension { directory: Directory::Colleges, dimension: D::Skills });
        assert!(query.selection.is_empty());
    }

    #[test]
    fn single_select_rejects_multiple_values() {
        let mut query = DirectoryQuery::new(Directory::Corporates);
        let err = query.set_filter(D::Industries, ["Construction", "Energy"]).unwrap_err();
        assert_eq!(err, FilterError::TooManyValues { dimension: D::Industries, count: 2 });

        assert_eq!(query.set_filter(D::Industries, ["Energy", "Energy"]), Ok(true));
        assert_eq!(query.selection.get(D::Industries), ["Energy"]);
        query.clear_filter(D::Industries).unwrap();

        query.toggle_filter(D::Industries, "Construction").unwrap();
        query.toggle_filter(D::Industries, "Energy").unwrap();
        assert_eq!(query.selection.get(D::Industries), ["Energy"]);
    }

    #[test]
    fn clear_all_resets_page() {
        let mut query = DirectoryQuery::new(Directory::Corporates);
        query.toggle_filter(D::HeadCountRanges, "1-10").unwrap();
        query.set_page(4);
        assert!(query.clear_all_filters());
        assert_eq!(query.page, 1);
        assert!(!query.clear_all_filters());
    }
}
