//! Canonical request descriptors for paginated listing endpoints.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    directory_const::{DEFAULT_PAGE_SIZE, PAGE_PARAM, PAGE_SIZE_PARAM, SEARCH_TERM_PARAM},
    filter_selection::FilterSelection,
};

/// Path plus ordered query parameters.
///
/// Built only through [`build`] (or [`QueryDescriptor::path_only`]), so equal
/// inputs always give byte-identical descriptors and the type can key caches
/// and in-flight request maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryDescriptor {
    path: String,
    params: Vec<(String, String)>,
}

impl QueryDescriptor {
    pub fn path_only(path: impl Into<String>) -> Self {
        Self { path: path.into(), params: Vec::new() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn page(&self) -> u32 {
        self.param(PAGE_PARAM).and_then(|p| p.parse().ok()).unwrap_or(1)
    }

    /// Form-encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    /// Path and query as sent on the wire, e.g. `/directory/students?state=Goa&page=1&pageSize=20`.
    pub fn to_request_uri(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        format!("{}?{}", self.path, self.query_string())
    }
}

impl Display for QueryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_request_uri())
    }
}

pub fn normalize_page(page: Option<u32>) -> u32 {
    match page {
        Some(page) if page >= 1 => page,
        _ => 1,
    }
}

pub fn normalize_page_size(page_size: Option<u32>) -> u32 {
    match page_size {
        Some(page_size) if page_size >= 1 => page_size,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// The trimmed term, or `None` when nothing but whitespace is left.
pub fn normalize_term(term: &str) -> Option<&str> {
    let term = term.trim();
    if term.is_empty() { None } else { Some(term) }
}

/// Filter parameters in canonical order: one parameter per constrained
/// dimension, multiple values comma-joined in selection order.
pub fn selection_params(selection: &FilterSelection) -> Vec<(String, String)> {
    selection
        .iter()
        .map(|(dimension, values)| (dimension.id().to_string(), values.join(",")))
        .collect()
}

/// Maps filter state onto the request for one listing page.
///
/// Unconstrained dimensions and a blank term are omitted; `page` and
/// `pageSize` are always present and always last.
pub fn build(path: &str, term: &str, selection: &FilterSelection, page: Option<u32>, page_size: Option<u32>) -> QueryDescriptor {
    let mut params = selection_params(selection);
    if let Some(term) = normalize_term(term) {
        params.push((SEARCH_TERM_PARAM.to_string(), term.to_string()));
    }
    params.push((PAGE_PARAM.to_string(), normalize_page(page).to_string()));
    params.push((PAGE_SIZE_PARAM.to_string(), normalize_page_size(page_size).to_string()));

    QueryDescriptor { path: path.to_string(), params }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::filter_dimension::FilterDimension as D;

    const STUDENTS: &str = "/directory/students";

    #[test]
    fn student_scenario_request_uri() {
        let mut selection = FilterSelection::new();
        selection.set(D::State, ["California"]);
        selection.set(D::Skills, ["AutoCAD", "Revit"]);
        assert_eq!(
            build(STUDENTS, "", &selection, None, None).to_request_uri(),
            "/directory/students?state=California&skills=AutoCAD%2CRevit&page=1&pageSize=20"
        );

        selection.set(D::Skills, Vec::<String>::new());
        assert_eq!(
            build(STUDENTS, "", &selection, None, None).to_request_uri(),
            "/directory/students?state=California&page=1&pageSize=20"
        );
    }

    #[test]
    fn dimension_insertion_order_does_not_matter() {
        let mut a = FilterSelection::new();
        a.set(D::Skills, ["BIM", "Revit"]);
        a.set(D::CollegeName, ["Tech Institute"]);
        a.set(D::State, ["Goa"]);
        let mut b = FilterSelection::new();
        b.set(D::State, ["Goa"]);
        b.set(D::CollegeName, ["Tech Institute"]);
        b.set(D::Skills, ["BIM", "Revit"]);

        let da = build(STUDENTS, "civil", &a, Some(2), Some(10));
        let db = build(STUDENTS, "civil", &b, Some(2), Some(10));
        assert_eq!(da, db);
        assert_eq!(da.to_request_uri(), db.to_request_uri());
    }

    #[test]
    fn empty_dimension_equals_unset_dimension() {
        let mut cleared = FilterSelection::new();
        cleared.set(D::Level, ["Masters"]);
        cleared.set(D::Level, Vec::<String>::new());
        assert_eq!(
            build(STUDENTS, "", &cleared, None, None),
            build(STUDENTS, "", &FilterSelection::new(), None, None)
        );
    }

    #[test]
    fn blank_term_is_omitted_and_term_is_trimmed() {
        let selection = FilterSelection::new();
        assert_eq!(build(STUDENTS, "   ", &selection, None, None).param(SEARCH_TERM_PARAM), None);
        let descriptor = build(STUDENTS, "  Ada Lovelace ", &selection, None, None);
        assert_eq!(descriptor.param(SEARCH_TERM_PARAM), Some("Ada Lovelace"));
        assert_eq!(
            descriptor.to_request_uri(),
            "/directory/students?searchTerm=Ada+Lovelace&page=1&pageSize=20"
        );
    }

    #[test]
    fn page_and_page_size_defaults() {
        let selection = FilterSelection::new();
        let descriptor = build(STUDENTS, "", &selection, Some(0), Some(0));
        assert_eq!(descriptor.param(PAGE_PARAM), Some("1"));
        assert_eq!(descriptor.param(PAGE_SIZE_PARAM), Some("20"));
        assert_eq!(build(STUDENTS, "", &selection, Some(4), Some(50)).page(), 4);
    }

    #[test]
    fn path_only_has_no_query() {
        let descriptor = QueryDescriptor::path_only("/directory/masters/states");
        assert_eq!(descriptor.to_request_uri(), "/directory/masters/states");
        assert_eq!(descriptor.page(), 1);
    }
}
