//! Shareable location form of a directory query.
//!
//! `/directory/students?state=California&skills=AutoCAD&skills=Revit&page=2`
//! decodes to the student directory, two constrained dimensions and page 2.
//! Parameters follow the listing request order, minus the defaults (`page=1`,
//! `pageSize=20`). Unlike the request, each value gets its own parameter, so
//! values containing commas survive a reload.

use common::{
    directory::Directory,
    directory_const::{DEFAULT_PAGE_SIZE, PAGE_PARAM, PAGE_SIZE_PARAM, SEARCH_TERM_PARAM},
    directory_query::DirectoryQuery,
    filter_dimension::FilterDimension,
    query_descriptor::normalize_term,
};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Failed to parse location {href}: {message}")]
    Malformed { href: String, message: String },

    #[error("Not a directory location: {0}")]
    UnknownPath(String),

    #[error("Location is for the {found} directory, expected {expected}")]
    WrongDirectory { expected: Directory, found: Directory },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocation {
    pub query: DirectoryQuery,
}

impl From<DirectoryQuery> for DirectoryLocation {
    fn from(query: DirectoryQuery) -> Self {
        Self { query }
    }
}

impl DirectoryLocation {
    /// Accepts a path with query (`/directory/colleges?state=Goa`) or an absolute URL.
    ///
    /// Unknown parameters, filters the directory does not register and
    /// unparsable page numbers are logged and skipped.
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let (path, raw_query) = match Url::parse(href) {
            Ok(url) => (url.path().to_string(), url.query().unwrap_or_default().to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let href = href.split('#').next().unwrap_or_default();
                let (path, raw_query) = href.split_once('?').unwrap_or((href, ""));
                (path.to_string(), raw_query.to_string())
            }
            Err(e) => return Err(LocationError::Malformed { href: href.to_string(), message: e.to_string() }),
        };
        let directory = Directory::from_path(&path).ok_or(LocationError::UnknownPath(path))?;

        let mut query = DirectoryQuery::new(directory);
        let mut page = 1;
        for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
            match key.as_ref() {
                SEARCH_TERM_PARAM => {
                    query.set_search_term(value.as_ref());
                }
                PAGE_PARAM => {
                    page = value.parse().unwrap_or_else(|_| {
                        tracing::warn!("Invalid page in location: {value}");
                        1
                    });
                }
                PAGE_SIZE_PARAM => match value.parse::<u32>() {
                    Ok(size) if size > 0 => query.page_size = size,
                    _ => tracing::warn!("Invalid page size in location: {value}"),
                },
                other => {
                    let dimension = match other.parse::<FilterDimension>() {
                        Ok(dimension) => dimension,
                        Err(e) => {
                            tracing::warn!("Ignoring location parameter: {e}");
                            continue;
                        }
                    };
                    let mut values = query.selection.get(dimension).to_vec();
                    values.push(value.into_owned());
                    if let Err(e) = query.set_filter(dimension, values) {
                        tracing::warn!("Ignoring location filter: {e}");
                    }
                }
            }
        }
        query.set_page(page);
        Ok(Self { query })
    }

    pub fn directory(&self) -> Directory {
        self.query.directory
    }

    pub fn to_href(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        for (dimension, values) in self.query.selection.iter() {
            params.extend(values.iter().map(|value| (dimension.id(), value.clone())));
        }
        if let Some(term) = normalize_term(&self.query.search_term) {
            params.push((SEARCH_TERM_PARAM, term.to_string()));
        }
        if self.query.page > 1 {
            params.push((PAGE_PARAM, self.query.page.to_string()));
        }
        if self.query.page_size != DEFAULT_PAGE_SIZE {
            params.push((PAGE_SIZE_PARAM, self.query.page_size.to_string()));
        }

        let path = self.query.directory.listing_path();
        if params.is_empty() {
            return path;
        }
        let query = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish();
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use FilterDimension as D;

    #[test]
    fn parses_filters_term_and_page() {
        let location =
            DirectoryLocation::parse("/directory/students?skills=AutoCAD&state=California&skills=Revit&searchTerm=Ada+L&page=3")
                .unwrap();
        assert_eq!(location.directory(), Directory::Students);
        assert_eq!(location.query.selection.get(D::Skills), ["AutoCAD", "Revit"]);
        assert_eq!(location.query.selection.get(D::State), ["California"]);
        assert_eq!(location.query.search_term, "Ada L");
        assert_eq!(location.query.page, 3);
    }

    #[test]
    fn href_is_canonical() {
        let location = DirectoryLocation::parse("/directory/students?skills=AutoCAD&state=California&skills=Revit").unwrap();
        assert_eq!(location.to_href(), "/directory/students?state=California&skills=AutoCAD&skills=Revit");
        assert_eq!(DirectoryLocation::parse(&location.to_href()).unwrap(), location);
    }

    #[test]
    fn absolute_urls_are_accepted() {
        let location = DirectoryLocation::parse("https://app.trikona.test/directory/colleges?programs=Arts").unwrap();
        assert_eq!(location.directory(), Directory::Colleges);
        assert_eq!(location.to_href(), "/directory/colleges?programs=Arts");
    }

    #[test]
    fn unknown_and_unregistered_parameters_are_skipped() {
        let location = DirectoryLocation::parse("/directory/colleges?colour=blue&skills=Revit&state=Goa&page=x").unwrap();
        assert_eq!(location.to_href(), "/directory/colleges?state=Goa");
        assert_eq!(location.query.page, 1);
    }

    #[test]
    fn single_select_with_many_values_is_skipped() {
        let location =
            DirectoryLocation::parse("/directory/corporates?industries=Energy&industries=Mining&headCountRanges=1-10")
                .unwrap();
        assert_eq!(location.query.selection.get(D::Industries), ["Energy"]);
        assert_eq!(location.query.selection.get(D::HeadCountRanges), ["1-10"]);
    }

    #[test]
    fn values_with_commas_survive_a_reload() {
        let mut query = DirectoryQuery::new(Directory::Students);
        query.set_filter(D::CollegeName, ["College of Engineering, Pune"]).unwrap();
        query.set_filter(D::Skills, ["C, C++", "Revit"]).unwrap();
        let href = DirectoryLocation::from(query.clone()).to_href();
        assert_eq!(
            href,
            "/directory/students?collegeName=College+of+Engineering%2C+Pune&skills=C%2C+C%2B%2B&skills=Revit"
        );
        assert_eq!(DirectoryLocation::parse(&href).unwrap().query, query);
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert_eq!(
            DirectoryLocation::parse("/profile"),
            Err(LocationError::UnknownPath("/profile".to_string()))
        );
    }

    #[test]
    fn bare_directory_path() {
        let location = DirectoryLocation::parse("/directory/professionals").unwrap();
        assert_eq!(location.to_href(), "/directory/professionals");
        assert!(location.query.selection.is_empty());
    }
}
