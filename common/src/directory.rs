//! The four directories and the filter dimensions each one accepts.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::filter_dimension::{Cardinality, FilterDimension};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Directory {
    Students,
    Professionals,
    Corporates,
    Colleges,
}

use FilterDimension as D;

const STUDENT_DIMENSIONS: &[FilterDimension] = &[
    D::State,
    D::CollegeName,
    D::Level,
    D::FieldOfStudy,
    D::YearOfStudy,
    D::CgpaRanges,
    D::Company,
    D::Title,
    D::Skills,
    D::Certifications,
    D::CoursesCompleted,
];

const PROFESSIONAL_DIMENSIONS: &[FilterDimension] = &[D::State, D::Title, D::Company, D::ExperienceYears, D::Skills];

const CORPORATE_DIMENSIONS: &[FilterDimension] = &[D::State, D::Industries, D::Services, D::Sectors, D::HeadCountRanges];

const COLLEGE_DIMENSIONS: &[FilterDimension] = &[D::State, D::Programs, D::Accreditation];

impl Directory {
    pub const ALL: &'static [Directory] = &[Self::Students, Self::Professionals, Self::Corporates, Self::Colleges];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Professionals => "professionals",
            Self::Corporates => "corporates",
            Self::Colleges => "colleges",
        }
    }

    pub fn listing_path(&self) -> String {
        format!("/directory/{}", self.name())
    }

    /// Registered dimensions, in canonical order.
    pub fn dimensions(&self) -> &'static [FilterDimension] {
        match self {
            Self::Students => STUDENT_DIMENSIONS,
            Self::Professionals => PROFESSIONAL_DIMENSIONS,
            Self::Corporates => CORPORATE_DIMENSIONS,
            Self::Colleges => COLLEGE_DIMENSIONS,
        }
    }

    pub fn accepts(&self, dimension: FilterDimension) -> bool {
        self.dimensions().contains(&dimension)
    }

    /// `None` when the dimension is not registered for this directory.
    pub fn cardinality(&self, dimension: FilterDimension) -> Option<Cardinality> {
        if !self.accepts(dimension) {
            return None;
        }
        let single = match self {
            Self::Corporates => matches!(dimension, D::State | D::Industries | D::Services | D::Sectors),
            Self::Colleges => dimension == D::State,
            Self::Students | Self::Professionals => false,
        };
        Some(if single { Cardinality::Single } else { Cardinality::Multi })
    }

    /// Matches a listing path such as `/directory/students`, with or without a trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.iter().copied().find(|directory| directory.listing_path() == path)
    }
}

impl Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown directory: {0}")]
pub struct UnknownDirectory(pub String);

impl FromStr for Directory {
    type Err = UnknownDirectory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|directory| directory.name() == s)
            .ok_or_else(|| UnknownDirectory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_registered_in_canonical_order() {
        for directory in Directory::ALL {
            let dims = directory.dimensions();
            let mut sorted = dims.to_vec();
            sorted.sort();
            assert_eq!(sorted, dims.to_vec(), "{directory}");
        }
    }

    #[test]
    fn corporate_dropdowns_are_single_select() {
        assert_eq!(Directory::Corporates.cardinality(D::Industries), Some(Cardinality::Single));
        assert_eq!(Directory::Corporates.cardinality(D::HeadCountRanges), Some(Cardinality::Multi));
        assert_eq!(Directory::Corporates.cardinality(D::Skills), None);
        assert_eq!(Directory::Students.cardinality(D::State), Some(Cardinality::Multi));
    }

    #[test]
    fn from_path_matches_listing_paths() {
        assert_eq!(Directory::from_path("/directory/colleges/"), Some(Directory::Colleges));
        assert_eq!(Directory::from_path("/directory/masters/skills"), None);
        assert_eq!("professionals".parse::<Directory>(), Ok(Directory::Professionals));
    }
}
