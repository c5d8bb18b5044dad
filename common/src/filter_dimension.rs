//! The closed set of filter dimensions and where their values come from.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::directory_const::{
    ACCREDITATIONS, CERTIFICATIONS, CGPA_RANGES, COURSES_COMPLETED, EXPERIENCE_RANGES, FIELDS_OF_STUDY,
    HEADCOUNT_RANGES, JOB_TITLES, LEVELS_OF_STUDY, PROGRAMS, YEARS_OF_STUDY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    Multi,
}

/// Remote master lists served under `/directory/masters/{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MasterList {
    Industries,
    Services,
    Sectors,
    States,
    Countries,
    Skills,
    Companies,
    Colleges,
}

impl MasterList {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Industries => "industries",
            Self::Services => "services",
            Self::Sectors => "sectors",
            Self::States => "states",
            Self::Countries => "countries",
            Self::Skills => "skills",
            Self::Companies => "companies",
            Self::Colleges => "colleges",
        }
    }

    pub fn path(&self) -> String {
        format!("/directory/masters/{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Static(&'static [&'static str]),
    Master(MasterList),
}

/// One independent filtering axis.
///
/// Declaration order is the canonical serialization order of a selection, so
/// the same set of dimensions always produces the same parameter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterDimension {
    State,
    CollegeName,
    Level,
    FieldOfStudy,
    YearOfStudy,
    CgpaRanges,
    Company,
    Title,
    ExperienceYears,
    Industries,
    Services,
    Sectors,
    HeadCountRanges,
    Programs,
    Accreditation,
    Skills,
    Certifications,
    CoursesCompleted,
}

impl FilterDimension {
    pub const ALL: &'static [FilterDimension] = &[
        Self::State,
        Self::CollegeName,
        Self::Level,
        Self::FieldOfStudy,
        Self::YearOfStudy,
        Self::CgpaRanges,
        Self::Company,
        Self::Title,
        Self::ExperienceYears,
        Self::Industries,
        Self::Services,
        Self::Sectors,
        Self::HeadCountRanges,
        Self::Programs,
        Self::Accreditation,
        Self::Skills,
        Self::Certifications,
        Self::CoursesCompleted,
    ];

    /// Key used verbatim as the query and location parameter name.
    pub fn id(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::CollegeName => "collegeName",
            Self::Level => "level",
            Self::FieldOfStudy => "fieldOfStudy",
            Self::YearOfStudy => "yearOfStudy",
            Self::CgpaRanges => "cgpaRanges",
            Self::Company => "company",
            Self::Title => "title",
            Self::ExperienceYears => "experienceYears",
            Self::Industries => "industries",
            Self::Services => "services",
            Self::Sectors => "sectors",
            Self::HeadCountRanges => "headCountRanges",
            Self::Programs => "programs",
            Self::Accreditation => "accreditation",
            Self::Skills => "skills",
            Self::Certifications => "certifications",
            Self::CoursesCompleted => "coursesCompleted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::State => "State",
            Self::CollegeName => "College",
            Self::Level => "Level of Study",
            Self::FieldOfStudy => "Field of Study",
            Self::YearOfStudy => "Year of Study",
            Self::CgpaRanges => "CGPA",
            Self::Company => "Company",
            Self::Title => "Job Title",
            Self::ExperienceYears => "Experience",
            Self::Industries => "Industry",
            Self::Services => "Service",
            Self::Sectors => "Sector",
            Self::HeadCountRanges => "Headcount",
            Self::Programs => "Programs",
            Self::Accreditation => "Accreditation",
            Self::Skills => "Skills",
            Self::Certifications => "Certifications",
            Self::CoursesCompleted => "Courses Completed",
        }
    }

    pub fn value_source(&self) -> ValueSource {
        match self {
            Self::State => ValueSource::Master(MasterList::States),
            Self::CollegeName => ValueSource::Master(MasterList::Colleges),
            Self::Level => ValueSource::Static(LEVELS_OF_STUDY),
            Self::FieldOfStudy => ValueSource::Static(FIELDS_OF_STUDY),
            Self::YearOfStudy => ValueSource::Static(YEARS_OF_STUDY),
            Self::CgpaRanges => ValueSource::Static(CGPA_RANGES),
            Self::Company => ValueSource::Master(MasterList::Companies),
            Self::Title => ValueSource::Static(JOB_TITLES),
            Self::ExperienceYears => ValueSource::Static(EXPERIENCE_RANGES),
            Self::Industries => ValueSource::Master(MasterList::Industries),
            Self::Services => ValueSource::Master(MasterList::Services),
            Self::Sectors => ValueSource::Master(MasterList::Sectors),
            Self::HeadCountRanges => ValueSource::Static(HEADCOUNT_RANGES),
            Self::Programs => ValueSource::Static(PROGRAMS),
            Self::Accreditation => ValueSource::Static(ACCREDITATIONS),
            Self::Skills => ValueSource::Master(MasterList::Skills),
            Self::Certifications => ValueSource::Static(CERTIFICATIONS),
            Self::CoursesCompleted => ValueSource::Static(COURSES_COMPLETED),
        }
    }
}

impl Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter dimension: {0}")]
pub struct UnknownDimension(pub String);

impl FromStr for FilterDimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|dimension| dimension.id() == s)
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for dimension in FilterDimension::ALL {
            assert_eq!(dimension.id().parse::<FilterDimension>(), Ok(*dimension));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "favouriteColour".parse::<FilterDimension>().unwrap_err();
        assert_eq!(err, UnknownDimension("favouriteColour".to_string()));
    }

    #[test]
    fn all_is_in_declaration_order() {
        let mut sorted = FilterDimension::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, FilterDimension::ALL.to_vec());
    }

    #[test]
    fn master_paths() {
        assert_eq!(MasterList::Skills.path(), "/directory/masters/skills");
        assert_eq!(
            FilterDimension::Industries.value_source(),
            ValueSource::Master(MasterList::Industries)
        );
    }
}
