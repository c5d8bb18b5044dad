//! Records returned by the directory listing and master-data endpoints.
//!
//! Decoding is lenient: unknown fields are ignored and most fields are optional,
//! because the listing endpoints do not agree on a single shape.

use serde::{Deserialize, Serialize};

use crate::directory::Directory;

/// Binds a record type to the directory that lists it.
pub trait DirectoryRecord: Serialize + serde::de::DeserializeOwned + std::fmt::Debug + Send + Sync + 'static {
    const DIRECTORY: Directory;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSummary {
    #[serde(alias = "ID")]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub linked_in_url: Option<String>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub college_name: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    pub user: UserSummary,
    pub educations: Vec<Education>,
    pub skills: Vec<String>,
}

impl Student {
    pub fn major(&self) -> Option<&str> {
        self.educations.first().and_then(|e| e.field_of_study.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Professional {
    #[serde(alias = "ID")]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub experience_years: Option<u32>,
    pub skills: Vec<String>,
    pub linked_in_url: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Corporate {
    #[serde(alias = "ID")]
    pub id: Option<u64>,
    pub company_name: String,
    #[serde(alias = "logo")]
    pub logo_url: Option<String>,
    pub head_count: Option<String>,
    pub jobs_posted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct College {
    #[serde(alias = "ID")]
    pub id: Option<u64>,
    pub college_name: String,
    pub logo_url: Option<String>,
    pub student_count: Option<u64>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub programs: Vec<String>,
}

/// Entry of a master list (industries, skills, states, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterRecord {
    #[serde(alias = "ID", default)]
    pub id: Option<u64>,
    pub name: String,
}

impl DirectoryRecord for Student {
    const DIRECTORY: Directory = Directory::Students;
}

impl DirectoryRecord for Professional {
    const DIRECTORY: Directory = Directory::Professionals;
}

impl DirectoryRecord for Corporate {
    const DIRECTORY: Directory = Directory::Corporates;
}

impl DirectoryRecord for College {
    const DIRECTORY: Directory = Directory::Colleges;
}
