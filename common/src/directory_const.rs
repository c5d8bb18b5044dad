//! Constants shared by the directory listings and their filter controls.

pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub const LISTING_CACHE_TTL_SECS: u64 = 60;
pub const MASTER_CACHE_TTL_SECS: u64 = 3600;

pub const OPTION_FILTER_DEBOUNCE_MS: u64 = 300;
pub const SEARCH_TERM_DEBOUNCE_MS: u64 = 500;

/// Query parameter carrying the free-text term.
pub const SEARCH_TERM_PARAM: &str = "searchTerm";
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";

pub const HEADCOUNT_RANGES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

pub const LEVELS_OF_STUDY: &[&str] = &["Bachelors", "Masters", "High School", "Diploma"];

pub const FIELDS_OF_STUDY: &[&str] = &[
    "Civil Engineering",
    "Structural Engineering",
    "Geotechnical Engineering",
    "Traffic Engineering",
];

pub const YEARS_OF_STUDY: &[&str] = &["1", "2", "3", "4"];

pub const CGPA_RANGES: &[&str] = &["0-2", "2-4", "4-6", "6-8", "8-10"];

pub const COURSES_COMPLETED: &[&str] = &["React", "Node", "SQL"];

pub const CERTIFICATIONS: &[&str] = &["AWS", "GCP", "Azure"];

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Project Manager",
    "Civil Engineer",
    "Architect",
    "Consultant",
];

pub const EXPERIENCE_RANGES: &[&str] = &["0-2", "3-5", "6-10", "10-15", "15-20", "20+"];

pub const PROGRAMS: &[&str] = &["Engineering", "Business", "Arts"];

pub const ACCREDITATIONS: &[&str] = &["NAAC", "AICTE", "UGC"];
