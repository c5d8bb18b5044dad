//! Location-level data definitions.

pub mod directory_location;
