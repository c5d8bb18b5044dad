//! Common library exports shared between the REST client and the frontend state.

extern crate serde;


pub mod directory;
pub mod directory_const;
pub mod directory_query;
pub mod directory_records;
pub mod filter_dimension;
pub mod filter_selection;
pub mod query_descriptor;
pub mod result_page;
