//! Directory page state: location, filters, debounced inputs and the
//! controller that keeps the listing in step with them.

pub mod data_definitions;
pub mod pages;
pub mod state;
