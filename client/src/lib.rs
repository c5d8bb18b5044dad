//! REST access for the directory listings and their master data.

pub mod api_client;
pub mod config;
pub mod directory_listing;
pub mod error;
pub mod listing_fetcher;
pub mod option_source;
pub mod session;

pub use api_client::ApiClient;
pub use config::ClientConfig;
pub use directory_listing::{DirectoryListing, ListingState, ListingStatus, PendingLoad};
pub use error::FetchError;
pub use listing_fetcher::ListingFetcher;
pub use option_source::{FilterOption, OptionSource};
