pub mod debounce;
pub mod filter_store;
pub mod option_search;
