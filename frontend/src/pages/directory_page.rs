//! One mounted directory page: filters, debounced search and the listing.

use std::{sync::Arc, time::Duration};

use client::{DirectoryListing, ListingFetcher, ListingState};
use common::{
    directory::Directory,
    directory_query::{DirectoryQuery, FilterError},
    directory_records::DirectoryRecord,
    filter_dimension::FilterDimension,
};
use dioxus_history::History;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    data_definitions::directory_location::LocationError,
    state::{debounce::Debounced, filter_store::FilterStore},
};

/// Wires a [`FilterStore`] to a [`DirectoryListing`].
///
/// Every accepted store change issues a load for the new descriptor; a
/// settled search input becomes the store's term. Dropping the controller
/// stops both and ignores loads still in flight.
pub struct DirectoryController<T: DirectoryRecord> {
    store: Arc<FilterStore>,
    listing: DirectoryListing<T>,
    search_input: Debounced<String>,
    tasks: Vec<JoinHandle<()>>,
}

impl<T: DirectoryRecord> DirectoryController<T> {
    pub fn mount(
        history: impl History + Send + 'static,
        fetcher: ListingFetcher<T>,
        search_delay: Duration,
    ) -> Result<Self, LocationError> {
        let store = FilterStore::mount(history)?;
        if store.directory() != T::DIRECTORY {
            return Err(LocationError::WrongDirectory { expected: T::DIRECTORY, found: store.directory() });
        }
        tracing::info!("Mounted {} directory at {}", T::DIRECTORY, store.href());

        let store = Arc::new(store);
        let listing = DirectoryListing::new(fetcher);
        let search_input = Debounced::new(store.query().search_term, search_delay);

        let mut tasks = Vec::with_capacity(2);

        let mut queries = store.subscribe();
        tasks.push(tokio::spawn({
            let listing = listing.clone();
            async move {
                let mut descriptor = queries.borrow_and_update().descriptor();
                loop {
                    // Load order is taken here, not when the spawned fetch first runs.
                    tokio::spawn(listing.begin(descriptor).complete());
                    if queries.changed().await.is_err() {
                        break;
                    }
                    descriptor = queries.borrow_and_update().descriptor();
                }
            }
        }));

        let mut terms = search_input.subscribe();
        tasks.push(tokio::spawn({
            let store = store.clone();
            async move {
                while terms.changed().await.is_ok() {
                    let term = terms.borrow_and_update().clone();
                    store.set_search_term(term);
                }
            }
        }));

        Ok(Self { store, listing, search_input, tasks })
    }

    pub fn directory(&self) -> Directory {
        T::DIRECTORY
    }

    pub fn query(&self) -> DirectoryQuery {
        self.store.query()
    }

    pub fn location(&self) -> String {
        self.store.href()
    }

    pub fn state(&self) -> ListingState<T> {
        self.listing.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingState<T>> {
        self.listing.subscribe()
    }

    pub fn set_filter<I, S>(&self, dimension: FilterDimension, values: I) -> Result<bool, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store.set_filter(dimension, values)
    }

    pub fn toggle_filter(&self, dimension: FilterDimension, value: impl Into<String>) -> Result<bool, FilterError> {
        self.store.toggle_filter(dimension, value)
    }

    pub fn clear_filter(&self, dimension: FilterDimension) -> Result<bool, FilterError> {
        self.store.clear_filter(dimension)
    }

    pub fn clear_all_filters(&self) -> bool {
        self.store.clear_all_filters()
    }

    /// Keystroke in the search box; reaches the store once typing pauses.
    pub fn type_search(&self, term: impl Into<String>) {
        self.search_input.set(term.into());
    }

    pub fn set_page(&self, page: u32) -> bool {
        self.store.set_page(page)
    }

    /// Moves forward only when the last loaded page reports more results.
    pub fn next_page(&self) -> bool {
        let has_next = self.listing.snapshot().page.is_some_and(|page| page.has_next());
        has_next && self.store.set_page(self.store.query().page + 1)
    }

    pub fn previous_page(&self) -> bool {
        let page = self.store.query().page;
        page > 1 && self.store.set_page(page - 1)
    }

    pub fn back(&self) -> Result<bool, LocationError> {
        let moved = self.store.back()?;
        self.search_input.set(self.store.query().search_term);
        Ok(moved)
    }

    pub fn forward(&self) -> Result<bool, LocationError> {
        let moved = self.store.forward()?;
        self.search_input.set(self.store.query().search_term);
        Ok(moved)
    }

    /// Waits until the listing has settled on the current query.
    pub async fn settled(&self) -> ListingState<T> {
        let descriptor = self.store.query().descriptor();
        let mut updates = self.listing.subscribe();
        let state = match updates.wait_for(|state| state.is_settled_on(&descriptor)).await {
            Ok(state) => state.clone(),
            Err(_) => self.listing.snapshot(),
        };
        state
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl<T: DirectoryRecord> Drop for DirectoryController<T> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        self.listing.detach();
        tracing::debug!("Unmounted {} directory", T::DIRECTORY);
    }
}
