//! Observable listing state for one consumer, where the latest request wins.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use common::{query_descriptor::QueryDescriptor, result_page::ResultPage};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::{
    error::FetchError,
    listing_fetcher::{ListingFetcher, descriptor_digest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What the result renderer sees.
///
/// `page` is the last page that loaded successfully; it survives both a new
/// load and a failed one, so stale data can stay on screen next to an error.
#[derive(Debug)]
pub struct ListingState<T> {
    pub descriptor: Option<QueryDescriptor>,
    pub status: ListingStatus,
    pub page: Option<Arc<ResultPage<T>>>,
    pub error: Option<FetchError>,
}

impl<T> Clone for ListingState<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            status: self.status,
            page: self.page.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T> Default for ListingState<T> {
    fn default() -> Self {
        Self { descriptor: None, status: ListingStatus::Idle, page: None, error: None }
    }
}

impl<T> ListingState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == ListingStatus::Loading
    }

    /// Settled on the given descriptor, successfully or not.
    pub fn is_settled_on(&self, descriptor: &QueryDescriptor) -> bool {
        self.descriptor.as_ref() == Some(descriptor) && matches!(self.status, ListingStatus::Ready | ListingStatus::Failed)
    }
}

pub struct DirectoryListing<T> {
    fetcher: ListingFetcher<T>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<ListingState<T>>>,
}

impl<T> Clone for DirectoryListing<T> {
    fn clone(&self) -> Self {
        Self { fetcher: self.fetcher.clone(), generation: self.generation.clone(), state: self.state.clone() }
    }
}

impl<T> DirectoryListing<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(fetcher: ListingFetcher<T>) -> Self {
        let (state, _) = watch::channel(ListingState::default());
        Self { fetcher, generation: Arc::new(AtomicU64::new(0)), state: Arc::new(state) }
    }

    pub fn fetcher(&self) -> &ListingFetcher<T> {
        &self.fetcher
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ListingState<T> {
        self.state.borrow().clone()
    }

    /// Takes the next place in the load order and publishes `Loading`.
    ///
    /// Ordering is fixed here rather than when the returned load is polled, so
    /// a caller can spawn [`PendingLoad::complete`] and still have the last
    /// `begin` win.
    pub fn begin(&self, descriptor: QueryDescriptor) -> PendingLoad<T> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.descriptor = Some(descriptor.clone());
            state.status = ListingStatus::Loading;
        });
        PendingLoad { listing: self.clone(), descriptor, generation }
    }

    /// Loads `descriptor` and publishes the outcome, unless a later `load` or
    /// a `detach` happened in the meantime. Returns whether it was applied.
    pub async fn load(&self, descriptor: QueryDescriptor) -> bool {
        self.begin(descriptor).complete().await
    }

    /// Ignores every load still pending, e.g. when the page unmounts.
    pub fn detach(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            if state.status != ListingStatus::Loading {
                return false;
            }
            state.status = if state.page.is_some() { ListingStatus::Ready } else { ListingStatus::Idle };
            true
        });
    }
}

/// A load that has its place in the order but has not been fetched yet.
pub struct PendingLoad<T> {
    listing: DirectoryListing<T>,
    descriptor: QueryDescriptor,
    generation: u64,
}

impl<T> PendingLoad<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub async fn complete(self) -> bool {
        let Self { listing, descriptor, generation } = self;
        let outcome = listing.fetcher.fetch(&descriptor).await;

        let applied = listing.state.send_if_modified(|state| {
            if listing.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match outcome {
                Ok(page) => {
                    state.page = Some(page);
                    state.error = None;
                    state.status = ListingStatus::Ready;
                }
                Err(e) => {
                    state.error = Some(e);
                    state.status = ListingStatus::Failed;
                }
            }
            true
        });
        if !applied {
            tracing::debug!("Discarding superseded response: {} {descriptor}", descriptor_digest(&descriptor));
        }
        applied
    }
}
