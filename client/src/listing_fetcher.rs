//! Paginated listing requests with in-flight coalescing and a bounded-time cache.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use common::{query_descriptor::QueryDescriptor, result_page::ResultPage};
use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use serde::de::DeserializeOwned;
use tokio::time::Instant;

use crate::{api_client::ApiClient, error::FetchError};

pub type FetchOutcome<T> = Result<Arc<ResultPage<T>>, FetchError>;

type SharedFetch<T> = Shared<BoxFuture<'static, FetchOutcome<T>>>;

/// Short digest of the request URI, used to correlate log lines.
pub fn descriptor_digest(descriptor: &QueryDescriptor) -> String {
    let mut digest = sha256::digest(descriptor.to_request_uri());
    digest.truncate(12);
    digest
}

struct CachedPage<T> {
    fetched_at: Instant,
    page: Arc<ResultPage<T>>,
}

struct FetcherState<T> {
    cache: HashMap<QueryDescriptor, CachedPage<T>>,
    in_flight: HashMap<QueryDescriptor, SharedFetch<T>>,
}

impl<T> FetcherState<T> {
    /// Cached page younger than `ttl`; an expired entry is dropped on the way.
    fn fresh(&mut self, descriptor: &QueryDescriptor, ttl: Duration) -> Option<Arc<ResultPage<T>>> {
        let cached = self.cache.get(descriptor)?;
        if cached.fetched_at.elapsed() < ttl {
            return Some(cached.page.clone());
        }
        self.cache.remove(descriptor);
        None
    }
}

/// Fetches `ResultPage<T>` for query descriptors.
///
/// Clones share the same cache and in-flight table, so every component of a
/// directory page can hold its own handle.
pub struct ListingFetcher<T> {
    client: ApiClient,
    ttl: Duration,
    state: Arc<Mutex<FetcherState<T>>>,
}

impl<T> Clone for ListingFetcher<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), ttl: self.ttl, state: self.state.clone() }
    }
}

fn lock<T>(state: &Mutex<FetcherState<T>>) -> MutexGuard<'_, FetcherState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> ListingFetcher<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(client: ApiClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            state: Arc::new(Mutex::new(FetcherState { cache: HashMap::new(), in_flight: HashMap::new() })),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the page for `descriptor`.
    ///
    /// A fresh cached page is returned without a network call. While a request
    /// for the same descriptor is pending, callers attach to it instead of
    /// issuing another one. Errors are not cached and not retried.
    pub async fn fetch(&self, descriptor: &QueryDescriptor) -> FetchOutcome<T> {
        let pending = {
            let mut state = lock(&self.state);
            if let Some(page) = state.fresh(descriptor, self.ttl) {
                tracing::debug!("LISTING CACHE HIT: {} {descriptor}", descriptor_digest(descriptor));
                return Ok(page);
            }
            match state.in_flight.get(descriptor) {
                Some(pending) => {
                    tracing::debug!("LISTING REQUEST COALESCED: {} {descriptor}", descriptor_digest(descriptor));
                    pending.clone()
                }
                None => {
                    let pending = Self::request(self.client.clone(), self.state.clone(), descriptor.clone())
                        .boxed()
                        .shared();
                    state.in_flight.insert(descriptor.clone(), pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    async fn request(client: ApiClient, state: Arc<Mutex<FetcherState<T>>>, descriptor: QueryDescriptor) -> FetchOutcome<T> {
        let digest = descriptor_digest(&descriptor);
        tracing::info!("LISTING CACHE MISS: {digest} {descriptor}");

        let outcome = match client.get_json::<ResultPage<T>>(&descriptor).await {
            Ok(page) => match page.validate() {
                Ok(()) => Ok(Arc::new(page)),
                Err(e) => Err(FetchError::Decode { message: e.to_string() }),
            },
            Err(e) => Err(e),
        };

        let mut state = lock(&state);
        state.in_flight.remove(&descriptor);
        match &outcome {
            Ok(page) => {
                state.cache.insert(descriptor, CachedPage { fetched_at: Instant::now(), page: page.clone() });
                tracing::debug!("LISTING CACHE INSERTED: {digest}");
            }
            Err(e) => tracing::warn!("LISTING REQUEST FAILED: {digest}: {e}"),
        }
        outcome
    }

    /// The cached page, if it is still inside the cache window.
    pub fn cached(&self, descriptor: &QueryDescriptor) -> Option<Arc<ResultPage<T>>> {
        lock(&self.state).fresh(descriptor, self.ttl)
    }

    pub fn invalidate(&self, descriptor: &QueryDescriptor) {
        lock(&self.state).cache.remove(descriptor);
    }

    /// Drops cached pages. Pending requests are left to complete.
    pub fn clear(&self) {
        lock(&self.state).cache.clear();
    }

    pub fn in_flight(&self) -> usize {
        lock(&self.state).in_flight.len()
    }
}
