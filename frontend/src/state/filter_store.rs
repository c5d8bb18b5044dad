//! Filter state of the mounted directory, kept in step with the location.
//!
//! The location is authoritative: mounting and back/forward derive the query
//! from it, and every accepted mutation writes a new history entry before
//! subscribers are notified.

use std::sync::{Mutex, MutexGuard, PoisonError};

use common::{
    directory::Directory,
    directory_query::{DirectoryQuery, FilterError},
    filter_dimension::FilterDimension,
};
use dioxus_history::History;
use tokio::sync::watch;

use crate::data_definitions::directory_location::{DirectoryLocation, LocationError};

type SharedHistory = Box<dyn History + Send>;

pub struct FilterStore {
    history: Mutex<SharedHistory>,
    query: watch::Sender<DirectoryQuery>,
}

impl FilterStore {
    /// Derives the query from the current history entry. A non-canonical
    /// entry is rewritten in place, without adding a new one.
    pub fn mount(history: impl History + Send + 'static) -> Result<Self, LocationError> {
        let current = history.current_route();
        let location = DirectoryLocation::parse(&current)?;
        let href = location.to_href();
        if href != current {
            tracing::debug!("Normalized location {current} -> {href}");
            history.replace(href);
        }
        let (query, _) = watch::channel(location.query);
        Ok(Self { history: Mutex::new(Box::new(history)), query })
    }

    fn history(&self) -> MutexGuard<'_, SharedHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn directory(&self) -> Directory {
        self.query.borrow().directory
    }

    pub fn query(&self) -> DirectoryQuery {
        self.query.borrow().clone()
    }

    pub fn href(&self) -> String {
        self.history().current_route()
    }

    pub fn can_go_back(&self) -> bool {
        self.history().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history().can_go_forward()
    }

    pub fn subscribe(&self) -> watch::Receiver<DirectoryQuery> {
        self.query.subscribe()
    }

    /// Applies `mutate` to a copy of the query. When it reports a change the
    /// new location is pushed and the query published.
    fn update<F>(&self, mutate: F) -> Result<bool, FilterError>
    where
        F: FnOnce(&mut DirectoryQuery) -> Result<bool, FilterError>,
    {
        let history = self.history();
        let mut next = self.query.borrow().clone();
        let changed = mutate(&mut next).inspect_err(|e| tracing::warn!("Rejected filter change: {e}"))?;
        if !changed {
            return Ok(false);
        }
        let href = DirectoryLocation::from(next.clone()).to_href();
        if href != history.current_route() {
            tracing::info!("Navigate: {href}");
            history.push(href);
        }
        self.query.send_replace(next);
        Ok(true)
    }

    pub fn set_filter<I, S>(&self, dimension: FilterDimension, values: I) -> Result<bool, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|query| query.set_filter(dimension, values))
    }

    pub fn toggle_filter(&self, dimension: FilterDimension, value: impl Into<String>) -> Result<bool, FilterError> {
        self.update(|query| query.toggle_filter(dimension, value))
    }

    pub fn clear_filter(&self, dimension: FilterDimension) -> Result<bool, FilterError> {
        self.update(|query| query.clear_filter(dimension))
    }

    pub fn clear_all_filters(&self) -> bool {
        self.update(|query| Ok(query.clear_all_filters())).unwrap_or(false)
    }

    pub fn set_search_term(&self, term: impl Into<String>) -> bool {
        self.update(|query| Ok(query.set_search_term(term))).unwrap_or(false)
    }

    pub fn set_page(&self, page: u32) -> bool {
        self.update(|query| Ok(query.set_page(page))).unwrap_or(false)
    }

    pub fn back(&self) -> Result<bool, LocationError> {
        {
            let history = self.history();
            if !history.can_go_back() {
                return Ok(false);
            }
            history.go_back();
        }
        self.sync_from_location()?;
        Ok(true)
    }

    pub fn forward(&self) -> Result<bool, LocationError> {
        {
            let history = self.history();
            if !history.can_go_forward() {
                return Ok(false);
            }
            history.go_forward();
        }
        self.sync_from_location()?;
        Ok(true)
    }

    /// Re-derives the query from the current history entry.
    ///
    /// Subscribers are only notified when the derived query differs.
    pub fn sync_from_location(&self) -> Result<(), LocationError> {
        let history = self.history();
        let location = DirectoryLocation::parse(&history.current_route())?;
        let expected = self.directory();
        if location.directory() != expected {
            return Err(LocationError::WrongDirectory { expected, found: location.directory() });
        }
        self.query.send_if_modified(|query| {
            if *query == location.query {
                return false;
            }
            *query = location.query;
            true
        });
        Ok(())
    }
}
