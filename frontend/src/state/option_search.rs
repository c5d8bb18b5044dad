//! Narrowing of a single dimension's option list.

use std::time::Duration;

use client::{FetchError, FilterOption, OptionSource, option_source::narrow};
use common::filter_dimension::FilterDimension;

use crate::state::debounce::Debounced;

pub struct OptionSearch {
    dimension: FilterDimension,
    options: Vec<FilterOption>,
    needle: Debounced<String>,
}

impl OptionSearch {
    pub fn new(dimension: FilterDimension, options: Vec<FilterOption>, delay: Duration) -> Self {
        Self { dimension, options, needle: Debounced::new(String::new(), delay) }
    }

    pub async fn load(source: &OptionSource, dimension: FilterDimension, delay: Duration) -> Result<Self, FetchError> {
        let options = source.options(dimension).await?;
        Ok(Self::new(dimension, options, delay))
    }

    pub fn dimension(&self) -> FilterDimension {
        self.dimension
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<FilterOption>) {
        self.options = options;
    }

    pub fn set_needle(&self, needle: impl Into<String>) {
        self.needle.set(needle.into());
    }

    pub fn needle(&self) -> String {
        self.needle.current()
    }

    /// Options matching the settled needle.
    pub fn visible(&self) -> Vec<FilterOption> {
        narrow(&self.options, &self.needle.current())
    }
}

#[cfg(test)]
mod tests {
    use common::directory_const::OPTION_FILTER_DEBOUNCE_MS;
    use tokio::time::sleep;

    use super::*;

    fn search() -> OptionSearch {
        let options = ["Andhra Pradesh", "Goa", "Gujarat", "Karnataka"].map(FilterOption::plain).into();
        OptionSearch::new(FilterDimension::State, options, Duration::from_millis(OPTION_FILTER_DEBOUNCE_MS))
    }

    #[tokio::test(start_paused = true)]
    async fn list_narrows_after_the_needle_settles() {
        let search = search();
        search.set_needle("g");
        search.set_needle("gu");
        assert_eq!(search.visible().len(), 4);

        sleep(Duration::from_millis(OPTION_FILTER_DEBOUNCE_MS + 50)).await;
        assert_eq!(search.needle(), "gu");
        assert_eq!(search.visible(), vec![FilterOption::plain("Gujarat")]);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_needle_restores_everything() {
        let search = search();
        search.set_needle("kar");
        sleep(Duration::from_millis(OPTION_FILTER_DEBOUNCE_MS + 50)).await;
        assert_eq!(search.visible().len(), 1);

        search.set_needle("");
        sleep(Duration::from_millis(OPTION_FILTER_DEBOUNCE_MS + 50)).await;
        assert_eq!(search.visible().len(), 4);
    }
}
