//! Selectable values for each filter dimension.

use std::time::Duration;

use common::{
    directory_records::MasterRecord,
    filter_dimension::{FilterDimension, MasterList, ValueSource},
    query_descriptor::QueryDescriptor,
};
use serde::{Deserialize, Serialize};

use crate::{api_client::ApiClient, error::FetchError, listing_fetcher::ListingFetcher};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self { label: value.clone(), value }
    }
}

/// Static enumerations come from the dimension itself; master lists are
/// fetched once per cache window and shared by every filter control.
#[derive(Clone)]
pub struct OptionSource {
    masters: ListingFetcher<MasterRecord>,
}

impl OptionSource {
    pub fn new(client: ApiClient, master_ttl: Duration) -> Self {
        Self { masters: ListingFetcher::new(client, master_ttl) }
    }

    pub async fn options(&self, dimension: FilterDimension) -> Result<Vec<FilterOption>, FetchError> {
        match dimension.value_source() {
            ValueSource::Static(values) => Ok(values.iter().map(|v| FilterOption::plain(*v)).collect()),
            ValueSource::Master(list) => self.master_options(list).await,
        }
    }

    pub async fn master_options(&self, list: MasterList) -> Result<Vec<FilterOption>, FetchError> {
        let page = self.masters.fetch(&QueryDescriptor::path_only(list.path())).await?;
        let mut options: Vec<FilterOption> = Vec::with_capacity(page.items.len());
        for record in page.items.iter() {
            let name = record.name.trim();
            if name.is_empty() || options.iter().any(|o| o.value == name) {
                continue;
            }
            options.push(FilterOption::plain(name));
        }
        tracing::debug!("{} options loaded for {}", options.len(), list.name());
        Ok(options)
    }
}

/// Case-insensitive substring match over labels; an empty needle keeps everything.
pub fn narrow(options: &[FilterOption], needle: &str) -> Vec<FilterOption> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return options.to_vec();
    }
    options.iter().filter(|o| o.label.to_lowercase().contains(&needle)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::config::ClientConfig;

    fn source(server: &MockServer) -> OptionSource {
        let client = ApiClient::new(&ClientConfig::with_base_url(server.uri())).unwrap();
        OptionSource::new(client, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn static_dimensions_need_no_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&server).await;

        let options = source(&server).options(FilterDimension::HeadCountRanges).await.unwrap();
        assert_eq!(options.first(), Some(&FilterOption::plain("1-10")));
    }

    #[tokio::test]
    async fn master_list_is_fetched_once_per_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/directory/masters/skills"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"ID": 1, "name": "AutoCAD"}, {"ID": 2, "name": "Revit"}, {"ID": 3, "name": "Revit "}],
                "page": 1, "pageSize": 100, "totalItems": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = source(&server);
        let (a, b) = tokio::join!(source.options(FilterDimension::Skills), source.options(FilterDimension::Skills));
        assert_eq!(a.unwrap(), vec![FilterOption::plain("AutoCAD"), FilterOption::plain("Revit")]);
        assert_eq!(b.unwrap().len(), 2);
        assert_eq!(source.options(FilterDimension::Skills).await.unwrap().len(), 2);
    }

    #[test]
    fn narrow_is_case_insensitive() {
        let options: Vec<_> = ["Civil Engineering", "Structural Engineering", "Arts"].map(FilterOption::plain).into();
        assert_eq!(narrow(&options, "ENGIN").len(), 2);
        assert_eq!(narrow(&options, " arts "), vec![FilterOption::plain("Arts")]);
        assert_eq!(narrow(&options, "").len(), 3);
    }
}
