//! HTTP access to the directory REST API.

use std::time::Duration;

use common::query_descriptor::QueryDescriptor;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{config::ClientConfig, error::FetchError, session::Session};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: Session::new(config.api_token.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url_for(&self, descriptor: &QueryDescriptor) -> String {
        format!("{}{}", self.base_url, descriptor.to_request_uri())
    }

    /// GETs the descriptor and decodes the JSON body.
    ///
    /// A 401 or 403 also expires the session; the status still reaches the caller.
    pub async fn get_json<T: DeserializeOwned>(&self, descriptor: &QueryDescriptor) -> Result<T, FetchError> {
        let url = self.url_for(descriptor);
        let mut request = self.http.get(&url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let t0 = std::time::Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let dt_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            tracing::warn!("GET {url} failed: {status} ({dt_ms}ms)");
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                self.session.expire();
            }
            return Err(FetchError::Http { status: status.as_u16(), body });
        }
        tracing::debug!("GET {url}: {status}, len = {} ({dt_ms}ms)", body.len());

        serde_json::from_str(&body).map_err(|e| FetchError::Decode { message: e.to_string() })
    }
}
