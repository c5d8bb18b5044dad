//! Client configuration loaded from the environment.

use std::{fmt::Display, str::FromStr, time::Duration};

use anyhow::Context;
use common::directory_const::{LISTING_CACHE_TTL_SECS, MASTER_CACHE_TTL_SECS};
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub listing_cache_ttl: Duration,
    pub master_cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            listing_cache_ttl: Duration::from_secs(LISTING_CACHE_TTL_SECS),
            master_cache_ttl: Duration::from_secs(MASTER_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self { api_base_url: api_base_url.into(), ..Self::default() }
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let loader = Loader { lookup };
        Ok(Self {
            api_base_url: loader.try_load("TRIKONA_API_BASE_URL", DEFAULT_API_BASE_URL)?,
            api_token: loader.var("TRIKONA_API_TOKEN").filter(|token| !token.trim().is_empty()),
            listing_cache_ttl: Duration::from_secs(
                loader.try_load("TRIKONA_LISTING_CACHE_TTL_SECS", &LISTING_CACHE_TTL_SECS.to_string())?,
            ),
            master_cache_ttl: Duration::from_secs(
                loader.try_load("TRIKONA_MASTER_CACHE_TTL_SECS", &MASTER_CACHE_TTL_SECS.to_string())?,
            ),
            request_timeout: Duration::from_secs(
                loader.try_load("TRIKONA_REQUEST_TIMEOUT_SECS", &DEFAULT_REQUEST_TIMEOUT_SECS.to_string())?,
            ),
        })
    }
}

struct Loader<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Loader<F> {
    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn try_load<T: FromStr>(&self, key: &str, default: &str) -> anyhow::Result<T>
    where
        T::Err: Display,
    {
        let raw = self.var(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        });
        raw.parse::<T>()
            .map_err(|e| {
                warn!("Invalid {key} value: {e}");
                anyhow::anyhow!("{e}")
            })
            .with_context(|| format!("Environment misconfigured: {key}={raw}"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.listing_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TRIKONA_API_BASE_URL", "https://api.trikona.test/v2"),
            ("TRIKONA_API_TOKEN", "secret"),
            ("TRIKONA_LISTING_CACHE_TTL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.trikona.test/v2");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.listing_cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("TRIKONA_API_TOKEN", "  ")])).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[("TRIKONA_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("TRIKONA_REQUEST_TIMEOUT_SECS"));
    }
}
