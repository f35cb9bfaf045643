//! Blocking JSON client shared by the geocoding services.
//!
//! The [`troop_finder_core::Geocoder`] seam is synchronous, so each service
//! owns a current-thread Tokio runtime and blocks on its `reqwest` futures.
//! Inside an existing multi-threaded runtime the caller's handle is used via
//! [`tokio::task::block_in_place`] instead, which avoids nested-runtime
//! panics. Inside a `current_thread` runtime the owned runtime is used; that
//! can stall if the caller's runtime drives IO this request needs.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use troop_finder_core::GeocodeError;
use url::Url;

/// User agent sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "troop-finder/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while constructing a geocoding client.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL does not parse.
    #[error("invalid service URL {url}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Connection settings for a geocoding service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service root, e.g. `"https://nominatim.openstreetmap.org"`.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl ServiceConfig {
    /// Configuration for the service rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Resolve `path` against the base URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ProviderBuildError> {
        let raw = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|source| ProviderBuildError::InvalidUrl { url: raw, source })
    }
}

/// `reqwest` client paired with the runtime that drives it.
pub(super) struct JsonClient {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for JsonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonClient")
            .field("client", &self.client)
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl JsonClient {
    pub(super) fn build(config: &ServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout: config.timeout,
        })
    }

    /// Fetch `url` and decode the JSON body, blocking the calling thread.
    pub(super) fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GeocodeError> {
        let future = self.fetch(url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, GeocodeError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        response.json().await.map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeocodeError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        GeocodeError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
