//! Address suggestions from the Photon API.

use serde::Deserialize;
use troop_finder_core::GeocodeError;
use url::Url;

use super::client::{JsonClient, ProviderBuildError, ServiceConfig};

/// Public Photon instance.
pub const DEFAULT_PHOTON_URL: &str = "https://photon.komoot.io";

/// Shortest trimmed query, in characters, that is sent to the service.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 3;

/// Maximum number of suggestions requested.
const SUGGESTION_LIMIT: &str = "5";

#[derive(Debug, Default, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    #[serde(default)]
    properties: PhotonProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PhotonProperties {
    housenumber: Option<String>,
    street: Option<String>,
    name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}

impl PhotonProperties {
    /// Format as `"123 Main St, San Ramon CA 94582"`.
    ///
    /// The street part falls back to the bare street, then the place name.
    fn display_text(&self) -> Option<String> {
        let street = match (present(self.housenumber.as_ref()), present(self.street.as_ref())) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.to_owned()),
            _ => present(self.name.as_ref()).map(str::to_owned),
        };
        let locality = [&self.city, &self.state, &self.postcode]
            .into_iter()
            .filter_map(|part| present(part.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        let text = street
            .into_iter()
            .chain(Some(locality).filter(|text| !text.is_empty()))
            .collect::<Vec<_>>()
            .join(", ");
        Some(text).filter(|text| !text.is_empty())
    }
}

/// Client for `GET {base}/api/?q=..&limit=5`.
///
/// # Examples
///
/// ```no_run
/// use troop_finder_data::PhotonSuggester;
///
/// let suggester = PhotonSuggester::new()?;
/// for suggestion in suggester.suggest("2501 Crow Can")? {
///     println!("{suggestion}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PhotonSuggester {
    client: JsonClient,
    api_url: Url,
}

impl PhotonSuggester {
    /// Suggester for the public instance.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] when the client cannot be built.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(&ServiceConfig::new(DEFAULT_PHOTON_URL))
    }

    /// Suggester for the instance described by `config`.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] for an invalid base URL or when the
    /// client cannot be built.
    pub fn with_config(config: &ServiceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            api_url: config.endpoint("api/")?,
            client: JsonClient::build(config)?,
        })
    }

    /// Suggest formatted addresses for a partial `query`.
    ///
    /// Queries shorter than [`MIN_SUGGESTION_QUERY_CHARS`] after trimming
    /// return no suggestions without contacting the service.
    ///
    /// # Errors
    /// Returns [`GeocodeError`] for transport failures and undecodable
    /// responses.
    pub fn suggest(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let response: PhotonResponse = self.client.get_json(self.api_url(query))?;
        Ok(suggestions(response))
    }

    fn api_url(&self, query: &str) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", SUGGESTION_LIMIT);
        url
    }
}

fn suggestions(response: PhotonResponse) -> Vec<String> {
    response
        .features
        .iter()
        .filter_map(|feature| feature.properties.display_text())
        .collect()
}
