//! [`Geocoder`] backed by the Nominatim search API.

use geo::Coord;
use serde::Deserialize;
use troop_finder_core::{GeocodeError, Geocoder};
use url::Url;

use super::client::{JsonClient, ProviderBuildError, ServiceConfig};

/// Public OpenStreetMap Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// One search hit. Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct NominatimPlace {
    pub(crate) lat: String,
    pub(crate) lon: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
}

impl NominatimPlace {
    fn position(&self) -> Result<Coord<f64>, GeocodeError> {
        let parse = |field: &str, raw: &str| {
            raw.trim().parse::<f64>().map_err(|err| GeocodeError::Parse {
                message: format!("invalid {field} '{raw}': {err}"),
            })
        };
        Ok(Coord {
            x: parse("lon", &self.lon)?,
            y: parse("lat", &self.lat)?,
        })
    }
}

/// Geocoder issuing `GET {base}/search?format=json&q=..&limit=1`.
///
/// # Examples
///
/// ```no_run
/// use troop_finder_core::Geocoder;
/// use troop_finder_data::NominatimGeocoder;
///
/// let geocoder = NominatimGeocoder::new()?;
/// if let Some(home) = geocoder.geocode("2501 Crow Canyon Rd, San Ramon, CA")? {
///     println!("{}, {}", home.y, home.x);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: JsonClient,
    search_url: Url,
}

impl NominatimGeocoder {
    /// Geocoder for the public instance.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] when the client cannot be built.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(&ServiceConfig::new(DEFAULT_NOMINATIM_URL))
    }

    /// Geocoder for the instance described by `config`.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError`] for an invalid base URL or when the
    /// client cannot be built.
    pub fn with_config(config: &ServiceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            search_url: config.endpoint("search")?,
            client: JsonClient::build(config)?,
        })
    }

    fn search_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", address)
            .append_pair("limit", "1");
        url
    }
}

fn first_position(places: &[NominatimPlace]) -> Result<Option<Coord<f64>>, GeocodeError> {
    places.first().map(NominatimPlace::position).transpose()
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        let places: Vec<NominatimPlace> = self.client.get_json(self.search_url(address))?;
        if let Some(name) = places.first().and_then(|place| place.display_name.as_deref()) {
            log::debug!("'{address}' matched '{name}'");
        }
        first_position(&places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn geocoder() -> NominatimGeocoder {
        NominatimGeocoder::with_config(&ServiceConfig::new("https://nominatim.example/"))
            .expect("geocoder should build")
    }

    #[rstest]
    fn search_url_encodes_the_address(geocoder: NominatimGeocoder) {
        assert_eq!(
            geocoder.search_url("12 Main St, San Ramon").as_str(),
            "https://nominatim.example/search?format=json&q=12+Main+St%2C+San+Ramon&limit=1"
        );
    }

    #[rstest]
    fn blank_addresses_skip_the_network(geocoder: NominatimGeocoder) {
        assert_eq!(geocoder.geocode("  "), Err(GeocodeError::EmptyAddress));
    }

    #[rstest]
    fn decodes_string_coordinates() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"place_id": 1, "lat": "37.7799", "lon": "-121.9780", "display_name": "San Ramon"}]"#,
        )
        .expect("valid response");
        assert_eq!(
            first_position(&places),
            Ok(Some(Coord {
                x: -121.978,
                y: 37.7799
            }))
        );
    }

    #[rstest]
    fn empty_results_are_no_match() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").expect("valid response");
        assert_eq!(first_position(&places), Ok(None));
    }

    #[rstest]
    fn unparseable_coordinates_are_parse_errors() {
        let places = [NominatimPlace {
            lat: "north".into(),
            lon: "-121.9".into(),
            display_name: None,
        }];
        assert!(matches!(
            first_position(&places),
            Err(GeocodeError::Parse { message }) if message.starts_with("invalid lat 'north'")
        ));
    }
}
