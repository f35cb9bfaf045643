//! HTTP adapters for address lookup.
//!
//! [`NominatimGeocoder`] implements [`troop_finder_core::Geocoder`] and
//! [`PhotonSuggester`] offers completions for partially typed addresses.
//! Both own a blocking JSON client configured through [`ServiceConfig`].

mod client;
mod nominatim;
mod photon;

pub use client::{DEFAULT_USER_AGENT, ProviderBuildError, ServiceConfig};
pub use nominatim::{DEFAULT_NOMINATIM_URL, NominatimGeocoder};
pub use photon::{DEFAULT_PHOTON_URL, MIN_SUGGESTION_QUERY_CHARS, PhotonSuggester};
