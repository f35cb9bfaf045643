//! Data access for the troop finder.
//!
//! This crate reads the troop dataset, persists computed distances, and talks
//! to the geocoding services used to measure them:
//!
//! - [`load_troops`] decodes the JSON dataset.
//! - [`DistanceCache`] stores the home address and per-troop miles.
//! - [`populate_distances`] drives any [`troop_finder_core::Geocoder`].
//! - [`geocoding`] holds the Nominatim and Photon HTTP adapters.

#![forbid(unsafe_code)]

pub mod cache;
pub mod dataset;
pub mod distances;
pub mod fs;
pub mod geocoding;

pub use cache::{DistanceCache, DistanceCacheError};
pub use dataset::{DatasetError, load_troops, parse_troops};
pub use distances::{DistanceError, DistanceReport, populate_distances};
pub use geocoding::{
    DEFAULT_NOMINATIM_URL, DEFAULT_PHOTON_URL, NominatimGeocoder, PhotonSuggester,
    ProviderBuildError, ServiceConfig,
};
