//! Turn free-form addresses into coordinates.
//!
//! The `Geocoder` trait abstracts the lookup so distance population can be
//! driven by a real service in production and by a stub in tests. Lookups
//! that succeed but find nothing return `Ok(None)`; transport and decoding
//! failures are reported as [`GeocodeError`].

mod error;
mod provider;

pub use error::GeocodeError;
pub use provider::Geocoder;
