//! Geocoder trait.

use geo::Coord;

use super::error::GeocodeError;

/// Resolve an address to a coordinate (`x` = longitude, `y` = latitude).
///
/// Implementations must reject blank addresses with
/// [`GeocodeError::EmptyAddress`] and return `Ok(None)` when the service has
/// no match.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use troop_finder_core::{GeocodeError, Geocoder};
///
/// struct FixedGeocoder;
///
/// impl Geocoder for FixedGeocoder {
///     fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
///         if address.trim().is_empty() {
///             return Err(GeocodeError::EmptyAddress);
///         }
///         Ok(Some(Coord { x: -121.978, y: 37.780 }))
///     }
/// }
///
/// let home = FixedGeocoder.geocode("12 Main St, San Ramon")?;
/// assert!(home.is_some());
/// assert_eq!(FixedGeocoder.geocode("  "), Err(GeocodeError::EmptyAddress));
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder {
    /// Look up `address`.
    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}
