//! Great-circle distances between troop meeting places and a home address.
//!
//! Coordinates follow the `geo` convention used throughout the workspace:
//! `x` is longitude and `y` is latitude, both in degrees.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Radius of the Earth used by [`haversine_distance`], in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles between two WGS84 coordinates.
///
/// The haversine formula is symmetric and returns `0.0` for identical
/// points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use troop_finder_core::haversine_distance;
///
/// let a = Coord { x: -121.978, y: 37.780 };
/// let b = Coord { x: -121.955, y: 37.740 };
/// let miles = haversine_distance(a, b);
/// assert!(miles > 2.0 && miles < 4.0);
/// assert_eq!(miles, haversine_distance(b, a));
/// ```
#[must_use]
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let half_chord = (d_lat / 2.0).sin().powi(2)
        + a.y.to_radians().cos() * b.y.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_MILES * angle
}

/// Latitude/longitude pair as stored in the troop dataset.
///
/// The dataset spells coordinates as `{ "lat": .., "lon": .. }`; convert to
/// [`Coord`] before computing distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl From<Coordinates> for Coord<f64> {
    fn from(value: Coordinates) -> Self {
        Self {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lon: value.x,
        }
    }
}
