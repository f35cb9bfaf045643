//! Measure each troop's distance from a home address.

use std::collections::BTreeMap;

use geo::Coord;
use thiserror::Error;
use troop_finder_core::{GeocodeError, Geocoder, Troop, TroopId, haversine_distance};

/// Errors that stop a distance run before any troop changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The home address lookup failed.
    #[error("could not look up your address")]
    HomeLookup(#[from] GeocodeError),
    /// The geocoder has no match for the home address.
    #[error("could not find your address: {address}")]
    HomeNotFound {
        /// Address as supplied.
        address: String,
    },
}

/// Outcome of [`populate_distances`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceReport {
    /// Geocoded home position.
    pub home: Coord<f64>,
    /// Miles from home for every troop that resolved.
    pub distances: BTreeMap<TroopId, f64>,
    /// Troops without an address, without a match, or whose lookup failed.
    pub skipped: Vec<TroopId>,
}

/// Geocode `home_address`, then each troop's address, and set distances.
///
/// Lookups run one at a time in slice order. A troop that cannot be placed is
/// logged, listed in [`DistanceReport::skipped`], and keeps its previous
/// distance.
///
/// # Errors
/// Returns [`DistanceError`] when the home address cannot be resolved; no
/// troop is modified in that case.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use troop_finder_core::{GeocodeError, Geocoder, Troop};
/// use troop_finder_data::populate_distances;
///
/// struct Here;
///
/// impl Geocoder for Here {
///     fn geocode(&self, _address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
///         Ok(Some(Coord { x: -121.978, y: 37.780 }))
///     }
/// }
///
/// let mut troops = vec![Troop { address: Some("1 Oak Ave".into()), ..Troop::new("6") }];
/// let report = populate_distances(&Here, "12 Main St", &mut troops)?;
/// assert_eq!(troops[0].distance, Some(0.0));
/// assert!(report.skipped.is_empty());
/// # Ok::<(), troop_finder_data::DistanceError>(())
/// ```
pub fn populate_distances<G>(
    geocoder: &G,
    home_address: &str,
    troops: &mut [Troop],
) -> Result<DistanceReport, DistanceError>
where
    G: Geocoder + ?Sized,
{
    let address = home_address.trim();
    let home = geocoder
        .geocode(address)?
        .ok_or_else(|| DistanceError::HomeNotFound {
            address: address.to_owned(),
        })?;
    log::info!("home address resolved to ({:.5}, {:.5})", home.y, home.x);

    let mut report = DistanceReport {
        home,
        ..DistanceReport::default()
    };
    for troop in troops.iter_mut() {
        match locate(geocoder, troop) {
            Some(position) => {
                let miles = haversine_distance(home, position);
                troop.distance = Some(miles);
                report.distances.insert(troop.troop.clone(), miles);
            }
            None => report.skipped.push(troop.troop.clone()),
        }
    }
    log::info!(
        "measured {} troops, skipped {}",
        report.distances.len(),
        report.skipped.len()
    );
    Ok(report)
}

fn locate<G>(geocoder: &G, troop: &Troop) -> Option<Coord<f64>>
where
    G: Geocoder + ?Sized,
{
    let Some(address) = troop.address.as_deref().filter(|a| !a.trim().is_empty()) else {
        log::warn!("troop {} has no address", troop.troop);
        return None;
    };
    match geocoder.geocode(address) {
        Ok(Some(position)) => Some(position),
        Ok(None) => {
            log::warn!("no match for troop {} at '{address}'", troop.troop);
            None
        }
        Err(err) => {
            log::warn!("geocoding troop {} failed: {err}", troop.troop);
            None
        }
    }
}
