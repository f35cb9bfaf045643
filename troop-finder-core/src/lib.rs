//! Core domain types for the troop finder.
//!
//! The crate models a read-only troop dataset, the preference set a family
//! supplies, and the seams that scoring and geocoding plug into. Everything
//! here is synchronous and free of I/O; adapters live in
//! `troop-finder-data`.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use troop_finder_core::haversine_distance;
//!
//! let san_ramon = Coord { x: -121.978, y: 37.780 };
//! assert_eq!(haversine_distance(san_ramon, san_ramon), 0.0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geocode;
pub mod geodesy;
pub mod involvement;
mod lenient;
pub mod preferences;
pub mod programs;
pub mod schedule;
pub mod scorer;
pub mod search;
pub mod session;
pub mod sorting;
pub mod troop;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use geocode::{GeocodeError, Geocoder};
pub use geodesy::{Coordinates, EARTH_RADIUS_MILES, haversine_distance};
pub use involvement::{InvolvementPlan, ParentInvolvement, volunteer_hours, volunteer_hours_label};
pub use preferences::{
    ActivityFocus, DistanceLimit, ExperienceLevel, NO_DISTANCE_LIMIT, Personality,
    PreferenceParseError, Preferences,
};
pub use programs::{ProgramValue, SpecializedPrograms};
pub use schedule::MeetingDay;
pub use scorer::{Assessment, Reason, Scorer, Tone};
pub use search::{filter_troops, parse_search_query, searchable_text};
pub use session::{HomeLocation, SessionContext};
pub use sorting::{SortColumn, SortDirection, SortState, sort_troops};
pub use troop::{ScoutAttributes, SizeCategory, Troop, TroopId, TroopSize};
