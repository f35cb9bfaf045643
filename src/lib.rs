//! Facade crate for the troop finder.
//!
//! This crate re-exports the domain types and the rule-based scorer, and
//! exposes dataset, cache and geocoding adapters behind the `data` feature.

#![forbid(unsafe_code)]

pub use troop_finder_core::{
    ActivityFocus, Assessment, DistanceLimit, ExperienceLevel, GeocodeError, Geocoder,
    MeetingDay, Personality, Preferences, Reason, Scorer, SessionContext, SizeCategory,
    SortColumn, SortDirection, SortState, Tone, Troop, TroopId, haversine_distance,
};
pub use troop_finder_scorer::{
    Recommendation, RuleScorer, ScoredTroop, ScoringContext, TOP_RECOMMENDATIONS,
    needs_distances, rank, recommend,
};

#[cfg(feature = "data")]
pub use troop_finder_data::{
    DistanceCache, DistanceReport, NominatimGeocoder, PhotonSuggester, load_troops,
    populate_distances,
};
