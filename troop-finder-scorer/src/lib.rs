//! Preference scoring and ranking for troops.
//!
//! The crate provides two layers:
//! - **Scoring**: [`RuleScorer`] folds an ordered, declarative rule table
//!   over a troop and a preference set, producing a signed score and the
//!   reasons behind it. It implements the
//!   [`Scorer`](troop_finder_core::Scorer) trait so callers can swap in other
//!   strategies.
//! - **Ranking**: [`rank`] scores a whole collection and orders it best
//!   first without disturbing ties; [`select_top`] keeps the strongest
//!   positive matches or reports that there are none.
//!
//! # Examples
//!
//! ```
//! use troop_finder_core::{ActivityFocus, Preferences, Troop};
//! use troop_finder_scorer::{Recommendation, RuleScorer, TOP_RECOMMENDATIONS, recommend};
//!
//! let troops = vec![Troop::new("6"), Troop::new("36")];
//! let prefs = Preferences::new().with_activity(ActivityFocus::Outdoor);
//!
//! let outcome = recommend(&troops, &prefs, &RuleScorer::new(), TOP_RECOMMENDATIONS);
//! assert_eq!(outcome, Recommendation::NoStrongMatches);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod ranking;
pub mod rules;

pub use engine::{RuleScorer, ScoringContext};
pub use error::RuleTableError;
pub use ranking::{
    DISTANCE_PROMPT, NO_STRONG_MATCHES_MESSAGE, Recommendation, ScoredTroop, TOP_RECOMMENDATIONS,
    needs_distances, rank, recommend, select_top,
};
pub use rules::{DEFAULT_RULES, Predicate, ReasonTemplate, Renderer, Rule, RuleInput};
