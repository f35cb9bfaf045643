//! Rank troops by score and pick the strongest matches.

use troop_finder_core::{Preferences, Reason, Scorer, Troop};

/// Number of troops shown as recommendations.
pub const TOP_RECOMMENDATIONS: usize = 3;

/// Message shown when no recommendation has a positive score.
pub const NO_STRONG_MATCHES_MESSAGE: &str = "No strong matches found with your current preferences. \
     Try adjusting your filters or calculate distances first.";

/// Message shown when a distance limit is set before any distance is known.
pub const DISTANCE_PROMPT: &str =
    "Please calculate distances from your home address first to use distance preferences.";

/// A troop together with its assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTroop {
    /// The troop as loaded.
    pub troop: Troop,
    /// Signed score.
    pub score: i32,
    /// Reasons in rule order.
    pub reasons: Vec<Reason>,
}

/// Outcome of selecting recommendations.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// One or more positively scored troops, best first.
    Matches(Vec<ScoredTroop>),
    /// Nothing in the top slots scored above zero.
    NoStrongMatches,
    /// There were no troops to rank.
    NoTroops,
}

impl Recommendation {
    /// Borrow the matches; empty unless this is [`Recommendation::Matches`].
    #[must_use]
    pub fn matches(&self) -> &[ScoredTroop] {
        match self {
            Self::Matches(matches) => matches,
            Self::NoStrongMatches | Self::NoTroops => &[],
        }
    }
}

/// Score every troop and order them best first.
///
/// The sort is stable: troops with equal scores keep their input order.
///
/// # Examples
/// ```
/// use troop_finder_core::{MeetingDay, Preferences, Troop};
/// use troop_finder_scorer::{RuleScorer, rank};
///
/// let friday = Troop { meeting_day: Some(MeetingDay::Friday), ..Troop::new("36") };
/// let monday = Troop { meeting_day: Some(MeetingDay::Monday), ..Troop::new("6") };
/// let prefs = Preferences::new().with_meeting_day(MeetingDay::Monday);
///
/// let ranked = rank(&[friday, monday], &prefs, &RuleScorer::new());
/// assert_eq!(ranked[0].troop.troop.as_str(), "6");
/// assert_eq!(ranked[1].score, -5);
/// ```
#[must_use]
pub fn rank<S>(troops: &[Troop], preferences: &Preferences, scorer: &S) -> Vec<ScoredTroop>
where
    S: Scorer + ?Sized,
{
    let mut ranked: Vec<ScoredTroop> = troops
        .iter()
        .map(|troop| {
            let assessment = scorer.assess(troop, preferences);
            ScoredTroop {
                troop: troop.clone(),
                score: assessment.score,
                reasons: assessment.reasons,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Keep the first `limit` ranked troops that scored above zero.
///
/// An empty ranking yields [`Recommendation::NoTroops`] so callers can tell a
/// missing dataset apart from one where nothing scored well.
#[must_use]
pub fn select_top(ranked: Vec<ScoredTroop>, limit: usize) -> Recommendation {
    if ranked.is_empty() {
        return Recommendation::NoTroops;
    }
    let matches: Vec<ScoredTroop> = ranked
        .into_iter()
        .take(limit)
        .filter(|scored| scored.score > 0)
        .collect();
    if matches.is_empty() {
        Recommendation::NoStrongMatches
    } else {
        Recommendation::Matches(matches)
    }
}

/// Rank `troops` and select the top `limit`.
#[must_use]
pub fn recommend<S>(
    troops: &[Troop],
    preferences: &Preferences,
    scorer: &S,
    limit: usize,
) -> Recommendation
where
    S: Scorer + ?Sized,
{
    let ranked = rank(troops, preferences, scorer);
    log::info!(
        "ranked {} troops; best score {}",
        ranked.len(),
        ranked.first().map_or(0, |best| best.score)
    );
    select_top(ranked, limit)
}

/// Report whether a distance limit is set while no troop has a distance.
///
/// Callers should prompt for a home address instead of ranking; the ranking
/// itself stays correct either way, since distance rules simply never fire.
#[must_use]
pub fn needs_distances(troops: &[Troop], preferences: &Preferences) -> bool {
    preferences.max_distance.is_active() && troops.iter().all(|troop| troop.distance.is_none())
}
