//! Score troops against a family's preferences.
//!
//! The `Scorer` trait produces an [`Assessment`]: a signed integer score and
//! the ordered reasons behind it. Implementations live in
//! `troop-finder-scorer`; the trait sits here so ranking and session code can
//! depend on the seam rather than a concrete rule table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Preferences, Troop};

/// Assess how well a troop fits a preference set.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and infallible:
/// missing troop data means a criterion is skipped, never an error.
/// Repeated calls with identical inputs must return identical assessments.
///
/// # Examples
///
/// ```rust
/// use troop_finder_core::{Assessment, Preferences, Reason, Scorer, Troop};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn assess(&self, _troop: &Troop, _preferences: &Preferences) -> Assessment {
///         Assessment::new(1, vec![Reason::matched("Every troop is welcome")])
///     }
/// }
///
/// let assessment = FlatScorer.assess(&Troop::new("1"), &Preferences::new());
/// assert_eq!(assessment.score, 1);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the score and reasons for `troop` under `preferences`.
    fn assess(&self, troop: &Troop, preferences: &Preferences) -> Assessment;
}

/// How a reason should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// The troop meets a preference or earns a bonus.
    Match,
    /// The troop misses a stated preference.
    Warning,
    /// Neutral information that does not affect the score.
    Info,
}

/// Human-readable justification attached to a rule firing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Presentation tone.
    pub tone: Tone,
    /// Reason text without any tone marker.
    pub text: String,
}

impl Reason {
    /// Construct a reason with an explicit tone.
    #[must_use]
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    /// A matching reason.
    #[must_use]
    pub fn matched(text: impl Into<String>) -> Self {
        Self::new(Tone::Match, text)
    }

    /// A warning reason.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Tone::Warning, text)
    }

    /// An informational reason.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Tone::Info, text)
    }
}

/// Renders warnings with a `⚠️` marker and information with `ℹ️`.
impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tone {
            Tone::Match => f.write_str(&self.text),
            Tone::Warning => write!(f, "⚠️ {}", self.text),
            Tone::Info => write!(f, "ℹ️ {}", self.text),
        }
    }
}

/// Score and ordered reasons for one troop.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assessment {
    /// Signed sum of every rule that fired.
    pub score: i32,
    /// Reasons in rule-evaluation order.
    pub reasons: Vec<Reason>,
}

impl Assessment {
    /// Construct an assessment.
    #[must_use]
    pub const fn new(score: i32, reasons: Vec<Reason>) -> Self {
        Self { score, reasons }
    }

    /// Report whether the troop is a positive match.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.score > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Reason::matched("Meets on Mondays"), "Meets on Mondays")]
    #[case(Reason::warning("Far away"), "⚠️ Far away")]
    #[case(Reason::info("Deposit required"), "ℹ️ Deposit required")]
    fn reasons_render_with_tone_markers(#[case] reason: Reason, #[case] expected: &str) {
        assert_eq!(reason.to_string(), expected);
    }

    #[rstest]
    #[case(1, true)]
    #[case(0, false)]
    #[case(-4, false)]
    fn positivity_is_strict(#[case] score: i32, #[case] positive: bool) {
        assert_eq!(Assessment::new(score, Vec::new()).is_positive(), positive);
    }
}
