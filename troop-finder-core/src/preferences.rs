//! What a family is looking for in a troop.
//!
//! A [`Preferences`] value is built fresh for every recommendation request
//! and is never persisted. Every criterion is optional; an empty preference
//! set scores troops on their intrinsic bonuses alone.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::schedule::MeetingDay;
use crate::troop::SizeCategory;

/// Maximum-distance value that means "any distance".
pub const NO_DISTANCE_LIMIT: f64 = 999.0;

/// Errors raised when parsing preference values from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceParseError {
    /// The value did not name a known option.
    #[error("unknown {field} '{value}' (expected one of: {expected})")]
    UnknownOption {
        /// Preference being parsed.
        field: &'static str,
        /// Offending input.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// The distance was not a non-negative number.
    #[error("invalid maximum distance '{value}'")]
    InvalidDistance {
        /// Offending input.
        value: String,
    },
}

/// Upper bound on travel distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceLimit {
    /// No limit; distance rules never fire.
    #[default]
    Unlimited,
    /// Troops within this many miles are preferred.
    Miles(f64),
}

impl DistanceLimit {
    /// Build a limit from a raw mile value.
    ///
    /// Values at or above [`NO_DISTANCE_LIMIT`], and non-finite values, mean
    /// no limit.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::DistanceLimit;
    ///
    /// assert_eq!(DistanceLimit::from_miles(10.0), DistanceLimit::Miles(10.0));
    /// assert_eq!(DistanceLimit::from_miles(999.0), DistanceLimit::Unlimited);
    /// ```
    #[must_use]
    pub fn from_miles(miles: f64) -> Self {
        if miles.is_finite() && miles < NO_DISTANCE_LIMIT {
            Self::Miles(miles)
        } else {
            Self::Unlimited
        }
    }

    /// The active limit in miles, if any.
    #[must_use]
    pub const fn miles(self) -> Option<f64> {
        match self {
            Self::Unlimited => None,
            Self::Miles(miles) => Some(miles),
        }
    }

    /// Report whether a limit is active.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Miles(_))
    }
}

impl FromStr for DistanceLimit {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return Ok(Self::Unlimited);
        }
        match trimmed.parse::<f64>() {
            Ok(miles) if miles >= 0.0 && !miles.is_nan() => Ok(Self::from_miles(miles)),
            _ => Err(PreferenceParseError::InvalidDistance {
                value: s.to_owned(),
            }),
        }
    }
}

macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Return the option as its lowercase keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = PreferenceParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(PreferenceParseError::UnknownOption {
                        field: $field,
                        value: s.to_owned(),
                        expected: concat!($($text, " "),+),
                    }),
                }
            }
        }
    };
}

preference_enum! {
    /// Programme emphasis the family cares most about.
    ActivityFocus, "activity focus" {
        /// Camping, hiking and adventure.
        Outdoor => "outdoor",
        /// Advancement towards Eagle Scout.
        Eagle => "eagle",
        /// A mix of advancement, activities and life skills.
        Balanced => "balanced",
    }
}

preference_enum! {
    /// How much scouting the youth has done.
    ExperienceLevel, "experience level" {
        /// Bridging from Cub Scouts.
        New => "new",
        /// Already an active scout.
        Experienced => "experienced",
    }
}

preference_enum! {
    /// Temperament of the youth joining.
    Personality, "personality" {
        /// Prefers a smaller, quieter group.
        Cautious => "cautious",
        /// Eager to take on leadership.
        Confident => "confident",
    }
}

/// A family's criteria for ranking troops.
///
/// # Examples
/// ```
/// use troop_finder_core::{ActivityFocus, DistanceLimit, MeetingDay, Preferences};
///
/// let prefs = Preferences::new()
///     .with_meeting_day(MeetingDay::Monday)
///     .with_max_distance(DistanceLimit::Miles(10.0))
///     .with_activity(ActivityFocus::Outdoor);
/// assert_eq!(prefs.meeting_day, Some(MeetingDay::Monday));
/// assert!(prefs.max_distance.is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Preferences {
    /// Preferred meeting day.
    pub meeting_day: Option<MeetingDay>,
    /// Maximum acceptable distance from home.
    pub max_distance: DistanceLimit,
    /// Programme emphasis.
    pub activity: Option<ActivityFocus>,
    /// Preferred troop size.
    pub size: Option<SizeCategory>,
    /// Scouting experience of the youth.
    pub experience: Option<ExperienceLevel>,
    /// Temperament of the youth.
    pub personality: Option<Personality>,
}

impl Preferences {
    /// An empty preference set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred meeting day.
    #[must_use]
    pub const fn with_meeting_day(mut self, day: MeetingDay) -> Self {
        self.meeting_day = Some(day);
        self
    }

    /// Set the maximum distance.
    #[must_use]
    pub const fn with_max_distance(mut self, limit: DistanceLimit) -> Self {
        self.max_distance = limit;
        self
    }

    /// Set the programme emphasis.
    #[must_use]
    pub const fn with_activity(mut self, activity: ActivityFocus) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Set the preferred size.
    #[must_use]
    pub const fn with_size(mut self, size: SizeCategory) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the experience level.
    #[must_use]
    pub const fn with_experience(mut self, experience: ExperienceLevel) -> Self {
        self.experience = Some(experience);
        self
    }

    /// Set the personality.
    #[must_use]
    pub const fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    /// Report whether the activity emphasis is `focus`.
    #[must_use]
    pub fn wants_activity(&self, focus: ActivityFocus) -> bool {
        self.activity == Some(focus)
    }

    /// Report whether the experience level is `level`.
    #[must_use]
    pub fn has_experience(&self, level: ExperienceLevel) -> bool {
        self.experience == Some(level)
    }

    /// Report whether the personality is `personality`.
    #[must_use]
    pub fn has_personality(&self, personality: Personality) -> bool {
        self.personality == Some(personality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10", DistanceLimit::Miles(10.0))]
    #[case(" 7.5 ", DistanceLimit::Miles(7.5))]
    #[case("999", DistanceLimit::Unlimited)]
    #[case("5000", DistanceLimit::Unlimited)]
    #[case("any", DistanceLimit::Unlimited)]
    #[case("", DistanceLimit::Unlimited)]
    fn distance_limits_parse(#[case] input: &str, #[case] expected: DistanceLimit) {
        assert_eq!(input.parse::<DistanceLimit>(), Ok(expected));
    }

    #[rstest]
    #[case("-1")]
    #[case("far")]
    #[case("NaN")]
    fn distance_limits_reject_nonsense(#[case] input: &str) {
        assert!(matches!(
            input.parse::<DistanceLimit>(),
            Err(PreferenceParseError::InvalidDistance { .. })
        ));
    }

    #[rstest]
    #[case("Outdoor", ActivityFocus::Outdoor)]
    #[case("eagle", ActivityFocus::Eagle)]
    #[case(" BALANCED ", ActivityFocus::Balanced)]
    fn activity_parses_case_insensitively(#[case] input: &str, #[case] expected: ActivityFocus) {
        assert_eq!(input.parse::<ActivityFocus>(), Ok(expected));
    }

    #[rstest]
    fn unknown_options_name_the_field() {
        let err = "shy"
            .parse::<Personality>()
            .expect_err("unknown personality");
        assert!(err.to_string().contains("personality"));
        assert!(err.to_string().contains("cautious"));
    }

    #[rstest]
    fn empty_preferences_have_no_active_limit() {
        let prefs = Preferences::new();
        assert!(!prefs.max_distance.is_active());
        assert!(prefs.meeting_day.is_none());
    }
}
