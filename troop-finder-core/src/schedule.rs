//! Weekly meeting days.
//!
//! # Examples
//! ```
//! use troop_finder_core::MeetingDay;
//!
//! assert_eq!(MeetingDay::Monday.as_str(), "Monday");
//! assert_eq!("friday".parse::<MeetingDay>(), Ok(MeetingDay::Friday));
//! ```

use serde::{Deserialize, Serialize};

/// Day of the week a troop meets.
///
/// Every weekday parses so that any dataset loads, but only the days local
/// troops actually meet on carry a position in the schedule ordering; see
/// [`MeetingDay::sort_rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingDay {
    /// Monday evenings.
    Monday,
    /// Tuesday evenings.
    Tuesday,
    /// Wednesday evenings.
    Wednesday,
    /// Thursday evenings.
    Thursday,
    /// Friday evenings.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl MeetingDay {
    /// Return the capitalised day name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Position used when sorting troops by meeting day.
    ///
    /// The table ranks Monday, Tuesday, Wednesday and Friday. Thursday and
    /// weekend days rank `0`, the same as a troop without a known day.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::MeetingDay;
    ///
    /// assert_eq!(MeetingDay::Friday.sort_rank(), 5);
    /// assert_eq!(MeetingDay::Thursday.sort_rank(), 0);
    /// ```
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Friday => 5,
            Self::Thursday | Self::Saturday | Self::Sunday => 0,
        }
    }
}

impl std::fmt::Display for MeetingDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeetingDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(format!("unknown meeting day '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(MeetingDay::Wednesday.to_string(), "Wednesday");
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = MeetingDay::from_str("Funday").unwrap_err();
        assert!(err.contains("unknown meeting day"));
    }

    #[test]
    fn ranked_days_keep_calendar_order() {
        let ranks: Vec<u8> = [
            MeetingDay::Monday,
            MeetingDay::Tuesday,
            MeetingDay::Wednesday,
            MeetingDay::Friday,
        ]
        .into_iter()
        .map(MeetingDay::sort_rank)
        .collect();
        assert!(ranks.is_sorted());
        assert!(ranks.iter().all(|rank| *rank > 0));
    }
}
