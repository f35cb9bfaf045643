//! Column sorting for the troop table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::involvement::volunteer_hours;
use crate::troop::Troop;

/// Size assumed for troops that report their size as prose.
const DEFAULT_SIZE: f64 = 50.0;

/// Founding year assumed for troops that do not report one.
const UNKNOWN_FOUNDED: f64 = 9999.0;

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortColumn {
    /// Unit number.
    Troop,
    /// Miles from home; unknown distances sort last.
    Distance,
    /// Weekday order.
    MeetingDay,
    /// Founding year; unknown years sort last.
    Founded,
    /// Reported head count.
    Size,
    /// Number of Eagle Scouts.
    Eagles,
    /// Volunteer hours asked of each family.
    VolunteerHours,
}

impl SortColumn {
    /// Every column, in table order.
    pub const ALL: [Self; 7] = [
        Self::Troop,
        Self::Distance,
        Self::MeetingDay,
        Self::Founded,
        Self::Size,
        Self::Eagles,
        Self::VolunteerHours,
    ];

    /// Return the kebab-case column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Troop => "troop",
            Self::Distance => "distance",
            Self::MeetingDay => "meeting-day",
            Self::Founded => "founded",
            Self::Size => "size",
            Self::Eagles => "eagles",
            Self::VolunteerHours => "volunteer-hours",
        }
    }

    fn key(self, troop: &Troop) -> f64 {
        match self {
            Self::Troop => troop
                .troop
                .numeric()
                .and_then(|id| u32::try_from(id).ok())
                .map_or(0.0, f64::from),
            Self::Distance => troop.distance.unwrap_or(f64::INFINITY),
            Self::MeetingDay => troop
                .meeting_day
                .map_or(0.0, |day| f64::from(day.sort_rank())),
            Self::Founded => troop
                .founded
                .filter(|year| *year != 0)
                .map_or(UNKNOWN_FOUNDED, f64::from),
            Self::Size => troop
                .size
                .as_ref()
                .and_then(|size| size.count())
                .map_or(DEFAULT_SIZE, f64::from),
            Self::Eagles => troop.eagle_count.map_or(0.0, f64::from),
            Self::VolunteerHours => f64::from(volunteer_hours(troop)),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "troop" => Ok(Self::Troop),
            "distance" => Ok(Self::Distance),
            "meeting-day" | "meetingday" | "day" => Ok(Self::MeetingDay),
            "founded" => Ok(Self::Founded),
            "size" => Ok(Self::Size),
            "eagles" => Ok(Self::Eagles),
            "volunteer-hours" | "hours" | "piphours" => Ok(Self::VolunteerHours),
            _ => Err(format!("unknown sort column '{s}'")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Currently selected column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    column: Option<SortColumn>,
    direction: SortDirection,
}

impl SortState {
    /// Sort by `column` in `direction`.
    #[must_use]
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Selected column, if any.
    #[must_use]
    pub const fn column(&self) -> Option<SortColumn> {
        self.column
    }

    /// Selected direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Select `column`.
    ///
    /// Choosing the current column again flips the direction; choosing a
    /// different column sorts it ascending.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::{SortColumn, SortDirection, SortState};
    ///
    /// let mut state = SortState::default();
    /// state.toggle(SortColumn::Founded);
    /// assert_eq!(state.direction(), SortDirection::Ascending);
    /// state.toggle(SortColumn::Founded);
    /// assert_eq!(state.direction(), SortDirection::Descending);
    /// state.toggle(SortColumn::Size);
    /// assert_eq!(state.column(), Some(SortColumn::Size));
    /// assert_eq!(state.direction(), SortDirection::Ascending);
    /// ```
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Sort `troops` by the selected column. Does nothing when no column is
    /// selected.
    pub fn apply<T: AsRef<Troop>>(&self, troops: &mut [T]) {
        if let Some(column) = self.column {
            sort_troops(troops, column, self.direction);
        }
    }
}

/// Stable sort of `troops` by `column`.
///
/// Troops with equal keys keep their relative order in either direction.
///
/// # Examples
/// ```
/// use troop_finder_core::{SortColumn, SortDirection, Troop, sort_troops};
///
/// let mut near = Troop::new("6");
/// near.distance = Some(2.0);
/// let mut troops = vec![Troop::new("36"), near];
///
/// sort_troops(&mut troops, SortColumn::Distance, SortDirection::Ascending);
/// assert_eq!(troops[0].troop.as_str(), "6");
/// ```
pub fn sort_troops<T: AsRef<Troop>>(troops: &mut [T], column: SortColumn, direction: SortDirection) {
    troops.sort_by(|a, b| {
        let ordering = column
            .key(a.as_ref())
            .partial_cmp(&column.key(b.as_ref()))
            .unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
