//! The troop record loaded from the dataset.
//!
//! Field names mirror the dataset's camelCase JSON. Most fields are optional
//! because the dataset is curated by hand and records vary in how much they
//! say; scoring treats every missing field as "rule does not fire".

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geodesy::Coordinates;
use crate::involvement::ParentInvolvement;
use crate::lenient;
use crate::programs::SpecializedPrograms;
use crate::schedule::MeetingDay;

/// Unit number identifying a troop.
///
/// The dataset writes identifiers either as strings (`"1"`) or numbers
/// (`1`); both are stored as text.
///
/// # Examples
/// ```
/// use troop_finder_core::TroopId;
///
/// let id: TroopId = serde_json::from_str("101").unwrap();
/// assert_eq!(id, TroopId::from("101"));
/// assert_eq!(id.numeric(), Some(101));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TroopId(String);

impl TroopId {
    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the identifier as a unit number, if it is one.
    #[must_use]
    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl From<&str> for TroopId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TroopId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TroopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct TroopIdVisitor;

impl Visitor<'_> for TroopIdVisitor {
    type Value = TroopId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a troop number as a string or integer")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(TroopId::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(TroopId(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(TroopId(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(TroopId(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for TroopId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TroopIdVisitor)
    }
}

/// Coarse size bucket assigned when the dataset was compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    /// Roughly twenty scouts or fewer.
    Small,
    /// Mid-sized troop.
    Medium,
    /// Large troop with several patrols per age group.
    Large,
}

impl SizeCategory {
    /// Return the lowercase category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Return the category name with a leading capital.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SizeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(format!("unknown size category '{s}'")),
        }
    }
}

/// Reported membership: a head count or a free-form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TroopSize {
    /// Approximate number of registered scouts.
    Count(u32),
    /// Text such as `"40-50 scouts"`.
    Description(String),
}

impl TroopSize {
    /// Head count when the dataset gives one.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Description(_) => None,
        }
    }
}

impl fmt::Display for TroopSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Description(text) => f.write_str(text),
        }
    }
}

/// One-to-five ratings describing a troop's programme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutAttributes {
    /// Balance between advancement, activities and life skills.
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub balanced: Option<f64>,
    /// How well the troop welcomes scouts bridging from Cub Scouts.
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_scout_friendly: Option<f64>,
    /// Ratings the scorer does not consult.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// A troop as described by the dataset.
///
/// # Examples
/// ```
/// use troop_finder_core::{MeetingDay, SizeCategory, Troop};
///
/// let troop: Troop = serde_json::from_str(
///     r#"{"troop": 6, "meetingDay": "Monday", "sizeCategory": "large", "tags": ["outdoor"]}"#,
/// )
/// .unwrap();
/// assert_eq!(troop.troop.as_str(), "6");
/// assert_eq!(troop.meeting_day, Some(MeetingDay::Monday));
/// assert_eq!(troop.size_category, Some(SizeCategory::Large));
/// assert!(troop.has_tag("outdoor"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Troop {
    /// Unit number.
    pub troop: TroopId,
    /// Geocoded meeting place, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Street address of the meeting place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Display name of the meeting place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// City of the meeting place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Weekly meeting day; unrecognised spellings load as `None`.
    #[serde(
        default,
        deserialize_with = "lenient::parsed",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_day: Option<MeetingDay>,
    /// Meeting time as written in the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    /// Reported membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TroopSize>,
    /// Size bucket; unrecognised spellings load as `None`.
    #[serde(
        default,
        deserialize_with = "lenient::parsed",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_category: Option<SizeCategory>,
    /// Free-form programme tags such as `outdoor` or `boy-led`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    /// Programme ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scout_attributes: Option<ScoutAttributes>,
    /// Named specialised programmes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialized_programs: Option<SpecializedPrograms>,
    /// Parent volunteering expectations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_involvement: Option<ParentInvolvement>,
    /// Year the troop was chartered.
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub founded: Option<i32>,
    /// Eagle Scout record as prose, e.g. `"150+ Eagles"`.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub eagles: Option<String>,
    /// Number of Eagle Scouts, used for sorting.
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub eagle_count: Option<u32>,
    /// Headline programme focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_focus: Option<String>,
    /// Philosophy and approach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philosophy_approach: Option<String>,
    /// How often the troop goes out, e.g. `"~35 outings per year"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_frequency: Option<String>,
    /// Typical monthly outings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_outings: Option<String>,
    /// Regular weekly activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_activities: Option<String>,
    /// Summer camp arrangements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summer_camps: Option<String>,
    /// High-adventure trips in prose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_adventure: Option<String>,
    /// One-line summary of the high-adventure programme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_adventure_short: Option<String>,
    /// How youth and adult leadership is organised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leadership_structure: Option<String>,
    /// Annual dues.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dues: Option<String>,
    /// Chartered organisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chartered_org: Option<String>,
    /// Community reputation notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<String>,
    /// Anything the troop highlights about itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_selling_points: Option<String>,
    /// Compiler's notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Contact person or address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Troop website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Path to a recruiting flyer image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyer_image: Option<String>,
    /// Miles from the family's home; set after geocoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Troop {
    /// Construct a record carrying only an identifier.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::Troop;
    ///
    /// let troop = Troop::new("12");
    /// assert!(troop.tags.is_none());
    /// assert!(troop.distance.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<TroopId>) -> Self {
        Self {
            troop: id.into(),
            ..Self::default()
        }
    }

    /// Report whether the troop carries `tag`. Missing tags never match.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.as_ref().is_some_and(|tags| tags.contains(tag))
    }

    /// Report whether the named specialised programme is offered.
    #[must_use]
    pub fn offers(&self, program: &str) -> bool {
        self.specialized_programs
            .as_ref()
            .is_some_and(|programs| programs.offers(program))
    }
}

impl AsRef<Self> for Troop {
    fn as_ref(&self) -> &Self {
        self
    }
}
