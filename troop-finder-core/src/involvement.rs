//! Parent volunteering expectations.
//!
//! Older records describe involvement in a sentence; newer ones carry a
//! structured plan with required hours and, for some troops, a refundable
//! deposit scheme (the parent involvement programme).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::programs::ProgramValue;
use crate::troop::Troop;

/// Structured parent-involvement plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvolvementPlan {
    /// Volunteer hours each family commits to.
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub volunteer_hours_required: Option<u32>,
    /// Older spelling of [`Self::volunteer_hours_required`].
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_required: Option<u32>,
    /// Whether a deposit-backed involvement programme runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_program: Option<ProgramValue>,
    /// Deposit amount in dollars, as written.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pip_deposit: Option<String>,
    /// Hours needed to earn the deposit back, as written.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pip_hours_required: Option<String>,
    /// Other plan details kept for display and search.
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl InvolvementPlan {
    /// Report whether the deposit-backed programme runs.
    #[must_use]
    pub fn runs_pip_program(&self) -> bool {
        self.pip_program.as_ref().is_some_and(ProgramValue::is_offered)
    }
}

/// Parent involvement as recorded in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentInvolvement {
    /// Free-form description.
    Description(String),
    /// Structured plan.
    Plan(InvolvementPlan),
    /// Any other JSON shape; carries no hours.
    Unrecognised(serde_json::Value),
}

impl ParentInvolvement {
    /// Borrow the structured plan, if the record has one.
    #[must_use]
    pub const fn plan(&self) -> Option<&InvolvementPlan> {
        match self {
            Self::Plan(plan) => Some(plan),
            Self::Description(_) | Self::Unrecognised(_) => None,
        }
    }
}

/// Volunteer hours a troop asks of each family.
///
/// `volunteerHoursRequired` takes precedence over `hoursRequired`; absent,
/// zero, descriptive or unrecognised involvement yields `0`.
///
/// # Examples
/// ```
/// use troop_finder_core::{InvolvementPlan, ParentInvolvement, Troop, volunteer_hours};
///
/// let mut troop = Troop::new("1");
/// assert_eq!(volunteer_hours(&troop), 0);
///
/// troop.parent_involvement = Some(ParentInvolvement::Plan(InvolvementPlan {
///     volunteer_hours_required: Some(20),
///     hours_required: Some(8),
///     ..InvolvementPlan::default()
/// }));
/// assert_eq!(volunteer_hours(&troop), 20);
/// ```
#[must_use]
pub fn volunteer_hours(troop: &Troop) -> u32 {
    match &troop.parent_involvement {
        Some(ParentInvolvement::Plan(plan)) => plan
            .volunteer_hours_required
            .filter(|hours| *hours > 0)
            .or_else(|| plan.hours_required.filter(|hours| *hours > 0))
            .unwrap_or(0),
        Some(ParentInvolvement::Description(_) | ParentInvolvement::Unrecognised(_)) | None => 0,
    }
}

/// Label shown next to a troop's volunteer hours.
///
/// # Examples
/// ```
/// use troop_finder_core::volunteer_hours_label;
///
/// assert_eq!(volunteer_hours_label(12), "12 hours");
/// assert_eq!(volunteer_hours_label(0), "0");
/// ```
#[must_use]
pub fn volunteer_hours_label(hours: u32) -> String {
    if hours > 0 {
        format!("{hours} hours")
    } else {
        "0".to_owned()
    }
}
