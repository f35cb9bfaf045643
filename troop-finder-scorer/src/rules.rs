//! The ordered rule table behind [`crate::RuleScorer`].
//!
//! Each [`Rule`] pairs a predicate with a signed score delta and a reason
//! template. The engine evaluates every rule against the same troop and
//! preference set, in table order, and sums the deltas of those that fire.
//! Predicates treat missing troop data as "does not fire".

use troop_finder_core::{
    ActivityFocus, ExperienceLevel, MeetingDay, NO_DISTANCE_LIMIT, ParentInvolvement, Personality,
    Preferences, ScoutAttributes, SizeCategory, Tone, Troop,
};

/// Rating at or above which a scout attribute counts as a strength.
const STRONG_RATING: f64 = 4.0;

/// Troops founded before this year earn the established-troop bonus.
const ESTABLISHED_BEFORE: i32 = 1970;

/// Everything a rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Troop being scored.
    pub troop: &'a Troop,
    /// Family preferences.
    pub preferences: &'a Preferences,
    /// Calendar year used for age-based reasons.
    pub reference_year: i32,
}

impl RuleInput<'_> {
    const fn wants(&self, focus: ActivityFocus) -> bool {
        matches!(
            (self.preferences.activity, focus),
            (Some(ActivityFocus::Outdoor), ActivityFocus::Outdoor)
                | (Some(ActivityFocus::Eagle), ActivityFocus::Eagle)
                | (Some(ActivityFocus::Balanced), ActivityFocus::Balanced)
        )
    }

    const fn wants_outdoor(&self) -> bool {
        self.wants(ActivityFocus::Outdoor)
    }

    const fn experience(&self, level: ExperienceLevel) -> bool {
        matches!(
            (self.preferences.experience, level),
            (Some(ExperienceLevel::New), ExperienceLevel::New)
                | (Some(ExperienceLevel::Experienced), ExperienceLevel::Experienced)
        )
    }

    const fn personality(&self, personality: Personality) -> bool {
        matches!(
            (self.preferences.personality, personality),
            (Some(Personality::Cautious), Personality::Cautious)
                | (Some(Personality::Confident), Personality::Confident)
        )
    }

    /// Activity rules only consider troops that publish both tags and
    /// attribute ratings.
    const fn activity_profiled(&self) -> bool {
        self.troop.tags.is_some() && self.troop.scout_attributes.is_some()
    }

    const fn attributes(&self) -> Option<&ScoutAttributes> {
        self.troop.scout_attributes.as_ref()
    }

    fn tag(&self, tag: &str) -> bool {
        self.troop.has_tag(tag)
    }

    fn program(&self, key: &str) -> bool {
        self.troop.offers(key)
    }

    fn day_matches(&self) -> Option<bool> {
        self.preferences
            .meeting_day
            .map(|day| self.troop.meeting_day == Some(day))
    }

    fn size_matches(&self) -> Option<bool> {
        self.preferences
            .size
            .map(|size| self.troop.size_category == Some(size))
    }

    fn within_limit(&self) -> Option<bool> {
        let distance = self.troop.distance?;
        let limit = self.preferences.max_distance.miles()?;
        Some(distance <= limit)
    }
}

/// Predicate deciding whether a rule fires.
pub type Predicate = fn(&RuleInput<'_>) -> bool;

/// Builds reason text from the same input the predicate saw.
pub type Renderer = fn(&RuleInput<'_>) -> String;

/// How a firing rule explains itself.
#[derive(Debug, Clone, Copy)]
pub enum ReasonTemplate {
    /// The rule adjusts the score without a reason.
    Silent,
    /// A fixed sentence.
    Fixed(Tone, &'static str),
    /// A sentence rendered from the troop and preferences.
    Render(Tone, Renderer),
}

/// One entry in the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    id: &'static str,
    applies: Predicate,
    delta: i32,
    reason: ReasonTemplate,
}

impl Rule {
    /// Construct a rule.
    ///
    /// # Examples
    /// ```
    /// use troop_finder_core::Tone;
    /// use troop_finder_scorer::{ReasonTemplate, Rule};
    ///
    /// let rule = Rule::new(
    ///     "has-website",
    ///     |input| input.troop.website.is_some(),
    ///     2,
    ///     ReasonTemplate::Fixed(Tone::Match, "Publishes a website"),
    /// );
    /// assert_eq!(rule.id(), "has-website");
    /// ```
    #[must_use]
    pub const fn new(
        id: &'static str,
        applies: Predicate,
        delta: i32,
        reason: ReasonTemplate,
    ) -> Self {
        Self {
            id,
            applies,
            delta,
            reason,
        }
    }

    /// Stable identifier, unique within a table.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Score adjustment applied when the rule fires.
    #[must_use]
    pub const fn delta(&self) -> i32 {
        self.delta
    }

    /// Reason template.
    #[must_use]
    pub const fn reason(&self) -> ReasonTemplate {
        self.reason
    }

    /// Report whether the rule fires for `input`.
    #[must_use]
    pub fn applies(&self, input: &RuleInput<'_>) -> bool {
        (self.applies)(input)
    }
}

const fn rule(id: &'static str, applies: Predicate, delta: i32, reason: ReasonTemplate) -> Rule {
    Rule::new(id, applies, delta, reason)
}

const fn says(text: &'static str) -> ReasonTemplate {
    ReasonTemplate::Fixed(Tone::Match, text)
}

/// The standard rule table, in evaluation order.
pub static DEFAULT_RULES: &[Rule] = &[
    // Primary preferences.
    rule(
        "day-match",
        |i| i.day_matches() == Some(true),
        20,
        ReasonTemplate::Render(Tone::Match, day_match_reason),
    ),
    rule(
        "day-mismatch",
        |i| i.day_matches() == Some(false),
        -5,
        ReasonTemplate::Render(Tone::Warning, day_mismatch_reason),
    ),
    rule(
        "distance-within",
        |i| i.within_limit() == Some(true),
        15,
        ReasonTemplate::Render(Tone::Match, distance_within_reason),
    ),
    rule(
        "distance-beyond",
        |i| i.within_limit() == Some(false),
        -10,
        ReasonTemplate::Render(Tone::Warning, distance_beyond_reason),
    ),
    rule(
        "outdoor-focus",
        |i| i.activity_profiled() && i.wants_outdoor() && i.tag("outdoor"),
        25,
        says("Strong outdoor & adventure program matches your interest"),
    ),
    rule(
        "outdoor-missing",
        |i| i.activity_profiled() && i.wants_outdoor() && !i.tag("outdoor"),
        -8,
        ReasonTemplate::Silent,
    ),
    rule(
        "eagle-focus",
        |i| i.activity_profiled() && i.wants(ActivityFocus::Eagle) && i.tag("eagle"),
        25,
        ReasonTemplate::Render(Tone::Match, eagle_reason),
    ),
    rule(
        "eagle-missing",
        |i| i.activity_profiled() && i.wants(ActivityFocus::Eagle) && !i.tag("eagle"),
        -8,
        ReasonTemplate::Silent,
    ),
    rule(
        "balanced-focus",
        |i| i.activity_profiled() && i.wants(ActivityFocus::Balanced) && balanced(i),
        20,
        says("Well-balanced program combining advancement, activities, and life skills"),
    ),
    rule(
        "balanced-missing",
        |i| i.activity_profiled() && i.wants(ActivityFocus::Balanced) && !balanced(i),
        -8,
        ReasonTemplate::Silent,
    ),
    rule(
        "size-match",
        |i| i.size_matches() == Some(true),
        15,
        ReasonTemplate::Render(Tone::Match, size_match_reason),
    ),
    rule(
        "size-mismatch",
        |i| i.size_matches() == Some(false),
        -10,
        ReasonTemplate::Render(Tone::Warning, size_mismatch_reason),
    ),
    rule(
        "new-scout-friendly",
        |i| i.experience(ExperienceLevel::New) && new_scout_friendly(i),
        15,
        says("Excellent program for new scouts bridging from Cub Scouts"),
    ),
    rule(
        "experienced-scout-led",
        |i| {
            i.experience(ExperienceLevel::Experienced)
                && i.attributes().is_some()
                && i.tag("boy-led")
        },
        10,
        says("Scout-led program offers advanced leadership opportunities"),
    ),
    rule(
        "experienced-high-adventure",
        |i| {
            i.experience(ExperienceLevel::Experienced)
                && i.attributes().is_some()
                && i.tag("high-adventure")
        },
        8,
        says("High adventure opportunities for experienced scouts"),
    ),
    rule(
        "cautious-small",
        |i| {
            i.personality(Personality::Cautious)
                && matches!(i.troop.size_category, Some(SizeCategory::Small))
        },
        10,
        says("Smaller, more intimate troop environment may be comfortable for thoughtful scouts"),
    ),
    rule(
        "confident-scout-led",
        |i| i.personality(Personality::Confident) && i.tag("boy-led"),
        10,
        says("Scout-led program provides leadership opportunities for confident scouts"),
    ),
    // Programme bonuses.
    rule(
        "high-adventure-outdoor",
        |i| i.tag("high-adventure") && i.wants_outdoor(),
        10,
        says("Offers high adventure opportunities (Philmont, Northern Tier, etc.)"),
    ),
    rule(
        "cycling",
        |i| i.program("cycling") && i.wants_outdoor(),
        8,
        says("🚴 Comprehensive cycling merit badge program"),
    ),
    rule(
        "backpacking",
        |i| i.program("backpacking") && i.wants_outdoor(),
        8,
        says("🎒 Extensive backpacking program with practice hikes"),
    ),
    rule(
        "snow-camping",
        |i| i.program("snowCamping") && i.wants_outdoor(),
        5,
        says("❄️ Unique snow camping and winter adventure program"),
    ),
    rule(
        "outing-frequency",
        |i| text_contains(i.troop.activity_frequency.as_deref(), "35") && i.wants_outdoor(),
        10,
        says("🏕️ Extremely active with ~35 outings per year"),
    ),
    rule(
        "parent-involvement-program",
        runs_pip_program,
        0,
        ReasonTemplate::Render(Tone::Info, parent_involvement_reason),
    ),
    rule(
        "new-scout-program",
        |i| i.program("newScoutProgram") && i.experience(ExperienceLevel::New),
        10,
        says("🆕 Comprehensive new scout program with dedicated guides and advancement support"),
    ),
    rule(
        "quality-unit",
        |i| i.tag("quality-unit"),
        5,
        says("🏆 Quality Unit Award recipient - recognized for excellence"),
    ),
    rule(
        "summer-camp-specialties",
        |i| i.program("summerCampSpecialties") && i.wants_outdoor(),
        5,
        says("⛺ Unique summer camp programs (Sourdough, rockers, Pioneer status)"),
    ),
    rule(
        "scout-led-emphasis",
        |i| i.program("boyLedEmphasis") && i.personality(Personality::Confident),
        8,
        says("👥 Strong boy-led program with leadership opportunities at all ranks"),
    ),
    rule(
        "first-in-area",
        |i| i.tag("first-in-san-ramon"),
        5,
        says("📜 First troop in San Ramon with 60+ years of rich history and tradition"),
    ),
    rule(
        "year-round",
        |i| i.tag("year-round"),
        3,
        says("📅 Year-round program including summer meetings"),
    ),
    rule(
        "climbing",
        |i| i.program("climbing") && i.wants_outdoor(),
        4,
        says("🧗 Rock climbing program with merit badge opportunities"),
    ),
    rule(
        "shooting",
        |i| i.program("shooting") && i.wants_outdoor(),
        4,
        says("🎯 Archery and rifle shooting programs with certified instructors"),
    ),
    rule(
        "rotating-summer-camps",
        |i| text_mentions(i.troop.summer_camps.as_deref(), "rotate") && i.wants_outdoor(),
        3,
        says("🏕️ Multiple summer camp options (rotates between camps)"),
    ),
    rule(
        "grand-slam",
        |i| text_mentions(i.troop.high_adventure.as_deref(), "grand slam") && i.wants_outdoor(),
        10,
        says(
            "🏆 Scouts have earned Grand Slam of High Adventure (all 4 National High Adventure Bases)",
        ),
    ),
    rule(
        "eagle-mentoring",
        |i| i.program("eagleMentoring") && i.wants(ActivityFocus::Eagle),
        6,
        says("🦅 Eagle Scout Advisors mentor Life Scouts through Eagle process"),
    ),
    rule(
        "multiple-backpacking",
        |i| text_mentions(program_text(i, "backpacking"), "multiple") && i.wants_outdoor(),
        5,
        says("🎒 Multiple backpacking trips throughout year for all skill levels"),
    ),
    rule(
        "sea-scouting",
        |i| i.program("seaScouting") && i.wants_outdoor(),
        8,
        says("⛵ Unique Sea Scout affiliation with sailing and power boating activities"),
    ),
    rule(
        "friday-meetings",
        |i| i.preferences.meeting_day.is_none() && i.tag("friday-meetings"),
        3,
        says("📅 Friday meetings provide scheduling flexibility"),
    ),
    rule(
        "webelos-outreach",
        |i| i.program("webelosOutreach") && i.experience(ExperienceLevel::New),
        4,
        says("🎯 Strong Webelos outreach program (Aquanaut, Zombie First Aid, Pizza Hike)"),
    ),
    rule(
        "island-camp",
        |i| i.program("catalinaCamp") && i.wants_outdoor(),
        7,
        says("🏝️ Camp Emerald Bay on Catalina Island with water and boating merit badges"),
    ),
    rule(
        "first-year-program",
        |i| i.program("firstYearProgram") && i.experience(ExperienceLevel::New),
        5,
        says("🎓 Comprehensive First Year program for new scouts"),
    ),
    rule(
        "patrol-system",
        |i| i.program("patrolSystem"),
        3,
        says("👥 Structured patrol system (2 patrols per age level, 8 scouts each)"),
    ),
    rule(
        "established",
        |i| {
            i.troop
                .founded
                .is_some_and(|year| year > 0 && year < ESTABLISHED_BEFORE)
        },
        5,
        ReasonTemplate::Render(Tone::Match, established_reason),
    ),
];

fn balanced(input: &RuleInput<'_>) -> bool {
    input
        .attributes()
        .and_then(|attributes| attributes.balanced)
        .is_some_and(|rating| rating >= STRONG_RATING)
}

fn new_scout_friendly(input: &RuleInput<'_>) -> bool {
    input
        .attributes()
        .and_then(|attributes| attributes.new_scout_friendly)
        .is_some_and(|rating| rating >= STRONG_RATING)
}

fn runs_pip_program(input: &RuleInput<'_>) -> bool {
    input
        .troop
        .parent_involvement
        .as_ref()
        .and_then(ParentInvolvement::plan)
        .is_some_and(|plan| plan.runs_pip_program())
}

fn program_text<'a>(input: &RuleInput<'a>, key: &str) -> Option<&'a str> {
    input
        .troop
        .specialized_programs
        .as_ref()
        .and_then(|programs| programs.text(key))
}

fn text_contains(text: Option<&str>, needle: &str) -> bool {
    text.is_some_and(|text| text.contains(needle))
}

/// Case-insensitive containment; `needle` must be lowercase.
fn text_mentions(text: Option<&str>, needle: &str) -> bool {
    text.is_some_and(|text| text.to_lowercase().contains(needle))
}

fn day_name(day: Option<MeetingDay>) -> &'static str {
    day.map_or("an unlisted day", MeetingDay::as_str)
}

fn day_match_reason(input: &RuleInput<'_>) -> String {
    format!(
        "Meets on {}s as preferred",
        day_name(input.preferences.meeting_day)
    )
}

fn day_mismatch_reason(input: &RuleInput<'_>) -> String {
    let preferred = day_name(input.preferences.meeting_day);
    match input.troop.meeting_day {
        Some(day) => format!("Meets on {day}s (you preferred {preferred})"),
        None => format!("Meeting day not listed (you preferred {preferred})"),
    }
}

fn limit_miles(input: &RuleInput<'_>) -> f64 {
    input
        .preferences
        .max_distance
        .miles()
        .unwrap_or(NO_DISTANCE_LIMIT)
}

fn distance_within_reason(input: &RuleInput<'_>) -> String {
    format!(
        "Within your {} mile radius ({:.1} mi away)",
        limit_miles(input),
        input.troop.distance.unwrap_or_default()
    )
}

fn distance_beyond_reason(input: &RuleInput<'_>) -> String {
    format!(
        "{:.1} miles away (beyond your {} mile preference)",
        input.troop.distance.unwrap_or_default(),
        limit_miles(input)
    )
}

fn eagle_reason(input: &RuleInput<'_>) -> String {
    input.troop.eagles.as_deref().map_or_else(
        || "Excellent Eagle Scout track record".to_owned(),
        |eagles| format!("Excellent Eagle Scout track record ({eagles})"),
    )
}

fn size_title(size: Option<SizeCategory>) -> &'static str {
    size.map_or("Unlisted-size", SizeCategory::title)
}

fn size_match_reason(input: &RuleInput<'_>) -> String {
    format!(
        "{} troop size matches your preference",
        size_title(input.troop.size_category)
    )
}

fn size_mismatch_reason(input: &RuleInput<'_>) -> String {
    let preferred = input.preferences.size.map_or("any size", SizeCategory::as_str);
    format!(
        "{} troop (you preferred {preferred})",
        size_title(input.troop.size_category)
    )
}

fn parent_involvement_reason(input: &RuleInput<'_>) -> String {
    let plan = input
        .troop
        .parent_involvement
        .as_ref()
        .and_then(ParentInvolvement::plan);
    let deposit = plan
        .and_then(|plan| plan.pip_deposit.as_deref())
        .map_or_else(|| "A".to_owned(), |amount| format!("${amount}"));
    let hours = plan
        .and_then(|plan| plan.pip_hours_required.as_deref())
        .map_or_else(String::new, |hours| format!(" {hours}"));
    format!("Parent Involvement Program: {deposit} deposit (refundable with{hours} volunteer hours)")
}

fn established_reason(input: &RuleInput<'_>) -> String {
    let founded = input.troop.founded.unwrap_or(input.reference_year);
    format!(
        "Established troop with {}+ years of tradition",
        input.reference_year.saturating_sub(founded)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rstest::rstest;
    use troop_finder_core::{DistanceLimit, InvolvementPlan};

    fn input<'a>(troop: &'a Troop, preferences: &'a Preferences) -> RuleInput<'a> {
        RuleInput {
            troop,
            preferences,
            reference_year: 2025,
        }
    }

    fn rule_named(id: &str) -> &'static Rule {
        DEFAULT_RULES
            .iter()
            .find(|rule| rule.id() == id)
            .unwrap_or_else(|| panic!("rule {id} should exist"))
    }

    #[rstest]
    fn rule_ids_are_unique() {
        let ids: HashSet<&str> = DEFAULT_RULES.iter().map(Rule::id).collect();
        assert_eq!(ids.len(), DEFAULT_RULES.len());
    }

    #[rstest]
    fn activity_rules_need_tags_and_attributes() {
        let mut troop = Troop::new("1");
        troop.tags = Some(["outdoor".to_owned()].into());
        let prefs = Preferences::new().with_activity(ActivityFocus::Outdoor);
        assert!(!rule_named("outdoor-focus").applies(&input(&troop, &prefs)));
        assert!(!rule_named("outdoor-missing").applies(&input(&troop, &prefs)));

        troop.scout_attributes = Some(ScoutAttributes::default());
        assert!(rule_named("outdoor-focus").applies(&input(&troop, &prefs)));
    }

    #[rstest]
    #[case(Some(4.0), true)]
    #[case(Some(3.5), false)]
    #[case(None, false)]
    fn balanced_needs_a_strong_rating(#[case] rating: Option<f64>, #[case] strong: bool) {
        let troop = Troop {
            tags: Some(std::collections::BTreeSet::new()),
            scout_attributes: Some(ScoutAttributes {
                balanced: rating,
                ..ScoutAttributes::default()
            }),
            ..Troop::new("1")
        };
        let prefs = Preferences::new().with_activity(ActivityFocus::Balanced);
        assert_eq!(rule_named("balanced-focus").applies(&input(&troop, &prefs)), strong);
        assert_eq!(
            rule_named("balanced-missing").applies(&input(&troop, &prefs)),
            !strong
        );
    }

    #[rstest]
    fn unlimited_distance_never_fires() {
        let troop = Troop {
            distance: Some(400.0),
            ..Troop::new("1")
        };
        let prefs = Preferences::new().with_max_distance(DistanceLimit::Unlimited);
        assert!(!rule_named("distance-within").applies(&input(&troop, &prefs)));
        assert!(!rule_named("distance-beyond").applies(&input(&troop, &prefs)));
    }

    #[rstest]
    fn unknown_troop_day_is_a_mismatch() {
        let troop = Troop::new("1");
        let prefs = Preferences::new().with_meeting_day(MeetingDay::Tuesday);
        let fired = input(&troop, &prefs);
        assert!(rule_named("day-mismatch").applies(&fired));
        assert_eq!(
            day_mismatch_reason(&fired),
            "Meeting day not listed (you preferred Tuesday)"
        );
    }

    #[rstest]
    #[case(Some("200"), Some("16"), "Parent Involvement Program: $200 deposit (refundable with 16 volunteer hours)")]
    #[case(None, None, "Parent Involvement Program: A deposit (refundable with volunteer hours)")]
    fn parent_involvement_reason_renders_known_terms(
        #[case] deposit: Option<&str>,
        #[case] hours: Option<&str>,
        #[case] expected: &str,
    ) {
        let troop = Troop {
            parent_involvement: Some(ParentInvolvement::Plan(InvolvementPlan {
                pip_program: Some(troop_finder_core::ProgramValue::Flag(true)),
                pip_deposit: deposit.map(str::to_owned),
                pip_hours_required: hours.map(str::to_owned),
                ..InvolvementPlan::default()
            })),
            ..Troop::new("1")
        };
        let prefs = Preferences::new();
        let fired = input(&troop, &prefs);
        assert!(runs_pip_program(&fired));
        assert_eq!(parent_involvement_reason(&fired), expected);
    }

    #[rstest]
    #[case(Some("Rotate between Wolfeboro and Oljato"), true)]
    #[case(Some("Same camp every year"), false)]
    #[case(None, false)]
    fn rotating_camps_match_case_insensitively(#[case] camps: Option<&str>, #[case] fires: bool) {
        let troop = Troop {
            summer_camps: camps.map(str::to_owned),
            ..Troop::new("1")
        };
        let prefs = Preferences::new().with_activity(ActivityFocus::Outdoor);
        assert_eq!(
            rule_named("rotating-summer-camps").applies(&input(&troop, &prefs)),
            fires
        );
    }
}
