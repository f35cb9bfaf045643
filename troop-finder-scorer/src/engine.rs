//! Rule-folding scorer.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{Datelike, Local};
use troop_finder_core::{Assessment, Preferences, Reason, Scorer, Troop};

use crate::error::RuleTableError;
use crate::rules::{DEFAULT_RULES, ReasonTemplate, Rule, RuleInput};

/// Values fixed for the duration of a scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    reference_year: i32,
}

impl ScoringContext {
    /// Context for the current local calendar year.
    #[must_use]
    pub fn current() -> Self {
        Self::for_year(Local::now().year())
    }

    /// Context pinned to `year`.
    #[must_use]
    pub const fn for_year(year: i32) -> Self {
        Self {
            reference_year: year,
        }
    }

    /// Year used when describing how long a troop has existed.
    #[must_use]
    pub const fn reference_year(self) -> i32 {
        self.reference_year
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::current()
    }
}

/// [`Scorer`] that folds an ordered rule table.
///
/// Every rule is evaluated against the same troop and preferences. The score
/// is the sum of the deltas of the rules that fire, and reasons are listed in
/// table order.
///
/// # Examples
/// ```
/// use troop_finder_core::{MeetingDay, Preferences, Scorer, Troop};
/// use troop_finder_scorer::{RuleScorer, ScoringContext};
///
/// let scorer = RuleScorer::new().with_context(ScoringContext::for_year(2025));
/// let troop = Troop {
///     meeting_day: Some(MeetingDay::Monday),
///     ..Troop::new("6")
/// };
/// let prefs = Preferences::new().with_meeting_day(MeetingDay::Monday);
///
/// let assessment = scorer.assess(&troop, &prefs);
/// assert_eq!(assessment.score, 20);
/// assert_eq!(assessment.reasons[0].text, "Meets on Mondays as preferred");
/// ```
#[derive(Debug, Clone)]
pub struct RuleScorer {
    rules: Cow<'static, [Rule]>,
    context: ScoringContext,
}

impl RuleScorer {
    /// Scorer using [`DEFAULT_RULES`] and the current year.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Cow::Borrowed(DEFAULT_RULES),
            context: ScoringContext::current(),
        }
    }

    /// Scorer using a custom rule table.
    ///
    /// # Errors
    /// Returns [`RuleTableError::DuplicateRule`] when two rules share an id.
    pub fn with_rules(rules: Vec<Rule>) -> Result<Self, RuleTableError> {
        let mut seen = HashSet::with_capacity(rules.len());
        if let Some(duplicate) = rules.iter().find(|rule| !seen.insert(rule.id())) {
            return Err(RuleTableError::DuplicateRule { id: duplicate.id() });
        }
        Ok(Self {
            rules: Cow::Owned(rules),
            context: ScoringContext::current(),
        })
    }

    /// Replace the scoring context.
    #[must_use]
    pub const fn with_context(mut self, context: ScoringContext) -> Self {
        self.context = context;
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Current scoring context.
    #[must_use]
    pub const fn context(&self) -> ScoringContext {
        self.context
    }

    /// Identifiers of the rules that fire, in evaluation order.
    #[must_use]
    pub fn fired_rules(&self, troop: &Troop, preferences: &Preferences) -> Vec<&'static str> {
        let input = self.input(troop, preferences);
        self.rules
            .iter()
            .filter(|rule| rule.applies(&input))
            .map(Rule::id)
            .collect()
    }

    const fn input<'a>(&self, troop: &'a Troop, preferences: &'a Preferences) -> RuleInput<'a> {
        RuleInput {
            troop,
            preferences,
            reference_year: self.context.reference_year(),
        }
    }
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn render(template: ReasonTemplate, input: &RuleInput<'_>) -> Option<Reason> {
    match template {
        ReasonTemplate::Silent => None,
        ReasonTemplate::Fixed(tone, text) => Some(Reason::new(tone, text)),
        ReasonTemplate::Render(tone, renderer) => Some(Reason::new(tone, renderer(input))),
    }
}

impl Scorer for RuleScorer {
    fn assess(&self, troop: &Troop, preferences: &Preferences) -> Assessment {
        let input = self.input(troop, preferences);
        let mut score = 0_i32;
        let mut reasons = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.applies(&input)) {
            score = score.saturating_add(rule.delta());
            log::debug!(
                "troop {}: rule {} fired ({:+})",
                troop.troop,
                rule.id(),
                rule.delta()
            );
            reasons.extend(render(rule.reason(), &input));
        }
        Assessment::new(score, reasons)
    }
}
