//! Errors raised while assembling a rule table.

use thiserror::Error;

/// Errors raised by [`crate::RuleScorer::with_rules`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    /// Two rules share an identifier.
    #[error("rule id '{id}' appears more than once in the table")]
    DuplicateRule {
        /// Repeated identifier.
        id: &'static str,
    },
}
