//! Password policy rules
//!
//! Each rule checks one aspect of a password. A policy miss is a value
//! (`false` from [`Rule::test`], `Some(Violation)` from [`Rule::validate`]),
//! never an error; only backing-store failures and blown candidate budgets
//! are errors.

mod character_class;
mod constraint;
mod dictionary;
mod guessable;
mod length;
mod pattern;

pub use character_class::{CharacterClass, CharacterClassRule};
pub use constraint::CountConstraint;
pub use dictionary::DictionaryRule;
pub use guessable::GuessableDataRule;
pub use length::LengthRule;
pub use pattern::PatternRule;

use thiserror::Error;

use crate::password::Password;
use crate::word_list::BackingStoreError;

/// Evaluation failure scoped to the rule that raised it.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Backing store failure in rule '{rule}'")]
    BackingStore {
        rule: &'static str,
        #[source]
        source: BackingStoreError,
    },
    #[error("Rule '{rule}' exceeded its candidate budget of {budget}")]
    CandidateBudgetExceeded { rule: &'static str, budget: usize },
}

/// A structured, human-readable policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: &'static str,
    pub message: String,
}

/// One password policy rule.
pub trait Rule: Send + Sync {
    /// Stable identifier of the rule, used in violations and errors.
    fn name(&self) -> &'static str;

    /// Whether the password satisfies this rule.
    ///
    /// With `min_weight` set, only constraints of at least that weight are
    /// checked (a partial, "at least this important" check); rules without
    /// weighted constraints treat their own weight the same way.
    fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError>;

    /// Full check, returning a violation message when the rule is not met.
    fn validate(&self, password: &Password) -> Result<Option<Violation>, RuleError>;
}
