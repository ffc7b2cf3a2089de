//! Character class rule - checks how many characters of one class the
//! password contains.

use secrecy::ExposeSecret;

use super::constraint::{sort_by_weight, CountConstraint};
use super::{Rule, RuleError, Violation};
use crate::format::ConstructionError;
use crate::password::Password;

/// One class of characters a policy can require or limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharacterClass {
    fn matches(self, c: char) -> bool {
        match self {
            CharacterClass::Upper => c.is_uppercase(),
            CharacterClass::Lower => c.is_lowercase(),
            CharacterClass::Digit => c.is_ascii_digit(),
            CharacterClass::Symbol => !c.is_alphanumeric(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            CharacterClass::Upper => "uppercase",
            CharacterClass::Lower => "lowercase",
            CharacterClass::Digit => "digit",
            CharacterClass::Symbol => "special",
        }
    }
}

/// Count rule for a single [`CharacterClass`].
pub struct CharacterClassRule {
    class: CharacterClass,
    constraints: Vec<CountConstraint>,
}

impl CharacterClassRule {
    /// Single-constraint rule with weight 1.
    ///
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn new(
        class: CharacterClass,
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, ConstructionError> {
        Ok(CharacterClassRule {
            class,
            constraints: vec![CountConstraint::new(min, max, 1)?],
        })
    }

    /// Adds a constraint; constraints are kept ordered by descending weight.
    pub fn with_constraint(mut self, constraint: CountConstraint) -> Self {
        self.constraints.push(constraint);
        sort_by_weight(&mut self.constraints);
        self
    }

    fn count(&self, password: &Password) -> usize {
        password
            .secret()
            .expose_secret()
            .chars()
            .filter(|&c| self.class.matches(c))
            .count()
    }
}

impl Rule for CharacterClassRule {
    fn name(&self) -> &'static str {
        match self.class {
            CharacterClass::Upper => "upper_case",
            CharacterClass::Lower => "lower_case",
            CharacterClass::Digit => "digit",
            CharacterClass::Symbol => "symbol",
        }
    }

    fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError> {
        let count = self.count(password);
        for constraint in &self.constraints {
            if min_weight.is_some_and(|w| constraint.weight() < w) {
                break;
            }
            if !constraint.test(count) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn validate(&self, password: &Password) -> Result<Option<Violation>, RuleError> {
        let count = self.count(password);
        let failed = self.constraints.iter().find(|c| !c.test(count));
        Ok(failed.map(|c| Violation {
            rule: self.name(),
            message: format!(
                "Password must contain {} {} characters",
                c.describe(),
                self.class.label()
            ),
        }))
    }
}
