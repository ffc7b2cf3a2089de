//! Length rule - checks the password character count against weighted
//! constraints.

use secrecy::ExposeSecret;

use super::constraint::{sort_by_weight, CountConstraint};
use super::{Rule, RuleError, Violation};
use crate::format::ConstructionError;
use crate::password::Password;

/// Character-count rule over one or more [`CountConstraint`]s.
pub struct LengthRule {
    constraints: Vec<CountConstraint>,
}

impl LengthRule {
    /// Single-constraint rule with weight 1.
    ///
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, ConstructionError> {
        Ok(LengthRule {
            constraints: vec![CountConstraint::new(min, max, 1)?],
        })
    }

    /// Adds a constraint; constraints are kept ordered by descending weight.
    pub fn with_constraint(mut self, constraint: CountConstraint) -> Self {
        self.constraints.push(constraint);
        sort_by_weight(&mut self.constraints);
        self
    }

    fn count(password: &Password) -> usize {
        password.secret().expose_secret().chars().count()
    }
}

impl Rule for LengthRule {
    fn name(&self) -> &'static str {
        "length"
    }

    fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError> {
        let count = Self::count(password);
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
        let count = Self::count(password);
        let failed = self.constraints.iter().find(|c| !c.test(count));
        Ok(failed.map(|c| Violation {
            rule: self.name(),
            message: format!("Password must be {} characters", c.describe()),
        }))
    }
}
