//! Password policy - orchestrates rule evaluation.

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::password::Password;
use crate::rules::{Rule, RuleError, Violation};

/// An ordered set of rules a password must satisfy.
#[derive(Default)]
pub struct PasswordPolicy {
    rules: Vec<Box<dyn Rule>>,
}

impl PasswordPolicy {
    pub fn new() -> Self {
        PasswordPolicy { rules: Vec::new() }
    }

    /// Appends a rule; rules are evaluated in insertion order.
    pub fn rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Whether the password satisfies every rule. Short-circuits at the
    /// first unsatisfied rule.
    ///
    /// With `min_weight` set, each rule only checks constraints of at least
    /// that weight (partial check).
    ///
    /// # Errors
    /// Propagates [`RuleError`] from backing-store failures or blown
    /// candidate budgets; these are never reported as "policy not met".
    pub fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError> {
        for rule in &self.rules {
            if !rule.test(password, min_weight)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluates every rule and collects the violations.
    ///
    /// # Arguments
    /// * `password` - The password to validate
    /// * `token` - Optional cancellation token (async feature only)
    ///
    /// # Returns
    /// A `PolicyReport` with one violation per unsatisfied rule. When the
    /// token fires between rules the report is marked cancelled and the
    /// remaining rules are skipped.
    pub fn validate(
        &self,
        password: &Password,
        #[cfg(feature = "async")] token: Option<CancellationToken>,
    ) -> Result<PolicyReport, RuleError> {
        let mut violations = Vec::new();
        let mut cancelled = false;

        for rule in &self.rules {
            // Check cancellation before each rule (async only)
            #[cfg(feature = "async")]
            {
                if let Some(ref t) = token {
                    if t.is_cancelled() {
                        cancelled = true;
                        break;
                    }
                }
            }

            match rule.validate(password) {
                Ok(Some(violation)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Rule '{}' violated", violation.rule);
                    violations.push(violation);
                }
                Ok(None) => {}
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Fatal error in password policy rule '{}'", rule.name());
                    return Err(e);
                }
            }
        }

        Ok(PolicyReport {
            violations,
            cancelled,
        })
    }
}

/// Outcome of a full policy validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport {
    pub violations: Vec<Violation>,
    pub cancelled: bool,
}

impl PolicyReport {
    /// `true` iff evaluation ran to completion with no violations.
    pub fn is_satisfied(&self) -> bool {
        !self.cancelled && self.violations.is_empty()
    }
}

/// Async version that sends the validation outcome via channel.
#[cfg(feature = "async")]
pub async fn validate_tx(
    policy: &PasswordPolicy,
    password: &Password,
    token: CancellationToken,
    tx: mpsc::Sender<Result<PolicyReport, RuleError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("validation is about to start...");

    let report = policy.validate(password, Some(token));

    if let Err(e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password policy report: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CharacterClass, CharacterClassRule, DictionaryRule, LengthRule};
    use crate::word_list::MemoryWordList;
    use std::sync::Arc;

    fn sample_policy() -> PasswordPolicy {
        let word_list = Arc::new(MemoryWordList::from_words(["password", "qwerty", "admin"]));
        PasswordPolicy::new()
            .rule(Box::new(LengthRule::new(8, None).unwrap()))
            .rule(Box::new(
                CharacterClassRule::new(CharacterClass::Digit, 1, None).unwrap(),
            ))
            .rule(Box::new(DictionaryRule::new(word_list)))
    }

    fn validate(policy: &PasswordPolicy, password: &Password) -> PolicyReport {
        #[cfg(feature = "async")]
        let report = policy.validate(password, None);

        #[cfg(not(feature = "async"))]
        let report = policy.validate(password);

        report.expect("validation should not fail")
    }

    #[test]
    fn test_validate_satisfied() {
        let policy = sample_policy();
        let pwd = Password::from_plain("CorrectHorse7!");
        let report = validate(&policy, &pwd);
        assert!(report.is_satisfied());
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let policy = sample_policy();
        // Too short, no digit, and contains a dictionary word.
        let pwd = Password::from_plain("admin");
        let report = validate(&policy, &pwd);
        assert!(!report.is_satisfied());
        let rules: Vec<_> = report.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec!["length", "digit", "dictionary"]);
    }

    #[test]
    fn test_test_short_circuits() {
        let policy = sample_policy();
        assert!(policy.test(&Password::from_plain("CorrectHorse7!"), None).unwrap());
        assert!(!policy.test(&Password::from_plain("admin"), None).unwrap());
    }

    #[test]
    fn test_violation_messages_are_human_readable() {
        let policy = sample_policy();
        let report = validate(&policy, &Password::from_plain("short"));
        assert!(report
            .violations
            .iter()
            .any(|v| v.message == "Password must be at least 8 characters"));
    }
}
