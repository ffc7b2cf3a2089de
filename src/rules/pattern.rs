//! Pattern rule - rejects repetitive and sequential character runs.

use secrecy::ExposeSecret;

use super::{Rule, RuleError, Violation};
use crate::password::Password;

const NAME: &str = "pattern";

/// Rejects passwords containing a run of `max_repeat` identical characters
/// (e.g. "aaa") or `max_sequence` consecutive characters in ascending or
/// descending code-point order (e.g. "1234", "dcba").
pub struct PatternRule {
    max_repeat: usize,
    max_sequence: usize,
    weight: i32,
}

impl Default for PatternRule {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRule {
    /// Defaults: runs of 3 identical and 4 sequential characters are
    /// rejected.
    pub fn new() -> Self {
        PatternRule {
            max_repeat: 3,
            max_sequence: 4,
            weight: 1,
        }
    }

    pub fn max_repeat(mut self, max_repeat: usize) -> Self {
        self.max_repeat = max_repeat.max(2);
        self
    }

    pub fn max_sequence(mut self, max_sequence: usize) -> Self {
        self.max_sequence = max_sequence.max(2);
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    fn find_pattern(&self, password: &Password) -> Option<&'static str> {
        let chars: Vec<char> = password.secret().expose_secret().chars().collect();

        let mut repeated = 1;
        for pair in chars.windows(2) {
            if pair[0] == pair[1] {
                repeated += 1;
                if repeated >= self.max_repeat {
                    return Some("Password contains repetitive patterns");
                }
            } else {
                repeated = 1;
            }
        }

        if chars.len() >= self.max_sequence {
            for window in chars.windows(self.max_sequence) {
                let ascending = window.windows(2).all(|w| w[1] as i64 == w[0] as i64 + 1);
                let descending = window.windows(2).all(|w| w[1] as i64 == w[0] as i64 - 1);
                if ascending || descending {
                    return Some("Password contains sequential patterns");
                }
            }
        }

        None
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError> {
        if min_weight.is_some_and(|w| self.weight < w) {
            return Ok(true);
        }
        Ok(self.find_pattern(password).is_none())
    }

    fn validate(&self, password: &Password) -> Result<Option<Violation>, RuleError> {
        Ok(self.find_pattern(password).map(|message| Violation {
            rule: NAME,
            message: message.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetitive_chars() {
        let rule = PatternRule::new();
        let pwd = Password::from_plain("aaaaBBBB1111");
        assert!(!rule.test(&pwd, None).unwrap());
        let violation = rule.validate(&pwd).unwrap().unwrap();
        assert!(violation.message.contains("repetitive"));
    }

    #[test]
    fn test_sequential_numbers() {
        let rule = PatternRule::new();
        let pwd = Password::from_plain("test1234word");
        let violation = rule.validate(&pwd).unwrap().unwrap();
        assert!(violation.message.contains("sequential"));
    }

    #[test]
    fn test_descending_sequence() {
        let rule = PatternRule::new();
        let pwd = Password::from_plain("xxdcbaxx");
        let violation = rule.validate(&pwd).unwrap().unwrap();
        assert!(violation.message.contains("sequential"));
    }

    #[test]
    fn test_no_patterns() {
        let rule = PatternRule::new();
        let pwd = Password::from_plain("RandomPass135!@#Word");
        assert!(rule.test(&pwd, None).unwrap());
        assert_eq!(rule.validate(&pwd).unwrap(), None);
    }

    #[test]
    fn test_short_password_has_no_patterns() {
        let rule = PatternRule::new();
        let pwd = Password::from_plain("ab");
        assert!(rule.test(&pwd, None).unwrap());
    }

    #[test]
    fn test_configurable_thresholds() {
        let strict = PatternRule::new().max_repeat(2).max_sequence(3);
        assert!(!strict.test(&Password::from_plain("xaax"), None).unwrap());
        assert!(!strict.test(&Password::from_plain("xabcx"), None).unwrap());

        let lax = PatternRule::new().max_sequence(5);
        assert!(lax.test(&Password::from_plain("x1234x"), None).unwrap());
    }
}
