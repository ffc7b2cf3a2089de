//! Guessable data rule - detects personal data (names, dates) hidden inside
//! a password, including formatter-disguised forms.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use secrecy::ExposeSecret;

use super::{Rule, RuleError, Violation};
use crate::format::Formatter;
use crate::password::{GuessableData, Password};
use crate::tree::CharTree;

const NAME: &str = "guessable_data";

const SEPARATORS: [&str; 8] = ["", "-", " ", "/", ".", ",", ". ", ", "];

#[derive(Clone, Copy)]
enum Part {
    Day,
    Month,
    Year,
}

const ORDERS: [&[Part]; 8] = [
    &[Part::Year],
    &[Part::Year, Part::Month],
    &[Part::Month, Part::Year],
    &[Part::Day, Part::Month],
    &[Part::Month, Part::Day],
    &[Part::Day, Part::Month, Part::Year],
    &[Part::Month, Part::Day, Part::Year],
    &[Part::Year, Part::Month, Part::Day],
];

/// Every textual rendering of `date` the rule recognizes: the calendar-part
/// orders above, day/month both zero-padded and bare, year two- and
/// four-digit, crossed with the separator set.
fn renderings(date: NaiveDate) -> HashSet<String> {
    let day = [date.day().to_string(), format!("{:02}", date.day())];
    let month = [date.month().to_string(), format!("{:02}", date.month())];
    let year = [
        format!("{:02}", date.year().rem_euclid(100)),
        date.year().to_string(),
    ];
    let mut out = HashSet::new();
    for order in ORDERS {
        for sep in SEPARATORS {
            // One bit per part selects the bare or padded variant.
            for mask in 0..(1usize << order.len()) {
                let pieces: Vec<&str> = order
                    .iter()
                    .enumerate()
                    .map(|(i, &part)| {
                        let variants = match part {
                            Part::Day => &day,
                            Part::Month => &month,
                            Part::Year => &year,
                        };
                        variants[(mask >> i) & 1].as_str()
                    })
                    .collect();
                out.insert(pieces.join(sep));
            }
        }
    }
    out
}

/// Rejects passwords containing known personal data.
///
/// Data configured on the rule is merged with data attached to the password
/// instance at evaluation time. The password is expanded through the
/// configured formatters and each candidate is scanned for case-insensitive
/// substring containment of every text item and every date rendering.
pub struct GuessableDataRule {
    data: Vec<GuessableData>,
    formatters: Vec<Box<dyn Formatter>>,
    weight: i32,
    max_candidates: Option<usize>,
}

impl Default for GuessableDataRule {
    fn default() -> Self {
        Self::new()
    }
}

impl GuessableDataRule {
    pub fn new() -> Self {
        GuessableDataRule {
            data: Vec::new(),
            formatters: Vec::new(),
            weight: 1,
            max_candidates: None,
        }
    }

    /// Adds one forbidden data item at the rule level.
    pub fn with_data(mut self, data: impl Into<GuessableData>) -> Self {
        self.data.push(data.into());
        self
    }

    /// Appends a formatter to the candidate-generation chain.
    pub fn formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatters.push(formatter);
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Caps the number of candidates enumerated per evaluation.
    pub fn max_candidates(mut self, budget: usize) -> Self {
        self.max_candidates = Some(budget);
        self
    }

    /// Lowercased needles from rule-level and password-level data. Empty
    /// text items are dropped (the empty string is a substring of
    /// everything).
    fn needles(&self, password: &Password) -> Vec<String> {
        let mut needles = Vec::new();
        for item in self.data.iter().chain(password.guessable()) {
            match item {
                GuessableData::Text(s) if !s.is_empty() => needles.push(s.to_lowercase()),
                GuessableData::Text(_) => {}
                GuessableData::Date(d) => needles.extend(renderings(*d)),
            }
        }
        needles
    }

    fn find_match(&self, password: &Password) -> Result<bool, RuleError> {
        let needles = self.needles(password);
        if needles.is_empty() {
            return Ok(false);
        }

        let mut tree = CharTree::of(password.secret().expose_secret());
        for formatter in &self.formatters {
            tree = formatter.apply(&tree);
        }

        for (seen, candidate) in tree.strings().enumerate() {
            if let Some(budget) = self.max_candidates {
                if seen >= budget {
                    return Err(RuleError::CandidateBudgetExceeded { rule: NAME, budget });
                }
            }
            let candidate = candidate.to_lowercase();
            if needles.iter().any(|needle| candidate.contains(needle)) {
                #[cfg(feature = "tracing")]
                tracing::debug!("Guessable data rule matched inside a candidate");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Rule for GuessableDataRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn test(&self, password: &Password, min_weight: Option<i32>) -> Result<bool, RuleError> {
        if min_weight.is_some_and(|w| self.weight < w) {
            return Ok(true);
        }
        Ok(!self.find_match(password)?)
    }

    fn validate(&self, password: &Password) -> Result<Option<Violation>, RuleError> {
        Ok(self.find_match(password)?.then(|| Violation {
            rule: NAME,
            message: "Password must not contain easily guessable personal data".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Coder;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_renderings_cover_common_formats() {
        let r = renderings(date(2018, 11, 28));
        for expected in ["28/11/18", "281118", "2018-11-28", "11/28/2018", "28.11.2018", "2018"] {
            assert!(r.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_date_found_with_separator() {
        let rule = GuessableDataRule::new().with_data(date(2018, 11, 28));
        let pwd = Password::from_plain("foo28/11/18bar");
        assert!(!rule.test(&pwd, None).unwrap());
        let violation = rule.validate(&pwd).unwrap().unwrap();
        assert_eq!(violation.rule, "guessable_data");
    }

    #[test]
    fn test_date_absent() {
        let rule = GuessableDataRule::new().with_data(date(2018, 11, 28));
        let pwd = Password::from_plain("foobar");
        assert!(rule.test(&pwd, None).unwrap());
        assert_eq!(rule.validate(&pwd).unwrap(), None);
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let rule = GuessableDataRule::new().with_data("alice");
        let pwd = Password::from_plain("MyALICE123");
        assert!(!rule.test(&pwd, None).unwrap());
    }

    #[test]
    fn test_password_level_data_merged() {
        let rule = GuessableDataRule::new();
        let pwd = Password::from_plain("rex2012!").with_guessable("rex");
        assert!(!rule.test(&pwd, None).unwrap());
    }

    #[test]
    fn test_leet_disguised_name_detected() {
        let rule = GuessableDataRule::new()
            .with_data("alice")
            .formatter(Box::new(Coder::leetspeak()));
        let pwd = Password::from_plain("xx4l1cexx");
        assert!(!rule.test(&pwd, None).unwrap());
    }

    #[test]
    fn test_no_data_always_satisfied() {
        let rule = GuessableDataRule::new();
        let pwd = Password::from_plain("anything");
        assert!(rule.test(&pwd, None).unwrap());
    }

    #[test]
    fn test_candidate_budget_exceeded() {
        let rule = GuessableDataRule::new()
            .with_data("nomatch")
            .formatter(Box::new(crate::format::MixedCase))
            .max_candidates(2);
        let pwd = Password::from_plain("abcdefgh");
        let err = rule.test(&pwd, None).unwrap_err();
        assert!(matches!(
            err,
            RuleError::CandidateBudgetExceeded { rule: "guessable_data", budget: 2 }
        ));
    }
}
