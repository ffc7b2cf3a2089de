//! Dictionary rule - detects forbidden words, including disguised forms,
//! via the formatter pipeline.

use std::sync::Arc;

use secrecy::ExposeSecret;

use super::{Rule, RuleError, Violation};
use crate::format::{ConstructionError, Formatter, LengthFilter, SubstringGenerator};
use crate::password::Password;
use crate::tree::CharTree;
use crate::word_list::WordList;

const NAME: &str = "dictionary";
const DEFAULT_MIN_WORD_LENGTH: usize = 3;
const DEFAULT_MAX_WORD_LENGTH: usize = 25;

/// Rejects passwords containing a word from a word list.
///
/// The candidate tree is built from the password (optionally through
/// substring generation, so a forbidden word is found anywhere inside a
/// longer password), pushed through the configured formatters in order, then
/// filtered to the word-length window. Candidates are enumerated lazily and
/// tested against the word list until the first hit.
pub struct DictionaryRule {
    word_list: Arc<dyn WordList>,
    substring_generator: SubstringGenerator,
    length_filter: LengthFilter,
    check_substrings: bool,
    formatters: Vec<Box<dyn Formatter>>,
    weight: i32,
    max_candidates: Option<usize>,
}

impl DictionaryRule {
    /// Rule with the default word-length window (3 to 25 characters),
    /// substring checking on, no formatters and no candidate budget.
    pub fn new(word_list: Arc<dyn WordList>) -> Self {
        let min = DEFAULT_MIN_WORD_LENGTH;
        let max = Some(DEFAULT_MAX_WORD_LENGTH);
        DictionaryRule {
            word_list,
            substring_generator: SubstringGenerator::new(min, max)
                .expect("default word-length window is valid"),
            length_filter: LengthFilter::new(min, max)
                .expect("default word-length window is valid"),
            check_substrings: true,
            formatters: Vec::new(),
            weight: 1,
            max_candidates: None,
        }
    }

    /// Sets the word-length window: candidates outside `[min, max]` are
    /// never tested.
    ///
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn word_length(mut self, min: usize, max: Option<usize>) -> Result<Self, ConstructionError> {
        self.substring_generator = SubstringGenerator::new(min, max)?;
        self.length_filter = LengthFilter::new(min, max)?;
        Ok(self)
    }

    /// Whole-word matching (`false`) vs. substring matching (`true`).
    pub fn check_substrings(mut self, check: bool) -> Self {
        self.check_substrings = check;
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

    /// Caps the number of candidates enumerated per evaluation; exceeding
    /// the cap fails with [`RuleError::CandidateBudgetExceeded`] instead of
    /// exhausting memory or time on a combinatorial blow-up.
    pub fn max_candidates(mut self, budget: usize) -> Self {
        self.max_candidates = Some(budget);
        self
    }

    fn candidates(&self, password: &str) -> CharTree {
        let mut tree = CharTree::of(password);
        if self.check_substrings {
            tree = self.substring_generator.apply(&tree);
        }
        for formatter in &self.formatters {
            tree = formatter.apply(&tree);
        }
        self.length_filter.apply(&tree)
    }

    fn find_match(&self, password: &Password) -> Result<bool, RuleError> {
        let tree = self.candidates(password.secret().expose_secret());
        for (seen, candidate) in tree.strings().enumerate() {
            if let Some(budget) = self.max_candidates {
                if seen >= budget {
                    return Err(RuleError::CandidateBudgetExceeded { rule: NAME, budget });
                }
            }
            let hit = self
                .word_list
                .contains(&candidate)
                .map_err(|source| RuleError::BackingStore { rule: NAME, source })?;
            if hit {
                #[cfg(feature = "tracing")]
                tracing::debug!("Dictionary rule matched a candidate of length {}", candidate.chars().count());
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Rule for DictionaryRule {
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
            message: "Password must not contain common dictionary words".to_string(),
        }))
    }
}
