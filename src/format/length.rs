//! Length-based formatters: filtering and truncation.

use std::collections::{BTreeMap, HashMap};

use super::{ConstructionError, Formatter};
use crate::tree::CharTree;

/// Retains only the strings whose character count lies in `[min, max]`.
/// `max = None` means unbounded above.
///
/// Used as a pre-filter before substring generation, dropping candidates too
/// short or too long to ever match a configured word-length window.
#[derive(Debug)]
pub struct LengthFilter {
    min: usize,
    max: Option<usize>,
}

impl LengthFilter {
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, ConstructionError> {
        if let Some(max) = max {
            if max < min {
                return Err(ConstructionError::InvalidBounds { min, max });
            }
        }
        Ok(LengthFilter { min, max })
    }
}

/// Memoized per (node, residual window), so shared subtrees are filtered
/// once per depth context instead of once per path.
fn filter(
    tree: &CharTree,
    min: usize,
    max: Option<usize>,
    memo: &mut HashMap<(usize, usize, Option<usize>), CharTree>,
) -> CharTree {
    if let Some(done) = memo.get(&(tree.addr(), min, max)) {
        return done.clone();
    }
    let mut edges = BTreeMap::new();
    if max != Some(0) {
        for (&c, child) in tree.edges() {
            let kept = filter(child, min.saturating_sub(1), max.map(|m| m - 1), memo);
            if !kept.is_empty() {
                edges.insert(c, kept);
            }
        }
    }
    let out = CharTree::node(tree.terminal() && min == 0, edges);
    memo.insert((tree.addr(), min, max), out.clone());
    out
}

impl Formatter for LengthFilter {
    fn apply(&self, tree: &CharTree) -> CharTree {
        filter(tree, self.min, self.max, &mut HashMap::new())
    }
}

/// Cuts every string longer than `max` down to its first `max` characters;
/// shorter strings pass through unchanged.
///
/// Unlike [`LengthFilter`] this bounds the candidate set at a fixed budget
/// instead of discarding the oversized strings outright.
pub struct Truncator {
    max: usize,
}

impl Truncator {
    pub fn new(max: usize) -> Self {
        Truncator { max }
    }
}

impl Formatter for Truncator {
    fn apply(&self, tree: &CharTree) -> CharTree {
        tree.trimmed(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert_eq!(
            LengthFilter::new(5, Some(2)).unwrap_err(),
            ConstructionError::InvalidBounds { min: 5, max: 2 }
        );
        assert!(LengthFilter::new(5, Some(5)).is_ok());
        assert!(LengthFilter::new(5, None).is_ok());
    }

    #[test]
    fn test_filter_window() {
        let tree: CharTree = ["a", "ab", "abc", "abcd"].iter().collect();
        let kept = LengthFilter::new(2, Some(3)).unwrap().apply(&tree);
        let mut out: Vec<_> = kept.strings().collect();
        out.sort();
        assert_eq!(out, vec!["ab", "abc"]);
    }

    #[test]
    fn test_filter_unbounded_above() {
        let tree: CharTree = ["a", "ab", "abcd"].iter().collect();
        let kept = LengthFilter::new(2, None).unwrap().apply(&tree);
        assert_eq!(kept.len(), 2);
        assert!(!kept.contains("a"));
    }

    #[test]
    fn test_filter_zero_max_keeps_only_empty_string() {
        let tree: CharTree = ["", "a"].iter().collect();
        let kept = LengthFilter::new(0, Some(0)).unwrap().apply(&tree);
        assert_eq!(kept, CharTree::of(""));
    }

    #[test]
    fn test_filter_walks_shared_trees_per_node() {
        use crate::format::MixedCase;

        // 2^30 case variants in a 31-node shared tree; filtering must keep
        // the sharing and finish without walking every variant.
        let expanded = MixedCase.apply(&CharTree::of("abcdefghijklmnopqrstuvwxyzabcd"));
        let kept = LengthFilter::new(0, None).unwrap().apply(&expanded);
        assert!(kept.reachable().len() <= 31);
        assert!(kept.contains("ABCDEFGHIJKLMNOPQRSTUVWXYZABCD"));
    }

    #[test]
    fn test_truncator_cuts_to_prefix() {
        let tree: CharTree = ["abcdef", "ab"].iter().collect();
        let cut = Truncator::new(4).apply(&tree);
        let mut out: Vec<_> = cut.strings().collect();
        out.sort();
        assert_eq!(out, vec!["ab", "abcd"]);
    }

    #[test]
    fn test_truncator_collapses_shared_prefixes() {
        let tree: CharTree = ["abcde", "abcxy"].iter().collect();
        let cut = Truncator::new(3).apply(&tree);
        assert_eq!(cut, CharTree::of("abc"));
    }
}
