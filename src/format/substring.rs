//! Substring generation over the tree.

use std::collections::{BTreeMap, HashMap};

use super::{ConstructionError, Formatter};
use crate::tree::CharTree;

/// Emits every contiguous substring of every input string whose length lies
/// in `[min, max]` (`max = None` = up to the full string length). The empty
/// substring is included when `min == 0`.
///
/// A substring is a bounded prefix of a suffix, and every suffix starts at
/// some node of the tree, so the generator unions all reachable nodes and
/// expands prefixes from the union instead of slicing materialized strings.
/// Node growth is O(n²) per input string of length n, bounded by `max`.
#[derive(Debug)]
pub struct SubstringGenerator {
    min: usize,
    max: Option<usize>,
}

impl SubstringGenerator {
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, ConstructionError> {
        if let Some(max) = max {
            if max < min {
                return Err(ConstructionError::InvalidBounds { min, max });
            }
        }
        Ok(SubstringGenerator { min, max })
    }
}

/// Prefixes of the strings in `tree` with length in `[min, max]`. A prefix
/// ending at a node counts whenever any string passes through that node.
///
/// Memoized per (node, residual window), so shared subtrees are expanded
/// once per depth context instead of once per path.
fn prefixes(
    tree: &CharTree,
    min: usize,
    max: Option<usize>,
    memo: &mut HashMap<(usize, usize, Option<usize>), CharTree>,
) -> CharTree {
    if tree.is_empty() {
        return tree.clone();
    }
    if let Some(done) = memo.get(&(tree.addr(), min, max)) {
        return done.clone();
    }
    let mut edges = BTreeMap::new();
    if max != Some(0) {
        for (&c, child) in tree.edges() {
            let p = prefixes(child, min.saturating_sub(1), max.map(|m| m - 1), memo);
            if !p.is_empty() {
                edges.insert(c, p);
            }
        }
    }
    let out = CharTree::node(min == 0, edges);
    memo.insert((tree.addr(), min, max), out.clone());
    out
}

impl Formatter for SubstringGenerator {
    fn apply(&self, tree: &CharTree) -> CharTree {
        if tree.is_empty() {
            return tree.clone();
        }
        if self.max == Some(0) {
            // Only the empty substring can qualify.
            return CharTree::of("");
        }
        let suffixes = CharTree::union(tree.reachable());
        prefixes(&suffixes, self.min, self.max, &mut HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substrings(s: &str, min: usize, max: Option<usize>) -> Vec<String> {
        let tree = SubstringGenerator::new(min, max)
            .unwrap()
            .apply(&CharTree::of(s));
        let mut out: Vec<_> = tree.strings().collect();
        out.sort();
        out
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert_eq!(
            SubstringGenerator::new(3, Some(1)).unwrap_err(),
            ConstructionError::InvalidBounds { min: 3, max: 1 }
        );
    }

    #[test]
    fn test_all_substrings() {
        let out = substrings("abc", 1, None);
        assert_eq!(out, vec!["a", "ab", "abc", "b", "bc", "c"]);
    }

    #[test]
    fn test_substring_count_matches_closed_form() {
        // Distinct chars: count of substrings with length l is n - l + 1.
        let s = "abcdefgh";
        let n = s.chars().count();
        for (min, max) in [(1, None), (2, Some(4)), (3, Some(3)), (1, Some(8))] {
            let bound = max.unwrap_or(n).min(n);
            let expected: usize = (min..=bound).map(|l| n - l + 1).sum();
            assert_eq!(
                substrings(s, min, max).len(),
                expected,
                "window [{min}, {max:?}]"
            );
        }
    }

    #[test]
    fn test_empty_substring_included_when_min_zero() {
        let out = substrings("ab", 0, None);
        assert_eq!(out, vec!["", "a", "ab", "b"]);
    }

    #[test]
    fn test_max_zero_short_circuits() {
        let out = substrings("abc", 0, Some(0));
        assert_eq!(out, vec![""]);
    }

    #[test]
    fn test_repeated_characters_dedupe() {
        let out = substrings("aaa", 1, None);
        assert_eq!(out, vec!["a", "aa", "aaa"]);
    }

    #[test]
    fn test_respects_window_bounds() {
        let out = substrings("pineapplejack", 5, Some(5));
        assert!(out.contains(&"apple".to_string()));
        assert!(out.iter().all(|s| s.chars().count() == 5));
    }

    #[test]
    fn test_handles_shared_input_trees() {
        use crate::format::MixedCase;

        // 2^20 case variants; substring expansion must work on the shared
        // tree, not per enumerated string.
        let expanded = MixedCase.apply(&CharTree::of("abcdefghijklmnopqrst"));
        let subs = SubstringGenerator::new(3, Some(5)).unwrap().apply(&expanded);
        assert!(subs.contains("abc"));
        assert!(subs.contains("ABC"));
        assert!(subs.contains("DeFgH"));
        assert!(!subs.contains("ba"));
    }

    #[test]
    fn test_applies_to_each_set_member() {
        let tree: CharTree = ["ab", "cd"].iter().collect();
        let out = SubstringGenerator::new(1, None).unwrap().apply(&tree);
        let mut got: Vec<_> = out.strings().collect();
        got.sort();
        assert_eq!(got, vec!["a", "ab", "b", "c", "cd", "d"]);
    }
}
