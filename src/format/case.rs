//! Case-converting formatters.
//!
//! All converters use the full Unicode case mappings via
//! [`char::to_uppercase`] / [`char::to_lowercase`], so multi-character
//! expansions (e.g. `ß` -> `SS`) are handled, not just ASCII.

use super::coder::recode;
use super::Formatter;
use crate::tree::CharTree;

fn upper(c: char) -> String {
    c.to_uppercase().collect()
}

fn lower(c: char) -> String {
    c.to_lowercase().collect()
}

/// Maps every string to its uppercase form. One output per input; idempotent.
pub struct UpperCase;

impl Formatter for UpperCase {
    fn apply(&self, tree: &CharTree) -> CharTree {
        recode(tree, &|c| vec![upper(c)])
    }
}

/// Maps every string to its lowercase form. One output per input; idempotent.
pub struct LowerCase;

impl Formatter for LowerCase {
    fn apply(&self, tree: &CharTree) -> CharTree {
        recode(tree, &|c| vec![lower(c)])
    }
}

/// Maps every string to itself with only the first character uppercased.
pub struct Capitalize;

impl Formatter for Capitalize {
    fn apply(&self, tree: &CharTree) -> CharTree {
        let mut acc = if tree.terminal() {
            CharTree::leaf()
        } else {
            CharTree::empty()
        };
        for (&c, child) in tree.edges() {
            let branch = CharTree::prepend(&upper(c), child.clone());
            acc = CharTree::merge(&acc, &branch);
        }
        acc
    }
}

/// Expands every string into all its case variants: each case-able character
/// branches into its lowercase and uppercase forms independently, so a string
/// with `k` case-able characters yields `2^k` distinct variants.
///
/// The expansion happens in the tree (two edges per case-able position
/// sharing one child), so the tree stays linear in the input length even
/// though the string count is exponential. Enumerating the strings is where
/// the explosion hits; callers should bound candidate enumeration when `k`
/// is not under their control.
pub struct MixedCase;

impl Formatter for MixedCase {
    fn apply(&self, tree: &CharTree) -> CharTree {
        recode(tree, &|c| {
            let lo = lower(c);
            let up = upper(c);
            if lo == up { vec![lo] } else { vec![lo, up] }
        })
    }
}
