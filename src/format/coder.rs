//! Character recoding - the generic substitution engine and the leetspeak
//! decoder built on top of it.

use std::collections::{BTreeMap, HashMap};

use super::{ConstructionError, Formatter};
use crate::tree::CharTree;

/// Mapping from a single character to its replacement strings.
pub type CodeMap = BTreeMap<char, Vec<String>>;

/// Rewrites every edge character of a tree through a substitution function.
///
/// `subs` returns the alternative spellings for one character; each
/// alternative becomes its own branch leading to the recoded child, and
/// branches that spell the same string merge. An empty alternative list drops
/// the character's branch entirely.
///
/// Memoized per node, so shared subtrees are recoded once and stay shared in
/// the output instead of being re-walked per path.
pub(crate) fn recode(tree: &CharTree, subs: &impl Fn(char) -> Vec<String>) -> CharTree {
    fn go(
        tree: &CharTree,
        subs: &impl Fn(char) -> Vec<String>,
        memo: &mut HashMap<usize, CharTree>,
    ) -> CharTree {
        if tree.edges().is_empty() {
            return tree.clone();
        }
        if let Some(done) = memo.get(&tree.addr()) {
            return done.clone();
        }
        let mut acc = if tree.terminal() {
            CharTree::leaf()
        } else {
            CharTree::empty()
        };
        for (&c, child) in tree.edges() {
            let recoded = go(child, subs, memo);
            for alt in subs(c) {
                let branch = CharTree::prepend(&alt, recoded.clone());
                acc = CharTree::merge(&acc, &branch);
            }
        }
        memo.insert(tree.addr(), acc.clone());
        acc
    }
    go(tree, subs, &mut HashMap::new())
}

/// Generic code-map formatter: at every position where the character has an
/// entry, branches into the original character plus each substitution.
#[derive(Debug)]
pub struct Coder {
    map: CodeMap,
}

impl Coder {
    /// Builds a coder from an explicit code map.
    ///
    /// # Errors
    /// Fails if the map is empty or any entry has no substitutions.
    pub fn new(map: CodeMap) -> Result<Self, ConstructionError> {
        if map.is_empty() || map.values().any(Vec::is_empty) {
            return Err(ConstructionError::EmptyCodeMap);
        }
        Ok(Coder { map })
    }

    /// The coder preconfigured with the leetspeak decoding map.
    ///
    /// Substitutions are emitted lowercase; put a case formatter in the
    /// pipeline when cased variants are wanted too.
    pub fn leetspeak() -> Self {
        let entries: [(char, &[&str]); 13] = [
            ('1', &["i", "l"]),
            ('2', &["z"]),
            ('3', &["e"]),
            ('4', &["a"]),
            ('5', &["s"]),
            ('6', &["g"]),
            ('7', &["t"]),
            ('8', &["b"]),
            ('0', &["o"]),
            ('@', &["a"]),
            ('$', &["s"]),
            ('!', &["i"]),
            ('+', &["t"]),
        ];
        let map = entries
            .into_iter()
            .map(|(c, subs)| (c, subs.iter().map(|s| s.to_string()).collect()))
            .collect();
        Coder { map }
    }
}

impl Formatter for Coder {
    fn apply(&self, tree: &CharTree) -> CharTree {
        recode(tree, &|c| {
            let mut alts = vec![c.to_string()];
            if let Some(subs) = self.map.get(&c) {
                alts.extend(subs.iter().cloned());
            }
            alts
        })
    }
}
