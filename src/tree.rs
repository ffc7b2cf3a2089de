//! Character tree - compact representation of a finite set of strings.
//!
//! A [`CharTree`] is an immutable trie whose nodes are shared via `Rc`.
//! Formatters never mutate a tree; they build new trees that may reference
//! subtrees of their input. Two trees denoting the same string set are always
//! structurally equal, independent of how they were built.

use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Node {
    terminal: bool,
    edges: BTreeMap<char, CharTree>,
}

/// An immutable, structurally shared set of strings.
///
/// Each edge carries one character; a string is in the set iff its character
/// path ends at a terminal node. Children are reference-counted, so a subtree
/// can be shared by many parents without duplication. Trees are kept in
/// canonical form (edges merged per character, no empty children), which makes
/// equality and hashing purely structural.
#[derive(Clone)]
pub struct CharTree(Rc<Node>);

impl CharTree {
    /// The empty set (contains no strings, not even the empty one).
    pub fn empty() -> Self {
        CharTree(Rc::new(Node {
            terminal: false,
            edges: BTreeMap::new(),
        }))
    }

    /// The singleton set containing exactly `s`.
    pub fn of(s: &str) -> Self {
        s.chars().rev().fold(Self::leaf(), |acc, c| {
            Self::node(false, BTreeMap::from([(c, acc)]))
        })
    }

    /// The union of the given trees' string sets. Duplicates collapse.
    pub fn union(trees: impl IntoIterator<Item = CharTree>) -> Self {
        trees
            .into_iter()
            .fold(Self::empty(), |acc, t| Self::merge(&acc, &t))
    }

    /// Every string cut to its first `max` characters; shorter strings are
    /// kept unchanged. The result of trimming a non-empty set to length 0 is
    /// the set containing only the empty string.
    pub fn trimmed(&self, max: usize) -> Self {
        fn go(
            tree: &CharTree,
            max: usize,
            memo: &mut HashMap<(usize, usize), CharTree>,
        ) -> CharTree {
            if tree.is_empty() {
                return tree.clone();
            }
            if max == 0 {
                return CharTree::leaf();
            }
            if tree.0.edges.is_empty() {
                return tree.clone();
            }
            if let Some(done) = memo.get(&(tree.addr(), max)) {
                return done.clone();
            }
            let edges = tree
                .0
                .edges
                .iter()
                .map(|(&c, child)| (c, go(child, max - 1, memo)))
                .collect();
            let out = CharTree::node(tree.0.terminal, edges);
            memo.insert((tree.addr(), max), out.clone());
            out
        }
        go(self, max, &mut HashMap::new())
    }

    /// `true` iff this tree denotes the empty set.
    pub fn is_empty(&self) -> bool {
        !self.0.terminal && self.0.edges.is_empty()
    }

    /// `true` iff `s` is in the set.
    pub fn contains(&self, s: &str) -> bool {
        let mut node = self;
        for c in s.chars() {
            match node.0.edges.get(&c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.0.terminal
    }

    /// Number of distinct strings in the set.
    ///
    /// Walks every path, so this is proportional to the string count, not the
    /// node count; prefer [`CharTree::strings`] with a bound when the set may
    /// be combinatorially large.
    pub fn len(&self) -> usize {
        let here = usize::from(self.0.terminal);
        here + self.0.edges.values().map(CharTree::len).sum::<usize>()
    }

    /// Lazy depth-first iterator over the distinct strings in the set, in
    /// lexicographic order. Restartable: each call yields the same sequence.
    pub fn strings(&self) -> Strings<'_> {
        Strings {
            start: Some(self),
            stack: Vec::new(),
            buf: String::new(),
        }
    }

    pub(crate) fn leaf() -> Self {
        CharTree(Rc::new(Node {
            terminal: true,
            edges: BTreeMap::new(),
        }))
    }

    pub(crate) fn node(terminal: bool, edges: BTreeMap<char, CharTree>) -> Self {
        debug_assert!(edges.values().all(|t| !t.is_empty()));
        CharTree(Rc::new(Node { terminal, edges }))
    }

    pub(crate) fn terminal(&self) -> bool {
        self.0.terminal
    }

    /// Node identity for per-node memoization. Only meaningful while the
    /// tree (or a clone) is alive, since addresses can be reused after drop.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub(crate) fn edges(&self) -> &BTreeMap<char, CharTree> {
        &self.0.edges
    }

    /// Prepends `prefix` to every string in `tree`.
    pub(crate) fn prepend(prefix: &str, tree: CharTree) -> Self {
        if tree.is_empty() {
            return tree;
        }
        prefix.chars().rev().fold(tree, |acc, c| {
            Self::node(false, BTreeMap::from([(c, acc)]))
        })
    }

    /// Union of two trees, merging edges per character recursively.
    ///
    /// Memoized per node pair, so merging shared (DAG) trees costs node
    /// count, not path count.
    pub(crate) fn merge(a: &CharTree, b: &CharTree) -> Self {
        fn go(
            a: &CharTree,
            b: &CharTree,
            memo: &mut HashMap<(usize, usize), CharTree>,
        ) -> CharTree {
            if Rc::ptr_eq(&a.0, &b.0) || b.is_empty() {
                return a.clone();
            }
            if a.is_empty() {
                return b.clone();
            }
            if let Some(done) = memo.get(&(a.addr(), b.addr())) {
                return done.clone();
            }
            let mut edges = a.0.edges.clone();
            for (&c, child) in &b.0.edges {
                match edges.entry(c) {
                    btree_map::Entry::Occupied(mut e) => {
                        let merged = go(e.get(), child, memo);
                        e.insert(merged);
                    }
                    btree_map::Entry::Vacant(e) => {
                        e.insert(child.clone());
                    }
                }
            }
            let out = CharTree::node(a.0.terminal || b.0.terminal, edges);
            memo.insert((a.addr(), b.addr()), out.clone());
            out
        }
        go(a, b, &mut HashMap::new())
    }

    /// Every distinct node reachable from this tree, the tree itself
    /// included. Shared subtrees appear once.
    pub(crate) fn reachable(&self) -> Vec<CharTree> {
        let mut seen: HashSet<*const Node> = HashSet::new();
        let mut stack = vec![self.clone()];
        let mut out = Vec::new();
        while let Some(tree) = stack.pop() {
            if seen.insert(Rc::as_ptr(&tree.0)) {
                for child in tree.0.edges.values() {
                    stack.push(child.clone());
                }
                out.push(tree);
            }
        }
        out
    }
}

impl PartialEq for CharTree {
    fn eq(&self, other: &Self) -> bool {
        // Shared subtrees short-circuit without a structural walk.
        Rc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl Eq for CharTree {}

impl Hash for CharTree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Default for CharTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for CharTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.strings()).finish()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CharTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::union(iter.into_iter().map(|s| Self::of(s.as_ref())))
    }
}

impl<'a> IntoIterator for &'a CharTree {
    type Item = String;
    type IntoIter = Strings<'a>;

    fn into_iter(self) -> Strings<'a> {
        self.strings()
    }
}

/// Depth-first iterator over the strings of a [`CharTree`].
pub struct Strings<'a> {
    start: Option<&'a CharTree>,
    stack: Vec<btree_map::Iter<'a, char, CharTree>>,
    buf: String,
}

impl Iterator for Strings<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(root) = self.start.take() {
            self.stack.push(root.0.edges.iter());
            if root.0.terminal {
                return Some(String::new());
            }
        }
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some((&c, child)) => {
                    self.buf.push(c);
                    self.stack.push(child.0.edges.iter());
                    if child.0.terminal {
                        return Some(self.buf.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    self.buf.pop();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collected(tree: &CharTree) -> Vec<String> {
        tree.strings().collect()
    }

    #[test]
    fn test_empty_contains_nothing() {
        let tree = CharTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!tree.contains(""));
        assert_eq!(collected(&tree), Vec::<String>::new());
    }

    #[test]
    fn test_singleton_empty_string() {
        let tree = CharTree::of("");
        assert!(!tree.is_empty());
        assert!(tree.contains(""));
        assert_eq!(collected(&tree), vec![""]);
    }

    #[test]
    fn test_singleton_word() {
        let tree = CharTree::of("apple");
        assert!(tree.contains("apple"));
        assert!(!tree.contains("appl"));
        assert!(!tree.contains("apples"));
        assert_eq!(tree.len(), 1);
        assert_eq!(collected(&tree), vec!["apple"]);
    }

    #[test]
    fn test_union_collapses_duplicates() {
        let a = CharTree::of("apple");
        let b = CharTree::of("banana");
        let with_dup = CharTree::union([a.clone(), a.clone(), b.clone()]);
        let without = CharTree::union([a, b]);
        assert_eq!(with_dup, without);
        assert_eq!(with_dup.len(), 2);
    }

    #[test]
    fn test_round_trip() {
        let words = ["", "a", "ab", "abc", "b", "ba"];
        let tree: CharTree = words.iter().collect();
        let mut out = collected(&tree);
        out.sort();
        assert_eq!(out, words);
    }

    #[test]
    fn test_equality_independent_of_build_order() {
        let forward: CharTree = ["one", "two", "three"].iter().collect();
        let backward: CharTree = ["three", "two", "one"].iter().collect();
        assert_eq!(forward, backward);

        use std::collections::hash_map::DefaultHasher;
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        forward.hash(&mut h1);
        backward.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn test_shared_prefixes_merge() {
        let tree: CharTree = ["car", "cart", "care"].iter().collect();
        assert_eq!(tree.len(), 3);
        assert_eq!(collected(&tree), vec!["car", "care", "cart"]);
    }

    #[test]
    fn test_trimmed_cuts_long_strings() {
        let tree: CharTree = ["abcdef", "abc", "x"].iter().collect();
        let trimmed = tree.trimmed(3);
        let mut out = collected(&trimmed);
        out.sort();
        assert_eq!(out, vec!["abc", "x"]);
    }

    #[test]
    fn test_trimmed_to_zero_is_empty_string() {
        let tree: CharTree = ["abc", "de"].iter().collect();
        assert_eq!(tree.trimmed(0), CharTree::of(""));
        assert!(CharTree::empty().trimmed(0).is_empty());
    }

    #[test]
    fn test_trimmed_walks_shared_trees_per_node() {
        use crate::format::{Formatter, MixedCase};

        // Trimming a 30-node shared tree with 2^30 strings must cost node
        // count, not string count.
        let expanded = MixedCase.apply(&CharTree::of("abcdefghijklmnopqrstuvwxyzabcd"));
        let trimmed = expanded.trimmed(3);
        assert_eq!(trimmed, MixedCase.apply(&CharTree::of("abc")));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let tree: CharTree = ["alpha", "beta"].iter().collect();
        let first: Vec<_> = tree.strings().collect();
        let second: Vec<_> = tree.strings().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unicode_paths() {
        let tree: CharTree = ["pässwörd", "naïve"].iter().collect();
        assert!(tree.contains("pässwörd"));
        assert!(tree.contains("naïve"));
        assert_eq!(tree.len(), 2);
    }
}
