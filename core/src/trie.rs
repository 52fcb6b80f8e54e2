//! Prefix trie over phoneme-token sequences.

use ahash::AHashMap;

/// Index of a node inside a [`SkeletonTrie`].
pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: AHashMap<String, NodeId>,
    /// Set when the path from the root to this node is a stored skeleton.
    is_end: bool,
}

/// A prefix tree keyed by sequences of tokens (not characters).
///
/// Nodes live in a flat arena so the segmentation search can hold a
/// `NodeId` cursor per partial solution and advance it one token at a
/// time instead of re-walking the key from the root.
///
/// # Example
/// ```
/// use cynghanedd_core::trie::SkeletonTrie;
///
/// let mut trie = SkeletonTrie::new();
/// trie.insert(&["k", "T", "t", "k"]);
/// trie.insert(&["k", "t"]);
///
/// assert!(trie.contains_key(&["k", "t"]));
/// assert!(!trie.contains_key(&["k"]));
/// assert!(trie.has_prefix(&["k", "T"]));
/// assert!(!trie.has_prefix(&["t"]));
/// ```
#[derive(Debug, Clone)]
pub struct SkeletonTrie {
    nodes: Vec<TrieNode>,
    keys: usize,
}

impl SkeletonTrie {
    /// Create a trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            keys: 0,
        }
    }

    /// Insert a key. Inserting an existing key is a no-op.
    pub fn insert<T: AsRef<str>>(&mut self, key: &[T]) {
        let mut node = ROOT;
        for token in key {
            let token = token.as_ref();
            node = match self.nodes[node].children.get(token) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(token.to_string(), child);
                    child
                }
            };
        }
        if !self.nodes[node].is_end {
            self.nodes[node].is_end = true;
            self.keys += 1;
        }
    }

    /// Check whether `key` was inserted exactly (not merely as a prefix).
    pub fn contains_key<T: AsRef<str>>(&self, key: &[T]) -> bool {
        self.find(key).is_some_and(|node| self.is_end(node))
    }

    /// Check whether some stored key equals or extends `key`.
    ///
    /// Every node other than a bare root lies on the path of at least one
    /// stored key, so this is node existence plus a guard for an empty trie.
    pub fn has_prefix<T: AsRef<str>>(&self, key: &[T]) -> bool {
        self.find(key)
            .is_some_and(|node| self.is_end(node) || self.has_children(node))
    }

    /// Walk `key` from the root and return the node it ends on.
    pub(crate) fn find<T: AsRef<str>>(&self, key: &[T]) -> Option<NodeId> {
        key.iter()
            .try_fold(ROOT, |node, token| self.step(node, token.as_ref()))
    }

    /// The root cursor, matching the empty key.
    pub(crate) fn root(&self) -> NodeId {
        ROOT
    }

    /// Advance a cursor by one token.
    pub(crate) fn step(&self, node: NodeId, token: &str) -> Option<NodeId> {
        self.nodes[node].children.get(token).copied()
    }

    /// True if the path to `node` is a stored key.
    pub(crate) fn is_end(&self, node: NodeId) -> bool {
        self.nodes[node].is_end
    }

    /// True if some stored key strictly extends the path to `node`.
    pub(crate) fn has_children(&self, node: NodeId) -> bool {
        !self.nodes[node].children.is_empty()
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys == 0
    }
}

impl Default for SkeletonTrie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_and_contains() {
        let mut trie = SkeletonTrie::new();
        trie.insert(&["k", "t"]);
        trie.insert(&["t"]);
        trie.insert(&["k", "T", "t", "k"]);

        assert!(trie.contains_key(&["k", "t"]));
        assert!(trie.contains_key(&["t"]));
        assert!(trie.contains_key(&["k", "T", "t", "k"]));
        assert!(!trie.contains_key(&["k"]));
        assert!(!trie.contains_key(&["k", "T"]));
        assert!(!trie.contains_key(&["k", "t", "k"]));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_has_prefix_includes_exact_keys() {
        let mut trie = SkeletonTrie::new();
        trie.insert(&["k", "t"]);

        assert!(trie.has_prefix(&["k"]));
        assert!(trie.has_prefix(&["k", "t"]));
        assert!(!trie.has_prefix(&["k", "t", "s"]));
        assert!(!trie.has_prefix(&["t"]));
    }

    #[test]
    fn test_tokens_are_not_characters() {
        let mut trie = SkeletonTrie::new();
        trie.insert(&["tS"]);

        assert!(trie.contains_key(&["tS"]));
        assert!(!trie.has_prefix(&["t"]));
        assert!(!trie.contains_key(&["t", "S"]));
    }

    #[test]
    fn test_empty_trie_and_empty_key() {
        let mut trie = SkeletonTrie::new();
        let none: [&str; 0] = [];
        assert!(trie.is_empty());
        assert!(!trie.has_prefix(&none));
        assert!(!trie.contains_key(&none));

        // A word with no consonants stores the empty key at the root.
        trie.insert(&none);
        assert!(trie.contains_key(&none));
        assert!(trie.has_prefix(&none));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_cursor_walk_matches_find() {
        let mut trie = SkeletonTrie::new();
        trie.insert(&["k"]);
        trie.insert(&["k", "t"]);

        let k = trie.step(trie.root(), "k").unwrap();
        assert!(trie.is_end(k));
        assert!(trie.has_children(k));

        let kt = trie.step(k, "t").unwrap();
        assert_eq!(Some(kt), trie.find(&["k", "t"]));
        assert!(trie.is_end(kt));
        assert!(!trie.has_children(kt));
        assert_eq!(trie.step(kt, "t"), None);
    }

    #[test]
    fn test_duplicate_insert_counts_once() {
        let mut trie = SkeletonTrie::new();
        trie.insert(&["s"]);
        trie.insert(&["s"]);
        assert_eq!(trie.len(), 1);
    }
}
