//! Skeleton index.
//!
//! Maps words to their consonant skeletons and back, and keeps a prefix trie
//! over every known skeleton for the segmentation search.
//!
//! Public API:
//! - `SkeletonIndex::insert` - register a `(word, skeleton)` pair
//! - `skeleton_of` / `words_of` - lookups in either direction
//! - `is_complete_key` / `has_prefix` - the two trie queries the search needs
//!
//! Notes:
//! - One pronunciation per spelling. Inserting a word again replaces its
//!   skeleton (last write wins) but does not remove it from the word list of
//!   the skeleton it had before.
//! - The index is built once and then only read. It does no file parsing;
//!   callers feed it pairs produced by a dictionary loader.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::skeleton::Skeleton;
use crate::trie::SkeletonTrie;

/// Bidirectional word/skeleton mapping plus a trie over all skeletons.
///
/// Invariant: a skeleton is a key of `skeleton_to_words` iff it is a key of
/// the trie, and `word_to_skeleton[w] == s` implies `w` is listed under `s`.
#[derive(Debug, Clone, Default)]
pub struct SkeletonIndex {
    word_to_skeleton: AHashMap<String, Skeleton>,
    skeleton_to_words: AHashMap<Skeleton, Vec<String>>,
    trie: SkeletonTrie,
}

impl SkeletonIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `word` with `skeleton`.
    ///
    /// Appends `word` to the skeleton's word list even if it is already
    /// there, so a spelling ingested twice is listed twice.
    pub fn insert<W: Into<String>>(&mut self, word: W, skeleton: Skeleton) {
        let word = word.into();
        self.trie.insert(skeleton.tokens());
        self.skeleton_to_words
            .entry(skeleton.clone())
            .or_default()
            .push(word.clone());
        self.word_to_skeleton.insert(word, skeleton);
    }

    /// Exact lookup of a word's skeleton.
    pub fn skeleton_of(&self, word: &str) -> Option<&Skeleton> {
        self.word_to_skeleton.get(word)
    }

    /// Words sharing `skeleton`, in insertion order. Empty if unknown.
    pub fn words_of(&self, skeleton: &Skeleton) -> &[String] {
        self.skeleton_to_words
            .get(skeleton)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True iff `candidate` equals some inserted skeleton.
    pub fn is_complete_key<T: AsRef<str>>(&self, candidate: &[T]) -> bool {
        self.trie.contains_key(candidate)
    }

    /// True iff some inserted skeleton equals or extends `candidate`.
    pub fn has_prefix<T: AsRef<str>>(&self, candidate: &[T]) -> bool {
        self.trie.has_prefix(candidate)
    }

    /// The trie over all inserted skeletons.
    pub fn trie(&self) -> &SkeletonTrie {
        &self.trie
    }

    /// Skeleton of a line of words: each word's skeleton, concatenated in order.
    ///
    /// Words are split on whitespace and lowercased before lookup.
    pub fn phrase_skeleton(&self, line: &str) -> Result<Skeleton> {
        let mut tokens = Vec::new();
        for word in line.split_whitespace() {
            let word = word.to_lowercase();
            match self.word_to_skeleton.get(&word) {
                Some(skeleton) => tokens.extend_from_slice(skeleton.tokens()),
                None => return Err(Error::UnknownWord(word)),
            }
        }
        Ok(Skeleton::from(tokens))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_to_skeleton.len()
    }

    /// Return true if no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.word_to_skeleton.is_empty()
    }

    /// Number of distinct skeletons.
    pub fn skeleton_count(&self) -> usize {
        self.skeleton_to_words.len()
    }
}

impl<W: Into<String>> Extend<(W, Skeleton)> for SkeletonIndex {
    fn extend<I: IntoIterator<Item = (W, Skeleton)>>(&mut self, iter: I) {
        for (word, skeleton) in iter {
            self.insert(word, skeleton);
        }
    }
}

impl<W: Into<String>> FromIterator<(W, Skeleton)> for SkeletonIndex {
    fn from_iter<I: IntoIterator<Item = (W, Skeleton)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_index() -> SkeletonIndex {
        SkeletonIndex::from_iter([
            ("cat", Skeleton::from(["k", "t"])),
            ("cart", Skeleton::from(["k", "t"])),
            ("coat", Skeleton::from(["k", "t"])),
            ("cathartic", Skeleton::from(["k", "T", "t", "k"])),
        ])
    }

    #[test]
    fn insert_and_lookup() {
        let index = cat_index();
        assert_eq!(index.skeleton_of("cat"), Some(&Skeleton::from(["k", "t"])));
        assert_eq!(index.skeleton_of("dog"), None);
        assert_eq!(
            index.words_of(&Skeleton::from(["k", "t"])),
            ["cat", "cart", "coat"]
        );
        assert!(index.words_of(&Skeleton::from(["d", "g"])).is_empty());
        assert_eq!(index.len(), 4);
        assert_eq!(index.skeleton_count(), 2);
    }

    #[test]
    fn trie_queries() {
        let index = cat_index();
        assert!(index.is_complete_key(&["k", "t"]));
        assert!(!index.is_complete_key(&["k", "T"]));
        assert!(index.has_prefix(&["k", "T"]));
        assert!(index.has_prefix(&["k", "T", "t", "k"]));
        assert!(!index.has_prefix(&["T"]));
    }

    #[test]
    fn last_pronunciation_wins() {
        let mut index = SkeletonIndex::new();
        index.insert("read", Skeleton::from(["r", "d"]));
        index.insert("read", Skeleton::from(["r", "d", "z"]));
        assert_eq!(
            index.skeleton_of("read"),
            Some(&Skeleton::from(["r", "d", "z"]))
        );
        // The earlier skeleton keeps its (now stale) entry.
        assert_eq!(index.words_of(&Skeleton::from(["r", "d"])), ["read"]);
        assert_eq!(index.words_of(&Skeleton::from(["r", "d", "z"])), ["read"]);
    }

    #[test]
    fn duplicate_spelling_is_listed_twice() {
        let mut index = SkeletonIndex::new();
        index.insert("cat", Skeleton::from(["k", "t"]));
        index.insert("cat", Skeleton::from(["k", "t"]));
        assert_eq!(index.words_of(&Skeleton::from(["k", "t"])), ["cat", "cat"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn empty_skeleton_is_representable() {
        let mut index = SkeletonIndex::new();
        index.insert("a", Skeleton::empty());
        assert_eq!(index.skeleton_of("a"), Some(&Skeleton::empty()));
        assert_eq!(index.words_of(&Skeleton::empty()), ["a"]);
        let none: [&str; 0] = [];
        assert!(index.is_complete_key(&none));
    }

    #[test]
    fn phrase_skeleton_concatenates_words() {
        let mut index = cat_index();
        index.insert("his", Skeleton::from(["h", "z"]));
        assert_eq!(
            index.phrase_skeleton("His  cat").unwrap(),
            Skeleton::from(["h", "z", "k", "t"])
        );
        assert_eq!(index.phrase_skeleton("").unwrap(), Skeleton::empty());
        match index.phrase_skeleton("his dog") {
            Err(Error::UnknownWord(w)) => assert_eq!(w, "dog"),
            other => panic!("expected UnknownWord, got {other:?}"),
        }
    }
}
