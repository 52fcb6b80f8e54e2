//! Segmentation search.
//!
//! Finds every way to cut a target skeleton into contiguous runs that are
//! each the skeleton of some dictionary word. For example, with `k t`,
//! `k` and `t` all in the index, `k t` segments as `[k t]` and `[k | t]`.
//!
//! The search keeps a frontier of partial solutions and consumes the target
//! one token at a time. Every segment of a partial solution except the last
//! is a complete dictionary skeleton; the last is a prefix of one. Appending
//! a token to the open segment can:
//! - close it, if the extended segment is a complete skeleton;
//! - keep it open, if some longer skeleton extends it;
//! - both, which is where segmentations branch;
//! - neither, which drops the partial solution.
//!
//! Partial solutions never own their history. Closed segments are records in
//! an arena, each pointing at the segment before it, so branches share their
//! common prefix and nothing is copied when a branch forks.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::index::SkeletonIndex;
use crate::skeleton::Skeleton;
use crate::trie::NodeId;

/// A complete segmentation: each segment is the skeleton of a dictionary word.
///
/// Concatenating the segments reconstructs the searched skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segmentation {
    segments: Vec<Skeleton>,
}

impl Segmentation {
    pub fn new(segments: Vec<Skeleton>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Skeleton] {
        &self.segments
    }

    /// Number of segments (words) in this segmentation.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments joined back into one skeleton.
    pub fn concat(&self) -> Skeleton {
        Skeleton::join(&self.segments)
    }
}

/// A closed segment `target[start..end]`, linked to the one before it.
#[derive(Debug, Clone, Copy)]
struct Link {
    start: usize,
    end: usize,
    prev: Option<usize>,
}

/// A frontier entry: closed history plus the open segment `target[open_start..]`.
#[derive(Debug, Clone, Copy)]
struct Partial {
    tail: Option<usize>,
    open_start: usize,
    /// Trie node matching the open segment so far.
    cursor: NodeId,
}

/// Return every segmentation of `target` over the words in `index`.
///
/// The empty target has exactly one segmentation, with no segments. A target
/// nothing in the index can cover has none; that is a normal outcome.
///
/// Results are deterministic for a given index and target. Within a step the
/// closing branch of a partial solution is ordered before its extending
/// branch, so segmentations with an earlier cut come first.
pub fn segment(index: &SkeletonIndex, target: &Skeleton) -> Vec<Segmentation> {
    let span = debug_span!("segment", tokens = target.len());
    let _enter = span.enter();

    let trie = index.trie();
    let mut links: Vec<Link> = Vec::new();
    let mut frontier = vec![Partial {
        tail: None,
        open_start: 0,
        cursor: trie.root(),
    }];

    for (i, token) in target.iter().enumerate() {
        let mut next = Vec::with_capacity(frontier.len());
        for partial in &frontier {
            let Some(cursor) = trie.step(partial.cursor, token) else {
                continue;
            };
            if trie.is_end(cursor) {
                links.push(Link {
                    start: partial.open_start,
                    end: i + 1,
                    prev: partial.tail,
                });
                next.push(Partial {
                    tail: Some(links.len() - 1),
                    open_start: i + 1,
                    cursor: trie.root(),
                });
            }
            // A leaf can match the open segment exactly but can never be
            // extended further, so it only continues if it has children.
            if trie.has_children(cursor) {
                next.push(Partial {
                    cursor,
                    ..*partial
                });
            }
        }
        frontier = next;
        debug!(step = i, token = %token, width = frontier.len(), "frontier advanced");
        if frontier.is_empty() {
            break;
        }
    }

    let solutions: Vec<Segmentation> = frontier
        .iter()
        .filter(|partial| partial.open_start == target.len())
        .map(|partial| rebuild(target, &links, partial.tail))
        .collect();
    debug!(segmentations = solutions.len(), "search finished");
    solutions
}

/// Follow `tail` back through the arena and materialize the segments.
fn rebuild(target: &Skeleton, links: &[Link], tail: Option<usize>) -> Segmentation {
    let mut segments = Vec::new();
    let mut cursor = tail;
    while let Some(id) = cursor {
        let link = links[id];
        segments.push(Skeleton::from(&target[link.start..link.end]));
        cursor = link.prev;
    }
    segments.reverse();
    Segmentation::new(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sk(s: &str) -> Skeleton {
        s.parse().unwrap()
    }

    fn seg(parts: &[&str]) -> Segmentation {
        Segmentation::new(parts.iter().map(|p| sk(p)).collect())
    }

    fn index(entries: &[(&str, &str)]) -> SkeletonIndex {
        entries.iter().map(|(w, s)| (*w, sk(s))).collect()
    }

    #[test]
    fn empty_target_has_one_empty_segmentation() {
        let idx = index(&[("cat", "k t")]);
        assert_eq!(segment(&idx, &Skeleton::empty()), vec![Segmentation::default()]);

        let empty = SkeletonIndex::new();
        assert_eq!(segment(&empty, &Skeleton::empty()), vec![Segmentation::default()]);
    }

    #[test]
    fn no_match_is_empty_result() {
        let idx = index(&[("cat", "k t")]);
        assert!(segment(&idx, &sk("d g")).is_empty());
        assert!(segment(&SkeletonIndex::new(), &sk("k")).is_empty());
    }

    #[test]
    fn unfinished_prefix_is_not_a_solution() {
        let idx = index(&[("cathartic", "k T t k")]);
        assert!(segment(&idx, &sk("k T t")).is_empty());
        assert_eq!(segment(&idx, &sk("k T t k")), vec![seg(&["k T t k"])]);
    }

    #[test]
    fn branches_on_key_that_is_also_prefix() {
        let idx = index(&[("cat", "k t"), ("k", "k"), ("tea", "t")]);
        assert_eq!(
            segment(&idx, &sk("k t")),
            vec![seg(&["k", "t"]), seg(&["k t"])]
        );
    }

    #[test]
    fn three_way_ambiguity() {
        let idx = index(&[("a", "s"), ("b", "s s"), ("c", "s s s")]);
        let found = segment(&idx, &sk("s s s"));
        assert_eq!(
            found,
            vec![
                seg(&["s", "s", "s"]),
                seg(&["s", "s s"]),
                seg(&["s s", "s"]),
                seg(&["s s s"]),
            ]
        );
        for s in &found {
            assert_eq!(s.concat(), sk("s s s"));
        }
    }

    #[test]
    fn empty_skeleton_words_never_form_segments() {
        let idx = index(&[("a", ""), ("tea", "t")]);
        assert_eq!(segment(&idx, &sk("t t")), vec![seg(&["t", "t"])]);
    }
}
