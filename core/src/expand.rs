//! Lazy expansion of segmentations into word sequences.
//!
//! A segmentation `[s1, ..., sk]` stands for every word sequence in
//! `words_of(s1) × ... × words_of(sk)`. Across several segmentations the
//! products are concatenated, not interleaved. The products can be very
//! large, so [`Expansions`] walks them one sequence at a time with an
//! odometer over the per-segment word lists and never materializes them.

use crate::index::SkeletonIndex;
use crate::search::Segmentation;

/// Iterator over the word sequences realizing a list of segmentations.
///
/// Finite and deterministic: the last segment varies fastest, and cloning a
/// fresh iterator replays the same order.
#[derive(Debug, Clone)]
pub struct Expansions<'a> {
    index: &'a SkeletonIndex,
    segmentations: &'a [Segmentation],
    /// Segmentation currently being expanded.
    current: usize,
    /// Word lists for the current segmentation's segments.
    choices: Vec<&'a [String]>,
    /// Odometer position in `choices`; `None` once the current product is exhausted.
    odometer: Option<Vec<usize>>,
}

/// Expand `segmentations` against `index`.
pub fn expand<'a>(index: &'a SkeletonIndex, segmentations: &'a [Segmentation]) -> Expansions<'a> {
    let mut expansions = Expansions {
        index,
        segmentations,
        current: 0,
        choices: Vec::new(),
        odometer: None,
    };
    expansions.load(0);
    expansions
}

impl<'a> Expansions<'a> {
    /// Point the odometer at the first non-empty product at or after `from`.
    fn load(&mut self, from: usize) {
        let index = self.index;
        let segmentations = self.segmentations;
        self.current = from;
        while let Some(segmentation) = segmentations.get(self.current) {
            self.choices = segmentation
                .segments()
                .iter()
                .map(|skeleton| index.words_of(skeleton))
                .collect();
            // A product with an empty factor is empty; a product with no
            // factors holds exactly one (empty) sequence.
            if self.choices.iter().all(|words| !words.is_empty()) {
                self.odometer = Some(vec![0; self.choices.len()]);
                return;
            }
            self.current += 1;
        }
        self.choices.clear();
        self.odometer = None;
    }

    /// Advance the odometer, rolling over into the next segmentation when spent.
    fn advance(&mut self) {
        if let Some(odometer) = self.odometer.as_mut() {
            for pos in (0..odometer.len()).rev() {
                odometer[pos] += 1;
                if odometer[pos] < self.choices[pos].len() {
                    return;
                }
                odometer[pos] = 0;
            }
        }
        self.load(self.current + 1);
    }
}

impl<'a> Iterator for Expansions<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let odometer = self.odometer.as_ref()?;
        let words = odometer
            .iter()
            .zip(&self.choices)
            .map(|(&i, &words)| words[i].as_str())
            .collect();
        self.advance();
        Some(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::segment;
    use crate::skeleton::Skeleton;
    use pretty_assertions::assert_eq;

    fn sk(s: &str) -> Skeleton {
        s.parse().unwrap()
    }

    fn demo_index() -> SkeletonIndex {
        [
            ("cat", "k t"),
            ("cart", "k t"),
            ("coat", "k t"),
            ("k", "k"),
            ("tea", "t"),
            ("tee", "t"),
        ]
        .into_iter()
        .map(|(w, s)| (w, sk(s)))
        .collect()
    }

    #[test]
    fn concatenates_products_in_order() {
        let index = demo_index();
        let segs = segment(&index, &sk("k t"));
        let all: Vec<Vec<&str>> = expand(&index, &segs).collect();
        assert_eq!(
            all,
            vec![
                vec!["k", "tea"],
                vec!["k", "tee"],
                vec!["cat"],
                vec!["cart"],
                vec!["coat"],
            ]
        );
    }

    #[test]
    fn last_segment_varies_fastest() {
        let index = demo_index();
        let segs = vec![Segmentation::new(vec![sk("k t"), sk("t")])];
        let all: Vec<String> = expand(&index, &segs).map(|ws| ws.join(" ")).collect();
        assert_eq!(
            all,
            ["cat tea", "cat tee", "cart tea", "cart tee", "coat tea", "coat tee"]
        );
    }

    #[test]
    fn restarting_replays_same_sequence() {
        let index = demo_index();
        let segs = segment(&index, &sk("k t t"));
        let fresh = expand(&index, &segs);
        let first: Vec<_> = fresh.clone().collect();
        let second: Vec<_> = fresh.collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn is_lazy_over_large_products() {
        let mut index = SkeletonIndex::new();
        for i in 0..1000 {
            index.insert(format!("s{i}"), sk("s"));
        }
        // 1000^4 sequences; only the first few are ever produced.
        let segs = vec![Segmentation::new(vec![sk("s"); 4])];
        let head: Vec<_> = expand(&index, &segs).take(3).collect();
        assert_eq!(
            head,
            vec![
                vec!["s0", "s0", "s0", "s0"],
                vec!["s0", "s0", "s0", "s1"],
                vec!["s0", "s0", "s0", "s2"],
            ]
        );
    }

    #[test]
    fn empty_segmentation_yields_one_empty_sequence() {
        let index = demo_index();
        let segs = vec![Segmentation::default()];
        let all: Vec<Vec<&str>> = expand(&index, &segs).collect();
        assert_eq!(all, vec![Vec::<&str>::new()]);
    }

    #[test]
    fn unknown_segment_skips_segmentation() {
        let index = demo_index();
        let segs = vec![
            Segmentation::new(vec![sk("d g")]),
            Segmentation::new(vec![sk("t")]),
        ];
        let all: Vec<Vec<&str>> = expand(&index, &segs).collect();
        assert_eq!(all, vec![vec!["tea"], vec!["tee"]]);
        let none: Vec<Segmentation> = Vec::new();
        assert_eq!(expand(&index, &none).count(), 0);
    }
}
