//! Interactive word choice.
//!
//! A `ChoiceSession` narrows the segmentations of one target skeleton a word
//! at a time. Each turn it offers the words that can legally come next; a
//! chosen word keeps only the segmentations that start with its skeleton and
//! drops that first segment from each of them.
//!
//! Backtracking never unwinds state. It searches the target again from
//! scratch and replays every choice except the last few, so the live set is
//! always rebuilt from the target skeleton.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::expand::{expand, Expansions};
use crate::index::SkeletonIndex;
use crate::search::{segment, Segmentation};
use crate::skeleton::Skeleton;

/// Where the session is in the choice protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No target skeleton yet
    #[default]
    AwaitingSkeleton,
    /// The target has no segmentation consistent with the chosen words
    NoSolutions,
    /// At least one word can be chosen next
    OfferingChoice,
    /// Every live segmentation is fully covered by chosen words
    Complete,
}

/// Session state for one interactive run over a shared, read-only index.
#[derive(Debug, Clone)]
pub struct ChoiceSession<'a> {
    index: &'a SkeletonIndex,

    /// Skeleton given to `start`
    target: Skeleton,

    /// Words chosen so far, in order
    chosen: Vec<String>,

    /// Remaining segments of every segmentation still consistent with `chosen`
    live: Vec<Segmentation>,

    state: SessionState,
}

impl<'a> ChoiceSession<'a> {
    /// Create a session awaiting its first target skeleton.
    pub fn new(index: &'a SkeletonIndex) -> Self {
        Self {
            index,
            target: Skeleton::empty(),
            chosen: Vec::new(),
            live: Vec::new(),
            state: SessionState::AwaitingSkeleton,
        }
    }

    /// Search `target` and begin choosing words for it.
    ///
    /// Any previous target and choices are discarded.
    pub fn start(&mut self, target: Skeleton) -> SessionState {
        self.live = segment(self.index, &target);
        self.target = target;
        self.chosen.clear();
        self.refresh_state();
        debug!(
            skeleton = %self.target,
            segmentations = self.live.len(),
            state = ?self.state,
            "session started"
        );
        self.state
    }

    /// The legal next words, without duplicates, sorted by spelling.
    ///
    /// This is the union of the word lists of the first remaining segment of
    /// every live segmentation, less any word whose current skeleton differs
    /// from the list it sits in (a spelling re-inserted with a new
    /// pronunciation). Every offered word is accepted by `choose`. Empty
    /// unless the state is `OfferingChoice`.
    pub fn offer_next_words(&self) -> Vec<&'a str> {
        let index = self.index;
        let offered: BTreeSet<&'a str> = self
            .live
            .iter()
            .filter_map(|segmentation| segmentation.segments().first())
            .flat_map(|skeleton| {
                index
                    .words_of(skeleton)
                    .iter()
                    .filter(move |word| index.skeleton_of(word) == Some(skeleton))
            })
            .map(String::as_str)
            .collect();
        offered.into_iter().collect()
    }

    /// Choose `word` as the next word.
    ///
    /// Fails with [`Error::InvalidChoice`] if no live segmentation starts with
    /// the word's skeleton; the session is then left untouched.
    pub fn choose(&mut self, word: &str) -> Result<SessionState> {
        if self.state == SessionState::AwaitingSkeleton {
            return Err(Error::NotStarted);
        }
        let invalid = || Error::InvalidChoice {
            word: word.to_string(),
        };
        let index = self.index;
        let skeleton = index.skeleton_of(word).ok_or_else(invalid)?;
        let starts_with_word =
            |segmentation: &Segmentation| segmentation.segments().first() == Some(skeleton);
        if !self.live.iter().any(starts_with_word) {
            return Err(invalid());
        }

        self.live = self
            .live
            .iter()
            .filter(|segmentation| starts_with_word(segmentation))
            .map(|segmentation| Segmentation::new(segmentation.segments()[1..].to_vec()))
            .collect();
        self.chosen.push(word.to_string());
        self.refresh_state();
        debug!(word, live = self.live.len(), state = ?self.state, "word chosen");
        Ok(self.state)
    }

    /// Undo the last `steps` choices by searching the target again and
    /// replaying the earlier ones.
    ///
    /// Undoing more choices than were made returns to the freshly started state.
    pub fn backtrack(&mut self, steps: usize) -> Result<SessionState> {
        if self.state == SessionState::AwaitingSkeleton {
            return Err(Error::NotStarted);
        }
        let keep = self.chosen.len().saturating_sub(steps);
        let replay: Vec<String> = self.chosen.drain(..keep).collect();
        debug!(steps, replay = replay.len(), "backtracking");

        self.start(self.target.clone());
        for word in &replay {
            self.choose(word)?;
        }
        Ok(self.state)
    }

    /// Drop the target and choices and wait for a new skeleton.
    pub fn restart(&mut self) {
        self.target = Skeleton::empty();
        self.chosen.clear();
        self.live.clear();
        self.state = SessionState::AwaitingSkeleton;
    }

    fn refresh_state(&mut self) {
        self.state = if self.live.is_empty() {
            SessionState::NoSolutions
        } else if self.live.iter().all(Segmentation::is_empty) {
            SessionState::Complete
        } else {
            SessionState::OfferingChoice
        };
    }

    /// Get the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the target skeleton.
    pub fn target(&self) -> &Skeleton {
        &self.target
    }

    /// Get the words chosen so far.
    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    /// The chosen words joined with spaces, in selection order.
    pub fn sentence(&self) -> String {
        self.chosen.join(" ")
    }

    /// Remaining segments of each live segmentation.
    pub fn live_segmentations(&self) -> &[Segmentation] {
        &self.live
    }

    /// The part of the target not yet covered by chosen words.
    pub fn remaining(&self) -> Skeleton {
        let covered: usize = self
            .chosen
            .iter()
            .filter_map(|word| self.index.skeleton_of(word))
            .map(|skeleton| skeleton.len())
            .sum();
        Skeleton::from(&self.target[covered.min(self.target.len())..])
    }

    /// Every word sequence that would complete the current choices.
    pub fn expansions(&self) -> Expansions<'_> {
        expand(self.index, &self.live)
    }
}
