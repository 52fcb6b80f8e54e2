//! cynghanedd
//!
//! Front end for `cynghanedd-core`: dictionary loading, IPA consonant
//! extraction, configuration and the interactive loop used by the
//! `cynghanedd` binary.
//!
//! A target skeleton can be given three ways (see [`Target`]): as raw
//! tokens, as a line of dictionary words whose consonants are used, or as an
//! IPA transcription.

pub mod config;
pub mod dictionary;
pub mod phonemic;
pub mod repl;

pub use config::AppConfig;
pub use dictionary::{build_index, DictionaryFormat, DictionarySource, LoadStats};
pub use phonemic::{ConsonantAnalyzer, IpaConsonants};
pub use repl::Repl;

use anyhow::{Context, Result};
use cynghanedd_core::{Segmentation, Skeleton, SkeletonIndex};

/// Where a target skeleton comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Space-separated consonant tokens, used as given
    Tokens(String),
    /// Words looked up in the index and concatenated
    Words(String),
    /// An IPA transcription run through a [`ConsonantAnalyzer`]
    Ipa(String),
}

impl Target {
    pub fn resolve(&self, index: &SkeletonIndex, analyzer: &dyn ConsonantAnalyzer) -> Result<Skeleton> {
        match self {
            Target::Tokens(tokens) => Ok(Skeleton::new(tokens.split_whitespace())),
            Target::Words(words) => index
                .phrase_skeleton(words)
                .with_context(|| format!("cannot build a skeleton for \"{words}\"")),
            Target::Ipa(ipa) => Ok(analyzer.consonants(ipa)),
        }
    }
}

/// One segmentation per line, segments separated by ` | `.
pub fn format_segmentation(segmentation: &Segmentation) -> String {
    segmentation
        .segments()
        .iter()
        .map(Skeleton::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
