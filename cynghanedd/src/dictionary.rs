//! Dictionary files.
//!
//! Two line formats are understood:
//! - `tokens`: `word<TAB>tok tok tok`, as written by `convert_dict`
//! - `ipa`: `word<TAB>/ipa/`, optionally several comma-separated
//!   pronunciations of which the first is used
//!
//! Every file listed is loaded into one [`SkeletonIndex`] before any search
//! runs. Later files win on duplicate spellings.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use cynghanedd_core::{Skeleton, SkeletonIndex};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::phonemic::{ConsonantAnalyzer, IpaConsonants};

/// How the pronunciation column of a dictionary is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// Space-separated consonant tokens
    #[default]
    Tokens,
    /// An IPA transcription, reduced to consonants on load
    Ipa,
}

/// One dictionary file to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySource {
    pub path: PathBuf,
    #[serde(default)]
    pub format: DictionaryFormat,
}

impl DictionarySource {
    pub fn new<P: Into<PathBuf>>(path: P, format: DictionaryFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Counts reported after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub words: usize,
    pub skipped: usize,
}

impl std::ops::AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.words += other.words;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, PartialEq)]
enum ParsedLine {
    Blank,
    Entry(String, Skeleton),
    Malformed(&'static str),
}

/// NFC, trimmed, lowercased spelling.
pub fn normalize_word(word: &str) -> String {
    word.trim().nfc().collect::<String>().to_lowercase()
}

fn parse_line(line: &str, format: DictionaryFormat, analyzer: &dyn ConsonantAnalyzer) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }
    let Some((word, pronunciation)) = line.split_once('\t') else {
        return ParsedLine::Malformed("missing tab separator");
    };
    let word = normalize_word(word);
    if word.is_empty() {
        return ParsedLine::Malformed("empty word");
    }
    let skeleton = match format {
        DictionaryFormat::Tokens => Skeleton::new(pronunciation.split_whitespace()),
        DictionaryFormat::Ipa => {
            let first = pronunciation.split(',').next().unwrap_or_default();
            analyzer.consonants(first.trim())
        }
    };
    ParsedLine::Entry(word, skeleton)
}

/// Read every line of `reader` into `index`.
///
/// `origin` only labels log messages.
pub fn load_into<R: BufRead>(
    index: &mut SkeletonIndex,
    reader: R,
    format: DictionaryFormat,
    analyzer: &dyn ConsonantAnalyzer,
    origin: &str,
) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {origin} line {}", number + 1))?;
        stats.lines += 1;
        match parse_line(&line, format, analyzer) {
            ParsedLine::Blank => {}
            ParsedLine::Entry(word, skeleton) => {
                index.insert(word, skeleton);
                stats.words += 1;
            }
            ParsedLine::Malformed(reason) => {
                warn!(origin, line = number + 1, reason, "skipping dictionary line");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

/// Load one dictionary file into `index`.
pub fn load_file(
    index: &mut SkeletonIndex,
    path: &Path,
    format: DictionaryFormat,
    analyzer: &dyn ConsonantAnalyzer,
) -> Result<LoadStats> {
    let file = File::open(path).with_context(|| format!("opening dictionary {}", path.display()))?;
    load_into(
        index,
        BufReader::new(file),
        format,
        analyzer,
        &path.display().to_string(),
    )
}

/// Build the index from every source, in order.
pub fn build_index(sources: &[DictionarySource]) -> Result<SkeletonIndex> {
    let started = Instant::now();
    let analyzer = IpaConsonants::new();
    let mut index = SkeletonIndex::new();
    let mut total = LoadStats::default();
    for source in sources {
        let stats = load_file(&mut index, &source.path, source.format, &analyzer)?;
        info!(
            path = %source.path.display(),
            format = ?source.format,
            words = stats.words,
            skipped = stats.skipped,
            "loaded dictionary"
        );
        total += stats;
    }
    info!(
        words = index.len(),
        skeletons = index.skeleton_count(),
        lines = total.lines,
        skipped = total.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "index ready"
    );
    Ok(index)
}
