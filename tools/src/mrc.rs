//! MRC Psycholinguistic Database dictionary reader.
//!
//! Each record starts with a two-digit spelling length `n`. Fields are
//! separated by `|`; the spelling is the last `n` characters of field 0 and
//! field 2 is the pronunciation in the database's ASCII phonetic alphabet.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::Entry;

const CONSONANTS: &[&str] = &[
    "tS", "dZ", "p", "b", "t", "d", "k", "m", "n", "l", "r", "f", "v", "s", "z", "g", "9", "T",
    "D", "S", "Z", "j",
];

/// Consonants matched so they are not misread, but left out of the skeleton.
const IGNORED: &[&str] = &["h", "w"];

const VOWELS: &[&str] = &[
    "eI", "aI", "oI", "@U", "aU", "I@", "e@", "u@", "i", "A", "O", "u", "3", "I", "e", "&", "V",
    "0", "@",
];

/// Leftmost-first alternation over every phoneme, in table order, so
/// two-character symbols win over their first character.
static PHONEME: Lazy<Regex> = Lazy::new(|| {
    let alternation = CONSONANTS
        .iter()
        .chain(IGNORED)
        .chain(VOWELS)
        .map(|symbol| regex::escape(symbol))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

pub fn consonants(pronunciation: &str) -> Vec<String> {
    PHONEME
        .find_iter(pronunciation)
        .map(|m| m.as_str())
        .filter(|phoneme| CONSONANTS.contains(phoneme))
        .map(String::from)
        .collect()
}

/// `None` for blank or malformed records.
pub fn convert_line(line: &str) -> Option<Entry> {
    if line.trim().is_empty() {
        return None;
    }
    let Some(length) = line.get(..2).and_then(|n| n.trim().parse::<usize>().ok()) else {
        warn!(line, "no spelling length, skipping");
        return None;
    };
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 3 {
        warn!(line, "fewer than three fields, skipping");
        return None;
    }
    let record = fields[0];
    let skip = record.chars().count().saturating_sub(length);
    let spelling: String = record.chars().skip(skip).collect::<String>().to_lowercase();
    if spelling.is_empty() {
        warn!(line, "empty spelling, skipping");
        return None;
    }
    Some(Entry {
        spelling,
        consonants: consonants(fields[2]),
    })
}

pub fn read_file(path: &Path) -> Result<Vec<Entry>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut entries = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {} line {}", path.display(), number + 1))?;
        entries.extend(convert_line(&line));
    }
    Ok(entries)
}
