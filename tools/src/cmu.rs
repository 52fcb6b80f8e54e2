//! CMU Pronouncing Dictionary reader.
//!
//! Lines look like `CATHARTIC  K AH0 TH AA1 R T IH0 K`: the spelling, two
//! spaces, then ARPAbet phones. Alternate pronunciations carry a `(n)`
//! suffix on the spelling. Comment lines start with `;;;`.

use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;
use tracing::warn;

use crate::Entry;

/// ARPAbet consonant phone to skeleton token. The glottal stop `Q` maps to
/// nothing and is dropped.
static CONSONANTS: phf::Map<&'static str, &'static str> = phf_map! {
    "CH" => "tS", "DH" => "D", "DX" => "t", "EL" => "l", "EM" => "m",
    "EN" => "n", "HH" => "h", "JH" => "dZ", "NX" => "n", "NG" => "9",
    "SH" => "S", "TH" => "T", "WH" => "w", "ZH" => "Z",
    "B" => "b", "D" => "d", "F" => "f", "G" => "g", "K" => "k", "L" => "l",
    "M" => "m", "N" => "n", "P" => "p", "Q" => "", "R" => "r", "S" => "s",
    "T" => "t", "V" => "v", "W" => "w", "Y" => "j", "Z" => "z",
};

static VARIANT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").unwrap());

/// `None` for comments, blank lines and lines without the two-space separator.
pub fn convert_line(line: &str) -> Option<Entry> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with(";;;") {
        return None;
    }
    let Some((spelling, phones)) = line.split_once("  ") else {
        warn!(line, "no two-space separator, skipping");
        return None;
    };
    let spelling = VARIANT_SUFFIX.replace(spelling.trim(), "").to_lowercase();
    let consonants = phones
        .split_whitespace()
        .filter_map(|phone| CONSONANTS.get(phone).copied())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect();
    Some(Entry {
        spelling,
        consonants,
    })
}

/// Latin-1 to `String`: each byte is the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn read_file(path: &Path) -> Result<Vec<Entry>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(bytes
        .split(|&b| b == b'\n')
        .map(decode_latin1)
        .filter_map(|line| convert_line(&line))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn consonants(line: &str) -> Vec<String> {
        convert_line(line).unwrap().consonants
    }

    #[test]
    fn keeps_remapped_consonants() {
        let entry = convert_line("CATHARTIC  K AH0 TH AA1 R T IH0 K").unwrap();
        assert_eq!(entry.spelling, "cathartic");
        assert_eq!(entry.consonants, ["k", "T", "r", "t", "k"]);
        assert_eq!(consonants("CHURCH  CH ER1 CH"), ["tS", "tS"]);
        assert_eq!(consonants("SING  S IH1 NG"), ["s", "9"]);
    }

    #[test]
    fn strips_variant_suffix() {
        let entry = convert_line("READ(1)  R EH1 D").unwrap();
        assert_eq!(entry.spelling, "read");
        assert_eq!(entry.consonants, ["r", "d"]);
    }

    #[test]
    fn glottal_stop_is_dropped() {
        assert_eq!(consonants("UHOH  AH1 Q OW0"), Vec::<String>::new());
    }

    #[test]
    fn skips_comments_and_malformed() {
        assert_eq!(convert_line(";;; # CMUdict  --  Major Version: 0.07"), None);
        assert_eq!(convert_line(""), None);
        assert_eq!(convert_line("CAT K AE1 T"), None);
    }

    #[test]
    fn latin1_bytes_decode() {
        assert_eq!(decode_latin1(b"CAF\xc9"), "CAF\u{c9}");
        assert_eq!(
            convert_line(&decode_latin1(b"CAF\xc9  K AE0 F EY1")).unwrap().spelling,
            "caf\u{e9}"
        );
    }
}
