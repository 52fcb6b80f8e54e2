//! Consonant extraction from phonemic transcriptions.
//!
//! Dictionaries that store a full pronunciation (IPA) instead of a skeleton
//! go through a [`ConsonantAnalyzer`] on load. [`IpaConsonants`] is a plain
//! table-driven reading of IPA: it keeps the consonant symbols in order and
//! drops everything else.

use cynghanedd_core::Skeleton;
use phf::phf_set;

/// Turns a pronunciation string into its ordered consonant phonemes.
pub trait ConsonantAnalyzer {
    fn consonants(&self, pronunciation: &str) -> Skeleton;
}

/// Single-symbol IPA consonants, pulmonic and non-pulmonic, plus the
/// approximants `j`, `w`, `ʍ`, `ɥ` and velarized `ɫ`.
static CONSONANTS: phf::Set<char> = phf_set! {
    'p', 'b', 't', 'd', 'ʈ', 'ɖ', 'c', 'ɟ', 'k', 'ɡ', 'q', 'ɢ', 'ʔ',
    'm', 'ɱ', 'n', 'ɳ', 'ɲ', 'ŋ', 'ɴ',
    'ʙ', 'r', 'ʀ', 'ⱱ', 'ɾ', 'ɽ',
    'ɸ', 'β', 'f', 'v', 'θ', 'ð', 's', 'z', 'ʃ', 'ʒ', 'ʂ', 'ʐ',
    'ç', 'ʝ', 'x', 'ɣ', 'χ', 'ʁ', 'ħ', 'ʕ', 'h', 'ɦ', 'ɬ', 'ɮ',
    'ʋ', 'ɹ', 'ɻ', 'j', 'ɰ', 'l', 'ɭ', 'ʎ', 'ʟ', 'w', 'ʍ', 'ɥ', 'ɫ',
    'ɕ', 'ʑ', 'ɧ', 'ʘ', 'ǀ', 'ǃ', 'ǂ', 'ǁ', 'ɓ', 'ɗ', 'ʄ', 'ɠ', 'ʛ',
};

/// Affricates read as one phoneme even without a tie bar.
static AFFRICATES: phf::Set<&'static str> = phf_set! {
    "tʃ", "dʒ",
};

const TIE_BARS: [char; 2] = ['\u{0361}', '\u{035C}'];

/// Reads IPA strings such as `/kəˈθɑːtɪk/`.
///
/// Stress, length and syllable marks, brackets and slashes are ignored, as
/// are vowels and any symbol outside the consonant table. Two consonants
/// joined by a tie bar, or one of the affricates `tʃ` and `dʒ`, make a
/// single token. ASCII `g` is read as IPA `ɡ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpaConsonants;

impl IpaConsonants {
    pub fn new() -> Self {
        Self
    }

    fn canonical(ch: char) -> char {
        match ch {
            'g' => 'ɡ',
            other => other,
        }
    }
}

impl ConsonantAnalyzer for IpaConsonants {
    fn consonants(&self, pronunciation: &str) -> Skeleton {
        let symbols: Vec<char> = pronunciation.chars().map(Self::canonical).collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < symbols.len() {
            let ch = symbols[i];
            if !CONSONANTS.contains(&ch) {
                i += 1;
                continue;
            }
            // t͡s: consonant, tie bar, consonant
            if let (Some(tie), Some(&next)) = (symbols.get(i + 1), symbols.get(i + 2)) {
                if TIE_BARS.contains(tie) && CONSONANTS.contains(&next) {
                    tokens.push([ch, next].iter().collect::<String>());
                    i += 3;
                    continue;
                }
            }
            if let Some(&next) = symbols.get(i + 1) {
                let pair: String = [ch, next].iter().collect();
                if AFFRICATES.contains(pair.as_str()) {
                    tokens.push(pair);
                    i += 2;
                    continue;
                }
            }
            tokens.push(ch.to_string());
            i += 1;
        }
        Skeleton::from(tokens)
    }
}
