//! cynghanedd-core
//!
//! Consonant skeleton index, segmentation search and incremental word choice
//! shared by the `cynghanedd` application and its dictionary tools.
//!
//! Given a target skeleton (a sequence of consonant phoneme tokens) and a
//! dictionary of words with their own skeletons, the core finds every way to
//! cut the target into runs that are each some word's skeleton, expands
//! those cuts into word sequences, and lets a caller pick the words one at a
//! time with undo.
//!
//! Public API:
//! - `Skeleton` - Ordered consonant tokens
//! - `SkeletonIndex` - Word ↔ skeleton maps plus a skeleton trie
//! - `segment` - All segmentations of a target skeleton
//! - `expand` - Lazy word sequences for a list of segmentations
//! - `ChoiceSession` - Choose words one at a time, with backtracking
//! - `Config` - Configuration shared by front ends
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod skeleton;
pub use skeleton::Skeleton;

pub mod trie;
pub use trie::SkeletonTrie;

pub mod index;
pub use index::SkeletonIndex;

pub mod search;
pub use search::{segment, Segmentation};

pub mod expand;
pub use expand::{expand, Expansions};

pub mod session;
pub use session::{ChoiceSession, SessionState};

/// Configuration for front ends driving the core.
///
/// Only language- and dictionary-agnostic options live here. Dictionary
/// sources and logging belong to the application's own config, which embeds
/// this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Input that undoes the last chosen word instead of choosing one.
    pub backtrack_token: String,

    /// Maximum number of word sequences printed when expanding segmentations.
    pub expansion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backtrack_token: ",".to_string(),
            expansion_limit: 50,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// True if `input` is the backtrack token (surrounding whitespace ignored).
    pub fn is_backtrack(&self, input: &str) -> bool {
        input.trim() == self.backtrack_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.backtrack_token, ",");
        assert_eq!(cfg.expansion_limit, 50);
        assert!(cfg.is_backtrack(" , "));
        assert!(!cfg.is_backtrack("cat"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("expansion_limit = 7\n").unwrap();
        assert_eq!(cfg.expansion_limit, 7);
        assert_eq!(cfg.backtrack_token, ",");
    }

    #[test]
    fn toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cynghanedd.toml");
        let cfg = Config {
            backtrack_token: "<".to_string(),
            expansion_limit: 3,
        };
        cfg.save_toml(&path).unwrap();
        assert_eq!(Config::load_toml(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_toml(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "expansion_limit = \"many\"").unwrap();
        assert!(matches!(Config::load_toml(&path), Err(Error::ConfigParse(_))));
    }
}
