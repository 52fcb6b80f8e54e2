//! Consonant skeletons.
//!
//! A skeleton is the ordered sequence of consonant phoneme tokens left over
//! from a pronunciation once its vowels are discarded. Tokens are opaque
//! strings compared by exact equality; the core never normalizes them.
//!
//! Some examples, using the tokens produced by the CMU converter:
//!
//! | word      | skeleton  |
//! |-----------|-----------|
//! | cat       | `k t`     |
//! | cathartic | `k T t k` |

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// An ordered sequence of consonant phoneme tokens.
///
/// The empty skeleton is legal: it belongs to words with no consonant sounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton(Vec<String>);

impl Skeleton {
    /// The zero-length skeleton.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Append `other`'s tokens after this skeleton's.
    pub fn concat(&self, other: &Skeleton) -> Skeleton {
        let mut tokens = Vec::with_capacity(self.0.len() + other.0.len());
        tokens.extend_from_slice(&self.0);
        tokens.extend_from_slice(&other.0);
        Skeleton(tokens)
    }

    /// Concatenate a run of skeletons in order.
    pub fn join<'a, I>(parts: I) -> Skeleton
    where
        I: IntoIterator<Item = &'a Skeleton>,
    {
        let mut tokens = Vec::new();
        for part in parts {
            tokens.extend_from_slice(&part.0);
        }
        Skeleton(tokens)
    }

    /// True if this skeleton begins with `prefix`, token for token.
    pub fn starts_with(&self, prefix: &Skeleton) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl Deref for Skeleton {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Skeleton {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<&[String]> for Skeleton {
    fn from(tokens: &[String]) -> Self {
        Self(tokens.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Skeleton {
    fn from(tokens: [&str; N]) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<String> for Skeleton {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses whitespace-separated tokens. Blank input yields the empty skeleton.
impl FromStr for Skeleton {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split_whitespace()))
    }
}

/// Space-joined tokens, the same form `FromStr` accepts.
impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let s: Skeleton = "k  T t\tk".parse().unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.to_string(), "k T t k");
        assert_eq!(s, Skeleton::from(["k", "T", "t", "k"]));
    }

    #[test]
    fn blank_input_is_empty_skeleton() {
        let s: Skeleton = "   ".parse().unwrap();
        assert!(s.is_empty());
        assert_eq!(s, Skeleton::empty());
        assert_eq!(s.to_string(), "");
    }

    #[test]
    fn tokens_are_compared_exactly() {
        // No case folding: "T" (theta) and "t" are different phonemes.
        assert_ne!(Skeleton::from(["T"]), Skeleton::from(["t"]));
    }

    #[test]
    fn concat_and_join() {
        let a = Skeleton::from(["h", "z"]);
        let b = Skeleton::from(["p", "r"]);
        assert_eq!(a.concat(&b), Skeleton::from(["h", "z", "p", "r"]));
        assert_eq!(Skeleton::join([&a, &Skeleton::empty(), &b]), a.concat(&b));
        assert!(a.concat(&b).starts_with(&a));
        assert!(!a.starts_with(&b));
    }

    #[test]
    fn serializes_as_token_list() {
        let s = Skeleton::from(["k", "t"]);
        let toml_value = toml::Value::try_from(&s).unwrap();
        assert_eq!(
            toml_value,
            toml::Value::Array(vec![
                toml::Value::String("k".into()),
                toml::Value::String("t".into())
            ])
        );
    }
}
