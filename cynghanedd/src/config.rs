//! Application configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `cynghanedd_core::Config` (flattened via serde)
//! - The dictionary files to load, each with its line format
//! - The default log filter used when `RUST_LOG` is unset
//!
//! # Example
//!
//! ```toml
//! backtrack_token = ","
//! log_filter = "info"
//!
//! [[dictionaries]]
//! path = "data/en_UK.txt"
//! format = "ipa"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionarySource;

/// Contents of `cynghanedd.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base configuration fields (backtrack token, expansion limit)
    #[serde(flatten)]
    pub base: cynghanedd_core::Config,

    pub dictionaries: Vec<DictionarySource>,

    /// `tracing-subscriber` filter directive, e.g. `"info"` or `"cynghanedd_core=debug"`
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base: cynghanedd_core::Config::default(),
            dictionaries: Vec::new(),
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &cynghanedd_core::Config {
        &self.base
    }
}
