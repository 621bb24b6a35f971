//! Instrumentation configuration.
//!
//! [`Config`] is the user-facing, serializable form. [`Config::normalize`]
//! compiles it into a [`NormalizedConfig`] that is fixed for the lifetime of
//! one installation.
//!
//! ```yaml
//! include: "/^App/"
//! exclude: ["/[^a-zA-Z0-9]/", LegacyTable]
//! max_distance: 2
//! warn_undeclared: true
//! whitelist:
//!   - category: all
//!   - "/^x-/"
//! ```

use crate::pattern::{NamePattern, PatternList, PatternSet, PatternSpec};
use crate::result::{PropcheckError, PropcheckResult};
use crate::whitelist::{Whitelist, WhitelistCategory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One whitelist entry: a built-in category or an extra pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhitelistEntry {
    /// Every pattern of a built-in category
    Category {
        /// Category to pull in
        category: WhitelistCategory,
    },
    /// A single extra pattern
    Pattern(PatternSpec),
}

impl WhitelistEntry {
    /// Reference a built-in category
    #[must_use]
    pub const fn category(category: WhitelistCategory) -> Self {
        Self::Category { category }
    }

    /// Add a single pattern
    #[must_use]
    pub fn pattern(spec: impl Into<PatternSpec>) -> Self {
        Self::Pattern(spec.into())
    }
}

/// Instrumentation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Display names to instrument
    #[serde(default = "default_include")]
    pub include: PatternList,

    /// Display names to skip; wins over `include`
    #[serde(default = "default_exclude")]
    pub exclude: PatternList,

    /// Largest edit distance still reported as a likely typo
    #[serde(default = "default_max_distance", alias = "maxDistance")]
    pub max_distance: usize,

    /// Report props missing from a non-empty schema
    #[serde(default = "default_true", alias = "warnUndeclared")]
    pub warn_undeclared: bool,

    /// Props that are never reported as undeclared
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<WhitelistEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
            max_distance: default_max_distance(),
            warn_undeclared: true,
            whitelist: default_whitelist(),
        }
    }
}

fn default_include() -> PatternList {
    PatternList::One(PatternSpec::regex("."))
}

fn default_exclude() -> PatternList {
    PatternList::One(PatternSpec::regex("[^a-zA-Z0-9]"))
}

const fn default_max_distance() -> usize {
    2
}

const fn default_true() -> bool {
    true
}

fn default_whitelist() -> Vec<WhitelistEntry> {
    vec![WhitelistEntry::category(WhitelistCategory::All)]
}

impl Config {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set include patterns
    #[must_use]
    pub fn with_include(mut self, include: impl Into<PatternList>) -> Self {
        self.include = include.into();
        self
    }

    /// Set exclude patterns
    #[must_use]
    pub fn with_exclude(mut self, exclude: impl Into<PatternList>) -> Self {
        self.exclude = exclude.into();
        self
    }

    /// Set the maximum edit distance
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Enable or disable undeclared-prop warnings
    #[must_use]
    pub const fn with_warn_undeclared(mut self, warn: bool) -> Self {
        self.warn_undeclared = warn;
        self
    }

    /// Replace the whitelist
    #[must_use]
    pub fn with_whitelist(mut self, whitelist: Vec<WhitelistEntry>) -> Self {
        self.whitelist = whitelist;
        self
    }

    /// Append a whitelist entry
    #[must_use]
    pub fn allow(mut self, entry: WhitelistEntry) -> Self {
        self.whitelist.push(entry);
        self
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(text: &str) -> PropcheckResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Parse JSON configuration
    pub fn from_json_str(text: &str) -> PropcheckResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load configuration from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> PropcheckResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = fs::read_to_string(path)?;

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(PropcheckError::UnsupportedFormat { extension }),
        };
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Compile every pattern. Never fails: bad patterns match nothing.
    #[must_use]
    pub fn normalize(&self) -> NormalizedConfig {
        let mut whitelist = PatternSet::new();
        for entry in &self.whitelist {
            match entry {
                WhitelistEntry::Category { category } => {
                    whitelist.extend_from(Whitelist::builtin().category(*category));
                }
                WhitelistEntry::Pattern(spec) => whitelist.push(NamePattern::compile(spec)),
            }
        }

        NormalizedConfig {
            include: PatternSet::from_list(self.include.clone()),
            exclude: PatternSet::from_list(self.exclude.clone()),
            max_distance: self.max_distance,
            warn_undeclared: self.warn_undeclared,
            whitelist,
        }
    }
}

/// Compiled configuration for one installation
#[derive(Debug, Clone)]
pub struct NormalizedConfig {
    /// Display names to instrument
    pub include: PatternSet,
    /// Display names to skip
    pub exclude: PatternSet,
    /// Largest edit distance reported as a typo
    pub max_distance: usize,
    /// Report props missing from a non-empty schema
    pub warn_undeclared: bool,
    /// Props never reported as undeclared
    pub whitelist: PatternSet,
}

impl Default for NormalizedConfig {
    fn default() -> Self {
        Config::default().normalize()
    }
}
