//! Name patterns used by include/exclude filters and whitelists.
//!
//! A pattern is written either as a bare name, which must match the whole
//! string, or as `/source/`, a regular expression that may match anywhere.
//!
//! ```
//! use propcheck::{PatternSet, PatternSpec};
//!
//! let set = PatternSet::normalize(["PatchMe", "/^Include/"]);
//! assert!(set.matches("PatchMe"));
//! assert!(!set.matches("PatchMeToo"));
//! assert!(set.matches("IncludeFoo"));
//! assert_eq!(PatternSpec::parse("/^on[A-Z]/"), PatternSpec::regex("^on[A-Z]"));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source form of a name pattern, as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternSpec {
    /// Exact match on the whole name
    Literal(String),
    /// Regular expression, matched anywhere in the name
    Regex(String),
}

impl PatternSpec {
    /// Parse the textual form: `/source/` is a regex, anything else a literal
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(source) => Self::Regex(source.to_string()),
            _ => Self::Literal(text.to_string()),
        }
    }

    /// Create a literal pattern
    #[must_use]
    pub fn literal(name: impl Into<String>) -> Self {
        Self::Literal(name.into())
    }

    /// Create a regex pattern
    #[must_use]
    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex(source.into())
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => f.write_str(name),
            Self::Regex(source) => write!(f, "/{source}/"),
        }
    }
}

impl From<String> for PatternSpec {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&str> for PatternSpec {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<PatternSpec> for String {
    fn from(spec: PatternSpec) -> Self {
        spec.to_string()
    }
}

/// One pattern or a list of them.
///
/// Configuration files may write `include: "/^App/"` or
/// `include: ["/^App/", Header]`; both normalize to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    /// A single pattern
    One(PatternSpec),
    /// Several patterns
    Many(Vec<PatternSpec>),
}

impl PatternList {
    /// Flatten into list form
    #[must_use]
    pub fn into_vec(self) -> Vec<PatternSpec> {
        match self {
            Self::One(spec) => vec![spec],
            Self::Many(specs) => specs,
        }
    }
}

impl From<PatternSpec> for PatternList {
    fn from(spec: PatternSpec) -> Self {
        Self::One(spec)
    }
}

impl From<Vec<PatternSpec>> for PatternList {
    fn from(specs: Vec<PatternSpec>) -> Self {
        Self::Many(specs)
    }
}

impl From<&str> for PatternList {
    fn from(text: &str) -> Self {
        Self::One(PatternSpec::parse(text))
    }
}

/// Compiled pattern
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Whole-name equality
    Exact(String),
    /// Partial regex match
    Regex(Regex),
    /// A spec that failed to compile; matches nothing
    Never(String),
}

impl NamePattern {
    /// Compile a spec. Invalid regexes degrade to [`NamePattern::Never`].
    #[must_use]
    pub fn compile(spec: &PatternSpec) -> Self {
        match spec {
            PatternSpec::Literal(name) => Self::Exact(name.clone()),
            PatternSpec::Regex(source) => match Regex::new(source) {
                Ok(re) => Self::Regex(re),
                Err(err) => {
                    tracing::warn!(
                        pattern = %spec,
                        error = %err,
                        "invalid name pattern, it will never match"
                    );
                    Self::Never(source.clone())
                }
            },
        }
    }

    /// Test a name against this pattern
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::Regex(re) => re.is_match(name),
            Self::Never(_) => false,
        }
    }

    /// Whether this pattern failed to compile
    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never(_))
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => f.write_str(name),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::Never(source) => write!(f, "/{source}/ (invalid)"),
        }
    }
}

/// A set of compiled patterns with OR semantics
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<NamePattern>,
}

impl PatternSet {
    /// Empty set, which matches nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile any number of specs into a set
    pub fn normalize<I>(specs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PatternSpec>,
    {
        Self {
            patterns: specs
                .into_iter()
                .map(|spec| NamePattern::compile(&spec.into()))
                .collect(),
        }
    }

    /// Compile a [`PatternList`]
    #[must_use]
    pub fn from_list(list: PatternList) -> Self {
        Self::normalize(list.into_vec())
    }

    /// Whether `name` matches any pattern in the set
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// Add a compiled pattern
    pub fn push(&mut self, pattern: NamePattern) {
        self.patterns.push(pattern);
    }

    /// Append every pattern from another set
    pub fn extend_from(&mut self, other: &Self) {
        self.patterns.extend(other.patterns.iter().cloned());
    }

    /// Add a pattern, builder style
    #[must_use]
    pub fn with(mut self, spec: impl Into<PatternSpec>) -> Self {
        self.push(NamePattern::compile(&spec.into()));
        self
    }

    /// Iterate the compiled patterns
    pub fn iter(&self) -> impl Iterator<Item = &NamePattern> {
        self.patterns.iter()
    }

    /// Number of patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl FromIterator<NamePattern> for PatternSet {
    fn from_iter<T: IntoIterator<Item = NamePattern>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}
