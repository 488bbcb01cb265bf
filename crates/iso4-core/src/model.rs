//! LTWA rule types.
//!
//! An [`AbbreviationEntry`] is one row of the List of Title Word
//! Abbreviations. Hyphens on the key mark where the key may sit inside a
//! title word: `scienc-` matches at the start, `-shire` at the end, and
//! `-graph-` anywhere.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How an entry's key is matched against a title word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Whole-word match only.
    Exact,
    /// Matches anywhere inside the word (both prefix and suffix flags set).
    Combined,
    /// Matches at the start of the word.
    Prefix,
    /// Matches at the end of the word.
    Suffix,
}

impl PatternKind {
    /// Classify a pair of prefix/suffix flags.
    pub const fn from_flags(is_prefix: bool, is_suffix: bool) -> Self {
        match (is_prefix, is_suffix) {
            (false, false) => Self::Exact,
            (true, true) => Self::Combined,
            (true, false) => Self::Prefix,
            (false, true) => Self::Suffix,
        }
    }

    /// Returns the kind as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Combined => "combined",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One LTWA rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct AbbreviationEntry {
    /// Dictionary key, possibly carrying hyphen markers.
    pub word: String,
    /// Abbreviated form; `None` means the word is kept as written.
    pub abbreviation: Option<String>,
    /// Key matches at the start of a title word.
    pub is_prefix: bool,
    /// Key matches at the end of a title word.
    pub is_suffix: bool,
}

impl AbbreviationEntry {
    /// Build an entry, deriving the prefix/suffix flags from the key's hyphens.
    ///
    /// A trailing hyphen (`scienc-`) makes a prefix rule, a leading hyphen
    /// (`-shire`) a suffix rule.
    pub fn new(word: impl Into<String>, abbreviation: Option<String>) -> Self {
        let word = word.into();
        let (is_prefix, is_suffix) = hyphen_flags(&word);
        Self {
            word,
            abbreviation,
            is_prefix,
            is_suffix,
        }
    }

    /// Build an exact (whole-word) rule.
    pub fn exact(word: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            abbreviation: Some(abbreviation.into()),
            is_prefix: false,
            is_suffix: false,
        }
    }

    /// The match classification of this entry.
    pub const fn kind(&self) -> PatternKind {
        PatternKind::from_flags(self.is_prefix, self.is_suffix)
    }

    /// The key with its hyphen markers removed.
    pub fn stem(&self) -> &str {
        self.word.trim_matches('-')
    }
}

fn hyphen_flags(word: &str) -> (bool, bool) {
    (word.ends_with('-'), word.starts_with('-'))
}

/// Serialized form of [`AbbreviationEntry`]; flags may be omitted.
#[derive(Deserialize)]
struct RawEntry {
    word: String,
    #[serde(default)]
    abbreviation: Option<String>,
    is_prefix: Option<bool>,
    is_suffix: Option<bool>,
}

impl From<RawEntry> for AbbreviationEntry {
    fn from(raw: RawEntry) -> Self {
        let (prefix, suffix) = hyphen_flags(&raw.word);
        Self {
            is_prefix: raw.is_prefix.unwrap_or(prefix),
            is_suffix: raw.is_suffix.unwrap_or(suffix),
            word: raw.word,
            abbreviation: raw.abbreviation,
        }
    }
}
