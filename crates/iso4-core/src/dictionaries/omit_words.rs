//! Words dropped from abbreviated titles.
//!
//! ISO 4 removes articles, conjunctions and prepositions from a title
//! ("Journal of Applied Science" becomes "J. Appl. Sci."). The set is built
//! once by the caller and handed to the
//! [`Abbreviator`](crate::abbreviator::Abbreviator); nothing here is global.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{StoreError, StoreResult};

/// Embedded default word list, one word per line.
static BUILTIN_DATA: &str = include_str!("../../data/omit-words.txt");

/// Immutable set of lowercase stopwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OmitWords {
    words: HashSet<String>,
}

impl OmitWords {
    /// An empty set: no word is omitted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The word list shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_lines(BUILTIN_DATA)
    }

    /// Parse a newline-delimited list. Entries are trimmed and lowercased;
    /// blank lines are ignored.
    pub fn from_lines(text: &str) -> Self {
        text.lines().collect()
    }

    /// Read a newline-delimited word list from disk.
    pub fn load(path: &Utf8Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let words = Self::from_lines(&text);
        tracing::debug!(path = %path, count = words.len(), "loaded omit words");
        Ok(words)
    }

    /// Read a word list, degrading to an empty set if it cannot be loaded.
    pub fn load_or_empty(path: &Utf8Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::error!(error = %err, "omit-word list unavailable; no words will be omitted");
            Self::empty()
        })
    }

    /// Whether `word` (compared lowercased) is omitted.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for OmitWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }
}
