//! In-memory LTWA dictionary.
//!
//! Entries are indexed by lowercase stem in one map per [`PatternKind`], so a
//! lookup only probes the prefixes, suffixes and substrings of the queried
//! word instead of scanning every rule.
//!
//! # File formats
//!
//! - Tab separated (`.tsv`, `.txt`, `.csv`), the layout of the ISSN LTWA
//!   export: `WORD<TAB>ABBREVIATION[<TAB>LANGUAGES]`. `n.a.` or an empty
//!   abbreviation means "do not abbreviate". A `WORD...` header row, blank
//!   lines and `#` comments are skipped.
//! - JSON (`.json`): an array of [`AbbreviationEntry`] objects.

use std::collections::{HashMap, HashSet};

use camino::Utf8Path;

use crate::error::{StoreError, StoreResult};
use crate::model::{AbbreviationEntry, PatternKind};
use crate::store::AbbreviationStore;
use crate::text::{char_boundaries, ensure_period};

/// Marker used by the LTWA for words that have no abbreviation.
const NOT_ABBREVIATED: &[&str] = &["n.a.", "n. a.", "n.a"];

/// An [`AbbreviationStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct LtwaDictionary {
    entries: Vec<AbbreviationEntry>,
    exact: HashMap<String, Vec<usize>>,
    prefix: HashMap<String, Vec<usize>>,
    suffix: HashMap<String, Vec<usize>>,
    combined: HashMap<String, Vec<usize>>,
    /// Lowercase, period-terminated abbreviations.
    abbreviations: HashSet<String>,
    /// Longest combined stem in bytes; bounds substring probing.
    longest_combined: usize,
}

impl LtwaDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule.
    ///
    /// Rules whose key is nothing but hyphens can never match and are
    /// dropped.
    pub fn insert(&mut self, entry: AbbreviationEntry) {
        let stem = entry.stem().to_lowercase();
        if stem.is_empty() {
            tracing::debug!(word = %entry.word, "skipping LTWA entry with empty stem");
            return;
        }

        if let Some(ref abbreviation) = entry.abbreviation {
            let key = abbreviation.trim_matches('-').to_lowercase();
            if !key.is_empty() {
                self.abbreviations.insert(ensure_period(key));
            }
        }

        let idx = self.entries.len();
        let index = match entry.kind() {
            PatternKind::Exact => &mut self.exact,
            PatternKind::Prefix => &mut self.prefix,
            PatternKind::Suffix => &mut self.suffix,
            PatternKind::Combined => {
                self.longest_combined = self.longest_combined.max(stem.len());
                &mut self.combined
            }
        };
        index.entry(stem).or_default().push(idx);
        self.entries.push(entry);
    }

    /// Number of rules held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rules in insertion order.
    pub fn entries(&self) -> &[AbbreviationEntry] {
        &self.entries
    }

    /// Parse the tab-separated LTWA layout.
    pub fn from_tsv_str(s: &str) -> StoreResult<Self> {
        let mut dict = Self::new();

        for (idx, raw) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or("").trim();
            let Some(abbreviation) = fields.next().map(str::trim) else {
                return Err(StoreError::Parse {
                    line: line_no,
                    message: "expected WORD<TAB>ABBREVIATION".to_string(),
                });
            };

            let is_header =
                word.eq_ignore_ascii_case("word") || word.eq_ignore_ascii_case("words");
            if dict.is_empty() && is_header {
                continue;
            }
            if word.is_empty() {
                return Err(StoreError::Parse {
                    line: line_no,
                    message: "empty word".to_string(),
                });
            }

            let abbreviation = if abbreviation.is_empty()
                || NOT_ABBREVIATED
                    .iter()
                    .any(|m| abbreviation.eq_ignore_ascii_case(m))
            {
                None
            } else {
                Some(abbreviation.to_string())
            };

            dict.insert(AbbreviationEntry::new(word, abbreviation));
        }

        tracing::debug!(entries = dict.len(), "parsed LTWA dictionary");
        Ok(dict)
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(s: &str) -> StoreResult<Self> {
        let entries: Vec<AbbreviationEntry> = serde_json::from_str(s)?;
        Ok(entries.into_iter().collect())
    }

    /// Load a dictionary file, choosing the format from its extension.
    #[tracing::instrument]
    pub fn from_path(path: &Utf8Path) -> StoreResult<Self> {
        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let dict = match path.extension() {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_tsv_str(&content)?,
        };
        tracing::info!(entries = dict.len(), "loaded LTWA dictionary");
        Ok(dict)
    }
}

fn probe(hits: &mut Vec<usize>, index: &HashMap<String, Vec<usize>>, key: &str) {
    if let Some(found) = index.get(key) {
        hits.extend_from_slice(found);
    }
}

impl FromIterator<AbbreviationEntry> for LtwaDictionary {
    fn from_iter<I: IntoIterator<Item = AbbreviationEntry>>(iter: I) -> Self {
        let mut dict = Self::new();
        for entry in iter {
            dict.insert(entry);
        }
        dict
    }
}

impl AbbreviationStore for LtwaDictionary {
    fn find_by_word(&self, word: &str) -> StoreResult<Vec<AbbreviationEntry>> {
        let lower = word.to_lowercase();
        if lower.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = Vec::new();
        probe(&mut hits, &self.exact, &lower);

        for end in char_boundaries(&lower).skip(1) {
            probe(&mut hits, &self.prefix, &lower[..end]);
        }

        for start in char_boundaries(&lower) {
            if start < lower.len() {
                probe(&mut hits, &self.suffix, &lower[start..]);
            }
        }

        if self.longest_combined > 0 {
            for start in char_boundaries(&lower) {
                for end in char_boundaries(&lower) {
                    if end <= start {
                        continue;
                    }
                    if end - start > self.longest_combined {
                        break;
                    }
                    probe(&mut hits, &self.combined, &lower[start..end]);
                }
            }
        }

        Ok(hits.into_iter().map(|i| self.entries[i].clone()).collect())
    }

    fn exists_by_abbreviation(&self, abbreviation: &str) -> StoreResult<bool> {
        let key = ensure_period(abbreviation.trim().to_lowercase());
        Ok(self.abbreviations.contains(&key))
    }
}
