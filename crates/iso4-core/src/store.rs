//! The lookup-store seam.
//!
//! The abbreviator never owns its dictionary: it queries an
//! [`AbbreviationStore`], which may be the in-memory
//! [`LtwaDictionary`](crate::dictionaries::LtwaDictionary) or any backend the
//! host application provides (a database table, a remote service, ...).

use std::sync::Arc;

use crate::error::StoreResult;
use crate::model::AbbreviationEntry;

/// Read-only access to LTWA rules.
pub trait AbbreviationStore: Send + Sync {
    /// All entries whose key is compatible with `word`, compared
    /// case-insensitively.
    ///
    /// Exact keys must equal the word; prefix stems must start it, suffix
    /// stems must end it, and combined stems must occur somewhere in it.
    fn find_by_word(&self, word: &str) -> StoreResult<Vec<AbbreviationEntry>>;

    /// Whether `abbreviation` (compared lowercased) is a known abbreviation.
    fn exists_by_abbreviation(&self, abbreviation: &str) -> StoreResult<bool>;
}

impl<T: AbbreviationStore + ?Sized> AbbreviationStore for &T {
    fn find_by_word(&self, word: &str) -> StoreResult<Vec<AbbreviationEntry>> {
        (**self).find_by_word(word)
    }

    fn exists_by_abbreviation(&self, abbreviation: &str) -> StoreResult<bool> {
        (**self).exists_by_abbreviation(abbreviation)
    }
}

impl<T: AbbreviationStore + ?Sized> AbbreviationStore for Box<T> {
    fn find_by_word(&self, word: &str) -> StoreResult<Vec<AbbreviationEntry>> {
        (**self).find_by_word(word)
    }

    fn exists_by_abbreviation(&self, abbreviation: &str) -> StoreResult<bool> {
        (**self).exists_by_abbreviation(abbreviation)
    }
}

impl<T: AbbreviationStore + ?Sized> AbbreviationStore for Arc<T> {
    fn find_by_word(&self, word: &str) -> StoreResult<Vec<AbbreviationEntry>> {
        (**self).find_by_word(word)
    }

    fn exists_by_abbreviation(&self, abbreviation: &str) -> StoreResult<bool> {
        (**self).exists_by_abbreviation(abbreviation)
    }
}
