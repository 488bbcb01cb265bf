//! Dictionaries for title abbreviation.
//!
//! Provides the in-memory LTWA rule store and the omit-word set.

pub mod ltwa;
pub mod omit_words;

pub use ltwa::LtwaDictionary;
pub use omit_words::OmitWords;
