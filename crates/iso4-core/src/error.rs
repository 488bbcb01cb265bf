//! Error types for iso4-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by an abbreviation lookup store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A dictionary or word-list file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line of a tab-separated dictionary is malformed.
    #[error("malformed dictionary line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A JSON dictionary could not be decoded.
    #[error("invalid JSON dictionary: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store failed (connectivity, query errors, ...).
    #[error("lookup store failure: {0}")]
    Backend(String),
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while abbreviating a title.
#[derive(Error, Debug)]
pub enum AbbreviateError {
    /// The lookup store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A combined prefix+suffix rule matched and the policy rejects it.
    #[error("combined prefix/suffix rule {pattern:?} matched {word:?}; no abbreviation is defined for combined rules")]
    UnsupportedCombinedRule {
        /// The title word that matched.
        word: String,
        /// The dictionary key of the matching entry.
        pattern: String,
    },
}

/// Result type alias using [`AbbreviateError`].
pub type AbbreviateResult<T> = Result<T, AbbreviateError>;
