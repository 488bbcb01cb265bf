//! Core library for iso4.
//!
//! Abbreviates scholarly journal titles following ISO 4, driven by the List
//! of Title Word Abbreviations (LTWA), and normalizes titles that are
//! already abbreviated.
//!
//! # Modules
//!
//! - [`abbreviator`] - Title abbreviation
//! - [`normalizer`] - Display normalization of abbreviated titles
//! - [`selector`] - Rule selection among matching LTWA entries
//! - [`dictionaries`] - In-memory LTWA dictionary and omit-word list
//! - [`store`] - The lookup seam the engine reads rules through
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use iso4_core::{Abbreviator, LtwaDictionary, OmitWords};
//!
//! let dictionary = LtwaDictionary::from_path(camino::Utf8Path::new("ltwa.tsv"))
//!     .expect("failed to load dictionary");
//! let abbreviator = Abbreviator::new(dictionary, OmitWords::builtin());
//!
//! let short = abbreviator
//!     .abbreviate("Journal of Applied Science")
//!     .expect("lookup failed");
//! println!("{short}");
//! ```
#![deny(unsafe_code)]

pub mod abbreviator;
pub mod config;
pub mod dictionaries;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod selector;
pub mod store;
pub mod text;

pub use abbreviator::{Abbreviator, CombinedRulePolicy, Outcome, TitleReport, TokenReport};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionaries::{LtwaDictionary, OmitWords};
pub use error::{
    AbbreviateError, AbbreviateResult, ConfigError, ConfigResult, StoreError, StoreResult,
};
pub use model::{AbbreviationEntry, PatternKind};
pub use normalizer::normalize_abbreviation;
pub use selector::{LookupReport, RuleReport, lookup, select_entry};
pub use store::AbbreviationStore;

/// Default cap on input files read by the CLI (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
