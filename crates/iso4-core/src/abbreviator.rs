//! ISO 4 title abbreviation.
//!
//! A title is split on single spaces and each word is handled in order:
//!
//! 1. Words in the [`OmitWords`] set disappear.
//! 2. Otherwise the [selected](crate::selector::select_entry) LTWA rule is
//!    applied:
//!    - no rule, or a rule without an abbreviation: the word is kept;
//!    - exact: the abbreviation replaces the word;
//!    - prefix: the abbreviation replaces the word, the rest of the word is
//!      dropped;
//!    - suffix: the part before the suffix is abbreviated on its own and the
//!      suffix abbreviation is appended directly after it;
//!    - combined: see [`CombinedRulePolicy`].
//!
//! Replacements copy the word's leading capital and always end with a
//! period. The surviving words are joined with single spaces.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionaries::OmitWords;
use crate::error::{AbbreviateError, AbbreviateResult, StoreResult};
use crate::model::PatternKind;
use crate::normalizer;
use crate::selector;
use crate::store::AbbreviationStore;
use crate::text::{
    capitalize_first, drop_last_chars, ensure_period, split_tokens, starts_uppercase,
};

/// What to do when a word's best rule is a combined prefix+suffix rule.
///
/// The LTWA does not define how the remainder around a combined stem is
/// abbreviated, so no output is guessed for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CombinedRulePolicy {
    /// Fail with [`AbbreviateError::UnsupportedCombinedRule`].
    #[default]
    Reject,
    /// Keep the word as written and mark it unsupported in the report.
    Verbatim,
}

impl CombinedRulePolicy {
    /// Returns the policy as a kebab-case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Verbatim => "verbatim",
        }
    }
}

impl std::fmt::Display for CombinedRulePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single title word was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Dropped as an omit word.
    Omitted,
    /// No rule matched; kept as written.
    Verbatim,
    /// A rule matched but says not to abbreviate.
    Unabbreviated,
    /// Replaced by an exact rule.
    Exact,
    /// Replaced by a prefix rule.
    Prefix,
    /// Root abbreviated and suffix rule appended.
    Suffix,
    /// Combined rule matched; kept as written.
    Unsupported,
}

/// Per-word detail of a [`TitleReport`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TokenReport {
    /// The word as it appeared in the title.
    pub token: String,
    /// What happened to it.
    pub outcome: Outcome,
    /// Key of the rule that was applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Text emitted for this word; absent for omitted words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Result of abbreviating a title.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TitleReport {
    /// The title as given.
    pub title: String,
    /// The abbreviated title.
    pub abbreviation: String,
    /// One entry per non-empty word, in title order.
    pub tokens: Vec<TokenReport>,
}

/// A single abbreviated word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAbbreviation {
    /// Text to emit.
    pub text: String,
    /// How the word was handled.
    pub outcome: Outcome,
    /// Key of the applied rule.
    pub rule: Option<String>,
}

impl WordAbbreviation {
    fn kept(word: &str, outcome: Outcome, rule: Option<String>) -> Self {
        Self {
            text: word.to_string(),
            outcome,
            rule,
        }
    }
}

/// Abbreviates titles against an [`AbbreviationStore`].
///
/// Holds no mutable state; share it freely across threads when the store
/// allows.
#[derive(Debug, Clone)]
pub struct Abbreviator<S> {
    store: S,
    omit_words: OmitWords,
    combined_rule: CombinedRulePolicy,
}

impl<S: AbbreviationStore> Abbreviator<S> {
    /// Create an abbreviator over `store`, dropping the words in `omit_words`.
    pub fn new(store: S, omit_words: OmitWords) -> Self {
        Self {
            store,
            omit_words,
            combined_rule: CombinedRulePolicy::default(),
        }
    }

    /// Set the combined-rule policy.
    pub const fn with_combined_rule(mut self, policy: CombinedRulePolicy) -> Self {
        self.combined_rule = policy;
        self
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The omit-word set in use.
    pub const fn omit_words(&self) -> &OmitWords {
        &self.omit_words
    }

    /// The combined-rule policy in use.
    pub const fn combined_rule(&self) -> CombinedRulePolicy {
        self.combined_rule
    }

    /// Abbreviate a title.
    pub fn abbreviate(&self, title: &str) -> AbbreviateResult<String> {
        Ok(self.abbreviate_detailed(title)?.abbreviation)
    }

    /// Abbreviate a title, reporting what happened to every word.
    #[tracing::instrument(skip(self), fields(title_len = title.len()))]
    pub fn abbreviate_detailed(&self, title: &str) -> AbbreviateResult<TitleReport> {
        let mut parts: Vec<String> = Vec::new();
        let mut tokens = Vec::new();

        for token in split_tokens(title) {
            if token.is_empty() {
                continue;
            }

            if self.omit_words.contains(token) {
                tokens.push(TokenReport {
                    token: token.to_string(),
                    outcome: Outcome::Omitted,
                    rule: None,
                    output: None,
                });
                continue;
            }

            let word = self.abbreviate_word(token)?;
            parts.push(word.text.clone());
            tokens.push(TokenReport {
                token: token.to_string(),
                outcome: word.outcome,
                rule: word.rule,
                output: Some(word.text),
            });
        }

        let abbreviation = parts.join(" ");
        tracing::debug!(%abbreviation, words = tokens.len(), "title abbreviated");

        Ok(TitleReport {
            title: title.to_string(),
            abbreviation,
            tokens,
        })
    }

    /// Abbreviate one word, ignoring the omit-word set.
    pub fn abbreviate_word(&self, word: &str) -> AbbreviateResult<WordAbbreviation> {
        let Some(entry) = selector::select_entry(&self.store, word)? else {
            return Ok(WordAbbreviation::kept(word, Outcome::Verbatim, None));
        };
        let rule = Some(entry.word.clone());

        let Some(ref abbreviation) = entry.abbreviation else {
            return Ok(WordAbbreviation::kept(word, Outcome::Unabbreviated, rule));
        };

        match entry.kind() {
            PatternKind::Exact => Ok(WordAbbreviation {
                text: ensure_period(match_case(word, abbreviation)),
                outcome: Outcome::Exact,
                rule,
            }),
            PatternKind::Prefix => {
                let stripped = abbreviation.trim_start_matches('-');
                Ok(WordAbbreviation {
                    text: ensure_period(match_case(word, stripped)),
                    outcome: Outcome::Prefix,
                    rule,
                })
            }
            PatternKind::Suffix => {
                let root = drop_last_chars(word, entry.stem().chars().count());
                if root.len() >= word.len() {
                    return Ok(WordAbbreviation::kept(word, Outcome::Verbatim, None));
                }
                let mut text = if root.is_empty() {
                    String::new()
                } else {
                    self.abbreviate_word(root)?.text
                };
                text.push_str(&ensure_period(abbreviation.trim_matches('-').to_string()));
                Ok(WordAbbreviation {
                    text,
                    outcome: Outcome::Suffix,
                    rule,
                })
            }
            PatternKind::Combined => match self.combined_rule {
                CombinedRulePolicy::Reject => Err(AbbreviateError::UnsupportedCombinedRule {
                    word: word.to_string(),
                    pattern: entry.word,
                }),
                CombinedRulePolicy::Verbatim => {
                    tracing::warn!(
                        word,
                        pattern = %entry.word,
                        "combined rule unsupported; keeping word"
                    );
                    Ok(WordAbbreviation::kept(word, Outcome::Unsupported, rule))
                }
            },
        }
    }

    /// Normalize an abbreviated title against this abbreviator's store.
    pub fn normalize(&self, text: &str) -> StoreResult<String> {
        normalizer::normalize_abbreviation(&self.store, text)
    }
}

/// Give `abbreviation` the leading capital of `original`.
fn match_case(original: &str, abbreviation: &str) -> String {
    if starts_uppercase(original) {
        capitalize_first(abbreviation)
    } else {
        abbreviation.to_string()
    }
}
