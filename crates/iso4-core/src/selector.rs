//! Picks the one LTWA rule that applies to a title word.
//!
//! A word can match several rules at once: "Sciences" may hit both an exact
//! `sciences` rule and a `scienc-` prefix rule. Candidates are bucketed by
//! [`PatternKind`]; the longest key wins inside a bucket and buckets are
//! ranked exact > combined > prefix > suffix.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::model::{AbbreviationEntry, PatternKind};
use crate::store::AbbreviationStore;

/// The rule chosen for a word, as reported by [`lookup`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleReport {
    /// Dictionary key, with hyphen markers.
    pub word: String,
    /// Abbreviated form, if the rule abbreviates at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    /// How the key matched.
    pub kind: PatternKind,
}

impl From<AbbreviationEntry> for RuleReport {
    fn from(entry: AbbreviationEntry) -> Self {
        Self {
            kind: entry.kind(),
            word: entry.word,
            abbreviation: entry.abbreviation,
        }
    }
}

/// Result of looking up a single word.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LookupReport {
    /// The word that was looked up.
    pub word: String,
    /// How many rules matched before selection.
    pub candidates: usize,
    /// The winning rule, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleReport>,
}

/// Return the highest-priority rule for `word`, or `None` if no rule matches.
#[tracing::instrument(skip(store), level = "trace")]
pub fn select_entry<S: AbbreviationStore + ?Sized>(
    store: &S,
    word: &str,
) -> StoreResult<Option<AbbreviationEntry>> {
    let candidates = store.find_by_word(word)?;
    Ok(pick_best(candidates))
}

/// Look up `word` and report both the candidate count and the winner.
#[tracing::instrument(skip(store))]
pub fn lookup<S: AbbreviationStore + ?Sized>(store: &S, word: &str) -> StoreResult<LookupReport> {
    let candidates = store.find_by_word(word)?;
    let count = candidates.len();
    let rule = pick_best(candidates).map(RuleReport::from);
    tracing::debug!(candidates = count, found = rule.is_some(), "lookup complete");

    Ok(LookupReport {
        word: word.to_string(),
        candidates: count,
        rule,
    })
}

/// Choose among already-fetched candidates.
pub fn pick_best(candidates: Vec<AbbreviationEntry>) -> Option<AbbreviationEntry> {
    let mut winners: [Option<AbbreviationEntry>; 4] = Default::default();

    for candidate in candidates {
        let slot = &mut winners[bucket(candidate.kind())];
        let len = candidate.word.chars().count();
        let longer = slot
            .as_ref()
            .is_none_or(|current| len > current.word.chars().count());
        if longer {
            *slot = Some(candidate);
        }
    }

    winners.into_iter().flatten().next()
}

/// Bucket ranking, best first.
const fn bucket(kind: PatternKind) -> usize {
    match kind {
        PatternKind::Exact => 0,
        PatternKind::Combined => 1,
        PatternKind::Prefix => 2,
        PatternKind::Suffix => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::LtwaDictionary;

    fn entry(word: &str, abbreviation: &str) -> AbbreviationEntry {
        AbbreviationEntry::new(word, Some(abbreviation.to_string()))
    }

    #[test]
    fn exact_beats_everything() {
        let dict: LtwaDictionary = [
            entry("-ences", "-enc."),
            entry("scienc-", "sci."),
            entry("sciences", "sciences."),
            entry("-ienc-", "ienc."),
        ]
        .into_iter()
        .collect();

        let best = select_entry(&dict, "Sciences").unwrap().unwrap();
        assert_eq!(best.word, "sciences");
    }

    #[test]
    fn combined_beats_prefix_and_suffix() {
        let dict: LtwaDictionary = [
            entry("bio-", "biol."),
            entry("-graph-", "gr."),
            entry("-ical", "-ic."),
        ]
        .into_iter()
        .collect();

        let best = select_entry(&dict, "biographical").unwrap().unwrap();
        assert_eq!(best.kind(), PatternKind::Combined);
    }

    #[test]
    fn prefix_beats_suffix() {
        let dict: LtwaDictionary = [entry("-shire", "-sh."), entry("dorset-", "dors.")]
            .into_iter()
            .collect();

        let best = select_entry(&dict, "Dorsetshire").unwrap().unwrap();
        assert_eq!(best.word, "dorset-");
    }

    #[test]
    fn longest_key_wins_within_bucket() {
        let dict: LtwaDictionary = [
            entry("sci-", "s."),
            entry("scienc-", "sci."),
            entry("scien-", "sc."),
        ]
        .into_iter()
        .collect();

        let best = select_entry(&dict, "science").unwrap().unwrap();
        assert_eq!(best.word, "scienc-");
    }

    #[test]
    fn first_seen_wins_ties() {
        let best = pick_best(vec![entry("ab-", "x."), entry("ac-", "y.")]).unwrap();
        assert_eq!(best.word, "ab-");
    }

    #[test]
    fn lookup_reports_candidates_and_winner() {
        let dict: LtwaDictionary = [entry("-shire", "-sh."), entry("dorset-", "dors.")]
            .into_iter()
            .collect();

        let report = lookup(&dict, "Dorsetshire").unwrap();
        assert_eq!(report.candidates, 2);
        let rule = report.rule.unwrap();
        assert_eq!(rule.kind, PatternKind::Prefix);
        assert_eq!(rule.abbreviation.as_deref(), Some("dors."));
    }

    #[test]
    fn lookup_serializes_without_rule() {
        let report = lookup(&LtwaDictionary::new(), "zebra").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["candidates"], 0);
        assert!(json.get("rule").is_none());
    }

    #[test]
    fn no_candidates_yields_none() {
        let dict = LtwaDictionary::new();
        assert!(select_entry(&dict, "anything").unwrap().is_none());
    }
}
