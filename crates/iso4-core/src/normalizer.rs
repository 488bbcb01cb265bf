//! Display normalization of abbreviated titles.
//!
//! Takes a title that is already abbreviated (possibly by hand or by another
//! system) and gives every recognized abbreviation a leading capital and a
//! trailing period. Unrecognized words are left alone.

use crate::error::StoreResult;
use crate::store::AbbreviationStore;
use crate::text::{capitalize_first, ensure_period, split_tokens};

/// Normalize the capitalization and punctuation of an abbreviated title.
///
/// Tokens are split and rejoined on single spaces, so runs of spaces
/// survive unchanged.
#[tracing::instrument(skip(store), fields(text_len = text.len()))]
pub fn normalize_abbreviation<S: AbbreviationStore + ?Sized>(
    store: &S,
    text: &str,
) -> StoreResult<String> {
    let mut out = Vec::new();

    for token in split_tokens(text) {
        let key = ensure_period(token.to_lowercase());
        if store.exists_by_abbreviation(&key)? {
            out.push(ensure_period(capitalize_first(token)));
        } else {
            out.push(token.to_string());
        }
    }

    Ok(out.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::LtwaDictionary;
    use crate::error::StoreError;
    use crate::model::AbbreviationEntry;

    fn dict() -> LtwaDictionary {
        [
            AbbreviationEntry::exact("journal", "j."),
            AbbreviationEntry::new("scienc-", Some("sci.".to_string())),
            AbbreviationEntry::exact("applied", "appl"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn capitalizes_and_punctuates_known_abbreviations() {
        let out = normalize_abbreviation(&dict(), "j appl sci.").unwrap();
        assert_eq!(out, "J. Appl. Sci.");
    }

    #[test]
    fn unknown_tokens_are_verbatim() {
        let out = normalize_abbreviation(&dict(), "j. of biology").unwrap();
        assert_eq!(out, "J. of biology");
    }

    #[test]
    fn already_normalized_input_is_unchanged() {
        let input = "J. Appl. Sci.";
        assert_eq!(normalize_abbreviation(&dict(), input).unwrap(), input);
    }

    #[test]
    fn normalization_is_idempotent() {
        let d = dict();
        for input in ["j appl sci", "J. of  Appl", "sci. j. x", "", "  "] {
            let once = normalize_abbreviation(&d, input).unwrap();
            let twice = normalize_abbreviation(&d, &once).unwrap();
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn multiple_spaces_survive() {
        let out = normalize_abbreviation(&dict(), "j  sci").unwrap();
        assert_eq!(out, "J.  Sci.");
    }

    struct Unreachable;

    impl AbbreviationStore for Unreachable {
        fn find_by_word(&self, _word: &str) -> StoreResult<Vec<AbbreviationEntry>> {
            Ok(Vec::new())
        }

        fn exists_by_abbreviation(&self, _abbreviation: &str) -> StoreResult<bool> {
            Err(StoreError::Backend("timeout".to_string()))
        }
    }

    #[test]
    fn store_failure_propagates() {
        assert!(normalize_abbreviation(&Unreachable, "j").is_err());
    }
}
