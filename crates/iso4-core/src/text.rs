//! Small string helpers shared by the abbreviator and normalizer.

/// Split a title on single spaces.
///
/// Runs of spaces produce empty tokens; callers decide what an empty token
/// means.
pub fn split_tokens(text: &str) -> std::str::Split<'_, char> {
    text.split(' ')
}

/// Whether the first character of `word` is uppercase.
pub fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Uppercase the first character of `word`, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append a period unless `word` already ends with one.
pub fn ensure_period(mut word: String) -> String {
    if !word.ends_with('.') {
        word.push('.');
    }
    word
}

/// Drop the last `n` characters of `word`.
pub fn drop_last_chars(word: &str, n: usize) -> &str {
    let keep = word.chars().count().saturating_sub(n);
    let end = word
        .char_indices()
        .nth(keep)
        .map_or(word.len(), |(idx, _)| idx);
    &word[..end]
}

/// Byte offsets of every character boundary in `s`, including `s.len()`.
pub(crate) fn char_boundaries(s: &str) -> impl Iterator<Item = usize> + '_ {
    s.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(s.len()))
}
