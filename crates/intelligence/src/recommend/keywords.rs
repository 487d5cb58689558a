//! Tag and title keyword overlap.

use std::collections::HashSet;

/// Title words must be strictly longer than this many characters to count.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Title words of `title` that overlap any word of `reference`.
///
/// Both sides are lower-cased and split on whitespace. A title word matches
/// when it contains a reference word or is contained by one. Words of
/// [`MIN_KEYWORD_CHARS`] characters or fewer are ignored. Each title word is
/// reported once per occurrence in the title.
pub fn title_keyword_matches(title: &str, reference: &str) -> Vec<String> {
    let reference = reference.to_lowercase();
    let reference_words: Vec<&str> = reference.split_whitespace().collect();
    if reference_words.is_empty() {
        return Vec::new();
    }

    title
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS)
        .filter(|word| {
            reference_words
                .iter()
                .any(|r| word.contains(r) || r.contains(word))
        })
        .map(str::to_string)
        .collect()
}

/// Distinct tags of `current` that also appear in `candidate`.
///
/// Comparison trims whitespace and ignores case; blank tags never match.
/// Returned tags keep the spelling used on `current`, in its order.
pub fn shared_tags(current: &[String], candidate: &[String]) -> Vec<String> {
    let candidate: HashSet<String> = candidate
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut seen = HashSet::new();
    current
        .iter()
        .filter(|tag| {
            let key = tag.trim().to_lowercase();
            !key.is_empty() && candidate.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}
