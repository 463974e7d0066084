// File: src/core/segmenter.rs
use crate::core::script::{is_consonant, is_trailing_mark, NUKTA, VIRAMA};

/// Splits a word into syllable-like clusters: a base code point, any
/// virama-joined consonants, then trailing vowel signs and marks.
///
/// The clusters are slices of `word` and concatenate back to it exactly.
/// A virama with no consonant after it stays on the current cluster as a
/// trailing mark.
/// Complexity: O(n) in the number of code points.
pub fn segment(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut clusters = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = chars[i].0;
        i += 1;
        i = skip_nukta(&chars, i);

        // Conjunct chain: virama + consonant, repeated.
        while i + 1 < chars.len() && chars[i].1 == VIRAMA && is_consonant(chars[i + 1].1) {
            i = skip_nukta(&chars, i + 2);
        }

        while i < chars.len() && is_trailing_mark(chars[i].1) {
            i += 1;
        }

        let end = chars.get(i).map_or(word.len(), |&(offset, _)| offset);
        clusters.push(&word[start..end]);
    }
    clusters
}

fn skip_nukta(chars: &[(usize, char)], mut i: usize) -> usize {
    while i < chars.len() && chars[i].1 == NUKTA {
        i += 1;
    }
    i
}
