// File: src/core/grouper.rs
use crate::core::cache::PhoneticCache;
use crate::core::script::is_consonant;
use crate::core::types::{MatchCandidate, PhoneticForm, RhymeGroup};
use std::collections::HashMap;

/// Locates where a `depth`-token suffix starts: the index of the boundary
/// cluster and how many of that cluster's leading tokens fall outside the
/// suffix. Walks the per-cluster counts from the end.
pub fn suffix_boundary(cluster_token_counts: &[usize], depth: usize) -> Option<(usize, usize)> {
    if depth == 0 {
        return None;
    }
    let mut covered = 0;
    for (i, &count) in cluster_token_counts.iter().enumerate().rev() {
        covered += count;
        if covered >= depth {
            return Some((i, covered - depth));
        }
    }
    None
}

/// The written text that spells the last `depth` phonemes.
///
/// Clusters after the boundary are taken whole. The boundary cluster is cut
/// only between its consonants and its vowel sign or marks, so "नाम" at
/// depth 2 ends in "ाम". A suffix that reaches into a conjunct keeps the
/// whole conjunct.
pub fn ending_text(form: &PhoneticForm, depth: usize) -> Option<String> {
    let (cluster, skip) = suffix_boundary(&form.cluster_token_counts, depth)?;
    let tail = form.clusters[cluster + 1..].concat();
    let head = &form.clusters[cluster];

    let first_token: usize = form.cluster_token_counts[..cluster].iter().sum::<usize>() + skip;
    let offset = form.token_offsets[first_token];
    let cuts_conjunct = head[offset..].chars().next().is_some_and(is_consonant);
    if skip == 0 || cuts_conjunct {
        return Some(format!("{}{}", head, tail));
    }
    let ending = format!("{}{}", &head[offset..], tail);
    if ending.is_empty() {
        return Some(head.clone());
    }
    Some(ending)
}

/// Buckets ranked candidates by written ending, keeping rank order inside
/// each group and first-occurrence order between groups.
pub fn group_by_ending(
    cache: &PhoneticCache,
    candidates: Vec<MatchCandidate>,
    depth: usize,
) -> Vec<RhymeGroup> {
    let mut groups: Vec<RhymeGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let form = cache.get_phonetics(&candidate.word);
        let ending = ending_text(&form, depth).unwrap_or_else(|| candidate.word.clone());
        match positions.get(&ending) {
            Some(&pos) => groups[pos].candidates.push(candidate),
            None => {
                positions.insert(ending.clone(), groups.len());
                groups.push(RhymeGroup { ending, candidates: vec![candidate] });
            }
        }
    }
    groups
}

/// Splits a word into (stem, ending) for highlighting.
pub fn split_stem<'a>(word: &'a str, ending: &str) -> Option<(&'a str, &'a str)> {
    let stem = word.strip_suffix(ending)?;
    Some((stem, &word[stem.len()..]))
}
