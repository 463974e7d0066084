// File: src/core/matcher.rs
use crate::core::cache::PhoneticCache;
use crate::core::index::CorpusIndex;
use crate::core::types::MatchCandidate;

/// Finds every indexed word whose last `depth` phonemes equal the query's.
///
/// The query word itself is skipped by exact string equality. A depth of 0,
/// or one longer than the query's token count, yields nothing; candidates too
/// short for the depth never match. Results come back ranked, see [`rank`].
/// Complexity: O(V) suffix comparisons for a vocabulary of V words.
pub fn find_rhymes(
    index: &CorpusIndex,
    cache: &PhoneticCache,
    query: &str,
    depth: usize,
    purity_tolerance: f64,
) -> Vec<MatchCandidate> {
    let Some(key) = cache.lookup(query).suffix_key(depth) else {
        return Vec::new();
    };

    let scored = index
        .entries()
        .iter()
        .filter(|entry| entry.word != query)
        .filter_map(|entry| {
            let form = cache.get_phonetics(&entry.word);
            if form.suffix_key(depth).as_deref() != Some(key.as_str()) {
                return None;
            }
            let candidate = MatchCandidate {
                word: entry.word.clone(),
                refs: entry.refs.clone(),
            };
            Some((candidate, purity_ratio(depth, form.token_count())))
        })
        .collect();

    rank(scored, purity_tolerance)
}

/// How much of a word its rhyme covers: depth / total tokens.
pub fn purity_ratio(depth: usize, token_count: usize) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    depth as f64 / token_count as f64
}

/// Orders by descending purity, then alphabetically.
///
/// Candidates are sorted by ratio first. Each run of ratios within
/// `tolerance` of the run's highest ratio then counts as one rank and is
/// re-sorted by word. The runs keep the ordering a total order.
pub fn rank(mut scored: Vec<(MatchCandidate, f64)>, tolerance: f64) -> Vec<MatchCandidate> {
    scored.sort_by(|(a, ra), (b, rb)| rb.total_cmp(ra).then_with(|| a.word.cmp(&b.word)));

    let mut ranked = Vec::with_capacity(scored.len());
    let mut run: Vec<MatchCandidate> = Vec::new();
    let mut leader = f64::NAN;

    for (candidate, ratio) in scored {
        if run.is_empty() || leader - ratio > tolerance {
            flush_run(&mut run, &mut ranked);
            leader = ratio;
        }
        run.push(candidate);
    }
    flush_run(&mut run, &mut ranked);
    ranked
}

fn flush_run(run: &mut Vec<MatchCandidate>, out: &mut Vec<MatchCandidate>) {
    run.sort_by(|a, b| a.word.cmp(&b.word));
    out.append(run);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Document;

    fn index_of(words: &[&str]) -> CorpusIndex {
        let docs: Vec<Document> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Document {
                text: w.to_string(),
                title: String::new(),
                url: format!("/poem/{}", i),
                author: None,
            })
            .collect();
        CorpusIndex::build(&docs, 2)
    }

    fn words(found: &[MatchCandidate]) -> Vec<&str> {
        found.iter().map(|c| c.word.as_str()).collect()
    }

    #[test]
    fn finds_aam_rhymes() {
        let index = index_of(&["राम", "श्याम", "धाम", "काम", "नाम", "कमल"]);
        let cache = PhoneticCache::new();
        let found = find_rhymes(&index, &cache, "नाम", 2, 0.1);
        assert_eq!(words(&found), vec!["काम", "धाम", "राम", "श्याम"]);
    }

    #[test]
    fn excludes_query_itself() {
        let index = index_of(&["नाम", "धाम"]);
        let cache = PhoneticCache::new();
        for depth in 1..=3 {
            assert!(find_rhymes(&index, &cache, "नाम", depth, 0.1)
                .iter()
                .all(|c| c.word != "नाम"));
        }
    }

    #[test]
    fn depth_beyond_candidate_is_no_match() {
        // "आम" has two tokens, so it cannot match at depth 3.
        let index = index_of(&["आम", "धाम"]);
        let cache = PhoneticCache::new();
        let found = find_rhymes(&index, &cache, "नाम", 3, 0.1);
        assert!(found.is_empty());
        assert_eq!(words(&find_rhymes(&index, &cache, "नाम", 2, 0.1)), vec!["आम", "धाम"]);
    }

    #[test]
    fn zero_or_oversized_depth_is_empty() {
        let index = index_of(&["धाम"]);
        let cache = PhoneticCache::new();
        assert!(find_rhymes(&index, &cache, "नाम", 0, 0.1).is_empty());
        assert!(find_rhymes(&index, &cache, "नाम", 4, 0.1).is_empty());
    }

    #[test]
    fn homophone_spellings_match() {
        let index = index_of(&["प्राण", "मान"]);
        let cache = PhoneticCache::new();
        assert_eq!(words(&find_rhymes(&index, &cache, "जान", 2, 0.1)), vec!["मान", "प्राण"]);
    }

    #[test]
    fn purer_rhymes_rank_first() {
        // depth 2: "धाम" 2/3, "सुनाम" 2/5
        let index = index_of(&["सुनाम", "धाम"]);
        let cache = PhoneticCache::new();
        assert_eq!(words(&find_rhymes(&index, &cache, "नाम", 2, 0.1)), vec!["धाम", "सुनाम"]);
    }

    fn cand(word: &str) -> MatchCandidate {
        MatchCandidate { word: word.to_string(), refs: Vec::new() }
    }

    #[test]
    fn rank_ties_within_tolerance_sort_alphabetically() {
        let scored = vec![
            (cand("ग"), 0.62),
            (cand("क"), 0.60),
            (cand("ख"), 0.67),
            (cand("च"), 0.40),
        ];
        let ranked = rank(scored, 0.1);
        assert_eq!(words(&ranked), vec!["क", "ख", "ग", "च"]);
    }

    #[test]
    fn rank_with_zero_tolerance_is_strict() {
        let scored = vec![(cand("क"), 0.5), (cand("ख"), 0.6)];
        assert_eq!(words(&rank(scored, 0.0)), vec!["ख", "क"]);
    }

    #[test]
    fn purity_ratio_guards_empty() {
        assert_eq!(purity_ratio(2, 0), 0.0);
        assert_eq!(purity_ratio(2, 4), 0.5);
    }
}
