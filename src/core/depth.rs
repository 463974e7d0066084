// File: src/core/depth.rs
use crate::config::RhymeConfig;
use crate::core::cache::PhoneticCache;
use crate::core::grouper::ending_text;
use crate::core::index::CorpusIndex;
use crate::core::matcher::find_rhymes;
use crate::core::types::DepthOption;
use tracing::debug;

/// Picks the deepest depth with at least `min_matches_for_depth` rhymes,
/// scanning down from the cap. Falls back to `min_depth`.
pub fn auto_detect_depth(
    index: &CorpusIndex,
    cache: &PhoneticCache,
    config: &RhymeConfig,
    query: &str,
) -> usize {
    let cap = config.depth_cap(cache.lookup(query).token_count());
    for depth in (config.min_depth..=cap).rev() {
        let count = find_rhymes(index, cache, query, depth, config.purity_tolerance).len();
        if count >= config.min_matches_for_depth {
            debug!(query, depth, count, "auto depth selected");
            return depth;
        }
    }
    debug!(query, fallback = config.min_depth, "no depth met the match threshold");
    config.min_depth
}

/// Every depth from `min_depth` up to the cap that yields at least one
/// rhyme, ascending.
pub fn available_depths(
    index: &CorpusIndex,
    cache: &PhoneticCache,
    config: &RhymeConfig,
    query: &str,
) -> Vec<DepthOption> {
    let form = cache.lookup(query);
    let cap = config.depth_cap(form.token_count());
    let mut options = Vec::new();

    for depth in config.min_depth..=cap {
        let match_count = find_rhymes(index, cache, query, depth, config.purity_tolerance).len();
        // Deeper suffixes are stricter, so nothing past here can match.
        if match_count == 0 {
            break;
        }
        options.push(DepthOption {
            depth,
            suffix_text: ending_text(&form, depth).unwrap_or_default(),
            match_count,
        });
    }
    options
}
