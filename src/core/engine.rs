use crate::config::RhymeConfig;
use crate::core::script::{clean_word, contains_devanagari};
use crate::core::types::{
    DepthOption, Document, MatchCandidate, PhoneticForm, QueryOutcome, RhymeGroup, RhymeResult,
};
use crate::core::{cache::PhoneticCache, depth, grouper, index::CorpusIndex, matcher};
use crate::error::{Result, RhymeError};
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::{debug, info};

/// One loaded corpus: the word index plus the phonetic cache for its
/// vocabulary. Replaced wholesale on reload, never edited in place.
#[derive(Debug)]
pub struct CorpusState {
    index: CorpusIndex,
    cache: PhoneticCache,
}

impl CorpusState {
    fn new(index: CorpusIndex) -> Self {
        Self { index, cache: PhoneticCache::new() }
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn cache(&self) -> &PhoneticCache {
        &self.cache
    }
}

// The main rhyme engine. Queries read whichever corpus state is current when
// they start; a reload swaps in a new one without disturbing them.
#[derive(Debug)]
pub struct RhymeEngine {
    config: RhymeConfig,
    state: ArcSwapOption<CorpusState>,
}

impl Default for RhymeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RhymeEngine {
    pub fn new() -> Self {
        Self {
            config: RhymeConfig::default(),
            state: ArcSwapOption::empty(),
        }
    }

    pub fn with_config(config: RhymeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, state: ArcSwapOption::empty() })
    }

    pub fn config(&self) -> &RhymeConfig {
        &self.config
    }

    /// Indexes a corpus and makes it the current one. Any previous index and
    /// its cache are discarded.
    pub fn build_index(&self, documents: &[Document]) {
        let index = CorpusIndex::build(documents, self.config.min_word_chars);
        self.install_index(index);
    }

    pub(crate) fn install_index(&self, index: CorpusIndex) {
        let words = index.len();
        self.state.store(Some(Arc::new(CorpusState::new(index))));
        info!(words, "corpus state swapped in");
    }

    pub fn is_built(&self) -> bool {
        self.state.load().is_some()
    }

    /// The current corpus state.
    pub fn corpus(&self) -> Result<Arc<CorpusState>> {
        self.state.load_full().ok_or(RhymeError::IndexNotBuilt)
    }

    pub fn phonetics(&self, word: &str) -> Result<Arc<PhoneticForm>> {
        Ok(self.corpus()?.cache.lookup(word))
    }

    /// Rhymes for an already-cleaned word at a fixed depth, ranked.
    pub fn find_rhymes(&self, word: &str, depth: usize) -> Result<Vec<MatchCandidate>> {
        let state = self.corpus()?;
        Ok(matcher::find_rhymes(
            &state.index,
            &state.cache,
            word,
            depth,
            self.config.purity_tolerance,
        ))
    }

    pub fn auto_detect_depth(&self, word: &str) -> Result<usize> {
        let state = self.corpus()?;
        Ok(depth::auto_detect_depth(&state.index, &state.cache, &self.config, word))
    }

    pub fn available_depths(&self, word: &str) -> Result<Vec<DepthOption>> {
        let state = self.corpus()?;
        Ok(depth::available_depths(&state.index, &state.cache, &self.config, word))
    }

    pub fn group_by_ending(
        &self,
        candidates: Vec<MatchCandidate>,
        depth: usize,
    ) -> Result<Vec<RhymeGroup>> {
        let state = self.corpus()?;
        Ok(grouper::group_by_ending(&state.cache, candidates, depth))
    }

    /// Cleans raw input, picks a depth automatically and returns grouped
    /// rhymes.
    pub fn query(&self, raw: &str) -> Result<QueryOutcome> {
        let state = self.corpus()?;
        let Some(word) = prepare_query(&state, raw) else {
            return Ok(QueryOutcome::InvalidQuery);
        };
        let depth = depth::auto_detect_depth(&state.index, &state.cache, &self.config, &word);
        Ok(self.compose(&state, word, depth))
    }

    /// Same as [`query`](Self::query) at a caller-chosen depth, clamped to
    /// what the configuration and the word allow.
    pub fn query_at_depth(&self, raw: &str, depth: usize) -> Result<QueryOutcome> {
        let state = self.corpus()?;
        let Some(word) = prepare_query(&state, raw) else {
            return Ok(QueryOutcome::InvalidQuery);
        };
        let cap = self.config.depth_cap(state.cache.lookup(&word).token_count());
        let depth = depth.clamp(self.config.min_depth, cap.max(self.config.min_depth));
        Ok(self.compose(&state, word, depth))
    }

    fn compose(&self, state: &CorpusState, word: String, depth: usize) -> QueryOutcome {
        let available_depths =
            depth::available_depths(&state.index, &state.cache, &self.config, &word);
        if available_depths.is_empty() {
            debug!(query = %word, "no rhymes at any depth");
            return QueryOutcome::NoMatches { query: word };
        }

        let candidates = matcher::find_rhymes(
            &state.index,
            &state.cache,
            &word,
            depth,
            self.config.purity_tolerance,
        );
        debug!(query = %word, depth, matches = candidates.len(), "rhyme query");
        let groups = grouper::group_by_ending(&state.cache, candidates, depth);

        QueryOutcome::Matches(RhymeResult {
            query: word,
            depth,
            available_depths,
            groups,
        })
    }
}

/// Cleaned query word, or `None` when nothing rhymable is left.
fn prepare_query(state: &CorpusState, raw: &str) -> Option<String> {
    let word = clean_word(raw);
    if word.is_empty() || !contains_devanagari(&word) {
        return None;
    }
    if state.cache.lookup(&word).is_empty() {
        return None;
    }
    Some(word)
}
