// src/core/types.rs
use serde::{Deserialize, Serialize};

/// One poem (or other text) from the corpus, as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub title: String,
    /// Unique identity of the document.
    pub url: String,
    /// The upstream feed calls this field `poet`.
    #[serde(default, alias = "poet", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Where a word was seen. Identity is the url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub title: String,
    pub url: String,
    pub author: Option<String>,
}

impl From<&Document> for DocumentRef {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
            author: doc.author.clone(),
        }
    }
}

/// The phonetic reading of one word.
///
/// `cluster_token_counts[i]` is how many of `tokens` came from `clusters[i]`,
/// and `token_offsets[j]` is the byte offset inside its cluster where the
/// source text of `tokens[j]` starts (an implicit vowel points just past the
/// consonants it follows).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneticForm {
    pub tokens: Vec<&'static str>,
    pub cluster_token_counts: Vec<usize>,
    pub token_offsets: Vec<usize>,
    pub clusters: Vec<String>,
}

impl PhoneticForm {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Comparison key for the last `depth` tokens, or `None` when the word is
    /// too short to supply that many.
    pub fn suffix_key(&self, depth: usize) -> Option<String> {
        if depth == 0 || depth > self.tokens.len() {
            return None;
        }
        // Unit separator keeps "a"+"i" apart from "ai".
        Some(self.tokens[self.tokens.len() - depth..].join("\u{1f}"))
    }
}

/// A corpus word that rhymes with the query, with every document it occurs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub word: String,
    pub refs: Vec<DocumentRef>,
}

/// One selectable depth for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthOption {
    pub depth: usize,
    /// The query's own script-level ending at this depth.
    pub suffix_text: String,
    pub match_count: usize,
}

/// Candidates sharing one written ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeGroup {
    pub ending: String,
    pub candidates: Vec<MatchCandidate>,
}

/// Everything a UI needs to render one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeResult {
    pub query: String,
    pub depth: usize,
    pub available_depths: Vec<DepthOption>,
    pub groups: Vec<RhymeGroup>,
}

impl RhymeResult {
    pub fn match_count(&self) -> usize {
        self.groups.iter().map(|g| g.candidates.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Nothing usable was typed: empty after cleaning, or no Devanagari sound.
    InvalidQuery,
    /// A real word with no rhyme at any depth.
    NoMatches { query: String },
    Matches(RhymeResult),
}
