// File: src/core/index.rs
use crate::core::script::tokenize;
use crate::core::types::{Document, DocumentRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// A cleaned surface word and the documents it appears in, first-seen first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub word: String,
    pub refs: Vec<DocumentRef>,
}

/// Word -> documents map, built once per corpus load. Entries keep the order
/// in which words were first seen.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Tokenizes each document's text and title and registers every word
    /// of at least `min_word_chars` code points that contains Devanagari.
    /// Complexity: O(total tokens), with a scan of the word's refs per hit.
    pub fn build(documents: &[Document], min_word_chars: usize) -> Self {
        let mut index = Self::default();
        for doc in documents {
            let combined = format!("{} {}", doc.text, doc.title);
            for word in tokenize(&combined, min_word_chars) {
                index.register(word, doc);
            }
        }
        info!(
            documents = documents.len(),
            words = index.entries.len(),
            "corpus index built"
        );
        index
    }

    /// Rebuilds the lookup table from stored entries.
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.word.clone(), i))
            .collect();
        Self { entries, positions }
    }

    fn register(&mut self, word: String, doc: &Document) {
        let pos = match self.positions.get(&word) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.positions.insert(word.clone(), pos);
                self.entries.push(IndexEntry { word, refs: Vec::new() });
                pos
            }
        };
        let refs = &mut self.entries[pos].refs;
        if !refs.iter().any(|r| r.url == doc.url) {
            refs.push(DocumentRef::from(doc));
        }
    }

    pub fn get(&self, word: &str) -> Option<&IndexEntry> {
        self.positions.get(word).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
