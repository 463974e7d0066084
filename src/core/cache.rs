// File: src/core/cache.rs
use crate::core::encoder;
use crate::core::types::PhoneticForm;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoizes word -> phonetic form. One cache belongs to one corpus state and
/// is dropped with it on reload.
#[derive(Debug, Default)]
pub struct PhoneticCache {
    forms: RwLock<HashMap<String, Arc<PhoneticForm>>>,
}

impl PhoneticCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached form, computing it on first use.
    /// Readers share a lock; only a miss takes the write lock.
    pub fn get_phonetics(&self, word: &str) -> Arc<PhoneticForm> {
        if let Some(form) = self.forms.read().get(word) {
            return Arc::clone(form);
        }
        let form = Arc::new(encoder::phonetics(word));
        let mut forms = self.forms.write();
        Arc::clone(forms.entry(word.to_string()).or_insert(form))
    }

    /// Cached form if present, otherwise a fresh encoding that is not stored.
    /// Used for query words so arbitrary input never grows the cache.
    pub fn lookup(&self, word: &str) -> Arc<PhoneticForm> {
        if let Some(form) = self.forms.read().get(word) {
            return Arc::clone(form);
        }
        Arc::new(encoder::phonetics(word))
    }

    pub fn len(&self) -> usize {
        self.forms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.read().is_empty()
    }

    pub fn clear(&self) {
        self.forms.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoizes_by_exact_string() {
        let cache = PhoneticCache::new();
        let first = cache.get_phonetics("नाम");
        let second = cache.get_phonetics("नाम");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.get_phonetics("धाम");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn matches_direct_encoding() {
        let cache = PhoneticCache::new();
        assert_eq!(*cache.get_phonetics("श्याम"), encoder::phonetics("श्याम"));
    }

    #[test]
    fn lookup_does_not_store_misses() {
        let cache = PhoneticCache::new();
        assert_eq!(*cache.lookup("नाम"), encoder::phonetics("नाम"));
        assert!(cache.is_empty());

        let stored = cache.get_phonetics("नाम");
        assert!(Arc::ptr_eq(&stored, &cache.lookup("नाम")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties() {
        let cache = PhoneticCache::new();
        cache.get_phonetics("राम");
        cache.clear();
        assert!(cache.is_empty());
    }
}
