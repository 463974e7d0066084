// File: src/persistence.rs
use crate::config::RhymeConfig;
use crate::core::engine::RhymeEngine;
use crate::core::index::{CorpusIndex, IndexEntry};
use crate::core::types::Document;
use crate::error::{Result, RhymeError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a built index. The phonetic cache is rebuilt lazily and
/// never written out.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    version: u32,
    entries: Vec<IndexEntry>,
}

/// Reads a corpus feed: a JSON array of documents.
pub fn load_corpus_json(path: &Path) -> Result<Vec<Document>> {
    let reader = BufReader::new(File::open(path)?);
    let documents: Vec<Document> = serde_json::from_reader(reader)?;
    info!(path = %path.display(), documents = documents.len(), "corpus loaded");
    Ok(documents)
}

/// Writes the engine's current index atomically: temp file in the same
/// directory, then rename over the target.
pub fn save_snapshot(engine: &RhymeEngine, path: &Path) -> Result<()> {
    let corpus = engine.corpus()?;
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        version: SNAPSHOT_VERSION,
        entries: corpus.index().entries().to_vec(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &state)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| RhymeError::Io(e.error))?;
    info!(path = %path.display(), words = state.entries.len(), "snapshot saved");
    Ok(())
}

/// Restores an engine whose index is already built.
pub fn load_snapshot(path: &Path, config: RhymeConfig) -> Result<RhymeEngine> {
    let reader = BufReader::new(File::open(path)?);
    let state: SerializableState = bincode::deserialize_from(reader)?;
    if state.version > SNAPSHOT_VERSION {
        return Err(RhymeError::IncompatibleSnapshot {
            expected: SNAPSHOT_VERSION,
            actual: state.version,
        });
    }

    let engine = RhymeEngine::with_config(config)?;
    engine.install_index(CorpusIndex::from_entries(state.entries));
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_engine() -> RhymeEngine {
        let engine = RhymeEngine::new();
        engine.build_index(&[
            Document {
                text: "राम धाम".to_string(),
                title: "पद".to_string(),
                url: "/a".to_string(),
                author: Some("सूरदास".to_string()),
            },
            Document {
                text: "काम".to_string(),
                title: "दोहा".to_string(),
                url: "/b".to_string(),
                author: None,
            },
        ]);
        engine
    }

    #[test]
    fn snapshot_restores_same_rhymes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index.bin");
        let engine = sample_engine();
        save_snapshot(&engine, &path).unwrap();

        let restored = load_snapshot(&path, RhymeConfig::default()).unwrap();
        assert_eq!(
            restored.find_rhymes("नाम", 2).unwrap(),
            engine.find_rhymes("नाम", 2).unwrap()
        );
    }

    #[test]
    fn saving_unbuilt_engine_fails() {
        let dir = TempDir::new().unwrap();
        let err = save_snapshot(&RhymeEngine::new(), &dir.path().join("x.bin")).unwrap_err();
        assert!(matches!(err, RhymeError::IndexNotBuilt));
    }

    #[test]
    fn newer_snapshot_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("future.bin");
        let state = SerializableState { version: SNAPSHOT_VERSION + 1, entries: Vec::new() };
        fs::write(&path, bincode::serialize(&state).unwrap()).unwrap();

        let err = load_snapshot(&path, RhymeConfig::default()).unwrap_err();
        assert!(matches!(err, RhymeError::IncompatibleSnapshot { actual: 2, .. }));
    }

    #[test]
    fn corpus_json_accepts_poet_alias() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "राम", "title": "पद", "url": "/a", "poet": "मीरा"}},
                {{"text": "धाम", "title": "दोहा", "url": "/b"}}]"#
        )
        .unwrap();
        let docs = load_corpus_json(file.path()).unwrap();
        assert_eq!(docs[0].author.as_deref(), Some("मीरा"));
        assert_eq!(docs[1].author, None);
    }
}
