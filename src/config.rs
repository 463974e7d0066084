// File: src/config.rs
use crate::error::{Result, RhymeError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Level used by the binaries when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log filter for the binaries: `RUST_LOG` when set, INFO otherwise.
pub fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Builds the filter from explicit directives. A missing or unparsable
/// directive string falls back to [`DEFAULT_LOG_LEVEL`].
pub fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Tunables for indexing and rhyme search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhymeConfig {
    /// Minimum number of code points for a corpus word to be indexed.
    pub min_word_chars: usize,
    /// Smallest rhyme depth ever considered.
    pub min_depth: usize,
    /// Largest rhyme depth ever considered.
    pub max_depth: usize,
    /// Matches a depth needs before auto-detection accepts it.
    pub min_matches_for_depth: usize,
    /// Purity ratios closer than this rank as equal and fall back to
    /// alphabetical order.
    pub purity_tolerance: f64,
}

impl Default for RhymeConfig {
    fn default() -> Self {
        Self {
            min_word_chars: 2,
            min_depth: 1,
            max_depth: 8,
            min_matches_for_depth: 2,
            purity_tolerance: 0.1,
        }
    }
}

impl RhymeConfig {
    /// Loads a config from a JSON file. Keys left out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: RhymeConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_depth == 0 {
            return Err(RhymeError::InvalidConfig("min_depth must be at least 1".into()));
        }
        if self.min_depth > self.max_depth {
            return Err(RhymeError::InvalidConfig(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        if self.min_word_chars == 0 {
            return Err(RhymeError::InvalidConfig("min_word_chars must be at least 1".into()));
        }
        if self.min_matches_for_depth == 0 {
            return Err(RhymeError::InvalidConfig(
                "min_matches_for_depth must be at least 1".into(),
            ));
        }
        if !self.purity_tolerance.is_finite() || self.purity_tolerance < 0.0 {
            return Err(RhymeError::InvalidConfig(format!(
                "purity_tolerance must be a non-negative number, got {}",
                self.purity_tolerance
            )));
        }
        Ok(())
    }

    /// Largest depth worth trying for a word with `token_count` phonemes.
    pub fn depth_cap(&self, token_count: usize) -> usize {
        self.max_depth.min(token_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = RhymeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.min_matches_for_depth, 2);
    }

    #[test]
    fn rejects_inverted_depth_bounds() {
        let config = RhymeConfig { min_depth: 5, max_depth: 3, ..RhymeConfig::default() };
        assert!(matches!(config.validate(), Err(RhymeError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_min_depth() {
        let config = RhymeConfig { min_depth: 0, ..RhymeConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_tolerance() {
        let config = RhymeConfig { purity_tolerance: f64::NAN, ..RhymeConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_depth": 4}}"#).unwrap();
        let config = RhymeConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.min_word_chars, 2);
    }

    #[test]
    fn depth_cap_respects_token_count() {
        let config = RhymeConfig::default();
        assert_eq!(config.depth_cap(3), 3);
        assert_eq!(config.depth_cap(20), 8);
    }

    #[test]
    fn log_filter_defaults_to_info() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(log_filter_from(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn log_filter_honours_directives() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(log_filter_from(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter_from(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }
}
