use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "tick-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failure to read or write the persisted top score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Best-effort durable storage for the top score.
pub trait ScoreStore {
    fn load_top_score(&mut self) -> Result<u16, ScoreError>;
    fn save_top_score(&mut self, score: u16) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    top_score: u16,
}

/// Returns the platform-correct directory for game data.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    data_dir().join(SCORE_FILE_NAME)
}

/// Top score kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new(scores_path())
    }
}

impl ScoreStore for JsonScoreStore {
    /// Returns `Ok(0)` when the score file does not exist yet.
    fn load_top_score(&mut self) -> Result<u16, ScoreError> {
        load_top_score_from_path(&self.path)
    }

    /// Creates parent directories when needed.
    fn save_top_score(&mut self, score: u16) -> Result<(), ScoreError> {
        save_top_score_to_path(&self.path, score)
    }
}

/// Session-only store; nothing outlives the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    top_score: u16,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_score(top_score: u16) -> Self {
        Self { top_score }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_top_score(&mut self) -> Result<u16, ScoreError> {
        Ok(self.top_score)
    }

    fn save_top_score(&mut self, score: u16) -> Result<(), ScoreError> {
        self.top_score = score;
        Ok(())
    }
}

fn load_top_score_from_path(path: &Path) -> Result<u16, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.top_score)
}

fn save_top_score_to_path(path: &Path, score: u16) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&ScoreFile { top_score: score })?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{JsonScoreStore, MemoryScoreStore, ScoreError, ScoreStore};

    #[test]
    fn saved_score_is_loaded_back() {
        let path = unique_test_path("saved");
        let mut store = JsonScoreStore::new(path.clone());

        store.save_top_score(42).expect("score save should succeed");
        let loaded = store.load_top_score().expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        let mut store = JsonScoreStore::new(path);

        let loaded = store
            .load_top_score()
            .expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_returns_format_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let result = JsonScoreStore::new(path.clone()).load_top_score();
        assert!(
            matches!(result, Err(ScoreError::Format(_))),
            "malformed file should return a format error"
        );

        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let mut store = MemoryScoreStore::with_score(7);
        assert_eq!(store.load_top_score().ok(), Some(7));

        store.save_top_score(12).expect("memory save cannot fail");
        assert_eq!(store.load_top_score().ok(), Some(12));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("tick-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
