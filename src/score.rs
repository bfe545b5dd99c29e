use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::game::ResetOutcome;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the per-user data directory used by the game.
#[must_use]
pub fn app_data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Durable home of the high score, kept outside the engine.
///
/// A disabled store loads 0 and accepts saves without writing anything.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScoreStore {
    path: Option<PathBuf>,
}

impl ScoreStore {
    /// Store at the platform-correct location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::at(app_data_dir().join(SCORE_FILE_NAME))
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { path: None }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the stored high score.
    ///
    /// Returns `Ok(0)` when the file does not exist yet. Returns `Err` when the
    /// file exists but cannot be read or parsed.
    pub fn load(&self) -> io::Result<u32> {
        match &self.path {
            Some(path) => load_high_score_from_path(path),
            None => Ok(0),
        }
    }

    /// Saves `score`, creating parent directories when needed.
    pub fn save(&self, score: u32) -> io::Result<()> {
        match &self.path {
            Some(path) => save_high_score_to_path(path, score),
            None => Ok(()),
        }
    }

    /// Persists the value emitted by a reset, if any.
    pub fn persist(&self, outcome: ResetOutcome) -> io::Result<()> {
        let Some(score) = outcome.new_high_score else {
            return Ok(());
        };

        debug!("persisting high score {score}");
        self.save(score)
    }
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::ScoreStore;
    use crate::game::ResetOutcome;

    #[test]
    fn saved_score_loads_back() {
        let path = unique_test_path("saved");
        let store = ScoreStore::at(&path);

        store.save(42).expect("score save should succeed");

        assert_eq!(store.load().expect("load should succeed"), 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let store = ScoreStore::at(unique_test_path("missing"));

        assert_eq!(store.load().expect("missing file should return Ok(0)"), 0);
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(
            ScoreStore::at(&path).load().is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(&path);
    }

    #[test]
    fn persist_writes_only_emitted_values() {
        let path = unique_test_path("persist");
        let store = ScoreStore::at(&path);

        store
            .persist(ResetOutcome::default())
            .expect("nothing to persist");
        assert!(!path.exists());

        store
            .persist(ResetOutcome {
                new_high_score: Some(30),
            })
            .expect("persist should succeed");
        assert_eq!(store.load().expect("load should succeed"), 30);

        cleanup_test_path(&path);
    }

    #[test]
    fn disabled_store_never_touches_disk() {
        let store = ScoreStore::disabled();

        store.save(99).expect("disabled save is a no-op");
        assert_eq!(store.load().expect("disabled load is zero"), 0);
        assert_eq!(store.path(), None);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir().join(format!("grid-snake-score-{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
