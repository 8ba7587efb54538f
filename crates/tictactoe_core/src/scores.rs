//! Score tallying and persistence.

use super::GameResult;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Storage key for the persisted scoreboard.
pub const SCORES_KEY: &str = "ttt_scores";

/// Wins per mark and draws.
///
/// Serialized as `{"X": n, "O": n, "D": n}`; missing counters read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    /// Rounds won by X.
    #[serde(rename = "X")]
    pub x: u32,
    /// Rounds won by O.
    #[serde(rename = "O")]
    pub o: u32,
    /// Drawn rounds.
    #[serde(rename = "D")]
    pub draws: u32,
}

impl Scoreboard {
    /// Creates a scoreboard from raw counts.
    pub fn new(x: u32, o: u32, draws: u32) -> Self {
        Self { x, o, draws }
    }

    /// Total rounds finished, saturating at `u32::MAX`.
    pub fn rounds(&self) -> u32 {
        self.x.saturating_add(self.o).saturating_add(self.draws)
    }
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Key-value text storage for persisted state.
pub trait ScoreStore: Send {
    /// Reads the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScoreStore for FileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError::new(format!(
                "Failed to create '{}': {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| StoreError::new(format!("Failed to write '{}': {}", path.display(), e)))
    }
}

/// Tallies finished rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    scores: Scoreboard,
}

impl ScoreTracker {
    /// Starts from zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing counts.
    pub fn with_scores(scores: Scoreboard) -> Self {
        Self { scores }
    }

    /// Current counts.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Counts a finished round. Returns whether it was a finished round.
    ///
    /// Counters saturate at `u32::MAX` rather than wrapping.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: &GameResult) -> bool {
        let counter = match result {
            GameResult::Win { mark, .. } => match mark {
                super::Mark::X => &mut self.scores.x,
                super::Mark::O => &mut self.scores.o,
            },
            GameResult::Draw => &mut self.scores.draws,
            GameResult::InProgress => return false,
        };
        if *counter == u32::MAX {
            warn!(?result, "Score counter saturated");
        }
        *counter = counter.saturating_add(1);
        info!(scores = ?self.scores, "Score recorded");
        true
    }

    /// Zeroes every counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.scores = Scoreboard::default();
    }

    /// Writes the counts to `store` under [`SCORES_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the store fails.
    #[instrument(skip(self, store))]
    pub fn persist(&self, store: &mut dyn ScoreStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.scores)
            .map_err(|e| StoreError::new(format!("Failed to serialize scores: {}", e)))?;
        store.set(SCORES_KEY, &json)?;
        debug!(%json, "Scores persisted");
        Ok(())
    }

    /// Reads counts from `store`.
    ///
    /// Missing, unreadable or malformed data yields a zeroed tracker; this
    /// never fails.
    #[instrument(skip(store))]
    pub fn load(store: &dyn ScoreStore) -> Self {
        let raw = match store.get(SCORES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved scores, starting from zero");
                return Self::new();
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved scores, starting from zero");
                return Self::new();
            }
        };
        match serde_json::from_str::<Scoreboard>(&raw) {
            Ok(scores) => {
                info!(?scores, "Loaded saved scores");
                Self::with_scores(scores)
            }
            Err(e) => {
                warn!(error = %e, "Saved scores are malformed, starting from zero");
                Self::new()
            }
        }
    }
}
