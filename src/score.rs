use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "autopilot-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// On-disk layout: one flat JSON object of key → score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(flatten)]
    entries: BTreeMap<String, u32>,
}

/// Failure reading or writing persisted scores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Small durable key-value capability for integer scores.
pub trait ScoreStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<u32>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Score store backed by a JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    file: ScoreFile,
}

impl JsonScoreStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store (first run). A file that exists
    /// but cannot be read or parsed is an error, so the caller can warn.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => ScoreFile::default(),
            Err(error) => return Err(error.into()),
        };

        Ok(Self { path, file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonScoreStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.file.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.file.entries.insert(key.to_owned(), value);
        self.flush()
    }
}

/// In-memory store, used by tests and when the score file is unusable.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: BTreeMap<String, u32>,
    pub writes: usize,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: u32) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_owned(), value);
        Self { entries, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}
