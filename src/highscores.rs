//! High score persistence
//!
//! The game only ever reads one number at startup and writes it back when it
//! rises. Failures are logged and swallowed: a broken store must never stop
//! the simulation.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::config::StoreError;

/// Somewhere to keep the best score between runs
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

/// In-memory store, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u32,
    /// Number of writes seen
    pub writes: usize,
}

impl MemoryStore {
    pub fn new(score: u32) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.score
    }

    fn set_high_score(&mut self, score: u32) {
        self.score = score;
        self.writes += 1;
    }
}

/// On-disk record
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a small JSON file (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    score: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open a store; an unreadable file starts from 0
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let score = match Self::read(&path) {
            Ok(score) => {
                log::info!("Loaded high score {} from {}", score, path.display());
                score
            }
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file at {}, starting fresh", path.display());
                0
            }
            Err(err) => {
                log::warn!("Failed to read high score ({}): {err}", path.display());
                0
            }
        };
        Self { path, score }
    }

    fn read(path: &Path) -> Result<u32, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn write(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord {
            high_score: self.score,
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        self.score
    }

    fn set_high_score(&mut self, score: u32) {
        self.score = score;
        match self.write() {
            Ok(()) => log::info!("High score saved ({score})"),
            Err(err) => log::warn!("Failed to save high score ({}): {err}", self.path.display()),
        }
    }
}

/// High score kept in browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore {
    score: u32,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "breakoutHighScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load the stored score, 0 if missing or unparsable
    pub fn load() -> Self {
        let score = Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|raw| raw.trim().parse::<u32>().ok());

        match score {
            Some(score) => {
                log::info!("Loaded high score {score}");
                Self { score }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn high_score(&self) -> u32 {
        self.score
    }

    fn set_high_score(&mut self, score: u32) {
        self.score = score;
        let saved = Self::storage()
            .map(|s| s.set_item(Self::STORAGE_KEY, &score.to_string()).is_ok())
            .unwrap_or(false);
        if saved {
            log::info!("High score saved ({score})");
        } else {
            log::warn!("Failed to save high score to LocalStorage");
        }
    }
}
