//! # UI State Persistence
//!
//! On the watch, [`UiState`] lives in RTC memory that survives deep sleep.
//! The core only sees the [`StateStore`] trait; the host decides what backs
//! it. [`JsonFileStore`] keeps the state as a small JSON file for the host
//! simulator, and [`MemoryStore`] keeps it in RAM for tests.
//!
//! A missing file is a first boot, not an error: `load` returns the default
//! state. A corrupt file is reported so the caller can decide whether to
//! start fresh.

use crate::navigation::UiState;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;
use tracing::debug;

/// Errors from loading or saving the persisted UI state.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File operations failed (permissions, disk space)
    #[error("state IO: {0}")]
    Io(#[from] io::Error),

    /// Stored bytes are not a valid UI state
    #[error("state codec: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Retained storage for the UI state between wakes.
pub trait StateStore {
    fn load(&mut self) -> Result<UiState, StorageError>;
    fn save(&mut self, state: &UiState) -> Result<(), StorageError>;
}

/// UI state serialized as JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&mut self) -> Result<UiState, StorageError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored UI state, starting fresh");
                return Ok(UiState::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&mut self, state: &UiState) -> Result<(), StorageError> {
        let data = serde_json::to_vec(state)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), "UI state saved");
        Ok(())
    }
}

/// In-memory store; starts empty (first boot).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Option<UiState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<UiState, StorageError> {
        Ok(self.state.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &UiState) -> Result<(), StorageError> {
        self.state = Some(state.clone());
        Ok(())
    }
}
