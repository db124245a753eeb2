//! Persists the API credentials and board id between runs.
//!
//! The state lives in a single JSON file (`user_data.json` by default, relative to
//! the working directory). Losing it only means the user is asked again, so writes
//! are plain overwrites.

use crate::error::{AppError, Result};
use crate::models::{BoardId, Credentials, PersistedState};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_STATE_FILE: &str = "user_data.json";

/// Reads and writes the persisted `{auth_params, board_id}` document.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved credentials and board id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StateNotFound` when the file is missing, unreadable or
    /// does not have the expected shape. Callers treat every cause the same way.
    pub fn load(&self) -> Result<PersistedState> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            debug!("No saved state at {}: {}", self.path.display(), e);
            AppError::StateNotFound(format!("{}: {}", self.path.display(), e))
        })?;

        let state: PersistedState = serde_json::from_str(&contents).map_err(|e| {
            warn!("Saved state at {} is malformed: {}", self.path.display(), e);
            AppError::StateNotFound(format!("{}: {}", self.path.display(), e))
        })?;

        info!(
            "Loaded saved state for board {} from {}",
            state.board_id,
            self.path.display()
        );
        Ok(state)
    }

    /// Overwrites the state file with the given credentials and board id.
    pub fn save(&self, credentials: &Credentials, board_id: &BoardId) -> Result<()> {
        let state = PersistedState {
            auth_params: credentials.clone(),
            board_id: board_id.clone(),
        };
        let json = serde_json::to_string(&state)?;
        fs::write(&self.path, json)?;
        info!("Saved state to {}", self.path.display());
        Ok(())
    }
}
