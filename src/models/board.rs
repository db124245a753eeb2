//! Defines data structures for the application.
//!
//! Includes structs for:
//! - Deserializing board API responses (`Column`, `Task`, `BoardReport`).
//! - The persisted state file (`PersistedState`, `Credentials`).
//! - The in-memory session threaded through every command (`Session`).

use serde::{Deserialize, Serialize};
use std::fmt;

// --- Identifiers ---

/// Short board identifier as typed by the user (the one in the board URL).
///
/// Accepted by the read endpoints (`boards/{id}`, `boards/{id}/lists`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub struct BoardId(String);

impl BoardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BoardId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<BoardId> for String {
    fn from(id: BoardId) -> Self {
        id.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Internal board identifier required by the column creation endpoint.
///
/// Only obtainable through `BoardApi::resolve_long_board_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LongBoardId(String);

impl LongBoardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LongBoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Auth & persisted state ---

/// API key and token pair sent with every request.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub key: String,
    pub token: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
        }
    }

    /// Key/token pair in the shape `reqwest` expects for `query` and `form`.
    pub fn as_params(&self) -> [(&'static str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }
}

// Keep secrets out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"***")
            .field("token", &"***")
            .finish()
    }
}

/// Shape of the state file: `{"auth_params": {...}, "board_id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PersistedState {
    pub auth_params: Credentials,
    pub board_id: BoardId,
}

/// Connection context for the lifetime of the interactive loop.
#[derive(Debug, Clone)]
pub struct Session {
    pub credentials: Credentials,
    pub board_id: BoardId,
    pub long_board_id: LongBoardId,
}

// --- API Response Structs ---

/// A column (Trello "list") on the board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Column {
    pub id: String,
    pub name: String,
}

/// A task (Trello "card") inside a column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Task {
    pub id: String,
    pub name: String,
}

/// The subset of `reports.json` needed to learn the long board id.
#[derive(Debug, Deserialize)]
pub struct BoardReport {
    pub id: Option<LongBoardId>,
}

/// One hit of a task-name search across the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMatch {
    pub task_id: String,
    pub column_name: String,
}

#[cfg(test)]
impl LongBoardId {
    pub fn for_tests(id: &str) -> Self {
        Self(id.to_string())
    }
}
