//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `trello`: the `BoardApi` trait and its client for the Trello REST API.

mod trello;

pub use trello::*;
