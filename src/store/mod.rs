//! Provides local persistence for the session credentials.
//!
//! Currently a single flat JSON file via the `state_file` submodule.

mod state_file;

pub use state_file::*;
