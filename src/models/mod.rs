//! Defines the data structures and models used throughout the application.
//!
//! This includes structures representing data fetched from the board API,
//! the persisted state file, and the session passed to every command.

mod board;

pub use board::*;
