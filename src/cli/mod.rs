//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes parsing arguments and configuration (`args`), terminal access
//! (`console`), session setup (`startup`), the board commands (`commands`) and
//! the interactive loop that dispatches them (`shell`).

mod args;
mod commands;
mod console;
#[cfg(test)]
mod mock_board;
mod shell;
mod startup;

pub use args::*;
pub use commands::*;
pub use console::*;
pub use shell::*;
pub use startup::*;
