//! Terminal access for the interactive shell.
//!
//! Every prompt and every line of output goes through the `Console` trait, so the
//! command flows can be driven by a scripted console in tests.

use crate::error::{AppError, Result};
use colored::*;
use dialoguer::{theme::Theme, Input};
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented terminal with colored status output.
pub trait Console {
    /// Clears the screen.
    fn clear(&mut self);

    /// Prints a plain line.
    fn say(&mut self, line: &str);

    /// Prints a line in green.
    fn success(&mut self, line: &str);

    /// Prints a line in red.
    fn failure(&mut self, line: &str);

    /// Prints a column header (green, reversed).
    fn header(&mut self, line: &str);

    /// Prints one help entry: the command in green followed by its description.
    fn command_help(&mut self, command: &str, description: &str);

    /// Shows `prompt` and reads one line of input, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Interrupted` on Ctrl+C or end of input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Renders prompts exactly as given (`"> "`, `"Task: "`).
struct PlainTheme;

impl Theme for PlainTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{}", prompt)
    }
}

/// The real terminal: `dialoguer` for input, `colored` for output.
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    // Piped input: dialoguer refuses non-terminals, so read lines directly.
    fn read_piped_line(&self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        read_line_from(&mut io::stdin().lock())
    }
}

/// Reads one line from `reader`. Invalid UTF-8 is replaced rather than rejected,
/// so every prompt treats odd bytes the same way.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Err(AppError::Interrupted);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn success(&mut self, line: &str) {
        println!("{}", line.green());
    }

    fn failure(&mut self, line: &str) {
        println!("{}", line.red());
    }

    fn header(&mut self, line: &str) {
        println!("{}", line.green().reversed());
    }

    fn command_help(&mut self, command: &str, description: &str) {
        println!("{:<13} - {}", command.green(), description);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return self.read_piped_line(prompt);
        }

        let line: String = Input::with_theme(&PlainTheme)
            .with_prompt(prompt)
            .allow_empty(true)
            .report(false)
            .interact_text()?;
        Ok(line)
    }
}

/// Scripted console for tests: replays queued input and records every output line.
#[cfg(test)]
pub struct ScriptedConsole {
    inputs: std::collections::VecDeque<String>,
    pub output: Vec<Output>,
}

/// One recorded console event.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Clear,
    Plain(String),
    Success(String),
    Failure(String),
    Header(String),
    Help(String),
    Prompt(String),
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }

    pub fn failures(&self) -> Vec<&str> {
        self.output
            .iter()
            .filter_map(|o| match o {
                Output::Failure(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.output
            .iter()
            .filter_map(|o| match o {
                Output::Success(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, expected: &Output) -> usize {
        self.output.iter().filter(|o| *o == expected).count()
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn clear(&mut self) {
        self.output.push(Output::Clear);
    }

    fn say(&mut self, line: &str) {
        self.output.push(Output::Plain(line.to_string()));
    }

    fn success(&mut self, line: &str) {
        self.output.push(Output::Success(line.to_string()));
    }

    fn failure(&mut self, line: &str) {
        self.output.push(Output::Failure(line.to_string()));
    }

    fn header(&mut self, line: &str) {
        self.output.push(Output::Header(line.to_string()));
    }

    fn command_help(&mut self, command: &str, _description: &str) {
        self.output.push(Output::Help(command.to_string()));
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.output.push(Output::Prompt(prompt.to_string()));
        self.inputs.pop_front().ok_or(AppError::Interrupted)
    }
}
