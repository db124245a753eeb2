use crate::api::{DEFAULT_API_URL, DEFAULT_WEB_URL};
use crate::error::{AppError, Result};
use crate::store::DEFAULT_STATE_FILE;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Interactive client for the columns and tasks of a Trello board
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File holding the saved API key, token and board id
    #[arg(long, env = "TASKBOARD_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub state_file: PathBuf,

    /// Root of the REST API
    #[arg(long, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Host serving board reports (used to resolve the long board id)
    #[arg(long, env = "TASKBOARD_WEB_URL", default_value = DEFAULT_WEB_URL)]
    pub web_url: String,

    /// How task creation and moves report their outcome
    #[arg(long, env = "TASKBOARD_REPORTING", value_enum, default_value_t = Reporting::Optimistic)]
    pub reporting: Reporting,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, env = "TASKBOARD_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Checks the values clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        for (flag, url) in [("--api-url", &self.api_url), ("--web-url", &self.web_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Cli(format!(
                    "{} must be an http(s) URL, got '{}'",
                    flag, url
                )));
            }
        }
        Ok(())
    }
}

/// Whether create-task and move-task trust the server's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Reporting {
    /// Report success as soon as the target column exists; the response is not inspected.
    Optimistic,
    /// Report success only when the server answers 200.
    Verified,
}
