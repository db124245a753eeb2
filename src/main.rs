mod api;
mod cli;
mod error;
mod models;
mod store;

use api::TrelloClient;
use clap::Parser;
use cli::{CommandContext, TerminalConsole};
use colored::*;
use error::{AppError, Result};
use std::path::Path;
use std::process;
use std::sync::{Arc, Mutex};
use store::StateStore;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl+C or end of input.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Filter used when `RUST_LOG` is unset: nothing on the interactive screen,
/// `info` when logging to a file.
fn default_log_filter(to_file: bool) -> &'static str {
    if to_file {
        "info"
    } else {
        "off"
    }
}

fn env_filter(to_file: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_filter(to_file)))
}

/// Sends logs to stderr, or to a daily file under `log_dir`.
fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "taskboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(true))
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(false))
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}

/// File writer guard, shared with the Ctrl+C task.
type LogGuard = Arc<Mutex<Option<WorkerGuard>>>;

/// Drops the file writer guard so buffered log lines reach the file.
fn flush_logs(log_guard: &LogGuard) {
    if let Ok(mut guard) = log_guard.lock() {
        drop(guard.take());
    }
}

fn farewell(log_guard: &LogGuard) -> ! {
    info!("Exiting after interrupt");
    flush_logs(log_guard);
    println!("\nBye!");
    process::exit(INTERRUPTED_EXIT_CODE);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the environment
    dotenv::dotenv().ok();
    let args = cli::Cli::parse();
    let log_guard: LogGuard = Arc::new(Mutex::new(init_logging(args.log_dir.as_deref())));

    if let Err(e) = args.validate() {
        error!("Invalid configuration: {}", e);
        println!("{}", e.to_string().red());
        return Err(e);
    }

    info!("Starting taskboard client, state file {}", args.state_file.display());

    // Ctrl+C while a request is in flight; prompts report it through AppError::Interrupted
    let signal_log_guard = Arc::clone(&log_guard);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C");
            farewell(&signal_log_guard);
        }
    });

    let api = TrelloClient::new(&args.api_url, &args.web_url);
    let store = StateStore::new(&args.state_file);
    let mut console = TerminalConsole::new();

    let session = match cli::establish_session(&api, &store, &mut console).await {
        Ok(session) => session,
        Err(AppError::Interrupted) => farewell(&log_guard),
        Err(e) => {
            error!("Failed to start session: {:?}", e);
            println!(
                "{} {}",
                "Error: could not prepare the board session:".red(),
                e.to_string().red()
            );
            return Err(e);
        },
    };

    let ctx = CommandContext {
        api: &api,
        session: &session,
        reporting: args.reporting,
    };

    match cli::run(&ctx, &mut console).await {
        Ok(()) => {
            info!("Exiting on user request");
            println!("{}", "Bye!".green());
            Ok(())
        },
        Err(AppError::Interrupted) => farewell(&log_guard),
        Err(e) => {
            error!("Shell stopped: {:?}", e);
            Err(e)
        },
    }
}
