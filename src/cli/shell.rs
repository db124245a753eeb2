use super::commands::{self, CommandContext};
use super::console::Console;
use crate::api::BoardApi;
use crate::error::Result;
use tracing::{debug, error};

/// A line typed at the `> ` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Tasks,
    CreateTask,
    CreateColumn,
    Move,
    Exit,
    /// Anything unrecognised, including an empty line.
    Help,
}

impl ShellCommand {
    /// Parses a raw input line; case and surrounding whitespace are ignored.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "tasks" => ShellCommand::Tasks,
            "create task" => ShellCommand::CreateTask,
            "create column" => ShellCommand::CreateColumn,
            "move" => ShellCommand::Move,
            "exit" => ShellCommand::Exit,
            _ => ShellCommand::Help,
        }
    }
}

/// The read-eval loop.
///
/// Returns `Ok(())` on `exit`. Errors from a command are shown and the loop goes
/// on, except `AppError::Interrupted`, which is returned to the caller.
pub async fn run<A: BoardApi, C: Console>(
    ctx: &CommandContext<'_, A>,
    console: &mut C,
) -> Result<()> {
    // Starts on help
    let mut command = ShellCommand::Help;

    loop {
        debug!("Dispatching {:?}", command);
        let outcome = match command {
            ShellCommand::Tasks => commands::show_tasks(ctx, console).await.map(|_| ()),
            ShellCommand::CreateTask => commands::create_task(ctx, console).await,
            ShellCommand::CreateColumn => commands::create_column(ctx, console).await,
            ShellCommand::Move => commands::move_task(ctx, console).await,
            ShellCommand::Exit => return Ok(()),
            ShellCommand::Help => {
                commands::show_help(console);
                command = ShellCommand::parse(&console.read_line("> ")?);
                continue;
            },
        };

        if let Err(e) = outcome {
            if e.is_interrupt() {
                return Err(e);
            }
            error!("Command {:?} failed: {:?}", command, e);
            console.failure(&format!("Error: {}", e));
        }

        console.say("\nENTER - go back");
        command = ShellCommand::parse(&console.read_line("> ")?);
    }
}
