use super::args::Reporting;
use super::console::Console;
use crate::api::BoardApi;
use crate::error::Result;
use crate::models::{Column, Session, Task, TaskMatch};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Everything a command needs besides the terminal.
pub struct CommandContext<'a, A> {
    pub api: &'a A,
    pub session: &'a Session,
    pub reporting: Reporting,
}

/// Columns of the board, each with its tasks, in board order.
pub type BoardSnapshot = Vec<(Column, Vec<Task>)>;

const SEPARATOR_WIDTH: usize = 60;

/// Prints the command list.
pub fn show_help<C: Console>(console: &mut C) {
    console.clear();
    console.say("Commands:");
    console.command_help("tasks", "show every column on the board with its tasks");
    console.command_help("create task", "create a task");
    console.command_help("create column", "create a column");
    console.command_help("move", "move a task to another column");
    console.command_help("exit", "quit");
    console.say("");
}

/// Fetches and prints every column with its tasks.
///
/// Returns what was rendered so callers can look up columns and tasks without
/// asking the server again. An empty board prints a single notice and issues no
/// task requests.
pub async fn show_tasks<A: BoardApi, C: Console>(
    ctx: &CommandContext<'_, A>,
    console: &mut C,
) -> Result<BoardSnapshot> {
    console.clear();
    let Session {
        credentials,
        board_id,
        ..
    } = ctx.session;

    let columns = ctx.api.list_columns(board_id, credentials).await?;
    if columns.is_empty() {
        console.say("No columns created");
        return Ok(Vec::new());
    }

    let mut snapshot = Vec::with_capacity(columns.len());
    for column in columns {
        let tasks = ctx.api.list_tasks(&column.id, credentials).await?;
        console.header(&format!("{} [{}]", column.name, tasks.len()));

        if tasks.is_empty() {
            console.say("  No tasks!");
        } else {
            for task in &tasks {
                console.say(&format!("  {}", task.name));
            }
            console.say(&"_".repeat(SEPARATOR_WIDTH));
        }
        snapshot.push((column, tasks));
    }

    Ok(snapshot)
}

/// Finds the first column whose name matches exactly.
pub fn find_column<'s>(snapshot: &'s BoardSnapshot, name: &str) -> Option<&'s Column> {
    snapshot
        .iter()
        .map(|(column, _)| column)
        .find(|column| column.name == name)
}

/// Collects every task named exactly `name`, across all columns, in board order.
pub fn find_tasks(snapshot: &BoardSnapshot, name: &str) -> Vec<TaskMatch> {
    snapshot
        .iter()
        .flat_map(|(column, tasks)| {
            tasks
                .iter()
                .filter(move |task| task.name == name)
                .map(move |task| TaskMatch {
                    task_id: task.id.clone(),
                    column_name: column.name.clone(),
                })
        })
        .collect()
}

/// Turns user input into a zero-based index into `count` choices.
///
/// Accepts `1..=count`; anything else (not a number, zero, negative, too large) is `None`.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let n: i64 = input.trim().parse().ok()?;
    if n < 1 {
        return None;
    }
    let index = usize::try_from(n - 1).ok()?;
    (index < count).then_some(index)
}

/// Asks which of several same-named tasks is meant, until a valid number is entered.
fn choose_task<C: Console>(
    console: &mut C,
    name: &str,
    matches: &[TaskMatch],
) -> Result<usize> {
    console.success(&format!("\nTasks found: {}", matches.len()));
    for (i, m) in matches.iter().enumerate() {
        console.say(&format!("{}. {} in [{}]", i + 1, name, m.column_name));
    }
    console.say("");

    loop {
        let input = console.read_line("Enter the number of the task: ")?;
        match parse_selection(&input, matches.len()) {
            Some(index) => return Ok(index),
            None => {
                debug!("Rejected task selection {:?}", input);
                console.failure("Invalid value");
            },
        }
    }
}

/// Reports the outcome of create-task/move according to the reporting mode.
fn mutation_succeeded(reporting: Reporting, status: StatusCode) -> bool {
    match reporting {
        Reporting::Optimistic => true,
        Reporting::Verified => status == StatusCode::OK,
    }
}

/// Creates a task in a column picked by exact name.
///
/// No request is issued when the column does not exist.
pub async fn create_task<A: BoardApi, C: Console>(
    ctx: &CommandContext<'_, A>,
    console: &mut C,
) -> Result<()> {
    let snapshot = show_tasks(ctx, console).await?;
    let column_name = console.read_line("Which column should it go in?: ")?;
    let name = console.read_line("Task: ")?;

    let Some(column) = find_column(&snapshot, &column_name) else {
        info!("No column named '{}', task not created", column_name);
        console.failure("Task was not added!");
        return Ok(());
    };

    let status = ctx
        .api
        .create_task(&name, &column.id, &ctx.session.credentials)
        .await?;

    if mutation_succeeded(ctx.reporting, status) {
        console.success(&format!(
            "Task [{}] successfully added to [{}]",
            name, column_name
        ));
    } else {
        warn!("Creating task '{}' returned {}", name, status);
        console.failure(&format!(
            "Task [{}] was not added to [{}] (server answered {})",
            name, column_name, status
        ));
    }
    Ok(())
}

/// Creates a column, insisting on a non-empty name.
pub async fn create_column<A: BoardApi, C: Console>(
    ctx: &CommandContext<'_, A>,
    console: &mut C,
) -> Result<()> {
    console.clear();
    let mut column_name = console.read_line("New column name: ")?;

    while column_name.is_empty() {
        console.clear();
        console.failure("The name cannot be empty");
        column_name = console.read_line("New column name: ")?;
    }

    let status = ctx
        .api
        .create_column(
            &column_name,
            &ctx.session.long_board_id,
            &ctx.session.credentials,
        )
        .await?;

    if status == StatusCode::OK {
        console.success(&format!("Column [{}] successfully created", column_name));
    } else {
        warn!("Creating column '{}' returned {}", column_name, status);
        console.failure(&format!("Could not create column [{}]", column_name));
    }
    Ok(())
}

/// Moves a task, picked by exact name, to a column picked by exact name.
///
/// When several tasks share the name the user chooses one by number. No request
/// is issued when the task or the destination column does not exist.
pub async fn move_task<A: BoardApi, C: Console>(
    ctx: &CommandContext<'_, A>,
    console: &mut C,
) -> Result<()> {
    let snapshot = show_tasks(ctx, console).await?;
    let name = console.read_line("Which task should be moved: ")?;

    let matches = find_tasks(&snapshot, &name);
    let task = match matches.len() {
        0 => {
            info!("No task named '{}'", name);
            console.failure("Task not found");
            return Ok(());
        },
        1 => &matches[0],
        _ => &matches[choose_task(console, &name, &matches)?],
    };

    let column_name = console.read_line("Which column should it go to?: ")?;
    let Some(column) = find_column(&snapshot, &column_name) else {
        info!("No column named '{}', task not moved", column_name);
        console.failure("Task was not moved!");
        return Ok(());
    };

    let status = ctx
        .api
        .move_task(&task.task_id, &column.id, &ctx.session.credentials)
        .await?;

    if mutation_succeeded(ctx.reporting, status) {
        console.success(&format!("Task [{}] moved to [{}]", name, column_name));
    } else {
        warn!("Moving task {} returned {}", task.task_id, status);
        console.failure(&format!(
            "Task [{}] was not moved to [{}] (server answered {})",
            name, column_name, status
        ));
    }
    Ok(())
}
