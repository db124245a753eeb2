//! In-memory `BoardApi` for command and shell tests.

use crate::api::BoardApi;
use crate::error::{AppError, Result};
use crate::models::{BoardId, Column, Credentials, LongBoardId, Session, Task};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A request the code under test issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckConnection { key: String, board_id: String },
    ListColumns,
    ListTasks(String),
    ResolveLongBoardId,
    CreateTask { name: String, column_id: String },
    CreateColumn { name: String, long_board_id: String },
    MoveTask { task_id: String, column_id: String },
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateTask { .. } | Call::CreateColumn { .. } | Call::MoveTask { .. }
        )
    }
}

#[derive(Default)]
struct MockBoardState {
    columns: Vec<(Column, Vec<Task>)>,
    calls: Vec<Call>,
    // Answers for successive connection checks; exhausted means 200
    connection_statuses: VecDeque<StatusCode>,
    // Successive connection checks that fail before any status is answered
    connection_errors: usize,
    mutation_status: Option<StatusCode>,
    report_missing: bool,
    list_columns_fails: bool,
}

#[derive(Clone, Default)]
pub struct MockBoard {
    state: Arc<Mutex<MockBoardState>>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session() -> Session {
        Session {
            credentials: Credentials::new("k1", "t1"),
            board_id: BoardId::new("b1"),
            long_board_id: LongBoardId::for_tests("long-b1"),
        }
    }

    pub fn with_column(self, id: &str, name: &str, tasks: &[(&str, &str)]) -> Self {
        let column = Column {
            id: id.to_string(),
            name: name.to_string(),
        };
        let tasks = tasks
            .iter()
            .map(|(id, name)| Task {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        self.state.lock().unwrap().columns.push((column, tasks));
        self
    }

    pub fn with_mutation_status(self, status: StatusCode) -> Self {
        self.state.lock().unwrap().mutation_status = Some(status);
        self
    }

    pub fn with_connection_statuses(self, statuses: &[StatusCode]) -> Self {
        self.state.lock().unwrap().connection_statuses = statuses.iter().copied().collect();
        self
    }

    /// Makes the next connection check fail as if the network were down.
    pub fn with_connection_error(self) -> Self {
        self.state.lock().unwrap().connection_errors += 1;
        self
    }

    /// Makes every `list_columns` call fail.
    pub fn with_failing_list_columns(self) -> Self {
        self.state.lock().unwrap().list_columns_fails = true;
        self
    }

    pub fn with_missing_report(self) -> Self {
        self.state.lock().unwrap().report_missing = true;
        self
    }

    pub fn snapshot(&self) -> Vec<(Column, Vec<Task>)> {
        self.state.lock().unwrap().columns.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn mutation_status(&self) -> StatusCode {
        self.state
            .lock()
            .unwrap()
            .mutation_status
            .unwrap_or(StatusCode::OK)
    }
}

impl BoardApi for MockBoard {
    async fn check_connection(
        &self,
        credentials: &Credentials,
        board_id: &BoardId,
    ) -> Result<StatusCode> {
        self.record(Call::CheckConnection {
            key: credentials.key.clone(),
            board_id: board_id.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        if state.connection_errors > 0 {
            state.connection_errors -= 1;
            return Err(AppError::Cli("connection refused".into()));
        }
        Ok(state.connection_statuses.pop_front().unwrap_or(StatusCode::OK))
    }

    async fn list_columns(
        &self,
        _board_id: &BoardId,
        _credentials: &Credentials,
    ) -> Result<Vec<Column>> {
        self.record(Call::ListColumns);
        if self.state.lock().unwrap().list_columns_fails {
            return Err(AppError::Cli("list failed".into()));
        }
        Ok(self.snapshot().into_iter().map(|(c, _)| c).collect())
    }

    async fn list_tasks(&self, column_id: &str, _credentials: &Credentials) -> Result<Vec<Task>> {
        self.record(Call::ListTasks(column_id.to_string()));
        Ok(self
            .snapshot()
            .into_iter()
            .find(|(c, _)| c.id == column_id)
            .map(|(_, tasks)| tasks)
            .unwrap_or_default())
    }

    async fn resolve_long_board_id(
        &self,
        board_id: &BoardId,
        _credentials: &Credentials,
    ) -> Result<LongBoardId> {
        self.record(Call::ResolveLongBoardId);
        if self.state.lock().unwrap().report_missing {
            return Err(AppError::Report("report has no id".into()));
        }
        Ok(LongBoardId::for_tests(&format!("long-{}", board_id)))
    }

    async fn create_task(
        &self,
        name: &str,
        column_id: &str,
        _credentials: &Credentials,
    ) -> Result<StatusCode> {
        self.record(Call::CreateTask {
            name: name.to_string(),
            column_id: column_id.to_string(),
        });
        Ok(self.mutation_status())
    }

    async fn create_column(
        &self,
        name: &str,
        long_board_id: &LongBoardId,
        _credentials: &Credentials,
    ) -> Result<StatusCode> {
        self.record(Call::CreateColumn {
            name: name.to_string(),
            long_board_id: long_board_id.to_string(),
        });
        Ok(self.mutation_status())
    }

    async fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        _credentials: &Credentials,
    ) -> Result<StatusCode> {
        self.record(Call::MoveTask {
            task_id: task_id.to_string(),
            column_id: target_column_id.to_string(),
        });
        Ok(self.mutation_status())
    }
}
