//! Provides a client for interacting with the Trello REST API.
//!
//! This module defines the `BoardApi` trait used by the command handlers and
//! `TrelloClient`, its implementation over `reqwest`.

use crate::error::{AppError, Result};
use crate::models::{BoardId, BoardReport, Column, Credentials, LongBoardId, Task};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_WEB_URL: &str = "https://trello.com";

/// Requests the command handlers need from the board service.
///
/// Mutating calls return the raw status code; whether a non-200 answer counts
/// as a failure is decided by the caller.
#[allow(async_fn_in_trait)]
pub trait BoardApi {
    /// `GET boards/{board_id}`. Transport failures surface as `Err`.
    async fn check_connection(
        &self,
        credentials: &Credentials,
        board_id: &BoardId,
    ) -> Result<StatusCode>;

    /// `GET boards/{board_id}/lists`. Empty when the board has no columns.
    async fn list_columns(
        &self,
        board_id: &BoardId,
        credentials: &Credentials,
    ) -> Result<Vec<Column>>;

    /// `GET lists/{column_id}/cards`. Empty when the column has no tasks.
    async fn list_tasks(&self, column_id: &str, credentials: &Credentials) -> Result<Vec<Task>>;

    /// Reads `b/{board_id}/reports.json` on the web host to learn the long board id.
    async fn resolve_long_board_id(
        &self,
        board_id: &BoardId,
        credentials: &Credentials,
    ) -> Result<LongBoardId>;

    /// `POST cards`
    async fn create_task(
        &self,
        name: &str,
        column_id: &str,
        credentials: &Credentials,
    ) -> Result<StatusCode>;

    /// `POST lists`
    async fn create_column(
        &self,
        name: &str,
        long_board_id: &LongBoardId,
        credentials: &Credentials,
    ) -> Result<StatusCode>;

    /// `PUT cards/{task_id}/idList`
    async fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        credentials: &Credentials,
    ) -> Result<StatusCode>;
}

/// An asynchronous client for the Trello REST API.
pub struct TrelloClient {
    client: Client,
    api_url: String,
    web_url: String,
}

impl TrelloClient {
    /// Creates a new `TrelloClient`.
    ///
    /// `api_url` is the REST root (`https://api.trello.com/1`), `web_url` the
    /// host serving board reports (`https://trello.com`).
    pub fn new(api_url: &str, web_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            web_url: web_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.api_url, resource)
    }

    /// Issues an authenticated GET and decodes a JSON array response.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        credentials: &Credentials,
    ) -> Result<Vec<T>> {
        let url = self.url(resource);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&credentials.as_params())
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Error requesting {}: {}", resource, e);
                AppError::Api(e.into())
            })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let status = e.status().unwrap_or_default();
                error!("Request to {} failed with status {}", resource, status);
                if status == StatusCode::UNAUTHORIZED {
                    error!("Received 401. Check the API key and token.");
                }
                return Err(AppError::Api(e.without_url().into()));
            },
        };

        response.json::<Vec<T>>().await.map_err(|e| {
            let e = e.without_url();
            error!("Error parsing response JSON from {}: {}", resource, e);
            AppError::Api(e.into())
        })
    }
}

fn redact(e: reqwest::Error) -> AppError {
    AppError::Api(e.without_url().into())
}

impl BoardApi for TrelloClient {
    async fn check_connection(
        &self,
        credentials: &Credentials,
        board_id: &BoardId,
    ) -> Result<StatusCode> {
        info!("Checking connection to board {}", board_id);

        let response = self
            .client
            .get(self.url(&format!("boards/{}", board_id)))
            .query(&credentials.as_params())
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if status == StatusCode::OK {
            info!("Connected to board {}", board_id);
        } else {
            warn!("Connection check for board {} returned {}", board_id, status);
        }
        Ok(status)
    }

    async fn list_columns(
        &self,
        board_id: &BoardId,
        credentials: &Credentials,
    ) -> Result<Vec<Column>> {
        let columns: Vec<Column> = self
            .get_json(&format!("boards/{}/lists", board_id), credentials)
            .await?;
        debug!("Board {} has {} columns", board_id, columns.len());
        Ok(columns)
    }

    async fn list_tasks(&self, column_id: &str, credentials: &Credentials) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .get_json(&format!("lists/{}/cards", column_id), credentials)
            .await?;
        debug!("Column {} has {} tasks", column_id, tasks.len());
        Ok(tasks)
    }

    async fn resolve_long_board_id(
        &self,
        board_id: &BoardId,
        credentials: &Credentials,
    ) -> Result<LongBoardId> {
        let url = format!("{}/b/{}/reports.json", self.web_url, board_id);
        info!("Resolving long id for board {}", board_id);

        let body = self
            .client
            .get(&url)
            .query(&credentials.as_params())
            .send()
            .await
            .map_err(redact)?
            .text()
            .await
            .map_err(redact)?;

        let report: BoardReport = serde_json::from_str(&body).map_err(|e| {
            error!("Board report for {} is not valid JSON: {}", board_id, e);
            AppError::Report(format!("malformed report for board {}: {}", board_id, e))
        })?;

        let long_id = report.id.ok_or_else(|| {
            error!("Board report for {} has no id field", board_id);
            AppError::Report(format!("report for board {} has no id", board_id))
        })?;

        debug!("Board {} resolved to {}", board_id, long_id);
        Ok(long_id)
    }

    async fn create_task(
        &self,
        name: &str,
        column_id: &str,
        credentials: &Credentials,
    ) -> Result<StatusCode> {
        info!("Creating task '{}' in column {}", name, column_id);

        let mut form = vec![("name", name), ("idList", column_id)];
        form.extend(credentials.as_params());

        let response = self
            .client
            .post(self.url("cards"))
            .form(&form)
            .send()
            .await
            .map_err(redact)?;

        debug!("Create task returned {}", response.status());
        Ok(response.status())
    }

    async fn create_column(
        &self,
        name: &str,
        long_board_id: &LongBoardId,
        credentials: &Credentials,
    ) -> Result<StatusCode> {
        info!("Creating column '{}' on board {}", name, long_board_id);

        let mut params = vec![("name", name), ("idBoard", long_board_id.as_str())];
        params.extend(credentials.as_params());

        let response = self
            .client
            .post(self.url("lists"))
            .query(&params)
            .send()
            .await
            .map_err(redact)?;

        debug!("Create column returned {}", response.status());
        Ok(response.status())
    }

    async fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        credentials: &Credentials,
    ) -> Result<StatusCode> {
        info!("Moving task {} to column {}", task_id, target_column_id);

        let mut form = vec![("value", target_column_id)];
        form.extend(credentials.as_params());

        let response = self
            .client
            .put(self.url(&format!("cards/{}/idList", task_id)))
            .form(&form)
            .send()
            .await
            .map_err(redact)?;

        debug!("Move task returned {}", response.status());
        Ok(response.status())
    }
}
