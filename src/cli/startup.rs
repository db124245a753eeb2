//! Establishes the session before the shell starts.
//!
//! Loads saved credentials when possible, otherwise asks for them, and keeps
//! asking until the board answers 200. There is no retry limit; only an
//! interrupt leaves the loop early.

use super::console::Console;
use crate::api::BoardApi;
use crate::error::Result;
use crate::models::{BoardId, Credentials, PersistedState, Session};
use crate::store::StateStore;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

const CONNECTION_FAILED: &str = "Unable to connect. Check the data you entered.";

/// Steps of the startup loop.
#[derive(Debug)]
enum Startup {
    TryLoad,
    Prompt { after_failure: bool },
    Check(PersistedState),
}

/// Clears the screen and reads key, token and board id.
///
/// `message` is shown in red above the prompts when given. Nothing is validated here.
pub fn prompt_credentials<C: Console>(
    console: &mut C,
    message: Option<&str>,
) -> Result<PersistedState> {
    console.clear();
    if let Some(message) = message {
        console.failure(message);
    }
    let key = console.read_line("Your API key: ")?;
    let token = console.read_line("Now the token: ")?;
    let board_id = console.read_line("And the board ID: ")?;

    Ok(PersistedState {
        auth_params: Credentials::new(key, token),
        board_id: BoardId::new(board_id),
    })
}

/// Runs the startup state machine and returns the connected session.
///
/// Saves the working credentials, then resolves the long board id. A failed
/// resolution is returned as an error and ends the program.
pub async fn establish_session<A: BoardApi, C: Console>(
    api: &A,
    store: &StateStore,
    console: &mut C,
) -> Result<Session> {
    let mut step = Startup::TryLoad;

    let state = loop {
        step = match step {
            Startup::TryLoad => match store.load() {
                Ok(state) => Startup::Check(state),
                Err(e) => {
                    debug!("Falling back to prompts: {}", e);
                    Startup::Prompt {
                        after_failure: false,
                    }
                },
            },
            Startup::Prompt { after_failure } => {
                let message = after_failure.then_some(CONNECTION_FAILED);
                Startup::Check(prompt_credentials(console, message)?)
            },
            Startup::Check(state) => {
                match api
                    .check_connection(&state.auth_params, &state.board_id)
                    .await
                {
                    Ok(status) if status == StatusCode::OK => break state,
                    Ok(status) => {
                        warn!("Board {} answered {}", state.board_id, status);
                        Startup::Prompt {
                            after_failure: true,
                        }
                    },
                    Err(e) => {
                        warn!("Connection check for board {} failed: {}", state.board_id, e);
                        Startup::Prompt {
                            after_failure: true,
                        }
                    },
                }
            },
        };
    };

    if let Err(e) = store.save(&state.auth_params, &state.board_id) {
        warn!("Could not save state to {}: {}", store.path().display(), e);
    }

    let long_board_id = api
        .resolve_long_board_id(&state.board_id, &state.auth_params)
        .await?;
    info!("Session ready for board {}", state.board_id);

    Ok(Session {
        credentials: state.auth_params,
        board_id: state.board_id,
        long_board_id,
    })
}
