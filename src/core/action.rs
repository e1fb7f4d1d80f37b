//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Backend responds? That's `Action::AskResolved`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` telling the adapter what I/O to perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{AskRequest, AskResponse, ClientError};
use crate::core::reply::{self, EMPTY_QUESTION, LOADING};
use crate::core::state::{App, ChatMessage, RequestId};

#[derive(Debug)]
pub enum Action {
    /// Flip light/dark mode.
    ToggleTheme,
    /// Send the input box contents. `question` is the raw, untrimmed text.
    Submit { question: String, platform: String },
    /// A send finished, one way or the other.
    AskResolved {
        request_id: RequestId,
        result: Result<AskResponse, ClientError>,
    },
    Quit,
}

/// What the adapter must do after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Post `request` to the backend and report back with `AskResolved`.
    /// The adapter also clears the input box.
    SpawnAsk {
        request_id: RequestId,
        request: AskRequest,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("Theme: {}", app.theme.label());
            debug!("Theme toggled to {:?}", app.theme);
            Effect::None
        }
        Action::Submit { question, platform } => {
            let question = question.trim();
            if question.is_empty() {
                app.push_message(ChatMessage::error(EMPTY_QUESTION));
                return Effect::None;
            }

            let request_id = app.allocate_request_id();
            app.push_message(ChatMessage::user(question));
            app.push_message(ChatMessage::loading(LOADING, request_id));
            app.status_message = String::from("Waiting for answer...");
            info!("Submitting request {} (platform={})", request_id, platform);

            Effect::SpawnAsk {
                request_id,
                request: AskRequest {
                    question: question.to_string(),
                    platform,
                },
            }
        }
        Action::AskResolved { request_id, result } => {
            if !app.remove_placeholder(request_id) {
                warn!("No loading placeholder for request {}", request_id);
            }
            match &result {
                Ok(response) => debug!("Request {} resolved: {:?}", request_id, response),
                Err(e) => warn!("Request {} failed: {}", request_id, e),
            }
            app.push_message(reply::reply_message(&result));
            app.status_message = if app.is_loading() {
                String::from("Waiting for answer...")
            } else {
                String::from("Ready")
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
