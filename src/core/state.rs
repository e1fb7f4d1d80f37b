//! # Application State
//!
//! Core state for the helpdesk client. Domain logic only, no TUI types.
//! Presentation state (scroll offsets, input buffer, selected platform)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AskBackend>   // where questions go
//! ├── messages: Vec<ChatMessage>     // the conversation, oldest first
//! ├── theme: Theme                   // light / dark display mode
//! ├── status_message: String         // title bar text
//! ├── next_request_id: RequestId     // id for the next send
//! └── revision: u64                  // bumped on every append
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::AskBackend;

/// Identifies one send so its loading placeholder can be found again.
pub type RequestId = u64;

pub const WELCOME_STATUS: &str = "Ask a question";

/// Display mode. Starts light; the toggle flips it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle: a moon offers dark mode, a sun offers light.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Visual class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    Error,
}

/// One entry in the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Set only on a loading placeholder: the request it is waiting for.
    pub pending: Option<RequestId>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            pending: None,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            pending: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Error,
            content: content.into(),
            pending: None,
        }
    }

    pub fn loading(content: impl Into<String>, request_id: RequestId) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            pending: Some(request_id),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct App {
    pub backend: Arc<dyn AskBackend>,
    pub messages: Vec<ChatMessage>,
    pub theme: Theme,
    pub status_message: String,
    pub next_request_id: RequestId,
    /// Incremented whenever a message is appended, so the view knows to
    /// scroll to the newest entry even when a removal kept the length equal.
    pub revision: u64,
}

impl App {
    pub fn new(backend: Arc<dyn AskBackend>, theme: Theme) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            theme,
            status_message: String::from(WELCOME_STATUS),
            next_request_id: 1,
            revision: 0,
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.revision += 1;
    }

    /// Removes the loading placeholder for `request_id`. Returns whether one
    /// was found.
    pub fn remove_placeholder(&mut self, request_id: RequestId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.pending != Some(request_id));
        self.messages.len() != before
    }

    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading()).count()
    }

    pub fn is_loading(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_loading)
    }

    pub fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
