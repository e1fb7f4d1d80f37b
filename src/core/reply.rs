//! # Reply Rendering
//!
//! Fixed user-facing texts and the mapping from a backend result to the one
//! message that ends a request.

use crate::api::{AskResponse, ClientError};
use crate::core::state::ChatMessage;

pub const EMPTY_QUESTION: &str = "Please enter a question!";
pub const LOADING: &str = "Thinking...";
pub const QUOTA_WARNING: &str = "⚠️ OpenAI API quota exceeded. Try again later.";
pub const NO_ANSWER: &str = "No answer found.";
pub const CONNECT_ERROR: &str = "Error: Unable to connect. Try again later.";

/// Case-sensitive marker the backend puts in its quota message.
const QUOTA_MARKER: &str = "quota exceeded";

/// Builds the terminal message for a resolved request.
///
/// - first answer present: its content as a bot message, unless it mentions
///   the quota marker, which becomes the fixed quota warning
/// - answer list empty or absent: `NO_ANSWER`
/// - any transport, status, or parse failure: `CONNECT_ERROR`
pub fn reply_message(result: &Result<AskResponse, ClientError>) -> ChatMessage {
    match result {
        Ok(response) => match response.first_answer() {
            Some(answer) if answer.content.contains(QUOTA_MARKER) => {
                ChatMessage::error(QUOTA_WARNING)
            }
            Some(answer) => ChatMessage::bot(answer.content.clone()),
            None => ChatMessage::error(NO_ANSWER),
        },
        Err(_) => ChatMessage::error(CONNECT_ERROR),
    }
}
