//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{Answer, AskBackend, AskRequest, AskResponse, ClientError};
use crate::core::state::{App, Theme};

/// A backend that answers every question with a fixed reply and counts calls.
pub struct StubBackend {
    pub reply: String,
    pub calls: AtomicUsize,
}

impl StubBackend {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AskBackend for StubBackend {
    fn endpoint(&self) -> &str {
        "stub"
    }

    async fn ask(&self, _request: &AskRequest) -> Result<AskResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AskResponse {
            answer: Some(vec![Answer {
                content: self.reply.clone(),
            }]),
        })
    }
}

/// Creates a test App with a StubBackend.
pub fn test_app() -> App {
    App::new(Arc::new(StubBackend::new("stub answer")), Theme::Light)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_backend_counts_calls() {
        let backend = StubBackend::new("hello");
        let request = AskRequest {
            question: "q".to_string(),
            platform: "p".to_string(),
        };
        let response = tokio_test::block_on(backend.ask(&request)).unwrap();
        assert_eq!(response.first_answer().map(|a| a.content.as_str()), Some("hello"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }
}
