//! HTTP client for the helpdesk backend.
//!
//! The backend exposes a single question endpoint (`POST /ask`) plus a
//! maintenance hook (`POST /create_index`). Requests have no timeout and are
//! never retried: a failure is reported once and the caller moves on.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{AskRequest, AskResponse, IndexStatus};

pub const ASK_PATH: &str = "/ask";
pub const CREATE_INDEX_PATH: &str = "/create_index";

/// Errors that can occur while talking to the backend.
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (DNS, connection refused, reset).
    Network(String),
    /// The backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Anything that can answer a question.
///
/// The TUI holds an `Arc<dyn AskBackend>` so tests can swap the HTTP client
/// for a canned one.
#[async_trait]
pub trait AskBackend: Send + Sync {
    /// Where requests go, for the title bar and logs.
    fn endpoint(&self) -> &str;

    /// Posts the question and returns the parsed response.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, ClientError>;
}

/// `AskBackend` over plain HTTP + JSON.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks the backend to rebuild its search index.
    pub async fn create_index(&self) -> Result<IndexStatus, ClientError> {
        let url = format!("{}{}", self.base_url, CREATE_INDEX_PATH);
        info!("Requesting index rebuild at {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json::<IndexStatus>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AskBackend for HttpBackend {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, ClientError> {
        let url = format!("{}{}", self.base_url, ASK_PATH);
        info!(
            "POST {} (platform={}, question_len={})",
            url,
            request.platform,
            request.question.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        debug!("Backend response status: {}", response.status());
        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        debug!("API response: {}", body);

        serde_json::from_str::<AskResponse>(&body).map_err(|e| {
            warn!("Unparseable backend response: {}", e);
            ClientError::Parse(e.to_string())
        })
    }
}

/// Turns a non-2xx response into `ClientError::Api`, keeping the body text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Backend error: {} - {}", status, message);
    Err(ClientError::Api { status, message })
}
