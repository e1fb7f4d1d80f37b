//! # Backend API
//!
//! Wire types and the HTTP client for the `/ask` contract.

pub mod client;
pub mod types;

pub use client::{AskBackend, ClientError, HttpBackend};
pub use types::{Answer, AskRequest, AskResponse, IndexStatus};
