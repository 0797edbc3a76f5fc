//! Error types for the `assist-chat` crate.
//!
//! Gateway and backend failures travel as the uniform
//! [`assist_core::ApiError`] shape; this enum covers what falls outside
//! that path.

use thiserror::Error;

/// Errors that can occur outside the uniform gateway error path.
#[derive(Debug, Error)]
pub enum AssistChatError {
    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for service operations.
pub type Result<T> = std::result::Result<T, AssistChatError>;
