//! The uniform error shape shared by transport and backend failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed message for a call that exceeded its timeout.
pub const TIMEOUT_MESSAGE: &str = "リクエストがタイムアウトしました。しばらくしてから再度お試しください。";
/// Fixed message for a transport-level failure with no response.
pub const NETWORK_ERROR_MESSAGE: &str = "ネットワークエラーが発生しました。接続を確認してください。";
/// Generic fallback when an error payload carries no message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "予期しないエラーが発生しました。";
/// Shown when a document lookup returns 404.
pub const DOCUMENT_NOT_FOUND_MESSAGE: &str = "ドキュメントが見つかりませんでした。";

/// Sentinel status for a timed-out call.
pub const STATUS_TIMEOUT: u16 = 408;
/// Sentinel status for a call that produced no response at all.
pub const STATUS_NO_RESPONSE: u16 = 0;

/// The one error shape callers branch on. Whether the failure originated
/// in transport or in the backend application is visible only through
/// `status_code`; the shape is identical.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[error("{error} (status {status_code})")]
pub struct ApiError {
    /// User-facing message.
    pub error: String,
    /// HTTP status, or a sentinel: 408 timeout, 0 no response.
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>, status_code: u16) -> Self {
        Self { error: error.into(), status_code, details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The call exceeded its configured timeout.
    pub fn timeout() -> Self {
        Self::new(TIMEOUT_MESSAGE, STATUS_TIMEOUT)
    }

    /// Transport failed before any response arrived.
    pub fn network() -> Self {
        Self::new(NETWORK_ERROR_MESSAGE, STATUS_NO_RESPONSE)
    }

    /// Build from a non-success HTTP status and its body. A JSON body with
    /// `error`/`details` fields enriches the message; anything else keeps
    /// the status-line fallback.
    pub fn from_status(status_code: u16, status_text: &str, body: &str) -> Self {
        let mut error = Self::new(status_text, status_code);
        if let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(message) = payload.get("error").and_then(|v| v.as_str()) {
                error.error = message.to_string();
            }
            if let Some(details) = payload.get("details").and_then(|v| v.as_str()) {
                error.details = Some(details.to_string());
            }
        }
        error
    }

    /// The user-facing message, falling back to the generic one when the
    /// payload carried nothing.
    pub fn user_message(&self) -> &str {
        if self.error.is_empty() { UNKNOWN_ERROR_MESSAGE } else { &self.error }
    }

    pub fn is_timeout(&self) -> bool {
        self.status_code == STATUS_TIMEOUT
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}
