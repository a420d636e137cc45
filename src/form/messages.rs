//! User-visible status messages
//!
//! The text of every message the form can show lives here.

use super::Operation;
use crate::api::ApiError;
use std::fmt;

/// Fallback when the backend rejects a request without a message
const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// Severity of a status message (drives colour and exit status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// A message shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub(super) fn empty_input() -> Self {
        Self::new(MessageKind::Error, "Please enter a URL to shorten.")
    }

    pub(super) fn nothing_to_delete() -> Self {
        Self::new(MessageKind::Info, "No short URL to delete.")
    }

    pub(super) fn created() -> Self {
        Self::new(MessageKind::Success, "URL shortened successfully!")
    }

    pub(super) fn deleted(key: &str) -> Self {
        Self::new(
            MessageKind::Success,
            format!("Successfully deleted short URL for key: {}", key),
        )
    }

    pub(super) fn copied() -> Self {
        Self::new(MessageKind::Success, "Short URL copied to clipboard!")
    }

    pub(super) fn failed(operation: Operation, error: &ApiError) -> Self {
        let text = match (operation, error) {
            (Operation::Create, ApiError::Transport(detail)) => format!(
                "Network error: {}. Please ensure the backend is running.",
                detail
            ),
            (Operation::Delete, ApiError::Transport(detail)) => {
                format!("Network error: {}", detail)
            }
            (Operation::Create, ApiError::Rejected { message, .. }) => {
                format!("Error: {}", payload_message(message.as_deref()))
            }
            (Operation::Delete, ApiError::Rejected { message, .. }) => {
                format!("Error deleting URL: {}", payload_message(message.as_deref()))
            }
            (Operation::Create, invalid @ ApiError::InvalidResponse(_)) => {
                format!("Error: {}", invalid)
            }
            (Operation::Delete, invalid @ ApiError::InvalidResponse(_)) => {
                format!("Error deleting URL: {}", invalid)
            }
        };
        Self::new(MessageKind::Error, text)
    }
}

/// The backend's message, or the fallback when it is missing or blank
fn payload_message(message: Option<&str>) -> &str {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
