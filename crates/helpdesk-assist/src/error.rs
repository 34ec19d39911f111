//! Assist-layer error types.

use helpdesk_core::error::HelpdeskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    /// The prompt service did not answer within the deadline.
    /// Retryable.
    #[error("Prompt service timed out")]
    Timeout,

    /// Transport-level failure talking to the prompt service.
    #[error("Prompt service unreachable: {0}")]
    Transport(String),

    /// The prompt service answered with a non-success status.
    #[error("Prompt service returned status {status}")]
    Status { status: u16, retryable: bool },

    /// The response body did not match the flow's output schema.
    #[error("Malformed prompt service response: {0}")]
    Decode(String),
}

impl AssistError {
    /// Whether a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AssistError::Timeout | AssistError::Transport(_) => true,
            AssistError::Status { retryable, .. } => *retryable,
            AssistError::Decode(_) => false,
        }
    }
}

impl From<AssistError> for HelpdeskError {
    fn from(err: AssistError) -> Self {
        let retryable = err.is_retryable();
        HelpdeskError::Upstream {
            message: err.to_string(),
            retryable,
        }
    }
}
