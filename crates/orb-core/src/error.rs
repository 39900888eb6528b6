//! Error types for the orb core.

use thiserror::Error;

/// Result type for submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Why a name submission did not start a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The name was empty after sanitization.
    #[error("Введи имя, чтобы шар увидел нить судьбы.")]
    EmptyName,

    /// A prediction is already in flight.
    #[error("the orb is still thinking")]
    Busy,
}

/// Failures of a platform share call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The platform has no share capability for files.
    #[error("sharing is not supported on this platform")]
    Unsupported,

    /// The user dismissed the share sheet.
    #[error("share cancelled")]
    Cancelled,

    /// The platform refused or failed the share.
    #[error("share failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_message_is_user_facing() {
        assert_eq!(
            SubmitError::EmptyName.to_string(),
            "Введи имя, чтобы шар увидел нить судьбы."
        );
    }

    #[test]
    fn share_failure_carries_reason() {
        let err = ShareError::Failed("denied".to_string());
        assert_eq!(err.to_string(), "share failed: denied");
    }
}
