//! Error types for registration.

use dsss_runtime::StoreError;
use thiserror::Error;

/// Message used when the sink reports a failure without one
pub const FALLBACK_MESSAGE: &str = "Failed to complete registration. Please try again.";

/// A failed registration write
///
/// The only error a submission produces. It is shown to the user once and
/// the form stays available for another attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    /// Text shown to the user
    pub message: String,
}

impl SubmissionError {
    /// Error with the sink's message, or the fallback when it is empty
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            return Self::fallback();
        }
        Self { message }
    }

    /// Error with the generic fallback message
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Why a submit request was not attempted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A write is already in flight
    InFlight,
    /// A previous submission succeeded
    AlreadyRegistered,
    /// The registration view was dismissed
    Dismissed,
}

/// Errors returned by [`RegistrationSubmitter`](crate::RegistrationSubmitter)
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The sink rejected the write
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Another submission is still in flight
    #[error("a registration is already being submitted")]
    AlreadySubmitting,

    /// This view already registered successfully
    #[error("registration already completed")]
    AlreadyRegistered,

    /// The registration view was dismissed
    #[error("registration view was dismissed")]
    Dismissed,

    /// The store runtime failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<IgnoreReason> for RegistrationError {
    fn from(reason: IgnoreReason) -> Self {
        match reason {
            IgnoreReason::InFlight => Self::AlreadySubmitting,
            IgnoreReason::AlreadyRegistered => Self::AlreadyRegistered,
            IgnoreReason::Dismissed => Self::Dismissed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        assert_eq!(SubmissionError::new("duplicate key").to_string(), "duplicate key");
    }

    #[test]
    fn empty_message_falls_back() {
        assert_eq!(SubmissionError::new("").message, FALLBACK_MESSAGE);
        assert_eq!(SubmissionError::fallback().message, FALLBACK_MESSAGE);
    }

    #[test]
    fn whitespace_message_is_kept() {
        assert_eq!(SubmissionError::new("  ").message, "  ");
    }

    #[test]
    fn submission_errors_pass_through() {
        let error = RegistrationError::from(SubmissionError::new("duplicate key"));
        assert_eq!(error.to_string(), "duplicate key");
        assert!(matches!(
            RegistrationError::from(IgnoreReason::InFlight),
            RegistrationError::AlreadySubmitting
        ));
    }
}
