//! Registration providers.
//!
//! Traits for every collaborator the registration workflow talks to. The
//! reducer only sees these traits; the site wires in real implementations
//! and tests use the ones in [`crate::mocks`].
//!
//! - [`RegistrationSink`]: the append-only participants table
//! - [`Navigator`]: moves the user to another page
//! - [`Notifier`]: shows a transient notification (toast)

use crate::error::SubmissionError;
use crate::row::RegistrationRow;
use std::future::Future;

pub mod supabase;

pub use supabase::{SupabaseConfig, SupabaseSink};

/// Append-only store of registration rows.
pub trait RegistrationSink: Send + Sync {
    /// Insert one row
    ///
    /// Returns the row as stored. Called at most once per submission; no
    /// retries and no idempotency key.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] carrying the sink's message, or the
    /// fallback message when the sink gave none.
    fn insert(
        &self,
        row: &RegistrationRow,
    ) -> impl Future<Output = Result<RegistrationRow, SubmissionError>> + Send;
}

/// Page navigation.
pub trait Navigator: Send + Sync {
    /// Navigate to a site path such as `/events/hackml-2026`
    fn navigate(&self, path: &str);
}

/// Severity of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational / success
    Success,
    /// Failure (destructive styling)
    Error,
}

/// A transient message for the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Title line
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notification {
    /// "Success!" notification shown after a completed registration
    #[must_use]
    pub fn registered() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".to_string(),
            message: "Your registration has been completed".to_string(),
        }
    }

    /// "Error" notification carrying the submission error's message
    #[must_use]
    pub fn failed(error: &SubmissionError) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: error.message.clone(),
        }
    }
}

/// Notification display.
pub trait Notifier: Send + Sync {
    /// Show `notification`
    fn notify(&self, notification: Notification);
}
