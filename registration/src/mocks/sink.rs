//! Mock registration sink for testing.

use crate::error::SubmissionError;
use crate::providers::RegistrationSink;
use crate::row::RegistrationRow;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Mock registration sink.
///
/// Records every row it is asked to insert. Succeeds by default; call
/// [`fail_with`](Self::fail_with) to make later inserts fail.
#[derive(Debug, Clone, Default)]
pub struct MockRegistrationSink {
    failure: Arc<Mutex<Option<String>>>,
    rows: Arc<Mutex<Vec<RegistrationRow>>>,
    latency: Option<Duration>,
}

impl MockRegistrationSink {
    /// Create a sink that acknowledges every insert.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose inserts fail with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        let sink = Self::new();
        sink.fail_with(message);
        sink
    }

    /// Wait `latency` before answering each insert.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make later inserts fail with `message` (an empty message means the
    /// sink gave no message).
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Make later inserts succeed.
    pub fn succeed(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Every row received, in order (failed inserts included).
    #[must_use]
    pub fn received(&self) -> Vec<RegistrationRow> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of inserts attempted.
    #[must_use]
    pub fn insert_count(&self) -> usize {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl RegistrationSink for MockRegistrationSink {
    fn insert(
        &self,
        row: &RegistrationRow,
    ) -> impl Future<Output = Result<RegistrationRow, SubmissionError>> + Send {
        let row = row.clone();
        let rows = Arc::clone(&self.rows);
        let failure = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let latency = self.latency;

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            rows.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(row.clone());

            match failure {
                Some(message) => Err(SubmissionError::new(message)),
                None => Ok(row),
            }
        }
    }
}
