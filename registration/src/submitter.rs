//! Store-backed registration facade.

use crate::actions::{RegistrationAction, SubmissionId};
use crate::environment::RegistrationEnvironment;
use crate::error::RegistrationError;
use crate::form::{FormField, RegistrationForm};
use crate::providers::RegistrationSink;
use crate::reducer::RegistrationReducer;
use crate::state::{RegistrationState, SubmissionStatus};
use dsss_events::EventId;
use dsss_runtime::Store;
use std::time::Duration;

/// Store type driving one registration view
pub type RegistrationStore<S> =
    Store<RegistrationState, RegistrationAction, RegistrationEnvironment<S>, RegistrationReducer<S>>;

/// How long [`RegistrationSubmitter::submit`] waits for an outcome by default
pub const DEFAULT_OUTCOME_TIMEOUT: Duration = Duration::from_secs(60);

/// One registration view's submitter
///
/// Wraps a [`Store`] running [`RegistrationReducer`]. The form lives in the
/// store; `submit` sends it and waits for the correlated outcome.
///
/// # Example
///
/// ```ignore
/// let submitter = RegistrationSubmitter::new("hackml-2026", environment);
/// submitter.edit(FormField::FirstName, "Ada").await?;
/// submitter.toggle_how_heard("Discord").await?;
/// submitter.submit().await?;
/// ```
pub struct RegistrationSubmitter<S: RegistrationSink + 'static> {
    store: RegistrationStore<S>,
    outcome_timeout: Duration,
}

impl<S: RegistrationSink + 'static> RegistrationSubmitter<S> {
    /// Submitter for `event_id` with an empty form
    #[must_use]
    pub fn new(event_id: impl Into<EventId>, environment: RegistrationEnvironment<S>) -> Self {
        Self {
            store: Store::new(
                RegistrationState::new(event_id),
                RegistrationReducer::new(),
                environment,
            ),
            outcome_timeout: DEFAULT_OUTCOME_TIMEOUT,
        }
    }

    /// Override how long `submit` waits for the sink
    #[must_use]
    pub const fn with_outcome_timeout(mut self, timeout: Duration) -> Self {
        self.outcome_timeout = timeout;
        self
    }

    /// Set a text field
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Store`] once the submitter is shut down.
    pub async fn edit(&self, field: FormField, value: impl Into<String>) -> Result<(), RegistrationError> {
        self.store
            .send(RegistrationAction::EditField {
                field,
                value: value.into(),
            })
            .await?;
        Ok(())
    }

    /// Toggle a "how did you hear" option
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Store`] once the submitter is shut down.
    pub async fn toggle_how_heard(&self, option: impl Into<String>) -> Result<(), RegistrationError> {
        self.store
            .send(RegistrationAction::ToggleHowHeard {
                option: option.into(),
            })
            .await?;
        Ok(())
    }

    /// Fill every field from `form`
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Store`] once the submitter is shut down.
    pub async fn fill(&self, form: &RegistrationForm) -> Result<(), RegistrationError> {
        for field in FormField::ALL {
            self.edit(field, form.get(field)).await?;
        }
        let current = self.form().await;
        for option in current.how_heard.iter() {
            self.toggle_how_heard(option).await?;
        }
        for option in form.how_heard.iter() {
            self.toggle_how_heard(option).await?;
        }
        Ok(())
    }

    /// Submit the current form and wait for the outcome
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Submission`]: the sink rejected the write
    /// - [`RegistrationError::AlreadySubmitting`]: a write is in flight
    /// - [`RegistrationError::AlreadyRegistered`]: this view already succeeded
    /// - [`RegistrationError::Dismissed`]: the view was dismissed
    /// - [`RegistrationError::Store`]: timeout, or shutdown before the outcome
    ///   was applied (an insert already sent is not rolled back)
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self) -> Result<(), RegistrationError> {
        let submission_id = SubmissionId::new();

        let outcome = self
            .store
            .send_and_wait_for(
                RegistrationAction::Submit { submission_id },
                |action| action.outcome_of() == Some(submission_id),
                self.outcome_timeout,
            )
            .await?;

        match outcome {
            RegistrationAction::SubmissionFailed { error, .. } => Err(error.into()),
            RegistrationAction::SubmitIgnored { reason, .. } => Err(reason.into()),
            _ => Ok(()),
        }
    }

    /// Current submission status
    pub async fn status(&self) -> SubmissionStatus {
        self.store.state(|s| s.status.clone()).await
    }

    /// Current form contents
    pub async fn form(&self) -> RegistrationForm {
        self.store.state(|s| s.form.clone()).await
    }

    /// Snapshot of the whole state
    pub async fn snapshot(&self) -> RegistrationState {
        self.store.state(Clone::clone).await
    }

    /// Tear the view down: cancels a pending redirect
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Store`] once the submitter is shut down.
    pub async fn dismiss(&self) -> Result<(), RegistrationError> {
        self.store.send(RegistrationAction::Dismiss).await?;
        Ok(())
    }

    /// Stop the store, aborting any scheduled redirect
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Store`] if in-flight work outlives `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), RegistrationError> {
        self.store.shutdown(timeout).await?;
        Ok(())
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &RegistrationStore<S> {
        &self.store
    }
}
