//! Registration state.

use crate::error::SubmissionError;
use crate::form::RegistrationForm;
use crate::actions::SubmissionId;
use chrono::{DateTime, Utc};
use dsss_events::EventId;

/// Where a submission stands
///
/// `Idle → Submitting → Success | Error`. `Success` is terminal; `Error`
/// allows another attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A write is in flight
    Submitting,
    /// The registration was stored
    Success,
    /// The last write failed
    Error {
        /// Message shown to the user
        message: String,
    },
}

impl SubmissionStatus {
    /// Whether a new submission may start
    #[must_use]
    pub const fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Error { .. })
    }
}

/// State of one registration view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationState {
    /// Event being registered for
    pub event_id: EventId,
    /// Form contents (cleared after a successful submission)
    pub form: RegistrationForm,
    /// Submission progress
    pub status: SubmissionStatus,
    /// Submission in flight, if any
    pub in_flight: Option<SubmissionId>,
    /// Number of writes attempted
    pub attempts: u32,
    /// Most recent failure
    pub last_error: Option<SubmissionError>,
    /// When the registration succeeded
    pub registered_at: Option<DateTime<Utc>>,
    /// Path navigated to after success
    pub redirected_to: Option<String>,
    /// The view was torn down
    pub dismissed: bool,
}

impl RegistrationState {
    /// Fresh state for a registration view of `event_id`
    #[must_use]
    pub fn new(event_id: impl Into<EventId>) -> Self {
        Self {
            event_id: event_id.into(),
            form: RegistrationForm::default(),
            status: SubmissionStatus::Idle,
            in_flight: None,
            attempts: 0,
            last_error: None,
            registered_at: None,
            redirected_to: None,
            dismissed: false,
        }
    }

    /// Whether a write is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }
}
