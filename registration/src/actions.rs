//! Registration actions.

use crate::error::{IgnoreReason, SubmissionError};
use crate::form::FormField;
use crate::row::RegistrationRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlates a submit request with its outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a new random `SubmissionId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the registration reducer reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum RegistrationAction {
    // ═══════════════════════════════════════════════════════════════════
    // User intents
    // ═══════════════════════════════════════════════════════════════════
    /// A text field changed
    EditField {
        /// Field
        field: FormField,
        /// New value
        value: String,
    },

    /// A "how did you hear" checkbox was clicked
    ToggleHowHeard {
        /// Option label
        option: String,
    },

    /// The form was submitted
    Submit {
        /// Correlation id echoed by the outcome
        submission_id: SubmissionId,
    },

    /// The registration view was torn down
    Dismiss,

    // ═══════════════════════════════════════════════════════════════════
    // Outcomes (produced by effects)
    // ═══════════════════════════════════════════════════════════════════
    /// The sink stored the row
    SubmissionSucceeded {
        /// Correlation id
        submission_id: SubmissionId,
        /// Row as stored
        row: RegistrationRow,
    },

    /// The sink rejected the row
    SubmissionFailed {
        /// Correlation id
        submission_id: SubmissionId,
        /// What went wrong
        error: SubmissionError,
    },

    /// The submit request was not attempted
    SubmitIgnored {
        /// Correlation id
        submission_id: SubmissionId,
        /// Why
        reason: IgnoreReason,
    },

    /// The post-success redirect delay elapsed
    NavigateBack,
}

impl RegistrationAction {
    /// The correlation id if this is the outcome of a submit request
    #[must_use]
    pub const fn outcome_of(&self) -> Option<SubmissionId> {
        match self {
            Self::SubmissionSucceeded { submission_id, .. }
            | Self::SubmissionFailed { submission_id, .. }
            | Self::SubmitIgnored { submission_id, .. } => Some(*submission_id),
            _ => None,
        }
    }
}
