//! # DSSS Registration
//!
//! Event registration for the DSSS site: the form, its mapping onto the
//! participants table, and the `idle → submitting → success | error`
//! submission state machine.
//!
//! ## Architecture
//!
//! ```text
//! RegistrationSubmitter ──send──▶ Store ──reduce──▶ RegistrationReducer
//!         ▲                         │                      │
//!         └── outcome action ◀──────┴──── effects ◀────────┘
//!                                         (sink insert, toast, redirect)
//! ```
//!
//! The reducer never performs I/O. Writes go through [`RegistrationSink`],
//! toasts through [`Notifier`], and the post-success redirect through
//! [`Navigator`] after a cancellable delay.
//!
//! ## Example
//!
//! ```ignore
//! use dsss_registration::{FormField, RegistrationSubmitter};
//!
//! let submitter = RegistrationSubmitter::new("hackml-2026", environment);
//! submitter.edit(FormField::Email, "ada@sfu.ca").await?;
//! match submitter.submit().await {
//!     Ok(()) => println!("registered"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

// Public modules
pub mod actions;
pub mod environment;
pub mod error;
pub mod form;
pub mod providers;
pub mod reducer;
pub mod row;
pub mod state;
pub mod submission;
pub mod submitter;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::{RegistrationAction, SubmissionId};
pub use environment::{RegistrationEnvironment, DEFAULT_REDIRECT_DELAY};
pub use error::{IgnoreReason, RegistrationError, SubmissionError, FALLBACK_MESSAGE};
pub use form::{FormField, HowHeard, RegistrationForm};
pub use providers::{
    Navigator, Notification, NotificationKind, Notifier, RegistrationSink, SupabaseConfig,
    SupabaseSink,
};
pub use reducer::{RegistrationReducer, REDIRECT};
pub use row::{AdditionalInfo, RegistrationRow};
pub use state::{RegistrationState, SubmissionStatus};
pub use submission::submit;
pub use submitter::RegistrationSubmitter;
