//! Mock provider implementations for testing.
//!
//! In-memory implementations of every provider trait, for unit and
//! integration tests.

pub mod navigator;
pub mod notifier;
pub mod sink;

pub use navigator::RecordingNavigator;
pub use notifier::RecordingNotifier;
pub use sink::MockRegistrationSink;
