//! # DSSS Testing
//!
//! Testing utilities for reducers built on `dsss-core`.
//!
//! This crate provides:
//! - [`ReducerTest`]: a Given/When/Then harness for reducers
//! - [`assertions`]: helpers for inspecting returned effects
//! - [`FixedClock`]: deterministic time
//!
//! Mock collaborators for a feature live next to the feature's traits (for
//! example `dsss_registration::mocks`), so this crate depends on nothing but
//! the core.
//!
//! ## Example
//!
//! ```ignore
//! use dsss_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(RegistrationReducer::new())
//!     .with_env(test_environment())
//!     .given_state(RegistrationState::new("hackml-2026"))
//!     .when_action(RegistrationAction::Dismiss)
//!     .then_effects(|effects| assertions::assert_has_cancel_effect(effects, &REDIRECT))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use dsss_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of core environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use dsss_testing::mocks::FixedClock;
    /// use dsss_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// 2025-01-01T00:00:00Z as a unix timestamp
    const TEST_EPOCH: i64 = 1_735_689_600;

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(TEST_EPOCH, 0).unwrap_or_default())
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};
