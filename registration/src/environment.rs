//! Registration environment.

use crate::providers::{Navigator, Notifier, RegistrationSink};
use dsss_core::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Delay between a successful registration and the redirect to the event page
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Collaborators injected into [`RegistrationReducer`](crate::RegistrationReducer)
///
/// # Type Parameters
///
/// - `S`: registration sink
pub struct RegistrationEnvironment<S: RegistrationSink> {
    /// Participants table
    pub sink: Arc<S>,
    /// Page navigation
    pub navigator: Arc<dyn Navigator>,
    /// Toast display
    pub notifier: Arc<dyn Notifier>,
    /// Time source for registration timestamps
    pub clock: Arc<dyn Clock>,
    /// Delay before navigating back after success
    pub redirect_delay: Duration,
}

impl<S: RegistrationSink> RegistrationEnvironment<S> {
    /// Environment with the default redirect delay
    #[must_use]
    pub fn new(
        sink: Arc<S>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sink,
            navigator,
            notifier,
            clock,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    /// Override the redirect delay
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }
}

impl<S: RegistrationSink> Clone for RegistrationEnvironment<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            navigator: Arc::clone(&self.navigator),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            redirect_delay: self.redirect_delay,
        }
    }
}
