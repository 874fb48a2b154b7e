//! Recording navigator for testing.

use crate::providers::Navigator;
use std::sync::{Arc, Mutex, PoisonError};

/// Navigator that records requested paths instead of navigating.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths navigated to, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
