//! Terminal implementations of the registration collaborators.

use dsss_registration::{Navigator, Notification, NotificationKind, Notifier};

/// Navigator that reports the target page instead of rendering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(%path, "Navigating");
        println!("→ {path}");
    }
}

/// Notifier that prints toasts to stdout (stderr for failures).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{}: {}", notification.title, notification.message);
            },
            NotificationKind::Error => {
                eprintln!("{}: {}", notification.title, notification.message);
            },
        }
    }
}
