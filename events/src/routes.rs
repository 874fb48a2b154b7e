//! Site paths for event pages.

use crate::types::EventId;

/// Path of the events listing
pub const EVENTS_PATH: &str = "/events";

/// Detail page of an event: `/events/{id}`
#[must_use]
pub fn event_path(id: &EventId) -> String {
    format!("{EVENTS_PATH}/{id}")
}

/// Registration page of an event: `/events/{id}/register`
#[must_use]
pub fn registration_path(id: &EventId) -> String {
    format!("{EVENTS_PATH}/{id}/register")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_embed_the_id() {
        let id = EventId::from("hackml-2026");
        assert_eq!(event_path(&id), "/events/hackml-2026");
        assert_eq!(registration_path(&id), "/events/hackml-2026/register");
    }
}
