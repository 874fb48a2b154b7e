//! The event catalog and its query operations.

use crate::error::{CatalogError, Result};
use crate::types::{Event, EventId};
use std::collections::HashSet;

/// Immutable, ordered collection of events
///
/// Built once (from the seeded data or a JSON file) and shared by reference
/// afterwards. Every query preserves declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// Build a catalog from events in declaration order
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two events share an id.
    pub fn new(events: Vec<Event>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(&event.id) {
                return Err(CatalogError::DuplicateId(event.id.clone()));
            }
        }

        tracing::debug!(events = events.len(), "Built event catalog");
        Ok(Self { events })
    }

    /// The society's built-in catalog
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            events: crate::seed::events(),
        }
    }

    /// Load a catalog from a JSON array of events
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON and
    /// [`CatalogError::DuplicateId`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Self::new(events)
    }

    /// Serialize the catalog as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    /// Every event, in declaration order
    #[must_use]
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// The event with `id`, if any
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id.as_str() == id)
    }

    /// Events that are not completed, in declaration order
    #[must_use]
    pub fn upcoming(&self) -> Vec<&Event> {
        self.events.iter().filter(|event| event.is_upcoming()).collect()
    }

    /// Completed events, in declaration order
    #[must_use]
    pub fn past(&self) -> Vec<&Event> {
        self.events.iter().filter(|event| event.is_past()).collect()
    }

    /// Every id, in declaration order (one detail page per id)
    #[must_use]
    pub fn ids(&self) -> Vec<&EventId> {
        self.events.iter().map(|event| &event.id).collect()
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` when the catalog holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
