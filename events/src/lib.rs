//! # DSSS Events
//!
//! The society's event catalog: an immutable, ordered list of [`Event`]
//! records with four queries (all, by id, upcoming, past).
//!
//! An event is *past* exactly when its status is `completed`; every other
//! status counts as upcoming.
//!
//! ## Example
//!
//! ```
//! use dsss_events::EventCatalog;
//!
//! let catalog = EventCatalog::seeded();
//!
//! let hackml = catalog.get_by_id("hackml-2026").map(|e| e.title.as_str());
//! assert_eq!(hackml, Some("HackML 2026"));
//!
//! assert!(catalog.get_by_id("nonexistent").is_none());
//! assert_eq!(catalog.upcoming().len() + catalog.past().len(), catalog.all().len());
//! ```

pub mod catalog;
pub mod error;
pub mod routes;
mod seed;
pub mod types;

pub use catalog::EventCatalog;
pub use error::CatalogError;
pub use routes::{event_path, registration_path};
pub use types::{
    Category, Event, EventDetails, EventId, EventStatus, FaqEntry, RegistrationLink, ScheduleItem,
    Winner,
};
