//! Domain types for the event catalog.
//!
//! Field names serialize in camelCase and status values in kebab-case, so a
//! catalog file uses the same shape as the site's event data.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event (URL slug, e.g. `hackml-2026`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create an `EventId` from a slug
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The slug as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Registration lifecycle of an event
///
/// `Completed` is the only status that makes an event "past".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    /// Taking registrations
    RegistrationOpen,
    /// Announced, registration not (or no longer) open
    RegistrationClosed,
    /// Already took place
    Completed,
}

impl EventStatus {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegistrationOpen => "Registration Open",
            Self::RegistrationClosed => "Registration Closed",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display category of an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Hackathon
    Hackathon,
    /// Workshop or workshop series
    Workshop,
    /// Panel discussion
    Panel,
    /// Social event
    Social,
    /// Anything else
    Other,
}

impl Category {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hackathon => "Hackathon",
            Self::Workshop => "Workshop",
            Self::Panel => "Panel",
            Self::Social => "Social",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Nested records
// ============================================================================

/// Logistics block shown on an upcoming event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Who may attend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
    /// Team size rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    /// Prize description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prizes: Option<String>,
    /// Catering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
}

/// One schedule slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Free-text time, e.g. "9:00 AM"
    pub time: String,
    /// Slot title
    pub title: String,
    /// Slot description
    pub description: String,
}

/// One frequently asked question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Question
    pub question: String,
    /// Answer
    pub answer: String,
}

/// A placing team of a completed event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// Placing, e.g. "1st Place"
    pub place: String,
    /// Team name
    pub team: String,
    /// Project name
    pub project: String,
    /// Project summary
    pub description: String,
}

// ============================================================================
// Event
// ============================================================================

/// Where the "Register" call to action points
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationLink {
    /// Absolute URL, opened outside the site
    External(String),
    /// Path within the site
    Internal(String),
}

impl RegistrationLink {
    /// Classify a link: anything starting with `http` is external
    #[must_use]
    pub fn classify(link: &str) -> Self {
        if link.starts_with("http") {
            Self::External(link.to_string())
        } else {
            Self::Internal(link.to_string())
        }
    }

    /// The link target
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::External(target) | Self::Internal(target) => target,
        }
    }

    /// Returns `true` for links that leave the site
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// One society activity
///
/// Dates and times are free text for display; they are never parsed. By
/// convention completed events carry `highlights`/`winners` and upcoming ones
/// carry `details`/`schedule`/`faq`/`registration_link`, but nothing enforces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique id
    pub id: EventId,
    /// Title
    pub title: String,
    /// Short subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Summary
    pub description: String,
    /// Extended summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Free-text date
    pub date: String,
    /// Free-text time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Venue
    pub location: String,
    /// Free-text capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    /// Lifecycle status
    pub status: EventStatus,
    /// Display category
    pub category: Category,
    /// Absolute URL or internal path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    /// Logistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
    /// Ordered schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleItem>>,
    /// Ordered FAQ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<Vec<FaqEntry>>,
    /// Recap bullet points (completed events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    /// Placing teams (completed events)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Vec<Winner>>,
}

impl Event {
    /// Minimal event with every optional field absent
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        status: EventStatus,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tagline: None,
            description: description.into(),
            long_description: None,
            date: date.into(),
            time: None,
            location: location.into(),
            capacity: None,
            status,
            category,
            registration_link: None,
            details: None,
            schedule: None,
            faq: None,
            highlights: None,
            winners: None,
        }
    }

    /// Not yet completed
    #[must_use]
    pub fn is_upcoming(&self) -> bool {
        self.status != EventStatus::Completed
    }

    /// Completed
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.status == EventStatus::Completed
    }

    /// Badge shown on the detail page
    #[must_use]
    pub fn badge(&self) -> &'static str {
        if self.is_upcoming() { "Upcoming" } else { "Past Event" }
    }

    /// The registration link, classified
    #[must_use]
    pub fn registration_link(&self) -> Option<RegistrationLink> {
        self.registration_link.as_deref().map(RegistrationLink::classify)
    }

    /// The "Register" call to action, if the page should show one
    ///
    /// Past events never offer registration, even when a link is present.
    #[must_use]
    pub fn register_action(&self) -> Option<RegistrationLink> {
        if self.is_past() {
            return None;
        }
        self.registration_link()
    }
}
