//! Plain-text views of the catalog.

use dsss_events::{Event, EventCatalog, RegistrationLink};
use std::fmt;

/// Which slice of the catalog to list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Listing {
    /// Every event
    #[default]
    All,
    /// Events that have not taken place yet
    Upcoming,
    /// Completed events
    Past,
}

impl Listing {
    /// Parse a listing name (`all`, `upcoming`, `past`)
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "upcoming" => Some(Self::Upcoming),
            "past" => Some(Self::Past),
            _ => None,
        }
    }

    /// Events in this slice, in catalog order
    #[must_use]
    pub fn select(self, catalog: &EventCatalog) -> Vec<&Event> {
        match self {
            Self::All => catalog.all().iter().collect(),
            Self::Upcoming => catalog.upcoming(),
            Self::Past => catalog.past(),
        }
    }
}

/// One line per event: id, date, status and title
#[derive(Debug, Clone, Copy)]
pub struct EventList<'a>(pub &'a [&'a Event]);

impl fmt::Display for EventList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.0 {
            writeln!(
                f,
                "{:<32} {:<24} {:<20} {}",
                event.id.as_str(),
                event.date,
                event.status.label(),
                event.title
            )?;
        }
        Ok(())
    }
}

/// Full detail view of one event
#[derive(Debug, Clone, Copy)]
pub struct EventDetail<'a>(pub &'a Event);

impl fmt::Display for EventDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;

        writeln!(f, "{} [{}] [{}]", event.title, event.category, event.badge())?;
        if let Some(tagline) = &event.tagline {
            writeln!(f, "{tagline}")?;
        }
        writeln!(f)?;

        match &event.time {
            Some(time) => writeln!(f, "When:     {}, {time}", event.date)?,
            None => writeln!(f, "When:     {}", event.date)?,
        }
        writeln!(f, "Where:    {}", event.location)?;
        if let Some(capacity) = &event.capacity {
            writeln!(f, "Capacity: {capacity}")?;
        }
        writeln!(f, "Status:   {}", event.status)?;
        writeln!(f)?;

        writeln!(
            f,
            "{}",
            event.long_description.as_deref().unwrap_or(&event.description)
        )?;

        if let Some(details) = &event.details {
            writeln!(f, "\nDetails")?;
            for (label, value) in [
                ("Eligibility", &details.eligibility),
                ("Team size", &details.team_size),
                ("Prizes", &details.prizes),
                ("Food", &details.food),
            ] {
                if let Some(value) = value {
                    writeln!(f, "  {label}: {value}")?;
                }
            }
        }

        if let Some(schedule) = &event.schedule {
            writeln!(f, "\nSchedule")?;
            for slot in schedule {
                writeln!(f, "  {:<10} {}: {}", slot.time, slot.title, slot.description)?;
            }
        }

        if let Some(highlights) = &event.highlights {
            writeln!(f, "\nHighlights")?;
            for highlight in highlights {
                writeln!(f, "  - {highlight}")?;
            }
        }

        if let Some(winners) = &event.winners {
            writeln!(f, "\nWinners")?;
            for winner in winners {
                writeln!(
                    f,
                    "  {} {} ({}): {}",
                    winner.place, winner.team, winner.project, winner.description
                )?;
            }
        }

        if let Some(faq) = &event.faq {
            writeln!(f, "\nFAQ")?;
            for entry in faq {
                writeln!(f, "  Q: {}\n  A: {}", entry.question, entry.answer)?;
            }
        }

        match event.register_action() {
            Some(RegistrationLink::External(url)) => writeln!(f, "\nRegister: {url}"),
            Some(RegistrationLink::Internal(path)) => writeln!(
                f,
                "\nRegister: {path} (dsss-site register {} <form.json>)",
                event.id
            ),
            None => Ok(()),
        }
    }
}
