//! The row written to the registration sink.

use crate::form::RegistrationForm;
use dsss_events::EventId;
use serde::{Deserialize, Serialize};

/// Status stamped on every inserted registration
pub const REGISTRATION_STATUS_CONFIRMED: &str = "confirmed";

/// Separator used when flattening the "how did you hear" answers
pub const HOW_HEARD_SEPARATOR: &str = ", ";

/// Fields that have no column of their own, stored as JSON text in
/// `additional_info`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    /// Discord username
    #[serde(default)]
    pub discord_username: String,
    /// Kaggle username
    #[serde(default)]
    pub kaggle_username: String,
}

impl AdditionalInfo {
    /// Encode as the JSON text stored in the column
    #[must_use]
    pub fn encode(&self) -> String {
        // A struct of two strings always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode the column's JSON text
    ///
    /// # Errors
    ///
    /// Returns the parse error for text that is not a JSON object.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// One row of the participants table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRow {
    /// Event the registration belongs to
    pub event_id: EventId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Student number
    pub student_id: String,
    /// Major
    pub program: String,
    /// Year of study
    pub year_level: String,
    /// "How did you hear" answers, comma separated
    pub how_heard_about: String,
    /// Dietary restrictions
    pub dietary_restrictions: String,
    /// T-shirt size
    pub shirt_size: String,
    /// JSON-encoded [`AdditionalInfo`]
    pub additional_info: String,
    /// Always [`REGISTRATION_STATUS_CONFIRMED`] on insert
    pub registration_status: String,
}

impl RegistrationRow {
    /// Map a form onto the sink's columns
    #[must_use]
    pub fn from_form(event_id: &EventId, form: &RegistrationForm) -> Self {
        let additional = AdditionalInfo {
            discord_username: form.discord_username.clone(),
            kaggle_username: form.kaggle_username.clone(),
        };

        Self {
            event_id: event_id.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            student_id: form.student_number.clone(),
            program: form.major.clone(),
            year_level: form.year.clone(),
            how_heard_about: form.how_heard.joined(HOW_HEARD_SEPARATOR),
            dietary_restrictions: form.dietary_restrictions.clone(),
            shirt_size: form.tshirt_size.clone(),
            additional_info: additional.encode(),
            registration_status: REGISTRATION_STATUS_CONFIRMED.to_string(),
        }
    }

    /// Decoded `additional_info`, if it holds valid JSON
    #[must_use]
    pub fn additional(&self) -> Option<AdditionalInfo> {
        AdditionalInfo::decode(&self.additional_info).ok()
    }
}
