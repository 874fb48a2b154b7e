//! Registration form state.
//!
//! One form exists per registration view. It starts empty, is edited field by
//! field, and is consumed by a submission.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Options offered for "How did you hear about this event?"
pub const HOW_HEARD_OPTIONS: [&str; 6] = ["Instagram", "Discord", "Email", "A friend", "Posters", "Other"];

/// Values offered for the major select
pub const MAJORS: [&str; 5] = ["data-science", "computer-science", "statistics", "business", "other"];

/// Values offered for the year select
pub const YEARS: [&str; 4] = ["1", "2", "3", "4+"];

/// Values offered for the T-shirt size select
pub const SHIRT_SIZES: [&str; 6] = ["xs", "s", "m", "l", "xl", "2xl"];

/// A plain-text field of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Email address
    Email,
    /// Student number
    StudentNumber,
    /// Discord username
    DiscordUsername,
    /// Major (see [`MAJORS`])
    Major,
    /// Year of study (see [`YEARS`])
    Year,
    /// Kaggle username
    KaggleUsername,
    /// Dietary restrictions
    DietaryRestrictions,
    /// T-shirt size (see [`SHIRT_SIZES`])
    TshirtSize,
}

impl FormField {
    /// Every plain-text field, in form order
    pub const ALL: [Self; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::StudentNumber,
        Self::DiscordUsername,
        Self::Major,
        Self::Year,
        Self::KaggleUsername,
        Self::DietaryRestrictions,
        Self::TshirtSize,
    ];

    /// The field's key in form JSON
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::StudentNumber => "studentNumber",
            Self::DiscordUsername => "discordUsername",
            Self::Major => "major",
            Self::Year => "year",
            Self::KaggleUsername => "kaggleUsername",
            Self::DietaryRestrictions => "dietaryRestrictions",
            Self::TshirtSize => "tshirtSize",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Insertion-ordered set of "how did you hear" answers
///
/// Toggling an option adds it at the end if absent and removes it if present,
/// so toggling twice restores the previous set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HowHeard(Vec<String>);

impl HowHeard {
    /// Add `option` if absent, remove it if present
    pub fn toggle(&mut self, option: &str) {
        if let Some(index) = self.0.iter().position(|o| o == option) {
            self.0.remove(index);
        } else {
            self.0.push(option.to_string());
        }
    }

    /// Whether `option` is selected
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.0.iter().any(|o| o == option)
    }

    /// Selected options in selection order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Selected options joined with `separator`
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// Number of selected options
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for HowHeard {
    /// Keeps the first occurrence of each option
    fn from(options: Vec<String>) -> Self {
        let mut set = Self::default();
        for option in &options {
            if !set.contains(option) {
                set.toggle(option);
            }
        }
        set
    }
}

impl From<HowHeard> for Vec<String> {
    fn from(set: HowHeard) -> Self {
        set.0
    }
}

impl<'a> FromIterator<&'a str> for HowHeard {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::from(iter.into_iter().map(str::to_string).collect::<Vec<_>>())
    }
}

/// The registration form as the user fills it in
///
/// Values are kept exactly as typed; nothing here validates them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Student number
    pub student_number: String,
    /// Discord username
    pub discord_username: String,
    /// Major
    pub major: String,
    /// Year of study
    pub year: String,
    /// How the registrant heard about the event
    pub how_heard: HowHeard,
    /// Kaggle username
    pub kaggle_username: String,
    /// Dietary restrictions
    pub dietary_restrictions: String,
    /// T-shirt size
    pub tshirt_size: String,
}

impl RegistrationForm {
    /// Current value of a plain-text field
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::StudentNumber => &self.student_number,
            FormField::DiscordUsername => &self.discord_username,
            FormField::Major => &self.major,
            FormField::Year => &self.year,
            FormField::KaggleUsername => &self.kaggle_username,
            FormField::DietaryRestrictions => &self.dietary_restrictions,
            FormField::TshirtSize => &self.tshirt_size,
        }
    }

    /// Replace the value of a plain-text field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::StudentNumber => &mut self.student_number,
            FormField::DiscordUsername => &mut self.discord_username,
            FormField::Major => &mut self.major,
            FormField::Year => &mut self.year,
            FormField::KaggleUsername => &mut self.kaggle_username,
            FormField::DietaryRestrictions => &mut self.dietary_restrictions,
            FormField::TshirtSize => &mut self.tshirt_size,
        };
        *slot = value.into();
    }

    /// Toggle a "how did you hear" option
    pub fn toggle_how_heard(&mut self, option: &str) {
        self.how_heard.toggle(option);
    }

    /// Keys of required fields that are still blank
    ///
    /// Every field on the form is marked required, including the
    /// "how did you hear" group.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing: Vec<_> = FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .map(FormField::key)
            .collect();

        if self.how_heard.is_empty() {
            missing.push("howHeard");
        }
        missing
    }
}
