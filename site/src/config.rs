//! Configuration management for the site binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is read first (see `main`).
//!
//! [`Config`] holds what every command needs and never fails to load.
//! [`RegistrationSettings`] is only loaded by `register`, so a malformed
//! sink setting cannot break the read-only commands.

use dsss_registration::SupabaseConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable needed by the requested command is unset or blank
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },
}

/// Look up `name`, treating blank values as unset
fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Parse `name` as an integer, or `default` when unset
fn number<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup, name).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value })
    })
}

/// Site configuration shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Optional JSON catalog replacing the built-in one (`EVENTS_CATALOG`)
    pub events_catalog: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            events_catalog: non_blank(&lookup, "EVENTS_CATALOG").map(PathBuf::from),
        }
    }
}

/// Settings used only when submitting a registration.
#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    /// Supabase project URL (`SUPABASE_URL`)
    pub supabase_url: String,
    /// Supabase anon key (`SUPABASE_ANON_KEY`)
    pub supabase_anon_key: String,
    /// Table receiving registrations (`REGISTRATION_TABLE`, default `participants`)
    pub registration_table: String,
    /// Delay before the post-success redirect (`REGISTRATION_REDIRECT_DELAY_MS`, default 3000)
    pub redirect_delay: Duration,
    /// Sink request timeout (`SINK_TIMEOUT_SECS`, default 30)
    pub sink_timeout: Duration,
}

impl RegistrationSettings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RegistrationSettings::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the URL or key is unset and
    /// [`ConfigError::Invalid`] for numeric variables that do not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            supabase_url: non_blank(&lookup, "SUPABASE_URL")
                .ok_or(ConfigError::Missing("SUPABASE_URL"))?,
            supabase_anon_key: non_blank(&lookup, "SUPABASE_ANON_KEY")
                .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            registration_table: non_blank(&lookup, "REGISTRATION_TABLE")
                .unwrap_or_else(|| SupabaseConfig::DEFAULT_TABLE.to_string()),
            redirect_delay: Duration::from_millis(number(
                &lookup,
                "REGISTRATION_REDIRECT_DELAY_MS",
                3000,
            )?),
            sink_timeout: Duration::from_secs(number(&lookup, "SINK_TIMEOUT_SECS", 30)?),
        })
    }

    /// Sink settings
    #[must_use]
    pub fn supabase(&self) -> SupabaseConfig {
        let mut config = SupabaseConfig::new(&self.supabase_url, &self.supabase_anon_key);
        config.table.clone_from(&self.registration_table);
        config.timeout = self.sink_timeout;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const SINK: [(&str, &str); 2] = [
        ("SUPABASE_URL", "https://xyz.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon"),
    ];

    #[test]
    fn catalog_path_is_optional() {
        assert!(Config::from_lookup(lookup(&[])).events_catalog.is_none());

        let config = Config::from_lookup(lookup(&[("EVENTS_CATALOG", "events.json")]));
        assert_eq!(config.events_catalog, Some(PathBuf::from("events.json")));
    }

    #[test]
    fn site_config_ignores_malformed_registration_settings() {
        let config = Config::from_lookup(lookup(&[
            ("SINK_TIMEOUT_SECS", "forever"),
            ("REGISTRATION_REDIRECT_DELAY_MS", "soon"),
            ("EVENTS_CATALOG", " "),
        ]));
        assert!(config.events_catalog.is_none());
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = RegistrationSettings::from_lookup(lookup(&SINK)).unwrap();

        assert_eq!(settings.registration_table, "participants");
        assert_eq!(settings.redirect_delay, Duration::from_secs(3));
        assert_eq!(settings.sink_timeout, Duration::from_secs(30));
    }

    #[test]
    fn supabase_settings_follow_overrides() {
        let settings = RegistrationSettings::from_lookup(lookup(&[
            SINK[0],
            SINK[1],
            ("REGISTRATION_TABLE", "signups"),
            ("SINK_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        let supabase = settings.supabase();
        assert_eq!(supabase.endpoint(), "https://xyz.supabase.co/rest/v1/signups");
        assert_eq!(supabase.anon_key, "anon");
        assert_eq!(supabase.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_sink_variables_are_reported() {
        assert_eq!(
            RegistrationSettings::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing("SUPABASE_URL")
        );
        assert_eq!(
            RegistrationSettings::from_lookup(lookup(&[SINK[0]])).unwrap_err(),
            ConfigError::Missing("SUPABASE_ANON_KEY")
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let settings =
            RegistrationSettings::from_lookup(lookup(&[SINK[0], SINK[1], ("REGISTRATION_TABLE", "  ")]))
                .unwrap();
        assert_eq!(settings.registration_table, "participants");
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let error = RegistrationSettings::from_lookup(lookup(&[
            SINK[0],
            SINK[1],
            ("REGISTRATION_REDIRECT_DELAY_MS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            error,
            ConfigError::Invalid {
                name: "REGISTRATION_REDIRECT_DELAY_MS",
                value: "soon".to_string(),
            }
        );
    }
}
