//! PostgREST (Supabase) registration sink.

use super::RegistrationSink;
use crate::error::SubmissionError;
use crate::row::RegistrationRow;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Connection settings for [`SupabaseSink`]
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public (anon) API key
    pub anon_key: String,
    /// Table receiving registrations
    pub table: String,
    /// Request timeout
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Default table name
    pub const DEFAULT_TABLE: &'static str = "participants";

    /// Settings for `url` and `anon_key` with the default table and a 30s timeout
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: Self::DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Insert endpoint: `{url}/rest/v1/{table}`
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
}

/// Sink writing one row per registration through the PostgREST API.
#[derive(Clone, Debug)]
pub struct SupabaseSink {
    client: reqwest::Client,
    endpoint: String,
    anon_key: String,
}

impl SupabaseSink {
    /// Create a sink for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialisation).
    pub fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            anon_key: config.anon_key.clone(),
        })
    }

    #[tracing::instrument(skip(self, row), fields(event_id = %row.event_id))]
    async fn post_row(&self, row: &RegistrationRow) -> Result<RegistrationRow, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Registration request failed");
                SubmissionError::new(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = serde_json::from_str::<PostgrestError>(&body)
                .ok()
                .and_then(|e| e.message);
            tracing::warn!(%status, ?message, "Sink rejected registration");
            return Err(message.map_or_else(SubmissionError::fallback, SubmissionError::new));
        }

        // `return=representation` echoes the inserted rows; fall back to what we sent
        let stored = serde_json::from_str::<Vec<RegistrationRow>>(&body)
            .ok()
            .and_then(|rows| rows.into_iter().next());
        if stored.is_none() {
            tracing::debug!("Sink returned no row representation");
        }

        Ok(stored.unwrap_or_else(|| row.clone()))
    }
}

impl RegistrationSink for SupabaseSink {
    fn insert(
        &self,
        row: &RegistrationRow,
    ) -> impl Future<Output = Result<RegistrationRow, SubmissionError>> + Send {
        self.post_row(row)
    }
}
