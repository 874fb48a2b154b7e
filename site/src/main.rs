//! DSSS site command-line binary.
//!
//! # Usage
//!
//! ```bash
//! dsss-site events upcoming
//! dsss-site event hackml-2026
//! SUPABASE_URL=... SUPABASE_ANON_KEY=... dsss-site register hackml-2026 form.json
//! ```

use anyhow::{bail, Context};
use dsss_core::SystemClock;
use dsss_events::{EventCatalog, RegistrationLink};
use dsss_registration::{
    RegistrationEnvironment, RegistrationForm, RegistrationSubmitter, SupabaseSink,
};
use dsss_site::commands::{self, Command, USAGE};
use dsss_site::config::{Config, RegistrationSettings};
use dsss_site::console::{ConsoleNavigator, ConsoleNotifier};
use dsss_site::render::{EventDetail, EventList};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dsss_site=info,dsss_registration=info,dsss_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = Command::parse(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    // Load configuration
    let config = Config::from_env();
    let catalog = load_catalog(&config)?;
    info!(events = catalog.len(), "Catalog loaded");

    match command {
        Command::Events(listing) => {
            print!("{}", EventList(&listing.select(&catalog)));
            Ok(ExitCode::SUCCESS)
        },
        Command::Event(id) => match catalog.get_by_id(&id) {
            Some(event) => {
                print!("{}", EventDetail(event));
                Ok(ExitCode::SUCCESS)
            },
            None => {
                eprintln!("Event not found: {id}");
                Ok(ExitCode::FAILURE)
            },
        },
        Command::Register { event_id, form } => {
            let Some(event) = catalog.get_by_id(&event_id) else {
                eprintln!("Event not found: {event_id}");
                return Ok(ExitCode::FAILURE);
            };
            if event.is_past() {
                eprintln!("Registration is closed: {} has already taken place", event.title);
                return Ok(ExitCode::FAILURE);
            }
            if let Some(RegistrationLink::External(url)) = event.register_action() {
                info!(%url, "Event also takes registrations externally");
            }

            let text = std::fs::read_to_string(&form)
                .with_context(|| format!("reading {}", form.display()))?;
            let form: RegistrationForm = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", form.display()))?;

            let missing = form.missing_required();
            if !missing.is_empty() {
                eprintln!("Missing required fields: {}", missing.join(", "));
                return Ok(ExitCode::FAILURE);
            }

            let settings = RegistrationSettings::from_env()?;
            register(&settings, event_id, &form).await
        },
    }
}

fn load_catalog(config: &Config) -> anyhow::Result<EventCatalog> {
    let Some(path) = &config.events_catalog else {
        return Ok(EventCatalog::seeded());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = EventCatalog::from_json(&json)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    if catalog.is_empty() {
        bail!("catalog {} has no events", path.display());
    }
    Ok(catalog)
}

async fn register(
    settings: &RegistrationSettings,
    event_id: String,
    form: &RegistrationForm,
) -> anyhow::Result<ExitCode> {
    let sink = SupabaseSink::new(&settings.supabase()).context("building HTTP client")?;
    let environment = RegistrationEnvironment::new(
        Arc::new(sink),
        Arc::new(ConsoleNavigator),
        Arc::new(ConsoleNotifier),
        Arc::new(SystemClock),
    )
    .with_redirect_delay(settings.redirect_delay);

    let submitter = RegistrationSubmitter::new(event_id, environment)
        .with_outcome_timeout(settings.sink_timeout + Duration::from_secs(5));

    let result = commands::register(
        &submitter,
        form,
        settings.redirect_delay + Duration::from_secs(1),
    )
    .await;

    if let Err(e) = submitter.shutdown(Duration::from_secs(5)).await {
        warn!(error = %e, "Shutdown incomplete");
    }

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // Already reported through the notifier
        Err(dsss_registration::RegistrationError::Submission(_)) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
