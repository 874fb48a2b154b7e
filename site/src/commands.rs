//! Command-line commands.

use crate::render::Listing;
use dsss_registration::{
    RegistrationAction, RegistrationError, RegistrationForm, RegistrationSink,
    RegistrationSubmitter,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

/// Usage text
pub const USAGE: &str = "\
usage: dsss-site <command>

commands:
  events [all|upcoming|past]   list events (default: all)
  event <id>                   show one event
  register <id> <form.json>    submit a registration form";

/// A parsed command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List a slice of the catalog
    Events(Listing),
    /// Show one event
    Event(String),
    /// Register for an event with a JSON form
    Register {
        /// Event id
        event_id: String,
        /// Path to the form JSON
        form: PathBuf,
    },
}

impl Command {
    /// Parse arguments (without the program name)
    ///
    /// Returns `None` for anything that does not match [`USAGE`].
    pub fn parse<I>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["events"] => Some(Self::Events(Listing::All)),
            ["events", listing] => Listing::parse(listing).map(Self::Events),
            ["event", id] => Some(Self::Event((*id).to_string())),
            ["register", id, form] => Some(Self::Register {
                event_id: (*id).to_string(),
                form: PathBuf::from(form),
            }),
            _ => None,
        }
    }
}

/// Fill, submit and wait up to `redirect_wait` for the post-success redirect
///
/// Returns the page the view redirected to, if the redirect fired in time.
///
/// # Errors
///
/// Returns the submitter's [`RegistrationError`] when the submission is
/// rejected or refused.
#[tracing::instrument(skip_all)]
pub async fn register<S>(
    submitter: &RegistrationSubmitter<S>,
    form: &RegistrationForm,
    redirect_wait: Duration,
) -> Result<Option<String>, RegistrationError>
where
    S: RegistrationSink + 'static,
{
    let mut actions = submitter.store().subscribe_actions();

    submitter.fill(form).await?;
    submitter.submit().await?;

    let redirected = tokio::time::timeout(redirect_wait, async {
        loop {
            match actions.recv().await {
                Ok(RegistrationAction::NavigateBack) | Err(RecvError::Closed) => break,
                Ok(_) | Err(RecvError::Lagged(_)) => {},
            }
        }
    })
    .await;

    if redirected.is_err() {
        tracing::warn!(?redirect_wait, "Redirect did not fire in time");
    }

    Ok(submitter.snapshot().await.redirected_to)
}
