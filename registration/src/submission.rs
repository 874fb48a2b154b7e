//! Single registration write, without the state machine.

use crate::error::SubmissionError;
use crate::form::RegistrationForm;
use crate::providers::RegistrationSink;
use crate::row::RegistrationRow;
use dsss_events::EventId;

/// Map `form` to a row for `event_id` and insert it once
///
/// No retry, no deduplication: calling this twice writes twice.
///
/// # Errors
///
/// Returns the sink's [`SubmissionError`] unchanged.
#[tracing::instrument(skip(sink, form), fields(event_id = %event_id))]
pub async fn submit<S>(
    sink: &S,
    event_id: &EventId,
    form: &RegistrationForm,
) -> Result<RegistrationRow, SubmissionError>
where
    S: RegistrationSink + ?Sized,
{
    let row = RegistrationRow::from_form(event_id, form);
    let stored = sink.insert(&row).await;

    match &stored {
        Ok(_) => tracing::info!("Registration stored"),
        Err(error) => tracing::warn!(%error, "Registration rejected"),
    }
    stored
}
