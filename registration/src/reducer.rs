//! Registration reducer.
//!
//! Implements the submission state machine.
//!
//! # Flow
//!
//! 1. The user edits the form (`EditField`, `ToggleHowHeard`)
//! 2. `Submit` builds the sink row and starts exactly one insert
//! 3. The insert resolves to `SubmissionSucceeded` or `SubmissionFailed`
//! 4. On success the form is discarded, a success toast is shown and a
//!    cancellable `NavigateBack` is scheduled
//! 5. On failure the form is kept, an error toast is shown and the user may
//!    submit again
//!
//! A `Submit` that cannot start (already in flight, already registered, view
//! dismissed) resolves immediately to `SubmitIgnored`, so every submit request
//! gets exactly one outcome action.

use crate::actions::{RegistrationAction, SubmissionId};
use crate::environment::RegistrationEnvironment;
use crate::error::IgnoreReason;
use crate::form::RegistrationForm;
use crate::providers::{Notification, RegistrationSink};
use crate::row::HOW_HEARD_SEPARATOR;
use crate::state::{RegistrationState, SubmissionStatus};
use crate::submission::submit;
use dsss_core::{smallvec, Effect, EffectId, Reducer, SmallVec};
use dsss_events::event_path;
use std::marker::PhantomData;
use std::sync::Arc;

/// Id of the scheduled post-success redirect
pub const REDIRECT: EffectId = EffectId::from_static("registration-redirect");

/// Registration reducer.
#[derive(Debug, Clone)]
pub struct RegistrationReducer<S> {
    _phantom: PhantomData<S>,
}

impl<S> RegistrationReducer<S> {
    /// Create a new registration reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S> Default for RegistrationReducer<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn ignored(submission_id: SubmissionId, reason: IgnoreReason) -> Effect<RegistrationAction> {
    Effect::Future(Box::pin(async move {
        Some(RegistrationAction::SubmitIgnored {
            submission_id,
            reason,
        })
    }))
}

impl<S> RegistrationReducer<S>
where
    S: RegistrationSink + 'static,
{
    fn submit(
        state: &mut RegistrationState,
        submission_id: SubmissionId,
        env: &RegistrationEnvironment<S>,
    ) -> SmallVec<[Effect<RegistrationAction>; 4]> {
        let refusal = if state.dismissed {
            Some(IgnoreReason::Dismissed)
        } else {
            match state.status {
                SubmissionStatus::Submitting => Some(IgnoreReason::InFlight),
                SubmissionStatus::Success => Some(IgnoreReason::AlreadyRegistered),
                SubmissionStatus::Idle | SubmissionStatus::Error { .. } => None,
            }
        };

        if let Some(reason) = refusal {
            tracing::warn!(event_id = %state.event_id, ?reason, "Submit ignored");
            return smallvec![ignored(submission_id, reason)];
        }

        state.status = SubmissionStatus::Submitting;
        state.in_flight = Some(submission_id);
        state.attempts += 1;

        let event_id = state.event_id.clone();
        let form = state.form.clone();
        tracing::debug!(
            %event_id,
            attempt = state.attempts,
            how_heard = %form.how_heard.joined(HOW_HEARD_SEPARATOR),
            "Submitting registration"
        );

        let sink = Arc::clone(&env.sink);
        smallvec![Effect::Future(Box::pin(async move {
            match submit(&*sink, &event_id, &form).await {
                Ok(row) => Some(RegistrationAction::SubmissionSucceeded { submission_id, row }),
                Err(error) => Some(RegistrationAction::SubmissionFailed {
                    submission_id,
                    error,
                }),
            }
        }))]
    }

    fn notify(
        env: &RegistrationEnvironment<S>,
        notification: Notification,
    ) -> Effect<RegistrationAction> {
        let notifier = env.notifier.clone();
        Effect::fire_and_forget(async move {
            notifier.notify(notification);
        })
    }
}

impl<S> Reducer for RegistrationReducer<S>
where
    S: RegistrationSink + 'static,
{
    type State = RegistrationState;
    type Action = RegistrationAction;
    type Environment = RegistrationEnvironment<S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Form edits: only while the form is still live
            // ═══════════════════════════════════════════════════════════════
            RegistrationAction::EditField { field, value } => {
                if state.status == SubmissionStatus::Success || state.dismissed {
                    tracing::trace!(%field, "Edit after completion ignored");
                } else {
                    state.form.set(field, value);
                }
                smallvec![Effect::None]
            },

            RegistrationAction::ToggleHowHeard { option } => {
                if state.status == SubmissionStatus::Success || state.dismissed {
                    tracing::trace!(%option, "Toggle after completion ignored");
                } else {
                    state.form.toggle_how_heard(&option);
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Submit: one insert per accepted request
            // ═══════════════════════════════════════════════════════════════
            RegistrationAction::Submit { submission_id } => Self::submit(state, submission_id, env),

            RegistrationAction::SubmitIgnored { .. } => smallvec![Effect::None],

            // ═══════════════════════════════════════════════════════════════
            // Outcomes
            // ═══════════════════════════════════════════════════════════════
            RegistrationAction::SubmissionSucceeded { submission_id, row } => {
                if state.in_flight != Some(submission_id) {
                    tracing::warn!(%submission_id, "Stale submission outcome ignored");
                    return smallvec![Effect::None];
                }

                tracing::info!(
                    event_id = %row.event_id,
                    attempts = state.attempts,
                    "Registration completed"
                );

                state.status = SubmissionStatus::Success;
                state.in_flight = None;
                state.form = RegistrationForm::default();
                state.registered_at = Some(env.clock.now());

                let mut effects: SmallVec<[Effect<Self::Action>; 4]> =
                    smallvec![Self::notify(env, Notification::registered())];

                if !state.dismissed {
                    effects.push(
                        Effect::Delay {
                            duration: env.redirect_delay,
                            action: Box::new(RegistrationAction::NavigateBack),
                        }
                        .cancellable(REDIRECT),
                    );
                }
                effects
            },

            RegistrationAction::SubmissionFailed {
                submission_id,
                error,
            } => {
                if state.in_flight != Some(submission_id) {
                    tracing::warn!(%submission_id, "Stale submission outcome ignored");
                    return smallvec![Effect::None];
                }

                tracing::info!(
                    event_id = %state.event_id,
                    attempts = state.attempts,
                    error = %error,
                    "Registration failed"
                );

                state.status = SubmissionStatus::Error {
                    message: error.message.clone(),
                };
                state.in_flight = None;
                let notification = Notification::failed(&error);
                state.last_error = Some(error);

                smallvec![Self::notify(env, notification)]
            },

            // ═══════════════════════════════════════════════════════════════
            // Navigation
            // ═══════════════════════════════════════════════════════════════
            RegistrationAction::NavigateBack => {
                if state.dismissed {
                    return smallvec![Effect::None];
                }

                let path = event_path(&state.event_id);
                state.redirected_to = Some(path.clone());

                let navigator = env.navigator.clone();
                smallvec![Effect::fire_and_forget(async move {
                    navigator.navigate(&path);
                })]
            },

            RegistrationAction::Dismiss => {
                state.dismissed = true;
                smallvec![Effect::Cancel(REDIRECT)]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;
    use crate::form::FormField;
    use crate::mocks::{MockRegistrationSink, RecordingNavigator, RecordingNotifier};
    use crate::row::RegistrationRow;
    use dsss_events::EventId;
    use std::time::Duration;

    type TestReducer = RegistrationReducer<MockRegistrationSink>;

    fn env() -> RegistrationEnvironment<MockRegistrationSink> {
        RegistrationEnvironment::new(
            Arc::new(MockRegistrationSink::new()),
            Arc::new(RecordingNavigator::new()),
            Arc::new(RecordingNotifier::new()),
            Arc::new(dsss_core::SystemClock),
        )
    }

    fn row() -> RegistrationRow {
        RegistrationRow::from_form(&EventId::from("hackml-2026"), &RegistrationForm::default())
    }

    fn reduce(state: &mut RegistrationState, action: RegistrationAction) -> usize {
        TestReducer::new().reduce(state, action, &env()).len()
    }

    #[test]
    fn submit_from_idle_starts_one_insert() {
        let mut state = RegistrationState::new("hackml-2026");
        let id = SubmissionId::new();

        let effects = TestReducer::new().reduce(
            &mut state,
            RegistrationAction::Submit { submission_id: id },
            &env(),
        );

        assert_eq!(state.status, SubmissionStatus::Submitting);
        assert_eq!(state.in_flight, Some(id));
        assert_eq!(state.attempts, 1);
        assert!(matches!(effects.as_slice(), [Effect::Future(_)]));
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut state = RegistrationState::new("hackml-2026");
        reduce(
            &mut state,
            RegistrationAction::Submit {
                submission_id: SubmissionId::new(),
            },
        );

        reduce(
            &mut state,
            RegistrationAction::SubmissionFailed {
                submission_id: SubmissionId::new(),
                error: SubmissionError::fallback(),
            },
        );
        assert_eq!(state.status, SubmissionStatus::Submitting);

        reduce(
            &mut state,
            RegistrationAction::SubmissionSucceeded {
                submission_id: SubmissionId::new(),
                row: row(),
            },
        );
        assert_eq!(state.status, SubmissionStatus::Submitting);
    }

    #[test]
    fn edits_after_success_are_dropped() {
        let mut state = RegistrationState::new("hackml-2026");
        state.status = SubmissionStatus::Success;

        reduce(
            &mut state,
            RegistrationAction::EditField {
                field: FormField::FirstName,
                value: "late".to_string(),
            },
        );
        reduce(
            &mut state,
            RegistrationAction::ToggleHowHeard {
                option: "Email".to_string(),
            },
        );

        assert_eq!(state.form, RegistrationForm::default());
    }

    #[test]
    fn navigate_back_records_event_path() {
        let mut state = RegistrationState::new("hackml-2026");
        state.status = SubmissionStatus::Success;

        reduce(&mut state, RegistrationAction::NavigateBack);
        assert_eq!(state.redirected_to.as_deref(), Some("/events/hackml-2026"));
    }

    #[test]
    fn custom_redirect_delay_is_scheduled() {
        let mut state = RegistrationState::new("hackml-2026");
        let id = SubmissionId::new();
        state.status = SubmissionStatus::Submitting;
        state.in_flight = Some(id);

        let env = env().with_redirect_delay(Duration::from_millis(250));
        let effects = TestReducer::new().reduce(
            &mut state,
            RegistrationAction::SubmissionSucceeded {
                submission_id: id,
                row: row(),
            },
            &env,
        );

        let scheduled = effects.iter().any(|effect| {
            matches!(
                effect,
                Effect::Cancellable { id, effect }
                    if *id == REDIRECT
                        && matches!(&**effect, Effect::Delay { duration, .. } if *duration == Duration::from_millis(250))
            )
        });
        assert!(scheduled);
    }
}
