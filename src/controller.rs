//! The account form's state machine.
//!
//! [`FormController`] is the [`MvuLogic`] for the form. Every transition is a
//! pure `update(event, model) -> (model, effect)`; the only things that
//! suspend (field validation, the registration call, the success banner's
//! expiry) are effects that report back through events tagged with the
//! ticket or submission they belong to.

use std::sync::Arc;
use std::time::Duration;

use crate::config::FormConfig;
use crate::error::{SubmissionError, ValidationError};
use crate::field::{ChangeEvent, Field};
use crate::schema::ValidationSchema;
use crate::state::{ErrorState, FormState};
use crate::timer::Timer;
use crate::transport::{RegistrationReply, Transport};
use crate::{Effect, Emitter, MvuLogic};

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// Identity of one submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(pub u64);

/// Identity of one validation run for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidationTicket(pub u64);

/// Result of the last completed submission, as shown in the banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    None,
    Success {
        submission: SubmissionId,
        message: String,
    },
    Failure {
        submission: SubmissionId,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn success_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Failure { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Everything the form knows. Owned by the runtime; changed only by
/// [`FormController::update`](MvuLogic::update).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    values: FormState,
    errors: ErrorState,
    enabled: bool,
    phase: Phase,
    outcome: SubmissionOutcome,
    last_submission: SubmissionId,
    tickets: [ValidationTicket; 4],
}

impl FormModel {
    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    /// Whether the submit control is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    /// The most recently started submission.
    pub fn last_submission(&self) -> SubmissionId {
        self.last_submission
    }

    /// The latest validation ticket issued for `field`.
    pub fn ticket(&self, field: Field) -> ValidationTicket {
        self.tickets[field.index()]
    }

    fn issue_ticket(&mut self, field: Field) -> ValidationTicket {
        let ticket = &mut self.tickets[field.index()];
        ticket.0 += 1;
        *ticket
    }
}

/// Events the form reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// An input changed.
    FieldChanged(ChangeEvent),
    /// A field validation finished.
    FieldValidated {
        field: Field,
        ticket: ValidationTicket,
        outcome: Result<(), ValidationError>,
    },
    /// The submit control was activated.
    SubmitRequested,
    /// The transport answered.
    SubmissionCompleted {
        submission: SubmissionId,
        result: Result<RegistrationReply, SubmissionError>,
    },
    /// A success banner reached the end of its lifetime.
    SuccessExpired { submission: SubmissionId },
}

/// What a renderer needs to draw the form.
pub struct FormProps {
    pub values: FormState,
    /// Inline errors; empty for fields that were never changed.
    pub errors: ErrorState,
    pub submit_enabled: bool,
    pub submitting: bool,
    pub success: Option<String>,
    pub failure: Option<String>,
    pub on_change: Box<dyn Fn(ChangeEvent) + Send>,
    pub on_submit: Box<dyn Fn() + Send>,
}

/// Validation and submission logic for the account form.
pub struct FormController {
    schema: Arc<ValidationSchema>,
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    success_ttl: Duration,
}

impl FormController {
    pub fn new(config: &FormConfig, transport: Arc<dyn Transport>, timer: Arc<dyn Timer>) -> Self {
        Self {
            schema: Arc::new(ValidationSchema::new()),
            transport,
            timer,
            success_ttl: config.success_message_ttl(),
        }
    }

    /// Controller that registers over HTTP and expires banners on the wall
    /// clock.
    #[cfg(feature = "http")]
    pub fn from_config(config: &FormConfig) -> Result<Self, crate::error::ConfigError> {
        config.validate()?;
        let transport = crate::transport::HttpTransport::new(config)?;
        Ok(Self::new(
            config,
            Arc::new(transport),
            Arc::new(crate::timer::FuturesTimer),
        ))
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    fn submit_allowed(&self, model: &FormModel) -> bool {
        model.phase != Phase::Submitting && self.schema.validate_form(&model.values)
    }

    fn on_field_changed(
        &self,
        change: ChangeEvent,
        model: &FormModel,
    ) -> (FormModel, Effect<FormEvent>) {
        let (field, value) = match change.normalize() {
            Ok(normalized) => normalized,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring change");
                return (model.clone(), Effect::none());
            }
        };

        let mut next = model.clone();
        if let Err(err) = next.values.set(field, value.clone()) {
            tracing::warn!(error = %err, "ignoring change");
            return (model.clone(), Effect::none());
        }

        next.enabled = self.submit_allowed(&next);
        if matches!(next.phase, Phase::Succeeded | Phase::Failed) {
            next.phase = Phase::Editing;
        }

        let ticket = next.issue_ticket(field);
        let schema = Arc::clone(&self.schema);
        let effect = Effect::future(async move {
            FormEvent::FieldValidated {
                field,
                ticket,
                outcome: schema.validate_field(field, &value),
            }
        });

        (next, effect)
    }

    fn on_field_validated(
        &self,
        field: Field,
        ticket: ValidationTicket,
        outcome: Result<(), ValidationError>,
        model: &FormModel,
    ) -> (FormModel, Effect<FormEvent>) {
        if ticket != model.ticket(field) {
            tracing::debug!(
                %field,
                ?ticket,
                latest = ?model.ticket(field),
                "dropping stale validation"
            );
            return (model.clone(), Effect::none());
        }

        let mut next = model.clone();
        match outcome {
            Ok(()) => next.errors.clear(field),
            Err(err) => next.errors.set(field, err.message),
        }
        (next, Effect::none())
    }

    fn on_submit(&self, model: &FormModel) -> (FormModel, Effect<FormEvent>) {
        if !model.enabled || model.phase == Phase::Submitting {
            tracing::debug!(phase = ?model.phase, enabled = model.enabled, "submit ignored");
            return (model.clone(), Effect::none());
        }

        let mut next = model.clone();
        let submission = SubmissionId(model.last_submission.0 + 1);
        next.last_submission = submission;
        next.enabled = false;
        next.phase = Phase::Submitting;
        if matches!(next.outcome, SubmissionOutcome::Failure { .. }) {
            next.outcome = SubmissionOutcome::None;
        }

        tracing::debug!(?submission, username = %next.values.username, "submitting registration");
        let request = self.transport.register(&next.values);
        let effect = Effect::future(async move {
            FormEvent::SubmissionCompleted {
                submission,
                result: request.await,
            }
        });

        (next, effect)
    }

    fn on_submission_completed(
        &self,
        submission: SubmissionId,
        result: Result<RegistrationReply, SubmissionError>,
        model: &FormModel,
    ) -> (FormModel, Effect<FormEvent>) {
        if model.phase != Phase::Submitting || submission != model.last_submission {
            tracing::debug!(?submission, "dropping completion of a finished submission");
            return (model.clone(), Effect::none());
        }

        let mut next = model.clone();
        match result {
            Ok(reply) => {
                tracing::info!(?submission, "registration succeeded");
                next.values = FormState::default();
                next.errors = ErrorState::default();
                for field in Field::ALL {
                    next.issue_ticket(field);
                }
                next.phase = Phase::Succeeded;
                next.enabled = self.submit_allowed(&next);
                next.outcome = SubmissionOutcome::Success {
                    submission,
                    message: reply.message,
                };

                let expiry = self.timer.sleep(self.success_ttl);
                let effect = Effect::future(async move {
                    expiry.await;
                    FormEvent::SuccessExpired { submission }
                });
                (next, effect)
            }
            Err(err) => {
                if err.is_contract_violation() {
                    tracing::warn!(
                        ?submission,
                        error = %err,
                        "registration endpoint broke its contract"
                    );
                } else {
                    tracing::info!(?submission, error = %err, "registration rejected");
                }
                next.phase = Phase::Failed;
                next.enabled = self.submit_allowed(&next);
                next.outcome = SubmissionOutcome::Failure {
                    submission,
                    message: err.user_message().to_owned(),
                };
                (next, Effect::none())
            }
        }
    }

    fn on_success_expired(
        &self,
        submission: SubmissionId,
        model: &FormModel,
    ) -> (FormModel, Effect<FormEvent>) {
        let current = matches!(
            &model.outcome,
            SubmissionOutcome::Success { submission: shown, .. } if *shown == submission
        );
        if !current {
            tracing::debug!(?submission, "success banner already replaced");
            return (model.clone(), Effect::none());
        }

        let mut next = model.clone();
        next.outcome = SubmissionOutcome::None;
        if next.phase == Phase::Succeeded {
            next.phase = Phase::Editing;
        }
        (next, Effect::none())
    }
}

impl MvuLogic<FormEvent, FormModel, FormProps> for FormController {
    fn init(&self, model: FormModel) -> (FormModel, Effect<FormEvent>) {
        let mut model = model;
        model.enabled = self.submit_allowed(&model);
        (model, Effect::none())
    }

    fn update(&self, event: FormEvent, model: &FormModel) -> (FormModel, Effect<FormEvent>) {
        match event {
            FormEvent::FieldChanged(change) => self.on_field_changed(change, model),
            FormEvent::FieldValidated {
                field,
                ticket,
                outcome,
            } => self.on_field_validated(field, ticket, outcome, model),
            FormEvent::SubmitRequested => self.on_submit(model),
            FormEvent::SubmissionCompleted { submission, result } => {
                self.on_submission_completed(submission, result, model)
            }
            FormEvent::SuccessExpired { submission } => self.on_success_expired(submission, model),
        }
    }

    fn view(&self, model: &FormModel, emitter: &Emitter<FormEvent>) -> FormProps {
        let on_change = {
            let emitter = emitter.clone();
            Box::new(move |change: ChangeEvent| emitter.emit(FormEvent::FieldChanged(change)))
        };
        let on_submit = {
            let emitter = emitter.clone();
            Box::new(move || emitter.emit(FormEvent::SubmitRequested))
        };

        let banner = |message: Option<&str>| message.filter(|m| !m.is_empty()).map(str::to_owned);

        FormProps {
            values: model.values.clone(),
            errors: model.errors.clone(),
            submit_enabled: model.enabled,
            submitting: model.phase == Phase::Submitting,
            success: banner(model.outcome.success_message()),
            failure: banner(model.outcome.failure_message()),
            on_change,
            on_submit,
        }
    }
}
