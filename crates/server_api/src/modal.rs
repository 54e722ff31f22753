//! Registration and payment modal workflows.
//!
//! A [`Modal`] owns its form state and the timer task that simulates the
//! remote submission. Dropping or closing the modal aborts that task, so a
//! late timer can never touch a modal nobody is looking at any more.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{task::JoinHandle, time::sleep};
use tracing::debug;

use crate::forms::{
    mask, validate_card, validate_contact, Field, FieldErrors, FormValues, PAYMENT_MESSAGES,
    REGISTRATION_MESSAGES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTimings {
    pub submit_delay: Duration,
    pub success_display: Duration,
}

impl ModalTimings {
    pub const REGISTRATION: Self = Self {
        submit_delay: Duration::from_millis(1500),
        success_display: Duration::from_millis(2500),
    };

    pub const PAYMENT: Self = Self {
        submit_delay: Duration::from_millis(2000),
        success_display: Duration::from_millis(3000),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Offering {
    Webinar,
    Course,
    Workshop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modal", rename_all = "snake_case")]
pub enum ModalContext {
    Registration {
        offering: Offering,
        #[serde(default)]
        title: String,
        #[serde(default)]
        is_paid: bool,
        #[serde(default)]
        price: u32,
    },
    Payment {
        course_name: String,
        price: u32,
    },
}

impl ModalContext {
    pub fn is_payment(&self) -> bool {
        matches!(self, ModalContext::Payment { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Editing,
    Submitting,
    Success,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Details,
    Payment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Details were accepted and the payment step is now showing.
    AdvancedToPayment,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSnapshot {
    pub context: ModalContext,
    pub phase: Phase,
    pub step: Step,
    pub values: FormValues,
    pub errors: FieldErrors,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("form has invalid fields")]
    Invalid(FieldErrors),
    #[error("modal is {0:?} and cannot be edited")]
    NotEditable(Phase),
    #[error("{0} is not part of the current step")]
    UnknownField(Field),
    #[error("payment is being processed")]
    Busy,
}

struct ModalState {
    context: ModalContext,
    phase: Phase,
    step: Step,
    values: FormValues,
    errors: FieldErrors,
}

impl ModalState {
    fn accepts(&self, field: Field) -> bool {
        match (self.context.is_payment(), self.step) {
            (false, _) | (true, Step::Details) => field.is_contact(),
            (true, Step::Payment) => !field.is_contact(),
        }
    }

    fn reset(&mut self) {
        self.values = FormValues::default();
        self.errors = FieldErrors::default();
        self.step = Step::Details;
    }
}

pub struct Modal {
    state: Arc<Mutex<ModalState>>,
    timings: ModalTimings,
    pending: Option<JoinHandle<()>>,
}

impl Modal {
    pub fn open(context: ModalContext) -> Self {
        let timings = if context.is_payment() {
            ModalTimings::PAYMENT
        } else {
            ModalTimings::REGISTRATION
        };
        Self {
            state: Arc::new(Mutex::new(ModalState {
                context,
                phase: Phase::Editing,
                step: Step::Details,
                values: FormValues::default(),
                errors: FieldErrors::default(),
            })),
            timings,
            pending: None,
        }
    }

    pub fn with_timings(mut self, timings: ModalTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn snapshot(&self) -> ModalSnapshot {
        let state = self.state.lock();
        ModalSnapshot {
            context: state.context.clone(),
            phase: state.phase,
            step: state.step,
            values: state.values.clone(),
            errors: state.errors.clone(),
        }
    }

    /// Applies one keystroke-level edit. Card, expiry and CVV input is masked
    /// before it is stored, and any error shown for the field is cleared.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), ModalError> {
        let mut state = self.state.lock();
        if state.phase != Phase::Editing {
            return Err(ModalError::NotEditable(state.phase));
        }
        if !state.accepts(field) {
            return Err(ModalError::UnknownField(field));
        }
        state.values.set(field, mask(field, raw));
        state.errors.clear(field.as_str());
        Ok(())
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, ModalError> {
        let mut state = self.state.lock();
        if state.phase != Phase::Editing {
            return Err(ModalError::NotEditable(state.phase));
        }

        let errors = match (state.context.is_payment(), state.step) {
            (false, _) => validate_contact(&state.values, &REGISTRATION_MESSAGES),
            (true, Step::Details) => validate_contact(&state.values, &PAYMENT_MESSAGES),
            (true, Step::Payment) => validate_card(&state.values),
        };
        state.errors = errors.clone();
        if !errors.is_empty() {
            return Err(ModalError::Invalid(errors));
        }

        if state.context.is_payment() && state.step == Step::Details {
            state.step = Step::Payment;
            return Ok(SubmitOutcome::AdvancedToPayment);
        }

        state.phase = Phase::Submitting;
        drop(state);
        self.schedule_completion();
        Ok(SubmitOutcome::Submitting)
    }

    fn schedule_completion(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        let state = Arc::clone(&self.state);
        let timings = self.timings;
        self.pending = Some(tokio::spawn(async move {
            sleep(timings.submit_delay).await;
            state.lock().phase = Phase::Success;
            debug!("simulated submission finished");

            sleep(timings.success_display).await;
            let mut guard = state.lock();
            guard.reset();
            guard.phase = Phase::Closed;
        }));
    }

    /// Closes the modal and throws away whatever was typed. A payment that is
    /// still being processed cannot be closed.
    pub fn close(&mut self) -> Result<(), ModalError> {
        let mut state = self.state.lock();
        if state.context.is_payment() && state.phase == Phase::Submitting {
            return Err(ModalError::Busy);
        }
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        state.reset();
        state.phase = Phase::Closed;
        Ok(())
    }
}

impl Drop for Modal {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
