//! Server-held registration and payment modals.
//!
//! Each open modal lives in the registry under a random id until the visitor
//! closes it. Modals that closed themselves after a successful submission, and
//! modals left untouched for longer than the idle timeout, are swept the next
//! time any modal is opened. The registry also holds at most a fixed number of
//! modals; opening one more evicts the least recently touched.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use server_api::{
    catalog::{find_course, find_featured_webinar, find_program},
    forms::Field,
    modal::{Modal, ModalContext, ModalError, ModalSnapshot, Offering, Phase, SubmitOutcome},
};
use shared::{
    domain::ModalId,
    error::{ApiError, ErrorCode},
};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{app_state::AppState, reject, HttpResult};

pub(crate) const MODAL_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub(crate) const MAX_OPEN_MODALS: usize = 1024;

struct Entry {
    modal: Modal,
    touched: Instant,
}

impl Entry {
    /// A submission in flight is never swept.
    fn is_stale(&self, now: Instant, idle_timeout: Duration) -> bool {
        match self.modal.phase() {
            Phase::Closed => true,
            Phase::Submitting => false,
            Phase::Editing | Phase::Success => now.duration_since(self.touched) >= idle_timeout,
        }
    }
}

#[derive(Clone)]
pub(crate) struct ModalRegistry {
    inner: Arc<Mutex<HashMap<ModalId, Entry>>>,
    idle_timeout: Duration,
    capacity: usize,
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::with_limits(MODAL_IDLE_TIMEOUT, MAX_OPEN_MODALS)
    }
}

impl ModalRegistry {
    pub(crate) fn with_limits(idle_timeout: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::default(),
            idle_timeout,
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn open(&self, modal: Modal) -> ModalView {
        let mut modals = self.inner.lock();
        let now = Instant::now();
        let before = modals.len();
        modals.retain(|_, entry| !entry.is_stale(now, self.idle_timeout));
        let swept = before - modals.len();
        if swept > 0 {
            debug!(swept, "swept stale modals");
        }

        while modals.len() >= self.capacity {
            let Some(oldest) = modals
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| *id)
            else {
                break;
            };
            // Dropping the modal aborts any pending timer.
            modals.remove(&oldest);
            debug!(modal_id = %oldest, "evicted least recently used modal");
        }

        let id = ModalId::new();
        let view = ModalView {
            id,
            modal: modal.snapshot(),
        };
        modals.insert(
            id,
            Entry {
                modal,
                touched: now,
            },
        );
        view
    }

    pub(crate) fn with_modal<T>(
        &self,
        id: ModalId,
        action: impl FnOnce(&mut Modal) -> Result<T, ModalError>,
    ) -> Result<(T, ModalView), ApiError> {
        let mut modals = self.inner.lock();
        let entry = modals.get_mut(&id).ok_or_else(|| modal_not_found(id))?;
        entry.touched = Instant::now();
        let value = action(&mut entry.modal).map_err(modal_error)?;
        Ok((
            value,
            ModalView {
                id,
                modal: entry.modal.snapshot(),
            },
        ))
    }

    /// Closes and forgets the modal. A payment still being processed stays open.
    pub(crate) fn close(&self, id: ModalId) -> Result<(), ApiError> {
        let mut modals = self.inner.lock();
        let entry = modals.get_mut(&id).ok_or_else(|| modal_not_found(id))?;
        entry.modal.close().map_err(modal_error)?;
        modals.remove(&id);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

fn modal_not_found(id: ModalId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("modal {id} not found"))
}

fn modal_error(error: ModalError) -> ApiError {
    let message = error.to_string();
    match error {
        ModalError::Invalid(errors) => errors.into(),
        ModalError::UnknownField(_) => ApiError::new(ErrorCode::Validation, message),
        ModalError::NotEditable(_) | ModalError::Busy => {
            ApiError::new(ErrorCode::Conflict, message)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ModalView {
    pub(crate) id: ModalId,
    #[serde(flatten)]
    pub(crate) modal: ModalSnapshot,
}

/// What the visitor clicked to open a registration modal: a catalog entry,
/// or an explicit offering for pages that carry their own copy.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RegistrationTarget {
    FeaturedWebinar {
        featured_webinar_id: u32,
    },
    Course {
        course_id: u32,
    },
    Program {
        program_id: u32,
    },
    Custom {
        offering: Offering,
        #[serde(default)]
        title: String,
        #[serde(default)]
        is_paid: bool,
        #[serde(default)]
        price: u32,
    },
}

impl RegistrationTarget {
    fn context(self) -> Result<ModalContext, ApiError> {
        let missing = || ApiError::new(ErrorCode::NotFound, "offering not found");
        match self {
            RegistrationTarget::FeaturedWebinar {
                featured_webinar_id,
            } => find_featured_webinar(featured_webinar_id)
                .map(|webinar| webinar.registration_context())
                .ok_or_else(missing),
            RegistrationTarget::Course { course_id } => find_course(course_id)
                .map(|course| course.enrol_context())
                .ok_or_else(missing),
            RegistrationTarget::Program { program_id } => find_program(program_id)
                .map(|program| program.registration_context())
                .ok_or_else(missing),
            RegistrationTarget::Custom {
                offering,
                title,
                is_paid,
                price,
            } => Ok(ModalContext::Registration {
                offering,
                title,
                is_paid,
                price,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PaymentTarget {
    Course { course_id: u32 },
    Program { program_id: u32 },
    Custom { course_name: String, price: u32 },
}

impl PaymentTarget {
    fn context(self) -> Result<ModalContext, ApiError> {
        let missing = || ApiError::new(ErrorCode::NotFound, "course not found");
        match self {
            PaymentTarget::Course { course_id } => find_course(course_id)
                .map(|course| course.payment_context())
                .ok_or_else(missing),
            PaymentTarget::Program { program_id } => find_program(program_id)
                .map(|program| program.payment_context())
                .ok_or_else(missing),
            PaymentTarget::Custom { course_name, price } => {
                Ok(ModalContext::Payment { course_name, price })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldUpdate {
    pub(crate) field: Field,
    #[serde(default)]
    pub(crate) value: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    pub(crate) outcome: SubmitOutcome,
    pub(crate) modal: ModalView,
}

pub(crate) async fn open_registration(
    State(state): State<Arc<AppState>>,
    Json(target): Json<RegistrationTarget>,
) -> HttpResult<ModalView> {
    let context = target.context().map_err(reject)?;
    let modal = Modal::open(context).with_timings(state.api.site.registration_timings);
    let view = state.modals.open(modal);
    debug!(modal_id = %view.id, "registration modal opened");
    Ok(Json(view))
}

pub(crate) async fn open_payment(
    State(state): State<Arc<AppState>>,
    Json(target): Json<PaymentTarget>,
) -> HttpResult<ModalView> {
    let context = target.context().map_err(reject)?;
    let modal = Modal::open(context).with_timings(state.api.site.payment_timings);
    let view = state.modals.open(modal);
    debug!(modal_id = %view.id, "payment modal opened");
    Ok(Json(view))
}

pub(crate) async fn show_modal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> HttpResult<ModalView> {
    let ((), view) = state
        .modals
        .with_modal(ModalId(id), |_| Ok(()))
        .map_err(reject)?;
    Ok(Json(view))
}

pub(crate) async fn set_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> HttpResult<ModalView> {
    let ((), view) = state
        .modals
        .with_modal(ModalId(id), |modal| {
            modal.set_field(update.field, &update.value)
        })
        .map_err(reject)?;
    Ok(Json(view))
}

pub(crate) async fn submit_modal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> HttpResult<SubmitResponse> {
    let (outcome, modal) = state
        .modals
        .with_modal(ModalId(id), Modal::submit)
        .map_err(reject)?;
    info!(modal_id = %id, ?outcome, "modal submitted");
    Ok(Json(SubmitResponse { outcome, modal }))
}

pub(crate) async fn close_modal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state.modals.close(ModalId(id)).map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/modals_tests.rs"]
mod tests;
