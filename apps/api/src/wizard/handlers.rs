//! Axum route handlers for the onboarding wizard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::models::{
    FieldUpdate, ListField, AVAILABILITY, CURRENCIES, EXPERIENCE_LEVELS, JOB_TYPES, WORK_LOCATIONS,
};
use crate::wizard::review::{self, ReviewSummary, SuccessModal};
use crate::wizard::session::SessionView;
use crate::wizard::sink::SubmissionReceipt;
use crate::wizard::tags::TagList;
use crate::wizard::validation::FieldErrors;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub step: u8,
}

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct OptionRequest {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub field: ListField,
    pub values: TagList,
    /// False when the index was stale and nothing changed.
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub receipt: SubmissionReceipt,
    pub modal: SuccessModal,
    /// Absent when the session was closed before the sink answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub job_type: &'static [&'static str],
    pub work_location: &'static [&'static str],
    pub experience_level: &'static [&'static str],
    pub currency: &'static [&'static str],
    pub availability: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizard/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    (StatusCode::CREATED, Json(state.sessions.create().await))
}

/// GET /api/v1/wizard/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.get(id).await?.view()))
}

/// DELETE /api/v1/wizard/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/wizard/sessions/:id/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let policy = state.policy;
    let view = state
        .sessions
        .update(id, |s| s.advance(policy).map(|_| s.view()))
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/wizard/sessions/:id/retreat
pub async fn handle_retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| s.retreat().map(|_| s.view()))
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/wizard/sessions/:id/skip
pub async fn handle_skip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let policy = state.policy;
    let view = state
        .sessions
        .update(id, |s| s.skip(policy).map(|_| s.view()))
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/wizard/sessions/:id/jump
pub async fn handle_jump(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| s.jump_to(req.step).map(|_| s.view()))
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/wizard/sessions/:id/fields
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| {
            s.store_mut()?.set_field(update);
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/wizard/sessions/:id/lists/:field
pub async fn handle_append(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, ListField)>,
    Json(req): Json<TagRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let values = state
        .sessions
        .update(id, |s| Ok(s.store_mut()?.append_to_list(field, req.value).clone()))
        .await?;
    Ok(Json(ListResponse {
        field,
        values,
        changed: true,
    }))
}

/// DELETE /api/v1/wizard/sessions/:id/lists/:field/:index
///
/// A stale index is answered with the unchanged list rather than an error.
pub async fn handle_remove(
    State(state): State<AppState>,
    Path((id, field, index)): Path<(Uuid, ListField, usize)>,
) -> Result<Json<ListResponse>, AppError> {
    let (values, changed) = state
        .sessions
        .update(id, |s| {
            let store = s.store_mut()?;
            let changed = store.remove_from_list(field, index).is_ok();
            Ok((store.fields().list(field).clone(), changed))
        })
        .await?;
    Ok(Json(ListResponse {
        field,
        values,
        changed,
    }))
}

/// POST /api/v1/wizard/sessions/:id/options/:field
pub async fn handle_toggle_option(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, ListField)>,
    Json(req): Json<OptionRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let options = field
        .options()
        .ok_or_else(|| AppError::Validation(format!("{field:?} is not a checkbox group")))?;
    if !options.contains(&req.value.as_str()) {
        return Err(AppError::Validation(format!(
            "'{}' is not one of {}",
            req.value,
            options.join(", ")
        )));
    }

    let values = state
        .sessions
        .update(id, |s| {
            Ok(s.store_mut()?
                .toggle_option(field, &req.value, req.checked)
                .clone())
        })
        .await?;
    Ok(Json(ListResponse {
        field,
        values,
        changed: true,
    }))
}

/// GET /api/v1/wizard/sessions/:id/errors
pub async fn handle_errors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrorsResponse>, AppError> {
    let errors = state.sessions.get(id).await?.store().validate();
    Ok(Json(ErrorsResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// GET /api/v1/wizard/sessions/:id/review
pub async fn handle_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewSummary>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(review::summarize(session.store().fields())))
}

/// POST /api/v1/wizard/sessions/:id/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let outcome = state
        .sessions
        .submit(id, state.sink.as_ref(), state.policy)
        .await?;
    Ok(Json(SubmitResponse {
        receipt: outcome.receipt,
        modal: review::success_modal(),
        session: outcome.session,
    }))
}

/// GET /api/v1/wizard/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        job_type: JOB_TYPES,
        work_location: WORK_LOCATIONS,
        experience_level: EXPERIENCE_LEVELS,
        currency: CURRENCIES,
        availability: AVAILABILITY,
    })
}
