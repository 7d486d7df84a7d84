use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::wizard::session::WizardError;
use crate::wizard::sink::SubmissionError;
use crate::wizard::validation::FieldErrors;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields")]
    InvalidFields(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Submission rejected")]
    SubmissionRejected(FieldErrors),

    #[error("Submission unavailable: {0}")]
    SubmissionUnavailable(String),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        let message = err.to_string();
        match err {
            WizardError::SessionNotFound(_) => AppError::NotFound(message),
            WizardError::Transition(_) | WizardError::NotOnReview => {
                AppError::Conflict(message)
            }
            WizardError::SubmissionInFlight | WizardError::AlreadySubmitted => {
                AppError::Conflict(message)
            }
            WizardError::Unconfirmed => AppError::InvalidFields(FieldErrors::from([(
                "allCorrect".to_string(),
                message,
            )])),
            WizardError::Incomplete(errors) | WizardError::Invalid(errors) => {
                AppError::InvalidFields(errors)
            }
            WizardError::Submission(SubmissionError::Rejected(errors)) => {
                AppError::SubmissionRejected(errors)
            }
            WizardError::Submission(SubmissionError::AuthExpired) => AppError::Unauthorized,
            WizardError::Submission(SubmissionError::Unavailable(reason)) => {
                AppError::SubmissionUnavailable(reason)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None)
            }
            AppError::InvalidFields(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_FIELDS",
                "One or more fields are invalid".to_string(),
                Some(errors),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Your session has expired, sign in again".to_string(),
                None,
            ),
            AppError::SubmissionRejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "SUBMISSION_REJECTED",
                "The profile was rejected".to_string(),
                Some(errors),
            ),
            AppError::SubmissionUnavailable(reason) => {
                tracing::error!("Submission failed: {reason}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SUBMISSION_FAILED",
                    "The profile could not be submitted, try again".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
