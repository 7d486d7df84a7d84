//! Axum route handlers for the sign-up / login / forgot-password forms.

use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::auth::forms::{ForgotPasswordForm, LoginEmailForm, LoginForm, SignupForm, Validate};
use crate::errors::AppError;

#[derive(Debug, Serialize, PartialEq)]
pub struct Redirect {
    pub next: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct LoginEmailAccepted {
    pub email: String,
    pub next_step: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ResetRequested {
    pub submitted: bool,
    pub email: String,
}

fn ensure_valid(form: &impl Validate) -> Result<(), AppError> {
    let errors = form.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidFields(errors))
    }
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(Json(form): Json<SignupForm>) -> Result<Json<Redirect>, AppError> {
    ensure_valid(&form)?;
    info!(email = %form.email, "Account signed up");
    Ok(Json(Redirect {
        next: "/job-profile",
    }))
}

/// POST /api/v1/auth/login/email
pub async fn handle_login_email(
    Json(form): Json<LoginEmailForm>,
) -> Result<Json<LoginEmailAccepted>, AppError> {
    ensure_valid(&form)?;
    Ok(Json(LoginEmailAccepted {
        email: form.email,
        next_step: "password",
    }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(Json(form): Json<LoginForm>) -> Result<Json<Redirect>, AppError> {
    ensure_valid(&form)?;
    info!(email = %form.email, "Login accepted");
    Ok(Json(Redirect { next: "/dashboard" }))
}

/// POST /api/v1/auth/forgot-password
pub async fn handle_forgot_password(
    Json(form): Json<ForgotPasswordForm>,
) -> Result<Json<ResetRequested>, AppError> {
    ensure_valid(&form)?;
    info!(email = %form.email, "Password reset requested");
    Ok(Json(ResetRequested {
        submitted: true,
        email: form.email,
    }))
}
