pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth forms
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login/email", post(auth::handle_login_email))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route(
            "/api/v1/auth/forgot-password",
            post(auth::handle_forgot_password),
        )
        // Onboarding wizard
        .route("/api/v1/wizard/options", get(wizard::handle_options))
        .route(
            "/api/v1/wizard/sessions",
            post(wizard::handle_create_session),
        )
        .route(
            "/api/v1/wizard/sessions/:id",
            get(wizard::handle_get_session).delete(wizard::handle_delete_session),
        )
        .route(
            "/api/v1/wizard/sessions/:id/advance",
            post(wizard::handle_advance),
        )
        .route(
            "/api/v1/wizard/sessions/:id/retreat",
            post(wizard::handle_retreat),
        )
        .route("/api/v1/wizard/sessions/:id/skip", post(wizard::handle_skip))
        .route("/api/v1/wizard/sessions/:id/jump", post(wizard::handle_jump))
        .route(
            "/api/v1/wizard/sessions/:id/fields",
            put(wizard::handle_set_field),
        )
        .route(
            "/api/v1/wizard/sessions/:id/lists/:field",
            post(wizard::handle_append),
        )
        .route(
            "/api/v1/wizard/sessions/:id/lists/:field/:index",
            delete(wizard::handle_remove),
        )
        .route(
            "/api/v1/wizard/sessions/:id/options/:field",
            post(wizard::handle_toggle_option),
        )
        .route(
            "/api/v1/wizard/sessions/:id/errors",
            get(wizard::handle_errors),
        )
        .route(
            "/api/v1/wizard/sessions/:id/review",
            get(wizard::handle_review),
        )
        .route(
            "/api/v1/wizard/sessions/:id/submit",
            post(wizard::handle_submit),
        )
        .with_state(state)
}
