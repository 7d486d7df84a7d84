//! Submission sink — where a confirmed profile goes when the wizard completes.
//!
//! Backends:
//! - `LoggingSink`: logs the snapshot and always acknowledges.
//! - `HttpSubmissionSink`: POSTs the snapshot to an upstream profile API.
//! - `PgSubmissionSink`: stores the snapshot in `job_profiles`.
//!
//! `AppState` holds one of them as `Arc<dyn SubmissionSink>`, picked at startup.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::profile::JobProfileRow;
use crate::wizard::models::ProfileForm;
use crate::wizard::validation::FieldErrors;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub accepted_at: DateTime<Utc>,
    pub backend: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission rejected")]
    Rejected(FieldErrors),

    #[error("submission service unavailable: {0}")]
    Unavailable(String),

    #[error("session expired, sign in again")]
    AuthExpired,
}

#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, profile: &ProfileForm) -> Result<SubmissionReceipt, SubmissionError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LoggingSink
// ────────────────────────────────────────────────────────────────────────────

pub struct LoggingSink;

#[async_trait]
impl SubmissionSink for LoggingSink {
    async fn submit(&self, profile: &ProfileForm) -> Result<SubmissionReceipt, SubmissionError> {
        let reference = Uuid::new_v4().to_string();
        info!(
            reference = %reference,
            target_job = %profile.target_job,
            location = %profile.location,
            skills = profile.skills.len(),
            "Setup complete"
        );
        debug!("Submitted profile: {profile:?}");
        Ok(SubmissionReceipt {
            reference,
            accepted_at: Utc::now(),
            backend: self.backend(),
        })
    }

    fn backend(&self) -> &'static str {
        "log"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpSubmissionSink
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Acknowledgement {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rejection {
    #[serde(default)]
    errors: BTreeMap<String, String>,
    message: Option<String>,
}

/// Upstream profile API client. Retries 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct HttpSubmissionSink {
    client: Client,
    url: String,
    token: Option<String>,
    backoff: Duration,
}

impl HttpSubmissionSink {
    pub fn new(url: String, token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            url,
            token,
            backoff: Duration::from_millis(500),
        })
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// Maps a non-success upstream response onto the submission taxonomy.
fn classify_failure(status: StatusCode, body: &str) -> SubmissionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SubmissionError::AuthExpired,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let errors = match serde_json::from_str::<Rejection>(body) {
                Ok(r) if !r.errors.is_empty() => r.errors,
                Ok(r) => BTreeMap::from([(
                    "form".to_string(),
                    r.message.unwrap_or_else(|| "Profile was rejected".to_string()),
                )]),
                Err(_) => BTreeMap::from([("form".to_string(), body.trim().to_string())]),
            };
            SubmissionError::Rejected(errors)
        }
        s => SubmissionError::Unavailable(format!("upstream returned {s}")),
    }
}

#[async_trait]
impl SubmissionSink for HttpSubmissionSink {
    async fn submit(&self, profile: &ProfileForm) -> Result<SubmissionReceipt, SubmissionError> {
        let mut last_error: Option<SubmissionError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "Profile submission attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.url).json(profile);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SubmissionError::Unavailable(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                warn!("Profile API returned {}: {}", status, body);
                last_error = Some(classify_failure(status, &body));
                continue;
            }

            if !status.is_success() {
                return Err(classify_failure(status, &body));
            }

            let reference = serde_json::from_str::<Acknowledgement>(&body)
                .ok()
                .and_then(|a| a.id)
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            info!(reference = %reference, "Profile accepted by upstream");
            return Ok(SubmissionReceipt {
                reference,
                accepted_at: Utc::now(),
                backend: self.backend(),
            });
        }

        Err(last_error.unwrap_or_else(|| {
            SubmissionError::Unavailable(format!("gave up after {MAX_RETRIES} attempts"))
        }))
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PgSubmissionSink
// ────────────────────────────────────────────────────────────────────────────

pub struct PgSubmissionSink(pub PgPool);

#[async_trait]
impl SubmissionSink for PgSubmissionSink {
    async fn submit(&self, profile: &ProfileForm) -> Result<SubmissionReceipt, SubmissionError> {
        let data = serde_json::to_value(profile)
            .map_err(|e| SubmissionError::Unavailable(e.to_string()))?;

        let row: JobProfileRow = sqlx::query_as(
            r#"
            INSERT INTO job_profiles (id, location, target_job, data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&profile.location)
        .bind(&profile.target_job)
        .bind(&data)
        .fetch_one(&self.0)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store job profile: {e}");
            SubmissionError::Unavailable("profile store is unavailable".to_string())
        })?;

        info!(id = %row.id, "Job profile stored");
        Ok(SubmissionReceipt {
            reference: row.id.to_string(),
            accepted_at: row.submitted_at,
            backend: self.backend(),
        })
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/profiles")
    }

    fn sink(url: String) -> HttpSubmissionSink {
        HttpSubmissionSink::new(url, Some("t0ken".into()))
            .unwrap()
            .with_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_classify_auth_failures() {
        assert_eq!(
            classify_failure(StatusCode::UNAUTHORIZED, ""),
            SubmissionError::AuthExpired
        );
        assert_eq!(
            classify_failure(StatusCode::FORBIDDEN, "nope"),
            SubmissionError::AuthExpired
        );
    }

    #[test]
    fn test_classify_rejection_with_field_errors() {
        let body = r#"{"errors":{"targetJob":"Unknown title"}}"#;
        let SubmissionError::Rejected(errors) =
            classify_failure(StatusCode::UNPROCESSABLE_ENTITY, body)
        else {
            panic!("expected rejection");
        };
        assert_eq!(errors["targetJob"], "Unknown title");
    }

    #[test]
    fn test_classify_rejection_with_plain_body() {
        let SubmissionError::Rejected(errors) = classify_failure(StatusCode::BAD_REQUEST, "bad\n")
        else {
            panic!("expected rejection");
        };
        assert_eq!(errors["form"], "bad");
    }

    #[test]
    fn test_classify_other_status_as_unavailable() {
        assert!(matches!(
            classify_failure(StatusCode::BAD_GATEWAY, ""),
            SubmissionError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_logging_sink_always_acknowledges() {
        let receipt = LoggingSink.submit(&ProfileForm::default()).await.unwrap();
        assert_eq!(receipt.backend, "log");
        assert!(Uuid::parse_str(&receipt.reference).is_ok());
    }

    #[tokio::test]
    async fn test_http_sink_returns_upstream_id() {
        let router = Router::new().route(
            "/profiles",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["targetJob"], "Teacher");
                Json(json!({ "id": "prof_42" }))
            }),
        );
        let receipt = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap();
        assert_eq!(receipt.reference, "prof_42");
        assert_eq!(receipt.backend, "http");
    }

    #[tokio::test]
    async fn test_http_sink_retries_server_errors() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/profiles",
                post(|State(hits): State<Arc<AtomicU32>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        (AxumStatus::SERVICE_UNAVAILABLE, Json(json!({})))
                    } else {
                        (AxumStatus::CREATED, Json(json!({ "id": "second" })))
                    }
                }),
            )
            .with_state(hits.clone());

        let receipt = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap();
        assert_eq!(receipt.reference, "second");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_sink_does_not_retry_rejections() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/profiles",
                post(|State(hits): State<Arc<AtomicU32>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (AxumStatus::UNAUTHORIZED, Json(json!({})))
                }),
            )
            .with_state(hits.clone());

        let err = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap_err();
        assert_eq!(err, SubmissionError::AuthExpired);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_sink_gives_up_after_max_retries() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/profiles",
                post(|State(hits): State<Arc<AtomicU32>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (AxumStatus::SERVICE_UNAVAILABLE, Json(json!({})))
                }),
            )
            .with_state(hits.clone());

        let err = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Unavailable(ref reason) if reason.contains("503")));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES);
    }

    #[tokio::test]
    async fn test_http_sink_retries_rate_limits() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/profiles",
                post(|State(hits): State<Arc<AtomicU32>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) < 2 {
                        (AxumStatus::TOO_MANY_REQUESTS, Json(json!({})))
                    } else {
                        (AxumStatus::OK, Json(json!({ "id": "third" })))
                    }
                }),
            )
            .with_state(hits.clone());

        let receipt = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap();
        assert_eq!(receipt.reference, "third");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_http_sink_surfaces_upstream_field_errors() {
        let hits = Arc::new(AtomicU32::new(0));
        let router = Router::new()
            .route(
                "/profiles",
                post(|State(hits): State<Arc<AtomicU32>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        AxumStatus::UNPROCESSABLE_ENTITY,
                        Json(json!({ "errors": { "location": "Unsupported region" } })),
                    )
                }),
            )
            .with_state(hits.clone());

        let err = sink(serve(router).await)
            .submit(&ProfileForm::default())
            .await
            .unwrap_err();
        let SubmissionError::Rejected(errors) = err else {
            panic!("expected rejection, got {err:?}");
        };
        assert_eq!(errors["location"], "Unsupported region");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_sink_unreachable_is_unavailable() {
        let err = sink("http://127.0.0.1:9/profiles".into())
            .submit(&ProfileForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Unavailable(_)));
    }
}
