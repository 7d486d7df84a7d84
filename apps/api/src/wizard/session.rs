//! Wizard sessions: one `WizardState` per open onboarding tab.
//!
//! A session is owned by the `SessionStore`; handlers never touch the step or
//! the form directly, every change goes through the session's transition and
//! store methods. Sessions live in memory only and vanish when deleted or
//! after sitting idle past the configured TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::wizard::models::ProfileForm;
use crate::wizard::renderer::{self, StepView};
use crate::wizard::review::{self, SubmitBlock};
use crate::wizard::sink::{SubmissionReceipt, SubmissionError, SubmissionSink};
use crate::wizard::steps::{Step, StepController, TransitionError};
use crate::wizard::store::FormStore;
use crate::wizard::validation::FieldErrors;

/// Behaviour switches whose intended product semantics are unsettled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WizardPolicy {
    /// Refuse advance/skip off a step whose own required fields are empty.
    pub strict_step_validation: bool,
    /// Refuse the final submit until the "all correct" box is ticked.
    pub require_confirmation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("wizard session {0} not found")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("current step has missing required fields")]
    Incomplete(FieldErrors),

    #[error("profile has invalid fields")]
    Invalid(FieldErrors),

    #[error("confirm that all information is correct before submitting")]
    Unconfirmed,

    #[error("submit is only available on the review step")]
    NotOnReview,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("profile was already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    last_active: Instant,
    controller: StepController,
    store: FormStore,
    submission: SubmissionStatus,
}

/// Read-only view handed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub step: Step,
    pub view: StepView,
    pub fields: ProfileForm,
    pub submitted: bool,
    pub submission: SubmissionStatus,
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            last_active: Instant::now(),
            controller: StepController::new(),
            store: FormStore::new(),
            submission: SubmissionStatus::Idle,
        }
    }

    pub fn step(&self) -> Step {
        self.controller.current()
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Refused while a submission is in flight; the sink is sending this snapshot.
    pub fn store_mut(&mut self) -> Result<&mut FormStore, WizardError> {
        self.ensure_idle()?;
        Ok(&mut self.store)
    }

    pub fn submitted(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Succeeded(_))
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            step: self.step(),
            view: renderer::render(self.step()),
            fields: self.store.snapshot(),
            submitted: self.submitted(),
            submission: self.submission.clone(),
        }
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        match self.submission {
            SubmissionStatus::Pending => Err(WizardError::SubmissionInFlight),
            _ => Ok(()),
        }
    }

    fn check_step(&self, policy: WizardPolicy) -> Result<(), WizardError> {
        if !policy.strict_step_validation || !self.step().is_data_step() {
            return Ok(());
        }
        let errors = self.store.validate_step(self.step());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Incomplete(errors))
        }
    }

    pub fn advance(&mut self, policy: WizardPolicy) -> Result<Step, WizardError> {
        self.ensure_idle()?;
        self.check_step(policy)?;
        Ok(self.controller.advance()?)
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        self.ensure_idle()?;
        Ok(self.controller.retreat()?)
    }

    pub fn skip(&mut self, policy: WizardPolicy) -> Result<Step, WizardError> {
        self.ensure_idle()?;
        if self.controller.can_skip() {
            self.check_step(policy)?;
        }
        Ok(self.controller.skip()?)
    }

    pub fn jump_to(&mut self, index: u8) -> Result<Step, WizardError> {
        self.ensure_idle()?;
        Ok(self.controller.jump_to(index)?)
    }

    /// Runs the final gate and marks the submission pending. The returned
    /// snapshot is what goes to the sink.
    pub fn begin_submit(&mut self, policy: WizardPolicy) -> Result<ProfileForm, WizardError> {
        if !self.step().is_review() {
            return Err(WizardError::NotOnReview);
        }
        match self.submission {
            SubmissionStatus::Pending => return Err(WizardError::SubmissionInFlight),
            SubmissionStatus::Succeeded(_) => return Err(WizardError::AlreadySubmitted),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => {}
        }

        let snapshot = self.store.snapshot();
        review::check_submit(&snapshot, self.store.validate(), policy.require_confirmation)
            .map_err(|block| match block {
                SubmitBlock::Invalid(errors) => WizardError::Invalid(errors),
                SubmitBlock::Unconfirmed => WizardError::Unconfirmed,
            })?;

        self.submission = SubmissionStatus::Pending;
        Ok(snapshot)
    }

    pub fn finish_submit(&mut self, outcome: &Result<SubmissionReceipt, SubmissionError>) {
        self.submission = match outcome {
            Ok(receipt) => SubmissionStatus::Succeeded(receipt.reference.clone()),
            Err(e) => SubmissionStatus::Failed(e.to_string()),
        };
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What a successful submit hands back. `session` is `None` when the session
/// was closed while the sink was running; the profile was still accepted.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub receipt: SubmissionReceipt,
    pub session: Option<SessionView>,
}

/// In-memory registry of open wizards.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, WizardSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionView {
        let session = WizardSession::new();
        let view = session.view();
        self.sessions.write().await.insert(session.id, session);
        info!(session_id = %view.id, "Wizard session created");
        view
    }

    pub async fn get(&self, id: Uuid) -> Result<WizardSession, WizardError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(WizardError::SessionNotFound(id))
    }

    /// Applies `f` to the session under the write lock and marks it active.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut WizardSession) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(WizardError::SessionNotFound(id))?;
        session.last_active = Instant::now();
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), WizardError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!(session_id = %id, "Wizard session closed"))
            .ok_or(WizardError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions untouched for longer than `ttl`. A session with a
    /// submission in flight is kept until the sink answers.
    pub async fn cleanup_expired(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let before = sessions.len();

        sessions.retain(|id, session| {
            let expired = session.submission != SubmissionStatus::Pending
                && now.duration_since(session.last_active) > ttl;
            if expired {
                debug!(session_id = %id, "Removing idle wizard session");
            }
            !expired
        });

        let removed = before - sessions.len();
        if removed > 0 {
            info!("Expired {removed} idle wizard session(s)");
        }
        removed
    }

    /// Runs `cleanup_expired` every `every` for the life of the process.
    pub fn spawn_sweeper(&self, ttl: Duration, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                store.cleanup_expired(ttl).await;
            }
        })
    }

    /// Final submit. The lock is released while the sink runs; the pending
    /// status refuses a second submit and every other change to the session.
    pub async fn submit(
        &self,
        id: Uuid,
        sink: &dyn SubmissionSink,
        policy: WizardPolicy,
    ) -> Result<SubmitOutcome, WizardError> {
        let snapshot = self.update(id, |s| s.begin_submit(policy)).await?;
        info!(session_id = %id, backend = sink.backend(), "Submitting profile");

        let outcome = sink.submit(&snapshot).await;

        let session = self
            .update(id, |s| {
                s.finish_submit(&outcome);
                Ok(s.view())
            })
            .await
            .ok();
        if session.is_none() {
            warn!(session_id = %id, "Session closed before submission finished");
        }

        match &outcome {
            Ok(receipt) => info!(session_id = %id, reference = %receipt.reference, "Profile submitted"),
            Err(e) => warn!(session_id = %id, "Profile submission failed: {e}"),
        }
        let receipt = outcome?;
        Ok(SubmitOutcome { receipt, session })
    }
}
