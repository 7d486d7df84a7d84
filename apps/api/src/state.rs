use std::sync::Arc;

use crate::config::Config;
use crate::wizard::session::{SessionStore, WizardPolicy};
use crate::wizard::sink::SubmissionSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Where completed profiles go. Picked at startup from config.
    pub sink: Arc<dyn SubmissionSink>,
    pub policy: WizardPolicy,
}

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn SubmissionSink>) -> Self {
        let policy = WizardPolicy {
            strict_step_validation: config.strict_step_validation,
            require_confirmation: config.require_confirmation,
        };
        Self {
            config,
            sessions: SessionStore::new(),
            sink,
            policy,
        }
    }
}
