// Sign-up, login and forgot-password form flows.
// There is no credential store: once a form validates, the flow succeeds.

pub mod forms;
pub mod handlers;
