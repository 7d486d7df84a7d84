// Job-profile onboarding wizard.
// Step Controller, Form State Store, Step Renderer and Review/Submit stage,
// held per browser tab in an in-memory session.

pub mod handlers;
pub mod models;
pub mod renderer;
pub mod review;
pub mod session;
pub mod sink;
pub mod steps;
pub mod store;
pub mod tags;
pub mod validation;
