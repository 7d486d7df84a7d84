//! Step Renderer — a deterministic lookup from step to what the client shows.

use serde::Serialize;

use crate::wizard::steps::{Step, TOTAL_STEPS};

/// The field group a data step binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Resume,
    Contact,
    Summary,
    Preferences,
    IndustrySkills,
    Salary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "group", rename_all = "snake_case")]
pub enum Fragment {
    Welcome,
    Fields(FieldGroup),
    Review,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub step: Step,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fragment: Fragment,
    /// Present on data steps only.
    pub progress: Option<Progress>,
    pub can_skip: bool,
    pub primary_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub current: u8,
    pub total: u8,
    pub percent: u8,
}

const TITLES: [&str; TOTAL_STEPS as usize + 1] = [
    "",
    "Upload your resume",
    "Contact Information",
    "Professional Summary",
    "Job Preferences",
    "Industry & Skills",
    "Salary & Availability",
];

const SUBTITLES: [&str; TOTAL_STEPS as usize + 1] = [
    "",
    "This helps us auto-fill your applications and find better matches",
    "Tell us about your professional background",
    "Tell us about your professional background",
    "What type of roles are you looking for?",
    "Help us match you with the right opportunities",
    "Set your expectations for compensation",
];

const GROUPS: [FieldGroup; TOTAL_STEPS as usize] = [
    FieldGroup::Resume,
    FieldGroup::Contact,
    FieldGroup::Summary,
    FieldGroup::Preferences,
    FieldGroup::IndustrySkills,
    FieldGroup::Salary,
];

pub fn title(step: Step) -> &'static str {
    TITLES.get(step.index() as usize).copied().unwrap_or("")
}

pub fn subtitle(step: Step) -> &'static str {
    SUBTITLES.get(step.index() as usize).copied().unwrap_or("")
}

pub fn fragment(step: Step) -> Fragment {
    match step {
        Step::WELCOME => Fragment::Welcome,
        Step::REVIEW => Fragment::Review,
        s => Fragment::Fields(GROUPS[s.index() as usize - 1]),
    }
}

pub fn progress(step: Step) -> Option<Progress> {
    step.is_data_step().then(|| Progress {
        current: step.index(),
        total: TOTAL_STEPS,
        percent: ((step.index() as f64 / TOTAL_STEPS as f64) * 100.0).round() as u8,
    })
}

pub fn primary_label(step: Step) -> &'static str {
    match step {
        Step::WELCOME => "Let's Go",
        Step::LAST => "Complete Setup",
        Step::REVIEW => "Complete",
        _ => "Continue",
    }
}

pub fn render(step: Step) -> StepView {
    StepView {
        step,
        title: title(step),
        subtitle: subtitle(step),
        fragment: fragment(step),
        progress: progress(step),
        can_skip: step.is_data_step() && step != Step::LAST,
        primary_label: primary_label(step),
    }
}

/// The data step that collects `group`; review edit links jump here.
pub fn step_for_group(group: FieldGroup) -> Step {
    let index = GROUPS.iter().position(|g| *g == group).unwrap_or(0) as u8 + 1;
    Step::new(index).unwrap_or(Step::FIRST)
}
