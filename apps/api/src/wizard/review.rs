//! Review/Submit Stage — read-only projection of the profile and the submit gate.

use serde::Serialize;

use crate::wizard::models::ProfileForm;
use crate::wizard::renderer::{self, FieldGroup};
use crate::wizard::steps::Step;
use crate::wizard::validation::FieldErrors;

pub const PHONE_PLACEHOLDER: &str = "+1 234 56789";
pub const SUMMARY_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Lorem Ipsum is simply dummy text of the printing and typesetting industry. Lorem Ipsum has been \
the industry's standard dummy text ever since the 1500s.";
pub const CURRENT_ROLE_PLACEHOLDER: &str = "Senior software engineer";
pub const YEARS_PLACEHOLDER: &str = "5";
pub const TARGET_JOB_PLACEHOLDER: &str = "Teacher";
pub const MIN_SALARY_PLACEHOLDER: &str = "8000";
pub const MAX_SALARY_PLACEHOLDER: &str = "12000";
pub const AVAILABILITY_PLACEHOLDER: &str = "Immediately";

/// What the review screen displays. Empty values fall back to placeholders,
/// so a blank field and one equal to its placeholder look the same here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub location: String,
    pub phone: String,
    pub linkedin: String,
    pub portfolio: String,
    pub resume: String,
    pub summary: String,
    pub current_role: String,
    pub years_experience: String,
    pub target_job: String,
    pub additional_roles: Vec<String>,
    pub job_type: String,
    pub work_location: String,
    pub experience_level: String,
    pub industries: Vec<String>,
    pub skills: Vec<String>,
    pub currency: String,
    pub salary_range: String,
    pub availability: String,
    pub willing_to_relocate: bool,
    pub all_correct: bool,
    pub sections: Vec<ReviewSection>,
}

/// A block on the review screen. `step` is where its edit link jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub label: &'static str,
    pub group: FieldGroup,
    pub step: Step,
}

const SECTIONS: [(&str, FieldGroup); 6] = [
    ("Contact", FieldGroup::Contact),
    ("Resume", FieldGroup::Resume),
    ("Professional Summary", FieldGroup::Summary),
    ("Job Preferences", FieldGroup::Preferences),
    ("Industries & Skills", FieldGroup::IndustrySkills),
    ("Salary & Availability", FieldGroup::Salary),
];

fn sections() -> Vec<ReviewSection> {
    SECTIONS
        .iter()
        .map(|&(label, group)| ReviewSection {
            label,
            group,
            step: renderer::step_for_group(group),
        })
        .collect()
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

pub fn summarize(form: &ProfileForm) -> ReviewSummary {
    let resume = if form.no_resume {
        "No resume provided".to_string()
    } else {
        form.resume_url.clone()
    };

    ReviewSummary {
        location: form.location.clone(),
        phone: or_placeholder(&form.phone, PHONE_PLACEHOLDER),
        linkedin: form.linkedin.clone(),
        portfolio: form.portfolio.clone(),
        resume,
        summary: or_placeholder(&form.summary, SUMMARY_PLACEHOLDER),
        current_role: or_placeholder(&form.current_role, CURRENT_ROLE_PLACEHOLDER),
        years_experience: or_placeholder(&form.years_experience, YEARS_PLACEHOLDER),
        target_job: or_placeholder(&form.target_job, TARGET_JOB_PLACEHOLDER),
        additional_roles: owned(form.additional_roles.visible()),
        job_type: form.job_type.visible().join(", "),
        work_location: form.work_location.visible().join(", "),
        experience_level: form.experience_level.clone(),
        industries: owned(form.industries.visible()),
        skills: owned(form.skills.visible()),
        currency: form.currency.clone(),
        salary_range: format!(
            "${}-${}",
            or_placeholder(&form.min_salary, MIN_SALARY_PLACEHOLDER),
            or_placeholder(&form.max_salary, MAX_SALARY_PLACEHOLDER)
        ),
        availability: or_placeholder(&form.availability, AVAILABILITY_PLACEHOLDER),
        willing_to_relocate: form.willing_to_relocate,
        all_correct: form.all_correct,
        sections: sections(),
    }
}

/// Why the final submit was refused before reaching the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlock {
    Unconfirmed,
    Invalid(FieldErrors),
}

/// Final gate: full validation always, the confirmation checkbox only when required.
pub fn check_submit(form: &ProfileForm, errors: FieldErrors, require_confirmation: bool) -> Result<(), SubmitBlock> {
    if !errors.is_empty() {
        return Err(SubmitBlock::Invalid(errors));
    }
    if require_confirmation && !form.all_correct {
        return Err(SubmitBlock::Unconfirmed);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessModal {
    pub title: &'static str,
    pub message: &'static str,
    pub highlights: [Highlight; 3],
    pub note: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

pub fn success_modal() -> SuccessModal {
    SuccessModal {
        title: "You're ready to go",
        message: "Your profile is all set up and you're ready to go! Let's start automating \
your job applications and landing your dream role.",
        highlights: [
            Highlight {
                title: "WizBot Auto-Apply",
                description: "Create AI agents to automatically apply to jobs",
            },
            Highlight {
                title: "Smart Job Discovery",
                description: "Find opportunities tailored to your profile",
            },
            Highlight {
                title: "Application Tracking",
                description: "Monitor all your applications in one place",
            },
        ],
        note: "You can explore the platform with our interactive guide",
        action: "Get Started",
    }
}
