use serde::{Deserialize, Serialize};

use crate::wizard::tags::TagList;

pub const JOB_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Internship", "Freelance"];
pub const WORK_LOCATIONS: &[&str] = &["Remote", "Hybrid", "Onsite", "Any"];
pub const EXPERIENCE_LEVELS: &[&str] = &["Entry Level", "Mid-level", "Senior", "Expert"];
pub const CURRENCIES: &[&str] = &["USD ($)", "EUR (€)", "GBP (£)"];
pub const AVAILABILITY: &[&str] = &["Immediately", "1-2 weeks", "1 month", "2+ months"];

/// Every value the job-profile wizard collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub resume_url: String,
    pub no_resume: bool,
    pub phone: String,

    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub summary: String,
    pub current_role: String,
    pub years_experience: String,

    pub target_job: String,
    pub additional_roles: TagList,
    pub job_type: TagList,
    pub work_location: TagList,
    pub experience_level: String,

    pub industries: TagList,
    pub skills: TagList,

    pub currency: String,
    pub min_salary: String,
    pub max_salary: String,
    pub availability: String,
    pub willing_to_relocate: bool,

    pub all_correct: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            resume_url: String::new(),
            no_resume: false,
            phone: String::new(),
            location: "San Francisco, CA".to_string(),
            linkedin: String::new(),
            portfolio: String::new(),
            summary: String::new(),
            current_role: "Senior software engineer".to_string(),
            years_experience: "5".to_string(),
            target_job: "Teacher".to_string(),
            additional_roles: ["Public Speaker", "Facilitator"].into_iter().collect(),
            job_type: ["Part-time"].into_iter().collect(),
            work_location: ["Hybrid"].into_iter().collect(),
            experience_level: "Expert".to_string(),
            industries: ["Education", "Information Tech"].into_iter().collect(),
            skills: ["TypeScript", "Python", "Node.js"].into_iter().collect(),
            currency: "USD ($)".to_string(),
            min_salary: "8000".to_string(),
            max_salary: "12000".to_string(),
            availability: "Immediately".to_string(),
            willing_to_relocate: false,
            all_correct: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    ResumeUrl,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    Summary,
    CurrentRole,
    YearsExperience,
    TargetJob,
    ExperienceLevel,
    Currency,
    MinSalary,
    MaxSalary,
    Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagField {
    NoResume,
    WillingToRelocate,
    AllCorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    AdditionalRoles,
    JobType,
    WorkLocation,
    Industries,
    Skills,
}

impl ListField {
    /// Fixed choices for checkbox groups; `None` for free-form tag inputs.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            ListField::JobType => Some(JOB_TYPES),
            ListField::WorkLocation => Some(WORK_LOCATIONS),
            _ => None,
        }
    }
}

/// A single assignment coming from an input or checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldUpdate {
    Text { field: TextField, value: String },
    Flag { field: FlagField, value: bool },
    List { field: ListField, value: Vec<String> },
}

impl ProfileForm {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ResumeUrl => &self.resume_url,
            TextField::Phone => &self.phone,
            TextField::Location => &self.location,
            TextField::Linkedin => &self.linkedin,
            TextField::Portfolio => &self.portfolio,
            TextField::Summary => &self.summary,
            TextField::CurrentRole => &self.current_role,
            TextField::YearsExperience => &self.years_experience,
            TextField::TargetJob => &self.target_job,
            TextField::ExperienceLevel => &self.experience_level,
            TextField::Currency => &self.currency,
            TextField::MinSalary => &self.min_salary,
            TextField::MaxSalary => &self.max_salary,
            TextField::Availability => &self.availability,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::ResumeUrl => &mut self.resume_url,
            TextField::Phone => &mut self.phone,
            TextField::Location => &mut self.location,
            TextField::Linkedin => &mut self.linkedin,
            TextField::Portfolio => &mut self.portfolio,
            TextField::Summary => &mut self.summary,
            TextField::CurrentRole => &mut self.current_role,
            TextField::YearsExperience => &mut self.years_experience,
            TextField::TargetJob => &mut self.target_job,
            TextField::ExperienceLevel => &mut self.experience_level,
            TextField::Currency => &mut self.currency,
            TextField::MinSalary => &mut self.min_salary,
            TextField::MaxSalary => &mut self.max_salary,
            TextField::Availability => &mut self.availability,
        }
    }

    pub fn flag_mut(&mut self, field: FlagField) -> &mut bool {
        match field {
            FlagField::NoResume => &mut self.no_resume,
            FlagField::WillingToRelocate => &mut self.willing_to_relocate,
            FlagField::AllCorrect => &mut self.all_correct,
        }
    }

    pub fn list(&self, field: ListField) -> &TagList {
        match field {
            ListField::AdditionalRoles => &self.additional_roles,
            ListField::JobType => &self.job_type,
            ListField::WorkLocation => &self.work_location,
            ListField::Industries => &self.industries,
            ListField::Skills => &self.skills,
        }
    }

    pub fn list_mut(&mut self, field: ListField) -> &mut TagList {
        match field {
            ListField::AdditionalRoles => &mut self.additional_roles,
            ListField::JobType => &mut self.job_type,
            ListField::WorkLocation => &mut self.work_location,
            ListField::Industries => &mut self.industries,
            ListField::Skills => &mut self.skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_onboarding_form() {
        let form = ProfileForm::default();
        assert_eq!(form.location, "San Francisco, CA");
        assert_eq!(form.target_job, "Teacher");
        assert_eq!(form.skills.len(), 3);
        assert!(!form.all_correct);
        assert!(form.phone.is_empty());
    }

    #[test]
    fn test_form_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ProfileForm::default()).unwrap();
        assert_eq!(json["targetJob"], "Teacher");
        assert_eq!(json["additionalRoles"][1], "Facilitator");
        assert_eq!(json["willingToRelocate"], false);
    }

    #[test]
    fn test_field_update_picks_variant_by_value_type() {
        let text: FieldUpdate =
            serde_json::from_str(r#"{"field":"location","value":"Austin, TX"}"#).unwrap();
        assert_eq!(
            text,
            FieldUpdate::Text {
                field: TextField::Location,
                value: "Austin, TX".into()
            }
        );

        let flag: FieldUpdate =
            serde_json::from_str(r#"{"field":"noResume","value":true}"#).unwrap();
        assert!(matches!(flag, FieldUpdate::Flag { field: FlagField::NoResume, value: true }));

        let list: FieldUpdate =
            serde_json::from_str(r#"{"field":"skills","value":["Rust"]}"#).unwrap();
        assert!(matches!(list, FieldUpdate::List { field: ListField::Skills, .. }));
    }

    #[test]
    fn test_mismatched_field_and_value_is_rejected() {
        let bad = serde_json::from_str::<FieldUpdate>(r#"{"field":"location","value":true}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_only_checkbox_groups_have_options() {
        assert_eq!(ListField::JobType.options(), Some(JOB_TYPES));
        assert_eq!(ListField::Skills.options(), None);
    }
}
