//! Schema rules for the onboarding forms.
//!
//! A validation pass yields an ordered map of field name to the first failing
//! rule's message. An absent key means the field is valid.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::wizard::models::{ProfileForm, TextField};
use crate::wizard::steps::Step;

pub type FieldErrors = BTreeMap<String, String>;

pub const LOCATION_REQUIRED: &str = "Location is required";
pub const TARGET_JOB_REQUIRED: &str = "Target job is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters";
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Required profile fields and the step that collects each of them.
const REQUIRED: &[(TextField, &str, &str, u8)] = &[
    (TextField::Location, "location", LOCATION_REQUIRED, 2),
    (TextField::TargetJob, "targetJob", TARGET_JOB_REQUIRED, 4),
];

pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Length in characters, not bytes.
pub fn has_min_len(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Full profile pass, run at final submit.
pub fn validate_profile(form: &ProfileForm) -> FieldErrors {
    REQUIRED
        .iter()
        .filter(|(field, ..)| form.text(*field).is_empty())
        .map(|(_, name, message, _)| (name.to_string(), message.to_string()))
        .collect()
}

/// Only the rules owned by `step`; used when step transitions are strict.
pub fn validate_step(form: &ProfileForm, step: Step) -> FieldErrors {
    REQUIRED
        .iter()
        .filter(|(_, _, _, owner)| *owner == step.index())
        .filter(|(field, ..)| form.text(*field).is_empty())
        .map(|(_, name, message, _)| (name.to_string(), message.to_string()))
        .collect()
}

/// Email rule shared by the sign-up, login and forgot-password forms.
pub fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_email(email) {
        errors.insert("email".to_string(), INVALID_EMAIL.to_string());
    }
}

pub fn check_password(errors: &mut FieldErrors, password: &str) {
    if !has_min_len(password, MIN_PASSWORD_LEN) {
        errors.insert("password".to_string(), SHORT_PASSWORD.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(validate_profile(&ProfileForm::default()).is_empty());
    }

    #[test]
    fn test_empty_location_is_reported() {
        let form = ProfileForm {
            location: String::new(),
            ..ProfileForm::default()
        };
        let errors = validate_profile(&form);
        assert_eq!(errors.get("location").map(String::as_str), Some(LOCATION_REQUIRED));
        assert!(!errors.contains_key("targetJob"));
    }

    #[test]
    fn test_empty_target_job_is_reported() {
        let form = ProfileForm {
            target_job: String::new(),
            ..ProfileForm::default()
        };
        let errors = validate_profile(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["targetJob"], TARGET_JOB_REQUIRED);
    }

    #[test]
    fn test_whitespace_location_counts_as_present() {
        let form = ProfileForm {
            location: " ".into(),
            ..ProfileForm::default()
        };
        assert!(validate_profile(&form).is_empty());
    }

    #[test]
    fn test_step_validation_only_checks_owned_fields() {
        let form = ProfileForm {
            location: String::new(),
            target_job: String::new(),
            ..ProfileForm::default()
        };
        assert!(validate_step(&form, Step::new(1).unwrap()).is_empty());
        assert!(validate_step(&form, Step::new(2).unwrap()).contains_key("location"));
        assert!(validate_step(&form, Step::new(4).unwrap()).contains_key("targetJob"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("kent@wizjob.ai"));
        assert!(is_email("first.last+jobs@mail.example.co"));
        assert!(!is_email("kent"));
        assert!(!is_email("kent@localhost"));
        assert!(!is_email(".kent@wizjob.ai"));
        assert!(!is_email("ke..nt@wizjob.ai"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_password_length_counts_chars() {
        let mut errors = FieldErrors::new();
        check_password(&mut errors, "pässwö");
        assert!(errors.is_empty());
        check_password(&mut errors, "12345");
        assert_eq!(errors["password"], SHORT_PASSWORD);
    }
}
