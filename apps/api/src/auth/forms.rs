use serde::Deserialize;

use crate::wizard::validation::{
    check_email, check_password, has_min_len, FieldErrors, MIN_PASSWORD_LEN,
};

pub const INVALID_NAME: &str = "Please enter a valid name";
pub const PASSWORD_MISMATCH: &str = "Confirm Password must be same with Password";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// First login stage: the email alone.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginEmailForm {
    pub email: String,
}

/// Second login stage: the email carried over plus the password.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// Implemented by every auth form; an empty map means the form may be submitted.
pub trait Validate {
    fn validate(&self) -> FieldErrors;
}

impl Validate for SignupForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !has_min_len(&self.full_name, 2) {
            errors.insert("fullName".to_string(), INVALID_NAME.to_string());
        }
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        // The length rule and the equality rule share one message.
        if !has_min_len(&self.confirm_password, MIN_PASSWORD_LEN) || self.password != self.confirm_password {
            errors.insert("confirmPassword".to_string(), PASSWORD_MISMATCH.to_string());
        }
        errors
    }
}

impl Validate for LoginEmailForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        errors
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors
    }
}

impl Validate for ForgotPasswordForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        errors
    }
}
