//! Inquiry Model
//!
//! The "Request Information" form on a painting's detail page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inquiry form fields, passed through to the email template as-is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Hidden field carrying the painting the visitor asked about
    pub painting_title: String,
}

/// Outcome of an inquiry submission, reported back to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    Success,
    Error,
}

impl InquiryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Success => "success",
            InquiryStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InquiryFormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid email address")]
    InvalidEmail,
}

impl InquiryForm {
    /// Required-field check only; content is not inspected further
    pub fn validate(&self) -> Result<(), InquiryFormError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(InquiryFormError::Required(*field));
        }
        if !self.email.contains('@') {
            return Err(InquiryFormError::InvalidEmail);
        }
        Ok(())
    }
}
