//! Inquiry delivery through EmailJS
//!
//! The form is forwarded as template parameters; no server-side template
//! rendering happens here.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{InquiryForm, InquiryFormError, InquiryStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error(transparent)]
    Validation(#[from] InquiryFormError),

    #[error("email delivery failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for EmailError {
    fn from(e: reqwest::Error) -> Self {
        EmailError::Transport(e.to_string())
    }
}

impl From<EmailError> for AppError {
    fn from(e: EmailError) -> Self {
        match e {
            EmailError::Validation(InquiryFormError::Required(field)) => {
                AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                    .with_detail("field", field)
            }
            EmailError::Validation(err @ InquiryFormError::InvalidEmail) => {
                AppError::with_message(ErrorCode::InvalidFormat, err.to_string())
                    .with_detail("field", "email")
            }
            EmailError::Transport(msg) => {
                tracing::error!(error = %msg, "Inquiry delivery failed");
                AppError::with_message(ErrorCode::InquiryDeliveryFailed, msg)
                    .with_detail("status", InquiryStatus::Error.as_str())
            }
        }
    }
}

impl axum::response::IntoResponse for EmailError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Email collaborator
#[async_trait]
pub trait InquiryMailer: Send + Sync {
    async fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        form: &InquiryForm,
        public_key: &str,
    ) -> Result<(), EmailError>;
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a InquiryForm,
}

/// EmailJS REST API client
#[derive(Clone)]
pub struct EmailJsMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl EmailJsMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl InquiryMailer for EmailJsMailer {
    async fn send_form(
        &self,
        service_id: &str,
        template_id: &str,
        form: &InquiryForm,
        public_key: &str,
    ) -> Result<(), EmailError> {
        let body = EmailJsRequest {
            service_id,
            template_id,
            user_id: public_key,
            template_params: form,
        };

        let resp = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(EmailError::Transport(format!("EmailJS returned {status}: {text}")));
        }
        Ok(())
    }
}

/// Binds the configured EmailJS ids to a mailer
#[derive(Clone)]
pub struct InquiryDispatcher {
    mailer: Arc<dyn InquiryMailer>,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl InquiryDispatcher {
    pub fn new(
        mailer: Arc<dyn InquiryMailer>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Validate and deliver one inquiry. No retry on failure.
    pub async fn submit(&self, form: &InquiryForm) -> Result<InquiryStatus, EmailError> {
        form.validate()?;
        self.mailer
            .send_form(&self.service_id, &self.template_id, form, &self.public_key)
            .await?;
        tracing::info!(painting = %form.painting_title, "Inquiry sent");
        Ok(InquiryStatus::Success)
    }
}
