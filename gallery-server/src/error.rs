//! Catalog error taxonomy
//!
//! Every catalog operation reports one of these. The HTTP layer converts
//! them into `AppError` (and from there into an `ApiResponse` body); the
//! detail page intercepts `NotFound` earlier and redirects instead.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::PaintingFormError;
use thiserror::Error;

use crate::catalog::{CreateStep, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Single-record load for an id the store does not have
    #[error("painting {0} not found")]
    NotFound(String),

    /// Id rejected before any store call
    #[error("invalid painting id: {0:?}")]
    InvalidId(String),

    /// Admin form rejected before any store call
    #[error(transparent)]
    Form(#[from] PaintingFormError),

    /// Store unreachable, query failed, or the stored row is unusable
    #[error("{0}")]
    Transport(String),

    /// Creation failed after the painting row was inserted; no rollback
    #[error("{step} failed after painting {painting_id} was created: {message}")]
    PartialWrite {
        painting_id: i64,
        step: CreateStep,
        message: String,
    },
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        CatalogError::Transport(e.to_string())
    }
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => {
                AppError::new(ErrorCode::PaintingNotFound).with_detail("id", id)
            }
            CatalogError::InvalidId(id) => {
                AppError::new(ErrorCode::PaintingInvalidId).with_detail("id", id)
            }
            CatalogError::Form(PaintingFormError::Required(field)) => {
                AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                    .with_detail("field", field)
            }
            CatalogError::Form(err @ PaintingFormError::InvalidPrice(_)) => {
                AppError::with_message(ErrorCode::PaintingInvalidPrice, err.to_string())
            }
            CatalogError::Transport(message) => {
                tracing::error!(error = %message, "Catalog store error");
                AppError::with_message(ErrorCode::DatabaseError, message)
            }
            CatalogError::PartialWrite {
                painting_id,
                step,
                message,
            } => {
                let code = match step {
                    CreateStep::InsertPainting => ErrorCode::DatabaseError,
                    CreateStep::InsertImages => ErrorCode::PaintingImagesWriteFailed,
                    CreateStep::InsertReport => ErrorCode::PaintingReportWriteFailed,
                };
                AppError::with_message(code, message)
                    .with_detail("painting_id", painting_id)
                    .with_detail("step", step.to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for catalog results
pub type CatalogResult<T> = Result<T, CatalogError>;
