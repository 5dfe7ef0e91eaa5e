//! "Request Information" form submission

use axum::{Json, Router, extract::State, middleware, routing::post};
use serde::Serialize;
use shared::error::{ApiResponse, AppResult};
use shared::models::{InquiryForm, InquiryStatus};

use crate::auth::rate_limit::inquiry_rate_limit;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/inquiries", post(submit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            inquiry_rate_limit,
        ))
}

#[derive(Debug, Serialize)]
pub struct InquiryReceipt {
    pub status: InquiryStatus,
}

/// POST /api/inquiries
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> AppResult<ApiResponse<InquiryReceipt>> {
    let status = state.inquiries.submit(&form).await?;
    Ok(ApiResponse::success_with_message(
        "Thank you for your inquiry. We will get back to you soon.",
        InquiryReceipt { status },
    ))
}
