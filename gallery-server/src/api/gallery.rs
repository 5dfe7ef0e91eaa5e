//! Public gallery: list and detail pages

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::PaintingSummary;

use crate::navigator::{DetailNavigator, LoadOutcome};
use crate::state::AppState;

/// Catalog page the detail view falls back to
pub const CATALOG_PATH: &str = "/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/paintings", get(list))
        .route("/api/paintings/{id}", get(detail))
        .route("/api/paintings/{id}/images/{index}/next", get(next_image))
}

/// GET /api/paintings - gallery cards, newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let paintings = state.loader.load_all().await?;
    let cards: Vec<PaintingSummary> = paintings
        .iter()
        .map(|p| PaintingSummary::from_painting(p, &state.currency_symbol))
        .collect();
    Ok(ApiResponse::success(cards).into_response())
}

/// GET /api/paintings/{id}
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    render_detail(&state, &id, |_| {}).await
}

/// GET /api/paintings/{id}/images/{index}/next - the image after `index`
pub async fn next_image(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> AppResult<Response> {
    render_detail(&state, &id, |nav| {
        nav.seek(index);
        nav.advance();
    })
    .await
}

async fn render_detail(
    state: &AppState,
    id: &str,
    position: impl FnOnce(&mut DetailNavigator),
) -> AppResult<Response> {
    let mut nav = DetailNavigator::new();
    let ticket = nav.begin_load(id);

    // only NotFound goes through the navigator; other failures keep their code
    let result = match state.loader.load_one(id).await {
        Err(e) if !e.is_not_found() => return Err(e.into()),
        other => other,
    };

    match nav.complete_load(&ticket, result) {
        LoadOutcome::Shown => {}
        LoadOutcome::RedirectToCatalog => {
            tracing::debug!(id = %id, "Painting not found, redirecting to catalog");
            return Ok(Redirect::to(CATALOG_PATH).into_response());
        }
        LoadOutcome::Failed(message) => return Err(AppError::internal(message)),
        LoadOutcome::Stale => return Err(AppError::internal("detail load superseded")),
    }

    position(&mut nav);
    let view = nav
        .view(&state.currency_symbol)
        .ok_or_else(|| AppError::internal("painting not shown"))?;
    Ok(ApiResponse::success(view).into_response())
}
