//! Admin surface: login, logout, dashboard and painting creation

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{AdminPaintingRow, PaintingCreate};

use crate::auth::rate_limit::login_rate_limit;
use crate::auth::{AdminGate, AdminView, bearer_token};
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/api/admin/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    Router::new()
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/paintings", get(dashboard).post(create))
        .merge(login)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub expires_at: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub email: String,
    pub paintings: Vec<AdminPaintingRow>,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (token, session) = state.jwt.sign_in(&req.email, &req.password)?;
    Ok(ApiResponse::success(LoginResponse {
        token,
        email: session.email,
        expires_at: session.expires_at,
    }))
}

/// POST /api/admin/logout - always lands on the login page
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let mut gate = AdminGate::new(state.sessions.clone());
    let nav = gate.logout(bearer_token(&headers)).await;
    Redirect::to(nav.path())
}

/// GET /api/admin/paintings
pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let mut gate = AdminGate::new(state.sessions.clone());
    match gate.enter(bearer_token(&headers), &state.loader).await? {
        AdminView::Redirect(path) => Ok(Redirect::to(path).into_response()),
        AdminView::Dashboard { session, paintings } => {
            let rows = paintings
                .iter()
                .map(|p| AdminPaintingRow::from_painting(p, &state.currency_symbol))
                .collect();
            Ok(ApiResponse::success(AdminDashboard {
                email: session.email,
                paintings: rows,
            })
            .into_response())
        }
    }
}

/// POST /api/admin/paintings
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<PaintingCreate>,
) -> AppResult<Response> {
    let mut gate = AdminGate::new(state.sessions.clone());
    let session = gate
        .require(bearer_token(&headers))
        .await
        .map_err(AppError::from)?;

    let painting = state.creator.create(form).await?;
    tracing::info!(
        painting_id = %painting.id,
        admin = %session.email,
        "Painting created"
    );
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Painting added successfully", painting),
    )
        .into_response())
}
