//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "error"
        }
    };
    let status = if database == "ok" { "ok" } else { "degraded" };

    Json(serde_json::json!({
        "status": status,
        "service": "gallery-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
