//! HTTP surface for gallery-server

pub mod admin;
pub mod gallery;
pub mod health;
pub mod inquiry;

use axum::Router;
use http::{HeaderName, HeaderValue, Uri};
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(gallery::router())
        .merge(inquiry::router(state))
        .merge(admin::router(state))
        .fallback(unknown_route)
}

async fn unknown_route(uri: Uri) -> AppError {
    AppError::new(ErrorCode::NotFound).with_detail("path", uri.path().to_string())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    XRequestId,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
