//! Per-client throttling of the login and inquiry endpoints
//!
//! Each endpoint has a [`Quota`]. Requests are counted per (endpoint, client)
//! in fixed windows; the first request after a window closes opens a new one.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, header::RETRY_AFTER};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Allowed requests per window for one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub endpoint: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

/// Gallerist sign-in attempts
pub const LOGIN_QUOTA: Quota = Quota {
    endpoint: "login",
    max_requests: 5,
    window: Duration::from_secs(60),
};

/// "Request Information" submissions
pub const INQUIRY_QUOTA: Quota = Quota {
    endpoint: "inquiry",
    max_requests: 3,
    window: Duration::from_secs(60),
};

struct Window {
    opened: Instant,
    length: Duration,
    used: u32,
}

impl Window {
    fn closed_at(&self, now: Instant) -> bool {
        now.duration_since(self.opened) >= self.length
    }
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<(&'static str, String), Window>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request from `client` against `quota`.
    ///
    /// `Err` carries how long until the current window closes.
    pub async fn admit(&self, quota: &Quota, client: &str) -> Result<(), Duration> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows
            .entry((quota.endpoint, client.to_owned()))
            .or_insert_with(|| Window {
                opened: now,
                length: quota.window,
                used: 0,
            });

        if window.closed_at(now) {
            window.opened = now;
            window.length = quota.window;
            window.used = 0;
        }

        if window.used >= quota.max_requests {
            return Err(quota.window.saturating_sub(now.duration_since(window.opened)));
        }
        window.used += 1;
        Ok(())
    }

    /// Forget clients whose window has already closed
    pub async fn cleanup(&self) {
        let now = Instant::now();
        self.windows
            .lock()
            .await
            .retain(|_, window| !window.closed_at(now));
    }

    pub async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Client address: leftmost `X-Forwarded-For` hop, else the socket peer
fn client_of(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    match forwarded {
        Some(hop) => hop.to_owned(),
        None => request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_owned()),
    }
}

fn throttled(retry_in: Duration) -> Response {
    // round up so clients never retry inside the window
    let secs = retry_in.as_secs() + u64::from(retry_in.subsec_nanos() > 0);
    let mut response = AppError::new(ErrorCode::TooManyRequests)
        .with_detail("retry_after_secs", secs)
        .into_response();
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(secs));
    response
}

async fn enforce(state: &AppState, quota: &Quota, request: Request, next: Next) -> Response {
    let client = client_of(&request);
    match state.rate_limiter.admit(quota, &client).await {
        Ok(()) => next.run(request).await,
        Err(retry_in) => {
            tracing::warn!(endpoint = quota.endpoint, client = %client, "Rate limit exceeded");
            throttled(retry_in)
        }
    }
}

pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &LOGIN_QUOTA, request, next).await
}

pub async fn inquiry_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, &INQUIRY_QUOTA, request, next).await
}
