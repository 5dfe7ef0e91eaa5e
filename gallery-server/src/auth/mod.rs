//! Admin authentication: session provider, admin gate and rate limiting

pub mod gate;
pub mod rate_limit;
pub mod session;

pub use gate::{AdminGate, AdminView, GateState, LOGIN_PATH, Navigation};
pub use rate_limit::RateLimiter;
pub use session::{AuthError, JwtSessionProvider, Session, SessionProvider};

/// Bearer token from the Authorization header, if any
pub fn bearer_token(headers: &http::HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
