//! Session provider
//!
//! Sessions are HS256 JWTs. A session is an explicit [`Session`] value
//! fetched once per request; nothing is kept in global state except the
//! revocation list written on sign-out.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::util::verify_password;

const JWT_EXPIRY_HOURS: i64 = 24;

/// Snapshot of an authenticated admin session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub expires_at: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session provider unavailable: {0}")]
    Provider(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::NotAuthenticated => AppError::not_authenticated(),
            AuthError::Provider(msg) => {
                tracing::error!(error = %msg, "Session provider error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Auth collaborator: presence check and invalidation
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session for `token`; `None` when absent, expired or revoked
    async fn current_session(&self, token: Option<&str>) -> Result<Option<Session>, AuthError>;

    /// Invalidate the session behind `token`
    async fn sign_out(&self, token: Option<&str>) -> Result<(), AuthError>;
}

/// JWT claims for admin sessions
#[derive(Debug, Serialize, Deserialize)]
struct AdminClaims {
    /// Session ID
    sub: String,
    email: String,
    exp: usize,
    iat: usize,
}

#[derive(Clone)]
pub struct JwtSessionProvider {
    secret: String,
    admin_email: String,
    admin_password_hash: String,
    /// session id -> expiry (Unix seconds)
    revoked: Arc<DashMap<String, i64>>,
}

impl JwtSessionProvider {
    pub fn new(
        secret: impl Into<String>,
        admin_email: impl Into<String>,
        admin_password_hash: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            admin_email: admin_email.into(),
            admin_password_hash: admin_password_hash.into(),
            revoked: Arc::new(DashMap::new()),
        }
    }

    /// Check the gallerist credentials and issue a session token
    pub fn sign_in(&self, email: &str, password: &str) -> Result<(String, Session), AuthError> {
        let email_matches = email.trim().eq_ignore_ascii_case(self.admin_email.trim());
        // verify even on a wrong email so both failures cost the same
        let password_ok = verify_password(password, &self.admin_password_hash);
        if !email_matches || !password_ok {
            tracing::warn!(email = %email, "Admin sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let now = chrono::Utc::now();
        let session = Session {
            session_id: uuid::Uuid::new_v4().to_string(),
            email: self.admin_email.clone(),
            expires_at: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp(),
        };
        let claims = AdminClaims {
            sub: session.session_id.clone(),
            email: session.email.clone(),
            exp: session.expires_at as usize,
            iat: now.timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Provider(e.to_string()))?;

        tracing::info!(session_id = %session.session_id, "Admin signed in");
        Ok((token, session))
    }

    fn decode(&self, token: &str) -> Option<Session> {
        let data = jsonwebtoken::decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| tracing::debug!("JWT validation failed: {e}"))
        .ok()?;

        Some(Session {
            session_id: data.claims.sub,
            email: data.claims.email,
            expires_at: data.claims.exp as i64,
        })
    }

    /// Drop revocation entries whose token has expired anyway
    pub fn purge_revoked(&self) {
        let now = chrono::Utc::now().timestamp();
        self.revoked.retain(|_, expires_at| *expires_at > now);
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn current_session(&self, token: Option<&str>) -> Result<Option<Session>, AuthError> {
        let Some(session) = token.and_then(|t| self.decode(t)) else {
            return Ok(None);
        };
        if self.revoked.contains_key(&session.session_id) {
            return Ok(None);
        }
        Ok(Some(session))
    }

    async fn sign_out(&self, token: Option<&str>) -> Result<(), AuthError> {
        let session = token
            .and_then(|t| self.decode(t))
            .ok_or(AuthError::NotAuthenticated)?;
        self.revoked
            .insert(session.session_id.clone(), session.expires_at);
        tracing::info!(session_id = %session.session_id, "Admin signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hash_password;

    fn provider() -> JwtSessionProvider {
        let hash = hash_password("atlantis").unwrap();
        JwtSessionProvider::new("test-secret", "gallerist@example.com", hash)
    }

    #[tokio::test]
    async fn test_sign_in_then_current_session() {
        let provider = provider();
        let (token, session) = provider
            .sign_in("Gallerist@Example.com", "atlantis")
            .unwrap();
        let current = provider.current_session(Some(&token)).await.unwrap();
        assert_eq!(current, Some(session));
    }

    #[test]
    fn test_wrong_credentials() {
        let provider = provider();
        assert!(matches!(
            provider.sign_in("gallerist@example.com", "lemuria"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in("someone@example.com", "atlantis"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_missing_or_garbage_token_is_no_session() {
        let provider = provider();
        assert_eq!(provider.current_session(None).await.unwrap(), None);
        assert_eq!(
            provider.current_session(Some("garbage")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let provider = provider();
        let other = JwtSessionProvider::new(
            "other-secret",
            "gallerist@example.com",
            hash_password("atlantis").unwrap(),
        );
        let (token, _) = other.sign_in("gallerist@example.com", "atlantis").unwrap();
        assert_eq!(provider.current_session(Some(&token)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_revokes() {
        let provider = provider();
        let (token, _) = provider
            .sign_in("gallerist@example.com", "atlantis")
            .unwrap();
        provider.sign_out(Some(&token)).await.unwrap();
        assert_eq!(provider.current_session(Some(&token)).await.unwrap(), None);

        // live entries survive a purge
        provider.purge_revoked();
        assert_eq!(provider.revoked_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_without_session_fails() {
        let provider = provider();
        assert!(matches!(
            provider.sign_out(None).await,
            Err(AuthError::NotAuthenticated)
        ));
    }
}
