//! Admin Session Gate
//!
//! One gate per admin page entry. It asks the session provider exactly once
//! and remembers the answer in [`GateState`].

use std::sync::Arc;

use shared::models::Painting;

use super::{AuthError, Session, SessionProvider};
use crate::catalog::CatalogLoader;
use crate::error::CatalogResult;

/// Login surface
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// Session check not done yet
    Unknown,
    Authenticated(Session),
    Unauthenticated,
}

#[derive(Debug, Clone)]
pub enum AdminView {
    Redirect(&'static str),
    Dashboard {
        session: Session,
        paintings: Vec<Painting>,
    },
}

/// Where the browser goes after logout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::Login => LOGIN_PATH,
        }
    }
}

pub struct AdminGate {
    provider: Arc<dyn SessionProvider>,
    state: GateState,
}

impl AdminGate {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            state: GateState::Unknown,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Resolve the session once. Provider failures count as unauthenticated.
    async fn resolve(&mut self, token: Option<&str>) -> Option<Session> {
        if let GateState::Unknown = self.state {
            self.state = match self.provider.current_session(token).await {
                Ok(Some(session)) => GateState::Authenticated(session),
                Ok(None) => GateState::Unauthenticated,
                Err(e) => {
                    tracing::warn!(error = %e, "Session check failed, treating as signed out");
                    GateState::Unauthenticated
                }
            };
        }
        match &self.state {
            GateState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Enter the admin surface: dashboard with the full catalog, or a
    /// redirect to the login page
    pub async fn enter(
        &mut self,
        token: Option<&str>,
        loader: &CatalogLoader,
    ) -> CatalogResult<AdminView> {
        let Some(session) = self.resolve(token).await else {
            return Ok(AdminView::Redirect(LOGIN_PATH));
        };
        let paintings = loader.load_all().await?;
        Ok(AdminView::Dashboard { session, paintings })
    }

    /// Session for a write action, or `NotAuthenticated`
    pub async fn require(&mut self, token: Option<&str>) -> Result<Session, AuthError> {
        self.resolve(token).await.ok_or(AuthError::NotAuthenticated)
    }

    /// Invalidate the session and go to the login page, even when the
    /// provider fails
    pub async fn logout(&mut self, token: Option<&str>) -> Navigation {
        if let Err(e) = self.provider.sign_out(token).await {
            tracing::warn!(error = %e, "Sign-out failed, redirecting anyway");
        }
        self.state = GateState::Unauthenticated;
        Navigation::Login
    }
}
