//! Application state for gallery-server

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtSessionProvider, RateLimiter, SessionProvider};
use crate::catalog::{CatalogLoader, CatalogStore, PaintingCreator};
use crate::config::Config;
use crate::db::{DbService, SqliteCatalogStore};
use crate::email::{EmailJsMailer, InquiryDispatcher, InquiryMailer};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool (health checks)
    pub pool: SqlitePool,
    pub loader: CatalogLoader,
    pub creator: PaintingCreator,
    /// Issues admin tokens on login
    pub jwt: JwtSessionProvider,
    /// Answers session checks for the admin gate
    pub sessions: Arc<dyn SessionProvider>,
    pub inquiries: InquiryDispatcher,
    /// Rate limiter for login/inquiry routes
    pub rate_limiter: RateLimiter,
    pub currency_symbol: String,
}

impl AppState {
    /// Open the database and wire the production collaborators
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;
        let mailer = Arc::new(EmailJsMailer::new(&config.emailjs_endpoint));
        Ok(Self::from_parts(db.pool, config, mailer))
    }

    /// Build the state around an existing pool and mailer
    pub fn from_parts(pool: SqlitePool, config: &Config, mailer: Arc<dyn InquiryMailer>) -> Self {
        let store: Arc<dyn CatalogStore> = Arc::new(SqliteCatalogStore::new(pool.clone()));
        let jwt = JwtSessionProvider::new(
            &config.jwt_secret,
            &config.admin_email,
            &config.admin_password_hash,
        );

        Self {
            loader: CatalogLoader::new(store.clone(), &config.payment_link_base),
            creator: PaintingCreator::new(store, &config.payment_link_base),
            sessions: Arc::new(jwt.clone()),
            jwt,
            inquiries: InquiryDispatcher::new(
                mailer,
                &config.emailjs_service_id,
                &config.emailjs_template_id,
                &config.emailjs_public_key,
            ),
            rate_limiter: RateLimiter::new(),
            currency_symbol: config.currency_symbol.clone(),
            pool,
        }
    }

    /// Swap the catalog store (loader and creator share it)
    pub fn with_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        let base = self.loader.payment_link_base().to_string();
        self.loader = CatalogLoader::new(store.clone(), &base);
        self.creator = PaintingCreator::new(store, base);
        self
    }

    /// Swap the session provider used by the admin gate
    pub fn with_session_provider(mut self, provider: Arc<dyn SessionProvider>) -> Self {
        self.sessions = provider;
        self
    }
}
