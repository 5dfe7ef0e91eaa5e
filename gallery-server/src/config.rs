//! Gallery server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_PAYMENT_LINK_BASE: &str = "https://buy.stripe.com/test_example";

/// Gallery server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (env: DATABASE_URL)
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for admin sessions
    pub jwt_secret: String,
    /// Gallerist login email
    pub admin_email: String,
    /// Argon2 PHC hash of the gallerist password
    pub admin_password_hash: String,
    /// EmailJS service id
    pub emailjs_service_id: String,
    /// EmailJS template id
    pub emailjs_template_id: String,
    /// EmailJS public key (sent as `user_id`)
    pub emailjs_public_key: String,
    /// EmailJS REST endpoint
    pub emailjs_endpoint: String,
    /// Checkout link prefix; the painting id is appended
    pub payment_link_base: String,
    /// Symbol shown in front of every displayed price
    pub currency_symbol: String,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                Self::placeholder(name)
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn placeholder(name: &str) -> String {
        format!("dev-{name}-not-for-production")
    }

    fn var_or(name: &str, default: &str) -> String {
        std::env::var(name)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default.into())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = Self::var_or("ENVIRONMENT", "development");

        Ok(Self {
            database_url: Self::var_or("DATABASE_URL", "sqlite:gallery.db"),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_email: Self::var_or("ADMIN_EMAIL", "gallerist@localhost"),
            admin_password_hash: Self::require_secret("ADMIN_PASSWORD_HASH", &environment)?,
            emailjs_service_id: Self::var_or("EMAILJS_SERVICE_ID", "YOUR_SERVICE_ID"),
            emailjs_template_id: Self::var_or("EMAILJS_TEMPLATE_ID", "YOUR_TEMPLATE_ID"),
            emailjs_public_key: Self::var_or("EMAILJS_PUBLIC_KEY", "YOUR_PUBLIC_KEY"),
            emailjs_endpoint: Self::var_or("EMAILJS_ENDPOINT", DEFAULT_EMAILJS_ENDPOINT),
            payment_link_base: Self::var_or("PAYMENT_LINK_BASE", DEFAULT_PAYMENT_LINK_BASE),
            currency_symbol: Self::var_or("CURRENCY_SYMBOL", "$"),
            log_level: Self::var_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Secrets still holding their development placeholder
    pub fn placeholder_secrets(&self) -> Vec<&'static str> {
        [
            ("JWT_SECRET", &self.jwt_secret),
            ("ADMIN_PASSWORD_HASH", &self.admin_password_hash),
        ]
        .into_iter()
        .filter(|(name, value)| **value == Self::placeholder(name))
        .map(|(name, _)| name)
        .collect()
    }
}
