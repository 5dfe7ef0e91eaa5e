//! gallery-server: art gallery storefront service
//!
//! - Public catalog with detail pages (image cycling, purchase link, report)
//! - Inquiry form relayed to the gallerist through EmailJS
//! - Admin dashboard and "Add Painting" form behind a JWT session

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod logger;
pub mod navigator;
pub mod state;
pub mod util;

pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use state::AppState;
