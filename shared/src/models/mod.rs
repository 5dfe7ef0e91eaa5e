//! Data models
//!
//! Store row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! View models serialize in camelCase for the storefront frontend.

pub mod inquiry;
pub mod painting;

// Re-exports
pub use inquiry::*;
pub use painting::*;
