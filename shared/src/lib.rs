//! Shared types for the gallery workspace
//!
//! Painting and inquiry models, the unified error system, and the price and
//! date formatting used by every view.

pub mod error;
pub mod models;
pub mod util;
