//! Painting Model
//!
//! Three layers live here:
//! - store rows (`paintings`, `painting_images`, `painting_reports`)
//! - the [`Painting`] view model the storefront renders
//! - the admin form payload [`PaintingCreate`]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::MAX_PRICE;

// =============================================================================
// Store rows
// =============================================================================

/// Row of the `paintings` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaintingRow {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: f64,
    pub dimensions: String,
    pub medium: String,
    pub year: String,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
}

/// Row of the `painting_images` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaintingImageRow {
    pub id: i64,
    pub painting_id: i64,
    pub url: String,
    /// Display position; images render in ascending order
    pub sort_order: i64,
}

/// Row of the `painting_reports` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaintingReportRow {
    pub id: i64,
    pub painting_id: i64,
    pub url: String,
}

/// Insert payload for `paintings`
#[derive(Debug, Clone)]
pub struct NewPainting {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: f64,
    pub dimensions: String,
    pub medium: String,
    pub year: String,
    pub created_at: i64,
}

/// Insert payload for `painting_images`
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaintingImage {
    pub painting_id: i64,
    pub url: String,
    pub sort_order: i64,
}

/// Insert payload for `painting_reports`
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaintingReport {
    pub painting_id: i64,
    pub url: String,
}

// =============================================================================
// View model
// =============================================================================

/// Painting as the storefront sees it: children flattened into arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: f64,
    /// Ordered by the stored image `sort_order`
    pub image_urls: Vec<String>,
    pub stripe_payment_link: String,
    pub dimensions: String,
    pub medium: String,
    pub year: String,
    /// Empty string when the painting has no report
    pub pdf_report: String,
    pub created_at: i64,
}

impl Painting {
    pub fn has_report(&self) -> bool {
        !self.pdf_report.is_empty()
    }

    /// First image, shown on gallery cards
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Gallery card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintingSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub price_display: String,
    pub cover_image: Option<String>,
}

impl PaintingSummary {
    pub fn from_painting(painting: &Painting, currency_symbol: &str) -> Self {
        Self {
            id: painting.id.clone(),
            title: painting.title.clone(),
            artist: painting.artist.clone(),
            price: painting.price,
            price_display: crate::util::format_price(painting.price, currency_symbol),
            cover_image: painting.cover_image().map(str::to_string),
        }
    }
}

/// Admin dashboard table row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPaintingRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price_display: String,
    pub image_count: usize,
    pub created: String,
}

impl AdminPaintingRow {
    pub fn from_painting(painting: &Painting, currency_symbol: &str) -> Self {
        Self {
            id: painting.id.clone(),
            title: painting.title.clone(),
            artist: painting.artist.clone(),
            price_display: crate::util::format_price(painting.price, currency_symbol),
            image_count: painting.image_urls.len(),
            created: crate::util::format_date_millis(painting.created_at),
        }
    }
}

/// Detail page state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintingDetailView {
    pub painting: Painting,
    pub price_display: String,
    pub current_image_index: usize,
    pub current_image: Option<String>,
    pub image_count: usize,
    /// Report viewer is rendered only when true
    pub has_report: bool,
    pub purchase_link: String,
}

// =============================================================================
// Admin form
// =============================================================================

/// Admin "Add Painting" form
///
/// `price` arrives as the raw form text; `image_urls` may contain blank
/// trailing inputs, which are dropped before anything is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintingCreate {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub price: String,
    pub dimensions: String,
    pub medium: String,
    pub year: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub pdf_report: String,
}

/// Admin form rejected before any write
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintingFormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

impl PaintingCreate {
    /// Check required fields and parse the price
    pub fn validate(&self) -> Result<f64, PaintingFormError> {
        let required = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("description", &self.description),
            ("price", &self.price),
            ("dimensions", &self.dimensions),
            ("medium", &self.medium),
            ("year", &self.year),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(PaintingFormError::Required(*field));
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| PaintingFormError::InvalidPrice(self.price.clone()))?;
        if !price.is_finite() || !(0.0..=MAX_PRICE).contains(&price) {
            return Err(PaintingFormError::InvalidPrice(self.price.clone()));
        }
        Ok(price)
    }

    /// Non-blank image URLs in form order
    pub fn provided_image_urls(&self) -> Vec<&str> {
        self.image_urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect()
    }

    /// Report URL, if one was entered
    pub fn provided_report_url(&self) -> Option<&str> {
        Some(self.pdf_report.trim()).filter(|u| !u.is_empty())
    }
}
