//! Row shape → `Painting` view model

use shared::models::{Painting, PaintingRow};
use thiserror::Error;

use super::PaintingRecord;

/// A stored row that fails schema validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("painting {id}: {reason}")]
pub struct RowRejected {
    pub id: i64,
    pub reason: String,
}

/// Checkout link for a painting: the configured prefix followed by its id
pub fn payment_link(base: &str, id: &str) -> String {
    format!("{base}{id}")
}

fn check_row(row: &PaintingRow) -> Result<(), RowRejected> {
    let reject = |reason: &str| RowRejected {
        id: row.id,
        reason: reason.to_string(),
    };
    if row.id <= 0 {
        return Err(reject("non-positive id"));
    }
    if row.title.trim().is_empty() {
        return Err(reject("empty title"));
    }
    if row.artist.trim().is_empty() {
        return Err(reject("empty artist"));
    }
    if !row.price.is_finite() || row.price < 0.0 {
        return Err(reject("price must be a non-negative number"));
    }
    Ok(())
}

/// Flatten a joined record into the view model.
///
/// Images are ordered by `sort_order` ascending; ties keep store order.
/// Only the first report row is used.
pub fn normalize(record: PaintingRecord, payment_link_base: &str) -> Result<Painting, RowRejected> {
    check_row(&record.painting)?;

    let PaintingRecord {
        painting: row,
        mut images,
        reports,
    } = record;

    if let Some(stray) = images.iter().find(|img| img.painting_id != row.id) {
        return Err(RowRejected {
            id: row.id,
            reason: format!("image {} belongs to painting {}", stray.id, stray.painting_id),
        });
    }

    images.sort_by_key(|img| img.sort_order);
    let image_urls = images.into_iter().map(|img| img.url).collect();

    let pdf_report = reports
        .into_iter()
        .next()
        .map(|report| report.url)
        .unwrap_or_default();

    let id = row.id.to_string();
    Ok(Painting {
        stripe_payment_link: payment_link(payment_link_base, &id),
        id,
        title: row.title,
        artist: row.artist,
        description: row.description,
        price: row.price,
        image_urls,
        dimensions: row.dimensions,
        medium: row.medium,
        year: row.year,
        pdf_report,
        created_at: row.created_at,
    })
}
