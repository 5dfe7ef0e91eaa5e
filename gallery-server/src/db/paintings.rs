//! SQLite catalog store

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{
    NewPainting, NewPaintingImage, NewPaintingReport, PaintingImageRow, PaintingReportRow,
    PaintingRow,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use crate::catalog::{CatalogStore, PaintingRecord, RecordRead, RowRejected, StoreResult};

const PAINTING_COLUMNS: &str =
    "id, title, artist, description, price, dimensions, medium, year, created_at";

/// Decode child rows one at a time.
///
/// A row that fails to decode marks its owning painting in `broken`; if even
/// the owner cannot be read the row is dropped with a warning.
fn decode_children<T>(rows: &[SqliteRow], kind: &str, broken: &mut HashMap<i64, String>) -> Vec<T>
where
    T: for<'r> FromRow<'r, SqliteRow>,
{
    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        match T::from_row(row) {
            Ok(child) => decoded.push(child),
            Err(e) => match row.try_get::<i64, _>("painting_id") {
                Ok(painting_id) => {
                    broken
                        .entry(painting_id)
                        .or_insert_with(|| format!("unreadable {kind} row: {e}"));
                }
                Err(_) => {
                    tracing::warn!(kind, error = %e, "Dropping unreadable child row with no owner");
                }
            },
        }
    }
    decoded
}

#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn read_all(&self) -> StoreResult<Vec<RecordRead>> {
        let painting_rows = sqlx::query(&format!(
            "SELECT {PAINTING_COLUMNS} FROM paintings ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let image_rows = sqlx::query(
            "SELECT id, painting_id, url, sort_order FROM painting_images ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let report_rows =
            sqlx::query("SELECT id, painting_id, url FROM painting_reports ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        // painting id -> why one of its child rows could not be read
        let mut broken: HashMap<i64, String> = HashMap::new();
        let images: Vec<PaintingImageRow> = decode_children(&image_rows, "image", &mut broken);
        let reports: Vec<PaintingReportRow> =
            decode_children(&report_rows, "report", &mut broken);

        let mut images_by_painting: HashMap<i64, Vec<PaintingImageRow>> = HashMap::new();
        for image in images {
            images_by_painting
                .entry(image.painting_id)
                .or_default()
                .push(image);
        }
        let mut reports_by_painting: HashMap<i64, Vec<PaintingReportRow>> = HashMap::new();
        for report in reports {
            reports_by_painting
                .entry(report.painting_id)
                .or_default()
                .push(report);
        }

        Ok(painting_rows
            .iter()
            .map(|row| {
                let painting = PaintingRow::from_row(row).map_err(|e| RowRejected {
                    id: row.try_get("id").unwrap_or_default(),
                    reason: e.to_string(),
                })?;
                if let Some(reason) = broken.remove(&painting.id) {
                    return Err(RowRejected {
                        id: painting.id,
                        reason,
                    });
                }
                Ok(PaintingRecord {
                    images: images_by_painting.remove(&painting.id).unwrap_or_default(),
                    reports: reports_by_painting.remove(&painting.id).unwrap_or_default(),
                    painting,
                })
            })
            .collect())
    }

    async fn read_one(&self, id: i64) -> StoreResult<Option<PaintingRecord>> {
        let painting: Option<PaintingRow> = sqlx::query_as(&format!(
            "SELECT {PAINTING_COLUMNS} FROM paintings WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(painting) = painting else {
            return Ok(None);
        };

        let images: Vec<PaintingImageRow> = sqlx::query_as(
            "SELECT id, painting_id, url, sort_order FROM painting_images WHERE painting_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let reports: Vec<PaintingReportRow> = sqlx::query_as(
            "SELECT id, painting_id, url FROM painting_reports WHERE painting_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(PaintingRecord {
            painting,
            images,
            reports,
        }))
    }

    async fn insert_painting(&self, painting: &NewPainting) -> StoreResult<PaintingRow> {
        let row: PaintingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO paintings (title, artist, description, price, dimensions, medium, year, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {PAINTING_COLUMNS}
            "#
        ))
        .bind(&painting.title)
        .bind(&painting.artist)
        .bind(&painting.description)
        .bind(painting.price)
        .bind(&painting.dimensions)
        .bind(&painting.medium)
        .bind(&painting.year)
        .bind(painting.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_images(&self, images: &[NewPaintingImage]) -> StoreResult<()> {
        if images.is_empty() {
            return Ok(());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO painting_images (painting_id, url, sort_order) ");
        builder.push_values(images, |mut b, image| {
            b.push_bind(image.painting_id)
                .push_bind(image.url.clone())
                .push_bind(image.sort_order);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_report(&self, report: &NewPaintingReport) -> StoreResult<()> {
        sqlx::query("INSERT INTO painting_reports (painting_id, url) VALUES (?, ?)")
            .bind(report.painting_id)
            .bind(&report.url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
