//! Data store collaborator interface

use async_trait::async_trait;
use shared::models::{
    NewPainting, NewPaintingImage, NewPaintingReport, PaintingImageRow, PaintingReportRow,
    PaintingRow,
};
use thiserror::Error;

use super::RowRejected;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    /// A row came back in a shape the schema does not allow
    #[error("Row decode error: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => StoreError::Decode(err.to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A painting row joined with its child rows, before normalization.
///
/// Child rows are in whatever order the store returned them.
#[derive(Debug, Clone)]
pub struct PaintingRecord {
    pub painting: PaintingRow,
    pub images: Vec<PaintingImageRow>,
    pub reports: Vec<PaintingReportRow>,
}

/// One entry of a full read: a usable record, or a row that could not be
/// decoded into one
pub type RecordRead = Result<PaintingRecord, RowRejected>;

/// Read/write surface of the hosted table store
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every painting joined with its children, newest first.
    ///
    /// A row that cannot be decoded comes back as its own `Err` entry; only
    /// a failed query fails the whole read.
    async fn read_all(&self) -> StoreResult<Vec<RecordRead>>;

    /// One painting joined with its children
    async fn read_one(&self, id: i64) -> StoreResult<Option<PaintingRecord>>;

    /// Insert a painting row and return it as stored (id assigned)
    async fn insert_painting(&self, painting: &NewPainting) -> StoreResult<PaintingRow>;

    /// Bulk insert of image rows
    async fn insert_images(&self, images: &[NewPaintingImage]) -> StoreResult<()>;

    /// Insert a single report row
    async fn insert_report(&self, report: &NewPaintingReport) -> StoreResult<()>;
}
