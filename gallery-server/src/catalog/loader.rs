//! Catalog Loader
//!
//! `load_all` feeds the gallery and the admin dashboard; `load_one` feeds
//! the detail page. Both go through [`normalize`].

use std::sync::Arc;

use shared::models::Painting;

use super::{CatalogStore, normalize};
use crate::error::{CatalogError, CatalogResult};

/// Parse a painting id in the store's key format (positive integer)
pub fn parse_painting_id(id: &str) -> CatalogResult<i64> {
    let trimmed = id.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 && trimmed == id => Ok(n),
        _ => Err(CatalogError::InvalidId(id.to_string())),
    }
}

#[derive(Clone)]
pub struct CatalogLoader {
    store: Arc<dyn CatalogStore>,
    payment_link_base: String,
}

impl CatalogLoader {
    pub fn new(store: Arc<dyn CatalogStore>, payment_link_base: impl Into<String>) -> Self {
        Self {
            store,
            payment_link_base: payment_link_base.into(),
        }
    }

    pub fn payment_link_base(&self) -> &str {
        &self.payment_link_base
    }

    /// All paintings, newest first.
    ///
    /// Rows that fail to decode or fail validation are skipped so one bad
    /// record does not take the gallery down.
    pub async fn load_all(&self) -> CatalogResult<Vec<Painting>> {
        let records = self.store.read_all().await?;
        let total = records.len();

        let paintings: Vec<Painting> = records
            .into_iter()
            .map(|read| read.and_then(|record| normalize(record, &self.payment_link_base)))
            .filter_map(|normalized| match normalized {
                Ok(painting) => Some(painting),
                Err(rejected) => {
                    tracing::warn!(
                        painting_id = rejected.id,
                        reason = %rejected.reason,
                        "Skipping malformed painting row"
                    );
                    None
                }
            })
            .collect();

        tracing::debug!(total, loaded = paintings.len(), "Catalog loaded");
        Ok(paintings)
    }

    /// One painting by id.
    ///
    /// A malformed id fails before the store is touched; a missing row is
    /// `NotFound`, never an empty painting.
    pub async fn load_one(&self, id: &str) -> CatalogResult<Painting> {
        let key = parse_painting_id(id)?;

        let record = self
            .store
            .read_one(key)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        normalize(record, &self.payment_link_base).map_err(|rejected| {
            tracing::warn!(painting_id = key, reason = %rejected.reason, "Malformed painting row");
            CatalogError::Transport(format!("malformed painting row: {rejected}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PaintingRecord, RecordRead, RowRejected, StoreError, StoreResult};
    use async_trait::async_trait;
    use shared::models::{
        NewPainting, NewPaintingImage, NewPaintingReport, PaintingImageRow, PaintingRow,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FixedStore {
        records: Vec<PaintingRecord>,
        undecodable: Vec<RowRejected>,
        fail: bool,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for FixedStore {
        async fn read_all(&self) -> StoreResult<Vec<RecordRead>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Database("connection refused".into()));
            }
            let mut reads: Vec<RecordRead> = self.records.iter().cloned().map(Ok).collect();
            reads.extend(self.undecodable.iter().cloned().map(Err));
            Ok(reads)
        }

        async fn read_one(&self, id: i64) -> StoreResult<Option<PaintingRecord>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Database("connection refused".into()));
            }
            Ok(self.records.iter().find(|r| r.painting.id == id).cloned())
        }

        async fn insert_painting(&self, _: &NewPainting) -> StoreResult<PaintingRow> {
            unreachable!("loader never writes")
        }

        async fn insert_images(&self, _: &[NewPaintingImage]) -> StoreResult<()> {
            unreachable!("loader never writes")
        }

        async fn insert_report(&self, _: &NewPaintingReport) -> StoreResult<()> {
            unreachable!("loader never writes")
        }
    }

    fn record(id: i64, title: &str) -> PaintingRecord {
        PaintingRecord {
            painting: PaintingRow {
                id,
                title: title.into(),
                artist: "Marina Cole".into(),
                description: "Tidal study".into(),
                price: 2400.0,
                dimensions: "24\" x 36\"".into(),
                medium: "Oil on canvas".into(),
                year: "2024".into(),
                created_at: 1_700_000_000_000 + id,
            },
            images: vec![
                PaintingImageRow {
                    id: id * 10 + 1,
                    painting_id: id,
                    url: "B".into(),
                    sort_order: 1,
                },
                PaintingImageRow {
                    id: id * 10,
                    painting_id: id,
                    url: "A".into(),
                    sort_order: 0,
                },
            ],
            reports: vec![],
        }
    }

    fn loader(store: FixedStore) -> (CatalogLoader, Arc<FixedStore>) {
        let store = Arc::new(store);
        (
            CatalogLoader::new(store.clone(), "https://pay.example/"),
            store,
        )
    }

    #[test]
    fn test_parse_painting_id() {
        assert_eq!(parse_painting_id("7").unwrap(), 7);
        assert!(parse_painting_id("").is_err());
        assert!(parse_painting_id("0").is_err());
        assert!(parse_painting_id("-3").is_err());
        assert!(parse_painting_id(" 7").is_err());
        assert!(parse_painting_id("abc").is_err());
    }

    #[tokio::test]
    async fn test_load_one_orders_images() {
        let (loader, _) = loader(FixedStore {
            records: vec![record(7, "Reef")],
            ..Default::default()
        });
        let painting = loader.load_one("7").await.unwrap();
        assert_eq!(painting.image_urls, vec!["A", "B"]);
        assert_eq!(painting.stripe_payment_link, "https://pay.example/7");
    }

    #[tokio::test]
    async fn test_load_one_missing_is_not_found() {
        let (loader, _) = loader(FixedStore::default());
        let err = loader.load_one("99").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_id_skips_store() {
        let (loader, store) = loader(FixedStore::default());
        let err = loader.load_one("not-an-id").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)));
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_not_found() {
        let (loader, _) = loader(FixedStore {
            fail: true,
            ..Default::default()
        });
        let err = loader.load_one("1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
        assert!(loader.load_all().await.is_err());
    }

    #[tokio::test]
    async fn test_load_all_skips_malformed_rows() {
        let mut bad = record(2, "");
        bad.painting.title = "   ".into();
        let (loader, _) = loader(FixedStore {
            records: vec![record(3, "Newest"), bad, record(1, "Oldest")],
            ..Default::default()
        });
        let paintings = loader.load_all().await.unwrap();
        let titles: Vec<_> = paintings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Oldest"]);
    }

    #[tokio::test]
    async fn test_load_one_malformed_row_is_transport() {
        let mut bad = record(5, "x");
        bad.painting.price = f64::NAN;
        let (loader, _) = loader(FixedStore {
            records: vec![bad],
            ..Default::default()
        });
        let err = loader.load_one("5").await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[tokio::test]
    async fn test_load_all_skips_undecodable_rows() {
        let (loader, _) = loader(FixedStore {
            records: vec![record(1, "Readable")],
            undecodable: vec![RowRejected {
                id: 2,
                reason: "price is not a number".into(),
            }],
            ..Default::default()
        });
        let paintings = loader.load_all().await.unwrap();
        assert_eq!(paintings.len(), 1);
        assert_eq!(paintings[0].title, "Readable");
    }
}
