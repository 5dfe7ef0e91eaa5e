//! Admin "Add Painting" flow
//!
//! Three sequential writes: painting row, image rows, report row. They are
//! not wrapped in a transaction; a failure after the first write leaves the
//! painting row behind and is reported as [`CatalogError::PartialWrite`].

use std::fmt;
use std::sync::Arc;

use shared::models::{
    NewPainting, NewPaintingImage, NewPaintingReport, Painting, PaintingCreate, PaintingImageRow,
    PaintingReportRow,
};

use super::{CatalogStore, PaintingRecord, normalize};
use crate::error::{CatalogError, CatalogResult};

/// Write step of the creation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    InsertPainting,
    InsertImages,
    InsertReport,
}

impl fmt::Display for CreateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CreateStep::InsertPainting => "insert painting",
            CreateStep::InsertImages => "insert images",
            CreateStep::InsertReport => "insert report",
        };
        f.write_str(s)
    }
}

#[derive(Clone)]
pub struct PaintingCreator {
    store: Arc<dyn CatalogStore>,
    payment_link_base: String,
}

impl PaintingCreator {
    pub fn new(store: Arc<dyn CatalogStore>, payment_link_base: impl Into<String>) -> Self {
        Self {
            store,
            payment_link_base: payment_link_base.into(),
        }
    }

    /// Validate the form and run the three writes in order.
    ///
    /// Returns the painting as the loader would produce it.
    pub async fn create(&self, form: PaintingCreate) -> CatalogResult<Painting> {
        let price = form.validate()?;
        let image_urls: Vec<String> = form
            .provided_image_urls()
            .into_iter()
            .map(str::to_string)
            .collect();
        let report_url = form.provided_report_url().map(str::to_string);

        let new_painting = NewPainting {
            title: form.title.trim().to_string(),
            artist: form.artist.trim().to_string(),
            description: form.description.trim().to_string(),
            price,
            dimensions: form.dimensions.trim().to_string(),
            medium: form.medium.trim().to_string(),
            year: form.year.trim().to_string(),
            created_at: shared::util::now_millis(),
        };

        let row = self.store.insert_painting(&new_painting).await?;
        let painting_id = row.id;
        tracing::info!(painting_id, title = %row.title, "Painting row inserted");

        let images: Vec<NewPaintingImage> = image_urls
            .iter()
            .enumerate()
            .map(|(position, url)| NewPaintingImage {
                painting_id,
                url: url.clone(),
                sort_order: position as i64,
            })
            .collect();

        if !images.is_empty() {
            self.store
                .insert_images(&images)
                .await
                .map_err(|e| partial_write(painting_id, CreateStep::InsertImages, e))?;
        }

        let report = report_url.map(|url| NewPaintingReport { painting_id, url });
        if let Some(report) = &report {
            self.store
                .insert_report(report)
                .await
                .map_err(|e| partial_write(painting_id, CreateStep::InsertReport, e))?;
        }

        let record = PaintingRecord {
            painting: row,
            images: images
                .into_iter()
                .map(|img| PaintingImageRow {
                    id: 0,
                    painting_id,
                    url: img.url,
                    sort_order: img.sort_order,
                })
                .collect(),
            reports: report
                .into_iter()
                .map(|r| PaintingReportRow {
                    id: 0,
                    painting_id,
                    url: r.url,
                })
                .collect(),
        };

        normalize(record, &self.payment_link_base)
            .map_err(|rejected| CatalogError::Transport(rejected.to_string()))
    }
}

fn partial_write(painting_id: i64, step: CreateStep, err: super::StoreError) -> CatalogError {
    tracing::warn!(
        painting_id,
        step = %step,
        error = %err,
        "Painting creation failed after the painting row was written; row left in place"
    );
    CatalogError::PartialWrite {
        painting_id,
        step,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RecordRead, StoreError, StoreResult};
    use async_trait::async_trait;
    use shared::models::PaintingRow;
    use std::sync::Mutex;

    /// Records every write; optionally fails one step
    #[derive(Default)]
    struct RecordingStore {
        paintings: Mutex<Vec<NewPainting>>,
        images: Mutex<Vec<NewPaintingImage>>,
        reports: Mutex<Vec<NewPaintingReport>>,
        fail_at: Option<CreateStep>,
    }

    #[async_trait]
    impl CatalogStore for RecordingStore {
        async fn read_all(&self) -> StoreResult<Vec<RecordRead>> {
            Ok(vec![])
        }

        async fn read_one(&self, _: i64) -> StoreResult<Option<PaintingRecord>> {
            Ok(None)
        }

        async fn insert_painting(&self, painting: &NewPainting) -> StoreResult<PaintingRow> {
            if self.fail_at == Some(CreateStep::InsertPainting) {
                return Err(StoreError::Database("disk full".into()));
            }
            let mut paintings = self.paintings.lock().unwrap();
            paintings.push(painting.clone());
            Ok(PaintingRow {
                id: paintings.len() as i64,
                title: painting.title.clone(),
                artist: painting.artist.clone(),
                description: painting.description.clone(),
                price: painting.price,
                dimensions: painting.dimensions.clone(),
                medium: painting.medium.clone(),
                year: painting.year.clone(),
                created_at: painting.created_at,
            })
        }

        async fn insert_images(&self, images: &[NewPaintingImage]) -> StoreResult<()> {
            if self.fail_at == Some(CreateStep::InsertImages) {
                return Err(StoreError::Database("images table locked".into()));
            }
            self.images.lock().unwrap().extend_from_slice(images);
            Ok(())
        }

        async fn insert_report(&self, report: &NewPaintingReport) -> StoreResult<()> {
            if self.fail_at == Some(CreateStep::InsertReport) {
                return Err(StoreError::Database("reports table locked".into()));
            }
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn form() -> PaintingCreate {
        PaintingCreate {
            title: "Reef Dream".into(),
            artist: "Test".into(),
            description: "Coral at dusk".into(),
            price: "500".into(),
            dimensions: "20\" x 20\"".into(),
            medium: "Watercolor".into(),
            year: "2024".into(),
            image_urls: vec!["https://img.example/reef.jpg".into()],
            pdf_report: String::new(),
        }
    }

    fn creator(store: RecordingStore) -> (PaintingCreator, Arc<RecordingStore>) {
        let store = Arc::new(store);
        (PaintingCreator::new(store.clone(), "https://pay.example/"), store)
    }

    #[tokio::test]
    async fn test_create_writes_painting_and_image() {
        let (creator, store) = creator(RecordingStore::default());
        let painting = creator.create(form()).await.unwrap();

        assert_eq!(painting.id, "1");
        assert_eq!(painting.price, 500.0);
        assert_eq!(painting.image_urls, vec!["https://img.example/reef.jpg"]);
        assert!(!painting.has_report());
        assert_eq!(store.paintings.lock().unwrap().len(), 1);
        assert_eq!(store.images.lock().unwrap().len(), 1);
        assert!(store.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_image_urls_are_never_stored() {
        let (creator, store) = creator(RecordingStore::default());
        let mut form = form();
        form.image_urls = vec!["".into(), "  ".into(), "".into()];
        let painting = creator.create(form).await.unwrap();

        assert!(painting.image_urls.is_empty());
        assert!(store.images.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sort_order_is_position_among_survivors() {
        let (creator, store) = creator(RecordingStore::default());
        let mut form = form();
        form.image_urls = vec!["".into(), "a.jpg".into(), " ".into(), "b.jpg".into()];
        creator.create(form).await.unwrap();

        let images = store.images.lock().unwrap();
        let stored: Vec<_> = images
            .iter()
            .map(|i| (i.url.as_str(), i.sort_order))
            .collect();
        assert_eq!(stored, vec![("a.jpg", 0), ("b.jpg", 1)]);
    }

    #[tokio::test]
    async fn test_report_written_once_when_provided() {
        let (creator, store) = creator(RecordingStore::default());
        let mut form = form();
        form.pdf_report = "https://docs.example/coa.pdf".into();
        let painting = creator.create(form).await.unwrap();

        assert_eq!(painting.pdf_report, "https://docs.example/coa.pdf");
        let reports = store.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].painting_id, 1);
    }

    #[tokio::test]
    async fn test_invalid_form_writes_nothing() {
        let (creator, store) = creator(RecordingStore::default());
        let mut form = form();
        form.price = "five hundred".into();
        let err = creator.create(form).await.unwrap_err();

        assert!(matches!(err, CatalogError::Form(_)));
        assert!(store.paintings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_is_partial_write_without_rollback() {
        let (creator, store) = creator(RecordingStore {
            fail_at: Some(CreateStep::InsertImages),
            ..Default::default()
        });
        let mut form = form();
        form.pdf_report = "https://docs.example/coa.pdf".into();
        let err = creator.create(form).await.unwrap_err();

        match err {
            CatalogError::PartialWrite {
                painting_id,
                step,
                message,
            } => {
                assert_eq!(painting_id, 1);
                assert_eq!(step, CreateStep::InsertImages);
                assert!(message.contains("images table locked"));
            }
            other => panic!("expected PartialWrite, got {other:?}"),
        }
        // painting row stays, report step never ran
        assert_eq!(store.paintings.lock().unwrap().len(), 1);
        assert!(store.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_step_failure_is_transport() {
        let (creator, _) = creator(RecordingStore {
            fail_at: Some(CreateStep::InsertPainting),
            ..Default::default()
        });
        let err = creator.create(form()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(CreateStep::InsertPainting.to_string(), "insert painting");
        assert_eq!(CreateStep::InsertImages.to_string(), "insert images");
    }
}
