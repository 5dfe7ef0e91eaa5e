//! Catalog: loading, normalizing and creating paintings
//!
//! The data store is reached only through [`CatalogStore`]; everything in
//! here works against that trait so the SQLite store and test doubles are
//! interchangeable.

mod create;
mod loader;
mod normalize;
mod store;

pub use create::{CreateStep, PaintingCreator};
pub use loader::{CatalogLoader, parse_painting_id};
pub use normalize::{RowRejected, normalize, payment_link};
pub use store::{CatalogStore, PaintingRecord, RecordRead, StoreError, StoreResult};
