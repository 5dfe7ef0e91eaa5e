//! Detail Navigator
//!
//! Per-page view model over one painting: cyclic image index, purchase
//! link and report visibility. Loads are tagged with a [`LoadTicket`] so a
//! response for an id the user already navigated away from is dropped.

use shared::models::{Painting, PaintingDetailView};

use crate::error::{CatalogError, CatalogResult};

/// Tag for one in-flight load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: String,
    pub seq: u64,
}

/// What the page should do with a finished load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Superseded by a later load; nothing changed
    Stale,
    Shown,
    /// Painting does not exist; go back to the catalog
    RedirectToCatalog,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct DetailNavigator {
    painting: Option<Painting>,
    current_image_index: usize,
    seq: u64,
    pending: Option<LoadTicket>,
}

impl DetailNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `id`; any earlier ticket becomes stale
    pub fn begin_load(&mut self, id: impl Into<String>) -> LoadTicket {
        self.seq += 1;
        let ticket = LoadTicket {
            id: id.into(),
            seq: self.seq,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: CatalogResult<Painting>,
    ) -> LoadOutcome {
        if self.pending.as_ref() != Some(ticket) {
            tracing::debug!(id = %ticket.id, seq = ticket.seq, "Discarding stale load");
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(painting) => {
                self.show(painting);
                LoadOutcome::Shown
            }
            Err(CatalogError::NotFound(_)) => {
                self.painting = None;
                self.current_image_index = 0;
                LoadOutcome::RedirectToCatalog
            }
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }

    /// Display `painting`; the index resets only when the identity changes
    pub fn show(&mut self, painting: Painting) {
        let same = self
            .painting
            .as_ref()
            .is_some_and(|current| current.id == painting.id);
        if !same {
            self.current_image_index = 0;
        }
        self.painting = Some(painting);
        self.clamp_index();
    }

    pub fn painting(&self) -> Option<&Painting> {
        self.painting.as_ref()
    }

    pub fn current_image_index(&self) -> usize {
        self.current_image_index
    }

    fn image_count(&self) -> usize {
        self.painting.as_ref().map_or(0, |p| p.image_urls.len())
    }

    fn clamp_index(&mut self) {
        let n = self.image_count();
        if n == 0 {
            self.current_image_index = 0;
        } else if self.current_image_index >= n {
            self.current_image_index %= n;
        }
    }

    /// Next image, wrapping to the first. No-op without images.
    pub fn advance(&mut self) {
        let n = self.image_count();
        if n == 0 {
            return;
        }
        self.current_image_index = (self.current_image_index + 1) % n;
    }

    /// Jump to `index` (wrapped). No-op without images.
    pub fn seek(&mut self, index: usize) {
        let n = self.image_count();
        if n == 0 {
            return;
        }
        self.current_image_index = index % n;
    }

    pub fn current_image(&self) -> Option<&str> {
        self.painting
            .as_ref()
            .and_then(|p| p.image_urls.get(self.current_image_index))
            .map(String::as_str)
    }

    pub fn purchase_link(&self) -> Option<&str> {
        self.painting
            .as_ref()
            .map(|p| p.stripe_payment_link.as_str())
    }

    pub fn has_report(&self) -> bool {
        self.painting.as_ref().is_some_and(Painting::has_report)
    }

    /// Snapshot for rendering, `None` until a painting is shown
    pub fn view(&self, currency_symbol: &str) -> Option<PaintingDetailView> {
        let painting = self.painting.as_ref()?;
        Some(PaintingDetailView {
            price_display: shared::util::format_price(painting.price, currency_symbol),
            current_image_index: self.current_image_index,
            current_image: self.current_image().map(str::to_string),
            image_count: painting.image_urls.len(),
            has_report: painting.has_report(),
            purchase_link: painting.stripe_payment_link.clone(),
            painting: painting.clone(),
        })
    }
}
