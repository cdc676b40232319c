//! Watermark store trait definition

use crate::models::Watermark;
use anyhow::Result;

/// Persistence seam for the watermark.
pub trait WatermarkStore: Send + Sync {
    /// Read the persisted watermark.
    ///
    /// Fails soft: a missing backing store, an I/O error or an unparseable
    /// value all yield `None`. A corrupt watermark must degrade to the
    /// startup-default behavior, never crash the poll loop.
    fn load(&self) -> Option<Watermark>;

    /// Persist the watermark, fully overwriting any prior value.
    fn save(&self, watermark: Watermark) -> Result<()>;
}
