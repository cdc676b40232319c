//! In-memory watermark store for tests

use anyhow::Result;
use std::sync::RwLock;

use super::WatermarkStore;
use crate::models::Watermark;

/// In-memory implementation of WatermarkStore
#[derive(Default)]
pub struct InMemoryWatermarkStore {
    watermark: RwLock<Option<Watermark>>,
}

impl InMemoryWatermarkStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a watermark
    pub fn with_watermark(watermark: Watermark) -> Self {
        Self {
            watermark: RwLock::new(Some(watermark)),
        }
    }
}

impl WatermarkStore for InMemoryWatermarkStore {
    fn load(&self) -> Option<Watermark> {
        *self.watermark.read().unwrap()
    }

    fn save(&self, watermark: Watermark) -> Result<()> {
        *self.watermark.write().unwrap() = Some(watermark);
        Ok(())
    }
}
