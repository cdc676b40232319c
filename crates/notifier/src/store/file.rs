//! File-backed watermark store
//!
//! One text file holding the canonical `YYYY-MM-DD HH:MM:SS` string. Writes
//! go to a sibling temp file first and are renamed into place, so a crash
//! mid-write leaves at worst an unparseable file, which `load` treats as
//! absent. It can never leave a value that parses to a different, valid
//! timestamp.

use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};

use super::WatermarkStore;
use crate::models::Watermark;

/// Watermark store backed by a single text file
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl WatermarkStore for FileWatermarkStore {
    fn load(&self) -> Option<Watermark> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read watermark file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match Watermark::parse(&content) {
            Ok(watermark) => Some(watermark),
            Err(e) => {
                warn!(
                    "Ignoring corrupt watermark file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, watermark: Watermark) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create watermark directory: {}", parent.display())
            })?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, watermark.to_string())
            .with_context(|| format!("Failed to write watermark file: {}", temp.display()))?;
        std::fs::rename(&temp, &self.path).with_context(|| {
            format!("Failed to move watermark into place: {}", self.path.display())
        })?;
        Ok(())
    }
}
