//! Watermark persistence
//!
//! The watermark is the only state that survives a cycle, so the store is a
//! narrow load/save seam. The trait-based design allows swapping the
//! file-backed implementation for an in-memory one in tests.

mod file;
mod memory;
mod traits;

pub use file::FileWatermarkStore;
pub use memory::InMemoryWatermarkStore;
pub use traits::WatermarkStore;
