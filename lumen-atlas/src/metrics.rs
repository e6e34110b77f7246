//! Atlas usage statistics.

use serde::{Deserialize, Serialize};

use crate::config::AtlasSize;
use crate::pixel::PixelFormat;

/// Usage of one atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasMetricsEntry {
    pub size: AtlasSize,
    pub total_blocks: u32,
    /// Blocks owned by a live image.
    pub blocks_used: u32,
    pub pixel_format: PixelFormat,
}

impl AtlasMetricsEntry {
    /// Fraction of the blocks in use, in [0, 1].
    pub fn occupancy(&self) -> f32 {
        if self.total_blocks == 0 {
            return 0.0;
        }
        self.blocks_used as f32 / self.total_blocks as f32
    }
}

/// Usage of every atlas of a manager.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub atlas_count: u32,
    /// Estimated texture memory in bytes.
    pub texture_memory_used: u64,
    pub atlas_metrics: Vec<AtlasMetricsEntry>,
}

impl Metrics {
    pub fn total_blocks_used(&self) -> u32 {
        self.atlas_metrics.iter().map(|entry| entry.blocks_used).sum()
    }
}

/// Texture memory attributed to one atlas.
///
/// Counts one byte per pixel except for `Bgra8888`, which counts four.
pub(crate) fn texture_memory(size: &AtlasSize, format: PixelFormat) -> u64 {
    let pixels = size.width as u64 * size.height as u64;
    match format {
        PixelFormat::Bgra8888 => pixels << 2,
        _ => pixels,
    }
}
