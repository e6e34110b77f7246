//! Atlas sizes and manager configuration.

use serde::{Deserialize, Serialize};

/// Border of zero texels kept around every image inside its block.
pub const PADDING: u32 = 1;
/// Padding on both sides of one axis.
pub const DOUBLE_PADDING: u32 = 2 * PADDING;

/// Dimensions of an atlas and of the blocks it is divided into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasSize {
    pub width: u32,
    pub height: u32,
    pub block_width: u32,
    pub block_height: u32,
}

impl AtlasSize {
    pub fn new(width: u32, height: u32, block_width: u32, block_height: u32) -> Self {
        Self {
            width,
            height,
            block_width,
            block_height,
        }
    }

    /// The same atlas with blocks grown to hold a `block_width` x
    /// `block_height` image plus its border.
    ///
    /// `None` when a padded block side overflows `u32`.
    pub fn padded(self) -> Option<Self> {
        Some(Self {
            block_width: self.block_width.checked_add(DOUBLE_PADDING)?,
            block_height: self.block_height.checked_add(DOUBLE_PADDING)?,
            ..self
        })
    }

    /// Whether a padded block fits the atlas next to the opaque texel.
    pub fn is_valid(&self) -> bool {
        let fits = |block: u32, side: u32| {
            block
                .checked_add(DOUBLE_PADDING)
                .is_some_and(|padded| padded < side)
        };
        self.block_width > 0
            && self.block_height > 0
            && fits(self.block_width, self.width)
            && fits(self.block_height, self.height)
    }

    /// Number of whole blocks; the first row and column hold the opaque texel.
    pub fn total_blocks(&self) -> u32 {
        if self.block_width == 0 || self.block_height == 0 {
            return 0;
        }
        (self.width.saturating_sub(1) / self.block_width) * (self.height.saturating_sub(1) / self.block_height)
    }

    /// Whether a `width` x `height` image fits a block with its border.
    pub fn fits_block(&self, width: u32, height: u32) -> bool {
        let fits = |side: u32, block: u32| {
            side.checked_add(DOUBLE_PADDING)
                .is_some_and(|padded| padded <= block)
        };
        fits(width, self.block_width) && fits(height, self.block_height)
    }
}

/// What [`AtlasManager::add`](crate::AtlasManager::add) does when no atlas
/// accepts an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddFailPolicy {
    /// Create an atlas of the new-atlas size and retry.
    #[default]
    FailOnAddCreates,
    /// Fail.
    FailOnAddFails,
}

/// Atlas manager configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasManagerConfig {
    /// Size of automatically created atlases. Block sizes are the largest
    /// image they must hold; padding is added on creation.
    pub new_atlas_size: AtlasSize,
    pub add_policy: AddFailPolicy,
}

impl Default for AtlasManagerConfig {
    fn default() -> Self {
        Self {
            new_atlas_size: AtlasSize::new(512, 512, 16, 16),
            add_policy: AddFailPolicy::FailOnAddCreates,
        }
    }
}

impl AtlasManagerConfig {
    /// Parse a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ===================================================================
// Tests
// ===================================================================
