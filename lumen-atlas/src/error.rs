//! Error types of the atlas cache.

use thiserror::Error;

use crate::config::AtlasSize;
use crate::pixel::PixelFormat;

/// Failure of an atlas operation on an existing atlas or image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtlasError {
    #[error("Atlas {width}x{height} cannot hold a padded {block_width}x{block_height} block")]
    AtlasTooSmall {
        width: u32,
        height: u32,
        block_width: u32,
        block_height: u32,
    },
    #[error("Atlas not found: {0}")]
    InvalidAtlas(u32),
    #[error("Image not found: {0}")]
    InvalidImage(u32),
    #[error("Image {0} already freed")]
    AlreadyFreed(u32),
    #[error("Bitmap {width}x{height} {format:?} needs {expected} bytes, got {actual}")]
    BitmapSizeMismatch {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },
}

impl AtlasError {
    pub(crate) fn too_small(size: &AtlasSize) -> Self {
        AtlasError::AtlasTooSmall {
            width: size.width,
            height: size.height,
            block_width: size.block_width,
            block_height: size.block_height,
        }
    }
}

/// Failure of [`AtlasManager::add`](crate::AtlasManager::add).
///
/// Every variant leaves the manager exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
    #[error("No atlas accepts a {width}x{height} {format:?} image")]
    NoSuitableAtlas {
        width: u32,
        height: u32,
        format: PixelFormat,
    },
    #[error("A {width}x{height} image does not fit the new-atlas block size")]
    TooLargeForNewAtlas { width: u32, height: u32 },
    #[error("Failed to create atlas: {0}")]
    AtlasCreation(#[from] AtlasError),
    #[error("Image pixel data is inconsistent with its size and format")]
    InvalidPixelData,
}
