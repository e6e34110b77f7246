//! Pixel formats and CPU-side bitmaps.

use serde::{Deserialize, Serialize};

use crate::error::AtlasError;

/// Layout of one pixel in a bitmap or atlas texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit alpha, the usual format for glyph coverage masks.
    #[default]
    A8,
    /// 8-bit luminance.
    L8,
    La88,
    Rgb888,
    Rgb565,
    Rgba8888,
    /// Color emoji.
    Bgra8888,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::A8 | PixelFormat::L8 => 1,
            PixelFormat::La88 | PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgba8888 | PixelFormat::Bgra8888 => 4,
        }
    }

    /// A fully opaque white pixel in this format.
    pub fn opaque_pixel(self) -> Vec<u8> {
        vec![0xFF; self.bytes_per_pixel()]
    }
}

/// A tightly packed bitmap (no row padding).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelData {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub buffer: Vec<u8>,
}

impl PixelData {
    /// Wrap `buffer`, checking that its length matches the size and format.
    pub fn new(width: u32, height: u32, format: PixelFormat, buffer: Vec<u8>) -> Result<Self, AtlasError> {
        let expected = Self::byte_len(width, height, format);
        if buffer.len() != expected {
            return Err(AtlasError::BitmapSizeMismatch {
                width,
                height,
                format,
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            buffer,
        })
    }

    /// A bitmap with every byte set to `value`.
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Self {
        Self {
            width,
            height,
            format,
            buffer: vec![value; Self::byte_len(width, height, format)],
        }
    }

    pub fn byte_len(width: u32, height: u32, format: PixelFormat) -> usize {
        width as usize * height as usize * format.bytes_per_pixel()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    pub fn is_consistent(&self) -> bool {
        self.buffer.len() == Self::byte_len(self.width, self.height, self.format)
    }
}
