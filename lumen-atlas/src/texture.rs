//! Texture backends.
//!
//! The manager never talks to a GPU directly. It asks a [`TextureBackend`]
//! for one texture per atlas and uploads sub-rectangles through
//! [`AtlasTexture::upload`]. [`CpuTextureBackend`] keeps the pixels in
//! memory; a GPU backend would queue the same uploads.

use crate::pixel::{PixelData, PixelFormat};

/// Creates atlas textures.
pub trait TextureBackend {
    type Texture: AtlasTexture;

    /// A `width` x `height` texture with every byte zero.
    fn create_texture(&mut self, width: u32, height: u32, format: PixelFormat) -> Self::Texture;
}

/// One atlas texture.
pub trait AtlasTexture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn format(&self) -> PixelFormat;

    /// Copy `pixels` with its top-left corner at `(x, y)`.
    ///
    /// Returns `false`, leaving the texture untouched, when the format
    /// differs or the rectangle does not fit.
    fn upload(&mut self, pixels: &PixelData, x: u32, y: u32) -> bool;
}

// ── CPU backend ─────────────────────────────────────────────────────

/// Backend producing in-memory [`CpuTexture`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuTextureBackend;

impl TextureBackend for CpuTextureBackend {
    type Texture = CpuTexture;

    fn create_texture(&mut self, width: u32, height: u32, format: PixelFormat) -> CpuTexture {
        CpuTexture::new(width, height, format)
    }
}

/// In-memory texture.
#[derive(Clone, Debug)]
pub struct CpuTexture {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Tightly packed pixels, row-major.
    pub data: Vec<u8>,
    /// Whether data has changed since the last GPU upload.
    pub dirty: bool,
}

impl CpuTexture {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0u8; PixelData::byte_len(width, height, format)],
            dirty: false,
        }
    }

    /// Bytes of the pixel at `(x, y)`, or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }

    /// Whether every byte of the `width` x `height` rectangle at `(x, y)` is `value`.
    pub fn region_is(&self, x: u32, y: u32, width: u32, height: u32, value: u8) -> bool {
        (y..y + height).all(|row| {
            (x..x + width).all(|col| {
                self.pixel(col, row)
                    .is_some_and(|px| px.iter().all(|&b| b == value))
            })
        })
    }
}

impl AtlasTexture for CpuTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn upload(&mut self, pixels: &PixelData, x: u32, y: u32) -> bool {
        if pixels.format != self.format || !pixels.is_consistent() {
            return false;
        }
        let fits_x = x.checked_add(pixels.width).is_some_and(|right| right <= self.width);
        let fits_y = y.checked_add(pixels.height).is_some_and(|bottom| bottom <= self.height);
        if !fits_x || !fits_y {
            return false;
        }

        let bpp = self.format.bytes_per_pixel();
        let src_stride = pixels.stride();
        let dst_stride = self.width as usize * bpp;
        for row in 0..pixels.height as usize {
            let src = row * src_stride;
            let dst = (y as usize + row) * dst_stride + x as usize * bpp;
            self.data[dst..dst + src_stride].copy_from_slice(&pixels.buffer[src..src + src_stride]);
        }
        self.dirty = true;
        true
    }
}

// ===================================================================
// Tests
// ===================================================================
