//! The atlas manager.
//!
//! Every atlas is a grid of equal blocks. One block holds one image plus a
//! one-texel zero border, so that filtering never bleeds between
//! neighbours. Row 0 and column 0 of the texture are left out of the grid:
//! the texel at the origin is opaque white and is used to draw solid
//! geometry (underlines, backgrounds) from the same texture.
//!
//! ```text
//!  (0,0) opaque texel
//!    ┌─┬──────────┬──────────┬──
//!    │■│          │          │
//!    ├─┼──────────┼──────────┼──
//!    │ │ border   │          │
//!    │ │ ┌──────┐ │  block 1 │
//!    │ │ │image │ │          │
//!    │ │ └──────┘ │          │
//!    ├─┼──────────┼──────────┼──
//! ```
//!
//! Blocks are handed out from the never-used range first, then from the
//! atlas's free list. Images are reference counted and addressed by a
//! stable 1-based [`ImageId`]; a freed slot is reused before the slot table
//! grows.

use std::collections::VecDeque;

use crate::config::{AddFailPolicy, AtlasManagerConfig, AtlasSize, PADDING};
use crate::error::{AddError, AtlasError};
use crate::mesh::{self, Mesh2D};
use crate::metrics::{self, AtlasMetricsEntry, Metrics};
use crate::pixel::{PixelData, PixelFormat};
use crate::texture::{AtlasTexture, TextureBackend};

// ── Handles ─────────────────────────────────────────────────────────

/// 1-based atlas handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtlasId(u32);

impl AtlasId {
    /// `None` for the reserved value 0.
    pub fn from_raw(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// 1-based image handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u32);

impl ImageId {
    pub fn from_raw(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// Where an added image lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasSlot {
    pub atlas_id: AtlasId,
    pub image_id: ImageId,
}

/// Result of a successful [`AtlasManager::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddOutcome {
    pub slot: AtlasSlot,
    /// Whether an atlas had to be created to hold the image.
    pub created_new_atlas: bool,
}

// ── Internal state ──────────────────────────────────────────────────

struct Atlas<T> {
    texture: T,
    size: AtlasSize,
    format: PixelFormat,
    total_blocks: u32,
    /// Blocks never handed out; they are the tail of the block range.
    available_blocks: u32,
    free_blocks: VecDeque<u32>,
    /// Zero strips erasing the border around an uploaded image.
    horizontal_strip: PixelData,
    vertical_strip: PixelData,
}

impl<T> Atlas<T> {
    fn free_block_count(&self) -> u32 {
        self.available_blocks + self.free_blocks.len() as u32
    }

    fn blocks_used(&self) -> u32 {
        self.total_blocks - self.free_block_count()
    }

    fn take_block(&mut self) -> Option<u32> {
        if self.available_blocks > 0 {
            let block = self.total_blocks - self.available_blocks;
            self.available_blocks -= 1;
            Some(block)
        } else {
            self.free_blocks.pop_front()
        }
    }

    /// Top-left texel of `block`'s padded area.
    fn block_origin(&self, block: u32) -> (u32, u32) {
        let blocks_per_row = ((self.size.width - 1) / self.size.block_width).max(1);
        let x = (block % blocks_per_row) * self.size.block_width + PADDING;
        let y = (block / blocks_per_row) * self.size.block_height + PADDING;
        (x, y)
    }
}

#[derive(Clone, Copy, Debug)]
struct ImageSlot {
    atlas_id: AtlasId,
    block: u32,
    width: u32,
    height: u32,
    reference_count: u32,
}

// ── Manager ─────────────────────────────────────────────────────────

/// Packs small bitmaps into shared block atlases.
pub struct AtlasManager<B: TextureBackend> {
    atlases: Vec<Atlas<B::Texture>>,
    images: Vec<ImageSlot>,
    config: AtlasManagerConfig,
    backend: B,
}

impl<B: TextureBackend> AtlasManager<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, AtlasManagerConfig::default())
    }

    pub fn with_config(backend: B, config: AtlasManagerConfig) -> Self {
        Self {
            atlases: Vec::new(),
            images: Vec::new(),
            config,
            backend,
        }
    }

    pub fn config(&self) -> &AtlasManagerConfig {
        &self.config
    }

    // ── Atlases ─────────────────────────────────────────────────────

    /// Create an empty atlas.
    ///
    /// `size.block_width` and `size.block_height` include the image border.
    /// Fails, without creating anything, when a block plus its border does
    /// not fit next to the opaque texel.
    pub fn create_atlas(&mut self, size: AtlasSize, format: PixelFormat) -> Result<AtlasId, AtlasError> {
        if !size.is_valid() {
            log::error!(
                "AtlasManager: atlas {}x{} too small for {}x{} blocks",
                size.width,
                size.height,
                size.block_width,
                size.block_height
            );
            return Err(AtlasError::too_small(&size));
        }

        let mut texture = self.backend.create_texture(size.width, size.height, format);
        let opaque = PixelData {
            width: 1,
            height: 1,
            format,
            buffer: format.opaque_pixel(),
        };
        if !texture.upload(&opaque, 0, 0) {
            log::warn!("AtlasManager: failed to upload the opaque texel");
        }

        let total_blocks = size.total_blocks();
        self.atlases.push(Atlas {
            texture,
            size,
            format,
            total_blocks,
            available_blocks: total_blocks,
            free_blocks: VecDeque::new(),
            horizontal_strip: PixelData::filled(size.block_width, 1, format, 0),
            vertical_strip: PixelData::filled(1, size.block_height.saturating_sub(2 * PADDING), format, 0),
        });

        let id = AtlasId(self.atlases.len() as u32);
        log::debug!(
            "AtlasManager: created atlas {} ({}x{}, {}x{} blocks, {total_blocks} blocks, {format:?})",
            id.get(),
            size.width,
            size.height,
            size.block_width,
            size.block_height
        );
        Ok(id)
    }

    pub fn get_atlas_count(&self) -> u32 {
        self.atlases.len() as u32
    }

    pub fn get_atlas_size(&self, atlas_id: AtlasId) -> Option<AtlasSize> {
        self.atlas(atlas_id).map(|atlas| atlas.size)
    }

    pub fn get_pixel_format(&self, atlas_id: AtlasId) -> Option<PixelFormat> {
        self.atlas(atlas_id).map(|atlas| atlas.format)
    }

    /// Blocks that can still be handed out: never used plus freed. 0 for
    /// an unknown atlas.
    pub fn get_free_blocks(&self, atlas_id: AtlasId) -> u32 {
        self.atlas(atlas_id).map_or(0, |atlas| atlas.free_block_count())
    }

    pub fn texture(&self, atlas_id: AtlasId) -> Option<&B::Texture> {
        self.atlas(atlas_id).map(|atlas| &atlas.texture)
    }

    fn atlas(&self, atlas_id: AtlasId) -> Option<&Atlas<B::Texture>> {
        self.atlases.get(atlas_id.index())
    }

    // ── Policy ──────────────────────────────────────────────────────

    pub fn set_add_policy(&mut self, policy: AddFailPolicy) {
        self.config.add_policy = policy;
    }

    pub fn add_policy(&self) -> AddFailPolicy {
        self.config.add_policy
    }

    /// Size of automatically created atlases. The block size is the
    /// largest image they must hold; the border is added on creation.
    pub fn set_new_atlas_size(&mut self, size: AtlasSize) {
        self.config.new_atlas_size = size;
    }

    pub fn new_atlas_size(&self) -> AtlasSize {
        self.config.new_atlas_size
    }

    /// The size an automatically created atlas actually gets; `None` when
    /// the padded block size overflows.
    pub fn effective_new_atlas_size(&self) -> Option<AtlasSize> {
        self.config.new_atlas_size.padded()
    }

    // ── Images ──────────────────────────────────────────────────────

    /// Whether the atlas can take a `width` x `height` image of `format`
    /// right now.
    pub fn check_atlas(&self, atlas_id: AtlasId, width: u32, height: u32, format: PixelFormat) -> Option<AtlasId> {
        let atlas = self.atlas(atlas_id)?;
        let accepts = atlas.format == format
            && atlas.free_block_count() > 0
            && atlas.size.fits_block(width, height);
        accepts.then_some(atlas_id)
    }

    /// Store `image` in an atlas with a free block.
    ///
    /// `preferred` is tried first, then every atlas in creation order. When
    /// none accepts the image, the add policy decides between creating an
    /// atlas of the new-atlas size and failing. Failure changes nothing.
    pub fn add(&mut self, image: &PixelData, preferred: Option<AtlasId>) -> Result<AddOutcome, AddError> {
        if !image.is_consistent() {
            log::error!(
                "AtlasManager: {} bytes for a {}x{} {:?} image",
                image.buffer.len(),
                image.width,
                image.height,
                image.format
            );
            return Err(AddError::InvalidPixelData);
        }
        let (width, height, format) = (image.width, image.height, image.format);

        let found = preferred
            .and_then(|id| self.check_atlas(id, width, height, format))
            .or_else(|| {
                (1..=self.atlases.len() as u32)
                    .find_map(|raw| self.check_atlas(AtlasId(raw), width, height, format))
            });

        let (atlas_id, created_new_atlas) = match found {
            Some(id) => (id, false),
            None => match self.config.add_policy {
                AddFailPolicy::FailOnAddFails => {
                    log::debug!("AtlasManager: no atlas for {width}x{height} {format:?}, add policy fails");
                    return Err(AddError::NoSuitableAtlas { width, height, format });
                }
                AddFailPolicy::FailOnAddCreates => {
                    let Some(size) = self.effective_new_atlas_size() else {
                        log::error!("AtlasManager: new-atlas block size overflows once padded");
                        return Err(AtlasError::too_small(&self.config.new_atlas_size).into());
                    };
                    if !size.fits_block(width, height) {
                        log::error!(
                            "AtlasManager: {width}x{height} image exceeds the {}x{} new-atlas blocks",
                            size.block_width,
                            size.block_height
                        );
                        return Err(AddError::TooLargeForNewAtlas { width, height });
                    }
                    (self.create_atlas(size, format)?, true)
                }
            },
        };

        let atlas = &mut self.atlases[atlas_id.index()];
        let Some(block) = atlas.take_block() else {
            return Err(AddError::NoSuitableAtlas { width, height, format });
        };
        Self::upload_image(atlas, block, image);

        let slot = ImageSlot {
            atlas_id,
            block,
            width,
            height,
            reference_count: 1,
        };
        let index = match self.images.iter().position(|s| s.reference_count == 0) {
            Some(index) => {
                self.images[index] = slot;
                index
            }
            None => {
                self.images.push(slot);
                self.images.len() - 1
            }
        };
        let image_id = ImageId(index as u32 + 1);

        log::debug!(
            "AtlasManager: image {} ({width}x{height}) -> atlas {} block {block}",
            image_id.get(),
            atlas_id.get()
        );
        Ok(AddOutcome {
            slot: AtlasSlot { atlas_id, image_id },
            created_new_atlas,
        })
    }

    /// Upload `image` inside `block` and clear the border around it.
    ///
    /// The top and left border strips always fit; the bottom and right ones
    /// are skipped when they would fall off the texture.
    fn upload_image(atlas: &mut Atlas<B::Texture>, block: u32, image: &PixelData) {
        let (x, y) = atlas.block_origin(block);
        let texture = &mut atlas.texture;

        let mut ok = texture.upload(image, x + PADDING, y + PADDING);
        ok &= texture.upload(&atlas.horizontal_strip, x, y);
        ok &= texture.upload(&atlas.vertical_strip, x, y + PADDING);

        if y + image.height + 2 * PADDING <= atlas.size.height {
            ok &= texture.upload(&atlas.horizontal_strip, x, y + image.height + PADDING);
        }
        if x + image.width + 2 * PADDING <= atlas.size.width {
            ok &= texture.upload(&atlas.vertical_strip, x + image.width + PADDING, y + PADDING);
        }

        if !ok {
            log::error!("AtlasManager: upload into block {block} at ({x}, {y}) failed");
        }
    }

    /// Drop one reference to `image_id`.
    ///
    /// Returns `true` when that was the last reference and the block went
    /// back to its atlas.
    pub fn remove(&mut self, image_id: ImageId) -> Result<bool, AtlasError> {
        let Some(slot) = self.images.get_mut(image_id.index()) else {
            log::error!("AtlasManager: remove of unknown image {}", image_id.get());
            return Err(AtlasError::InvalidImage(image_id.get()));
        };
        if slot.reference_count == 0 {
            log::error!("AtlasManager: image {} already freed", image_id.get());
            return Err(AtlasError::AlreadyFreed(image_id.get()));
        }

        let (atlas_id, block) = (slot.atlas_id, slot.block);
        let Some(atlas) = self.atlases.get_mut(atlas_id.index()) else {
            log::error!("AtlasManager: image {} points at unknown atlas {}", image_id.get(), atlas_id.get());
            return Err(AtlasError::InvalidAtlas(atlas_id.get()));
        };

        slot.reference_count -= 1;
        if slot.reference_count > 0 {
            return Ok(false);
        }
        atlas.free_blocks.push_back(block);
        log::debug!(
            "AtlasManager: freed image {} (atlas {} block {block})",
            image_id.get(),
            atlas_id.get()
        );
        Ok(true)
    }

    /// Atlas holding `image_id`, if the image is live.
    pub fn get_atlas(&self, image_id: ImageId) -> Option<AtlasId> {
        self.live_slot(image_id).map(|slot| slot.atlas_id)
    }

    /// References held on `image_id`; 0 when freed or unknown.
    pub fn get_reference_count(&self, image_id: ImageId) -> u32 {
        self.images
            .get(image_id.index())
            .map_or(0, |slot| slot.reference_count)
    }

    fn live_slot(&self, image_id: ImageId) -> Option<&ImageSlot> {
        self.images
            .get(image_id.index())
            .filter(|slot| slot.reference_count > 0)
    }

    /// A quad drawing `image_id` with its top-left corner at `position`.
    ///
    /// With `add_reference` the image gains one reference, to be dropped
    /// with [`remove`](Self::remove) when the mesh is discarded.
    pub fn generate_mesh_data(
        &mut self,
        image_id: ImageId,
        position: [f32; 2],
        add_reference: bool,
    ) -> Result<Mesh2D, AtlasError> {
        let slot = match self.images.get(image_id.index()) {
            None => return Err(AtlasError::InvalidImage(image_id.get())),
            Some(slot) if slot.reference_count == 0 => {
                return Err(AtlasError::AlreadyFreed(image_id.get()))
            }
            Some(slot) => *slot,
        };
        let size = self
            .get_atlas_size(slot.atlas_id)
            .ok_or(AtlasError::InvalidAtlas(slot.atlas_id.get()))?;

        let mesh = mesh::create_quad(slot.width, slot.height, slot.block, &size, position);
        if add_reference {
            self.images[image_id.index()].reference_count += 1;
        }
        Ok(mesh)
    }

    // ── Metrics ─────────────────────────────────────────────────────

    pub fn get_metrics(&self) -> Metrics {
        let atlas_metrics: Vec<AtlasMetricsEntry> = self
            .atlases
            .iter()
            .map(|atlas| AtlasMetricsEntry {
                size: atlas.size,
                total_blocks: atlas.total_blocks,
                blocks_used: atlas.blocks_used(),
                pixel_format: atlas.format,
            })
            .collect();
        let texture_memory_used = self
            .atlases
            .iter()
            .map(|atlas| metrics::texture_memory(&atlas.size, atlas.format))
            .sum();

        Metrics {
            atlas_count: self.get_atlas_count(),
            texture_memory_used,
            atlas_metrics,
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
