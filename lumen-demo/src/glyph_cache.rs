//! Glyph-to-atlas cache with least-recently-used eviction.

use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;
use rustc_hash::FxHashMap;

use lumen_atlas::{AddError, AtlasManager, ImageId, PixelData, PixelFormat, TextureBackend};

/// What identifies a rasterized glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub character: char,
    pub size_px: u32,
    pub bold: bool,
}

/// Keeps one atlas reference per cached glyph.
pub struct GlyphCache {
    images: FxHashMap<GlyphKey, ImageId>,
    lru: LruCache<GlyphKey, ()>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl GlyphCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            images: FxHashMap::default(),
            lru: LruCache::new(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// The atlas image of `key`, rasterizing and adding it on a miss.
    ///
    /// When the atlases are full the least recently used glyphs are
    /// released until the new one fits.
    pub fn get_or_insert<B: TextureBackend>(
        &mut self,
        atlas: &mut AtlasManager<B>,
        key: GlyphKey,
    ) -> Result<ImageId, AddError> {
        if let Some(&id) = self.images.get(&key) {
            self.lru.get(&key);
            self.hits += 1;
            return Ok(id);
        }
        self.misses += 1;

        let bitmap = rasterize(key);
        let id = loop {
            match atlas.add(&bitmap, None) {
                Ok(outcome) => break outcome.slot.image_id,
                Err(AddError::NoSuitableAtlas { .. }) if self.evict_one(atlas) => continue,
                Err(err) => return Err(err),
            }
        };

        if let Some((old, ())) = self.lru.push(key, ()) {
            if old != key {
                self.release(atlas, old);
            }
        }
        self.images.insert(key, id);
        Ok(id)
    }

    fn evict_one<B: TextureBackend>(&mut self, atlas: &mut AtlasManager<B>) -> bool {
        match self.lru.pop_lru() {
            Some((key, ())) => {
                self.release(atlas, key);
                true
            }
            None => false,
        }
    }

    fn release<B: TextureBackend>(&mut self, atlas: &mut AtlasManager<B>, key: GlyphKey) {
        if let Some(id) = self.images.remove(&key) {
            if let Err(err) = atlas.remove(id) {
                log::warn!("GlyphCache: releasing {:?}: {err}", key.character);
            }
            self.evictions += 1;
            debug!("GlyphCache: evicted {:?}", key.character);
        }
    }
}

/// Stand-in rasterizer: a coverage mask whose size depends on the glyph.
pub fn rasterize(key: GlyphKey) -> PixelData {
    let code = key.character as u32;
    let width = (key.size_px / 2 + code % 4).min(key.size_px);
    let height = key.size_px * 3 / 4;
    let mut bitmap = PixelData::filled(width, height, PixelFormat::A8, 0);
    let stroke = if key.bold { 2 } else { 1 };
    for y in 0..height {
        for x in 0..width {
            let edge = x < stroke || y < stroke || x + stroke >= width || y + stroke >= height;
            let diagonal = (x + y + code) % 5 == 0;
            if edge || diagonal {
                bitmap.buffer[(y * width + x) as usize] = 0xFF;
            }
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_atlas::{AddFailPolicy, AtlasManagerConfig, AtlasSize, CpuTextureBackend};

    fn key(character: char) -> GlyphKey {
        GlyphKey {
            character,
            size_px: 16,
            bold: false,
        }
    }

    #[test]
    fn test_rasterize_fits_default_blocks() {
        for c in ['a', 'W', 'א', '9'] {
            let bitmap = rasterize(key(c));
            assert!(bitmap.is_consistent());
            assert!(bitmap.width <= 16 && bitmap.height <= 16);
        }
    }

    #[test]
    fn test_hit_and_miss() {
        let mut atlas = AtlasManager::new(CpuTextureBackend);
        let mut cache = GlyphCache::new(64);
        let a = cache.get_or_insert(&mut atlas, key('a')).unwrap();
        let again = cache.get_or_insert(&mut atlas, key('a')).unwrap();
        assert_eq!(a, again);
        assert_eq!((cache.hits, cache.misses), (1, 1));
        assert_eq!(atlas.get_reference_count(a), 1);
    }

    #[test]
    fn test_evicts_when_atlas_full() {
        let config = AtlasManagerConfig {
            add_policy: AddFailPolicy::FailOnAddFails,
            ..Default::default()
        };
        let mut atlas = AtlasManager::with_config(CpuTextureBackend, config);
        // Four blocks only.
        atlas
            .create_atlas(AtlasSize::new(37, 37, 18, 18), PixelFormat::A8)
            .unwrap();

        let mut cache = GlyphCache::new(64);
        for c in "abcdef".chars() {
            cache.get_or_insert(&mut atlas, key(c)).unwrap();
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.evictions, 2);
        assert_eq!(atlas.get_metrics().total_blocks_used(), 4);
    }
}
