//! # lumen-atlas
//!
//! Glyph atlas cache for the Lumen toolkit. Packs small bitmaps (glyphs,
//! emoji) into shared block atlases with reference-counted reuse, and
//! produces textured quads that draw them.
//!
//! ## Architecture
//!
//! ```text
//! rasterizer ──► PixelData ──► AtlasManager::add ──► (AtlasId, ImageId)
//!                                    │
//!                                    ▼
//!                         TextureBackend / AtlasTexture   (upload)
//!                                    │
//! renderer ◄── Mesh2D ◄── generate_mesh_data / stitch_mesh
//! ```
//!
//! - **`manager`** — the [`AtlasManager`], block allocation and image slots.
//! - **`texture`** — backend traits and the in-memory [`CpuTextureBackend`].
//! - **`mesh`** — [`Vertex2D`], quad generation, mesh stitching.
//! - **`config`** — [`AtlasSize`], [`AddFailPolicy`], [`AtlasManagerConfig`].
//! - **`metrics`** — usage statistics.

pub mod config;
pub mod error;
pub mod manager;
pub mod mesh;
pub mod metrics;
pub mod pixel;
pub mod texture;

// Re-exports for ergonomic use.
pub use config::{AddFailPolicy, AtlasManagerConfig, AtlasSize};
pub use error::{AddError, AtlasError};
pub use manager::{AddOutcome, AtlasId, AtlasManager, AtlasSlot, ImageId};
pub use mesh::{optimize_mesh, stitch_mesh, Mesh2D, Vertex2D};
pub use metrics::{AtlasMetricsEntry, Metrics};
pub use pixel::{PixelData, PixelFormat};
pub use texture::{AtlasTexture, CpuTexture, CpuTextureBackend, TextureBackend};
