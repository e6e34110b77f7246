//! Quad meshes referencing images inside an atlas.
//!
//! A glyph is drawn as one textured quad. Quads of the same atlas can be
//! stitched into a single mesh and deduplicated so that a whole line of
//! text is one draw call.

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;

use crate::config::AtlasSize;

// ───────────────────────────────────────────────────────────────────
// Vertex
// ───────────────────────────────────────────────────────────────────

/// A textured 2D vertex.
///
/// 16 bytes per vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2D {
    /// Position in pixels.
    pub position: [f32; 2],
    /// Normalized texture coordinates in [0, 1].
    pub tex_coords: [f32; 2],
}

impl Vertex2D {
    pub fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coords: [u, v],
        }
    }

    /// Bit pattern used to find identical vertices.
    fn key(&self) -> [u32; 4] {
        bytemuck::cast(*self)
    }
}

/// Triangle indices of a quad stored as top-left, top-right, bottom-left,
/// bottom-right.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

// ───────────────────────────────────────────────────────────────────
// Mesh
// ───────────────────────────────────────────────────────────────────

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh2D {
    pub vertices: Vec<Vertex2D>,
    pub indices: Vec<u32>,
}

impl Mesh2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex bytes ready for a GPU buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The quad showing a `width` x `height` image stored in `block_index` of
/// an atlas of `atlas_size`, placed with its top-left corner at `position`.
///
/// The quad covers the image plus half a texel of its zero border on every
/// side so that bilinear filtering fades to transparent.
pub fn create_quad(
    width: u32,
    height: u32,
    block_index: u32,
    atlas_size: &AtlasSize,
    position: [f32; 2],
) -> Mesh2D {
    let blocks_per_row = (atlas_size.width.saturating_sub(1) / atlas_size.block_width.max(1)).max(1);
    let block_x = (block_index % blocks_per_row) as f32;
    let block_y = (block_index / blocks_per_row) as f32;

    let texel_x = 1.0 / atlas_size.width as f32;
    let texel_y = 1.0 / atlas_size.height as f32;

    let u0 = texel_x * atlas_size.block_width as f32 * block_x + texel_x * 1.5;
    let v0 = texel_y * atlas_size.block_height as f32 * block_y + texel_y * 1.5;
    let u1 = u0 + texel_x * (width as f32 + 1.0);
    let v1 = v0 + texel_y * (height as f32 + 1.0);

    let x0 = position[0] - 0.5;
    let y0 = position[1] - 0.5;
    let x1 = x0 + width as f32 + 1.0;
    let y1 = y0 + height as f32 + 1.0;

    Mesh2D {
        vertices: vec![
            Vertex2D::new(x0, y0, u0, v0), // top-left
            Vertex2D::new(x1, y0, u1, v0), // top-right
            Vertex2D::new(x0, y1, u0, v1), // bottom-left
            Vertex2D::new(x1, y1, u1, v1), // bottom-right
        ],
        indices: QUAD_INDICES.to_vec(),
    }
}

/// Merge identical vertices and rewrite the indices to match.
///
/// Vertices are compared bit for bit; the first occurrence is kept, so the
/// relative order of the remaining vertices is preserved.
pub fn optimize_mesh(mesh: &mut Mesh2D) {
    let mut seen: FxHashMap<[u32; 4], u32> = FxHashMap::default();
    let mut vertices = Vec::with_capacity(mesh.vertices.len());
    let mut remap = Vec::with_capacity(mesh.vertices.len());

    for vertex in &mesh.vertices {
        let next = vertices.len() as u32;
        let index = *seen.entry(vertex.key()).or_insert_with(|| {
            vertices.push(*vertex);
            next
        });
        remap.push(index);
    }

    let before = mesh.vertices.len();
    for index in &mut mesh.indices {
        if let Some(&mapped) = remap.get(*index as usize) {
            *index = mapped;
        }
    }
    mesh.vertices = vertices;

    log::trace!("optimize_mesh: {before} -> {} vertices", mesh.vertices.len());
}

/// Append `second` to `first`, optionally merging identical vertices.
pub fn stitch_mesh(first: &mut Mesh2D, second: &Mesh2D, optimize: bool) {
    let offset = first.vertices.len() as u32;
    first.vertices.extend_from_slice(&second.vertices);
    first
        .indices
        .extend(second.indices.iter().map(|index| index + offset));

    if optimize {
        optimize_mesh(first);
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex2D>(), 16);
    }

    #[test]
    fn test_create_quad_first_block() {
        let size = AtlasSize::new(64, 64, 18, 18);
        let mesh = create_quad(10, 8, 0, &size, [100.0, 50.0]);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, QUAD_INDICES.to_vec());

        let tl = mesh.vertices[0];
        let br = mesh.vertices[3];
        assert_eq!(tl.position, [99.5, 49.5]);
        assert_eq!(br.position, [110.5, 58.5]);
        assert!(approx(tl.tex_coords[0], 1.5 / 64.0));
        assert!(approx(br.tex_coords[0], 12.5 / 64.0));
        assert!(approx(br.tex_coords[1], 10.5 / 64.0));
    }

    #[test]
    fn test_create_quad_block_position() {
        // (64 - 1) / 18 = 3 blocks per row: block 4 is column 1, row 1.
        let size = AtlasSize::new(64, 64, 18, 18);
        let mesh = create_quad(4, 4, 4, &size, [0.0, 0.0]);
        let tl = mesh.vertices[0];
        assert!(approx(tl.tex_coords[0], 19.5 / 64.0));
        assert!(approx(tl.tex_coords[1], 19.5 / 64.0));
    }

    #[test]
    fn test_create_quad_widest_image() {
        let size = AtlasSize::new(64, 64, 18, 18);
        let mesh = create_quad(u32::MAX, 0, 0, &size, [0.0, 0.0]);
        assert!(mesh.vertices[3].position[0] > 4.0e9);
        assert_eq!(mesh.vertices[3].position[1], 0.5);
    }

    #[test]
    fn test_stitch_without_optimize() {
        let size = AtlasSize::new(64, 64, 18, 18);
        let mut first = create_quad(4, 4, 0, &size, [0.0, 0.0]);
        let second = create_quad(4, 4, 1, &size, [5.0, 0.0]);
        stitch_mesh(&mut first, &second, false);
        assert_eq!(first.vertices.len(), 8);
        assert_eq!(&first.indices[6..], &[4, 5, 6, 6, 5, 7]);
    }

    #[test]
    fn test_optimize_merges_duplicates() {
        let size = AtlasSize::new(64, 64, 18, 18);
        let mut first = create_quad(4, 4, 0, &size, [0.0, 0.0]);
        let same = first.clone();
        stitch_mesh(&mut first, &same, true);
        assert_eq!(first.vertices.len(), 4);
        assert_eq!(first.indices.len(), 12);
        assert_eq!(&first.indices[6..], &QUAD_INDICES);
    }

    #[test]
    fn test_mesh_bytes() {
        let size = AtlasSize::new(64, 64, 18, 18);
        let mesh = create_quad(4, 4, 0, &size, [0.0, 0.0]);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 16);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
