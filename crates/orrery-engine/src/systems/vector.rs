//! Lyon-based vector rendering in screen space.
//!
//! Shapes are tessellated on the CPU into a flat triangle-list vertex buffer
//! that the browser draws as-is. The render pass uses it for orbit rings;
//! games may add their own overlays from `Game::update`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, VertexBuffers,
};

use crate::components::mesh::SDFColor;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Mesh color with an explicit alpha.
    pub const fn from_sdf(color: SDFColor, a: f32) -> Self {
        Self { r: color.r, g: color.g, b: color.b, a }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

/// Holds lyon tessellators and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    /// A shape that would overflow the wire section is dropped whole.
    fn flush_geometry(&mut self) {
        let incoming = self.geometry.indices.len();
        if self.vertex_count() + incoming <= self.max_vertices {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        } else {
            log::debug!("vector buffer full, dropped {incoming} vertices");
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn polygon_path(points: &[Vec2]) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
        builder.build()
    }

    /// Tessellate and fill a closed polygon (convex or concave).
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::polygon_path(points);
        self.fill_path(&path, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::debug!("fill tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
