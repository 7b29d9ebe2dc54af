//! Lyon-based tessellation surface.
//!
//! `VectorState` is the `Surface` the browser consumes: every fill and stroke
//! is tessellated on the CPU into a flat triangle list of `VectorVertex`
//! values (x, y, r, g, b, a), which the host uploads as-is.
//!
//! Points are transformed before tessellation, so the buffer is always in
//! surface pixels.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::extensions::transform::TransformStack;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Curve flattening tolerance in pixels.
const TOLERANCE: f32 = 0.5;

/// Per-vertex data for vector/polygon rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Tessellating surface.
///
/// Holds lyon tessellators and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    transform: TransformStack,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            transform: TransformStack::new(),
        }
    }

    /// Clear the vertex buffer and transform. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.transform.reset();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (read from JS linear memory).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// The buffer viewed as vertices.
    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Path through already-transformed points.
    fn polyline_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        builder.build()
    }

    /// Tessellate and fill an arbitrary lyon path given in surface pixels.
    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    /// Tessellate an arbitrary stroked lyon path given in surface pixels.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for VectorState {
    fn transform(&self) -> &TransformStack {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut TransformStack {
        &mut self.transform
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        let path = Self::polyline_path(&self.transform.apply_all(points), true);
        self.fill_path(&path, color);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 || width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let width = width * self.transform.length_scale();
        let path = Self::polyline_path(&self.transform.apply_all(points), false);
        self.stroke_path(&path, width, color);
    }

    // Affine maps keep beziers as beziers, so curves go to lyon unflattened.

    fn stroke_quadratic(&mut self, from: Vec2, ctrl: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let [from, ctrl, to] = [from, ctrl, to].map(|p| self.transform.apply(p));
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.quadratic_bezier_to(point(ctrl.x, ctrl.y), point(to.x, to.y));
        builder.end(false);
        let width = width * self.transform.length_scale();
        self.stroke_path(&builder.build(), width, color);
    }

    fn stroke_cubic(&mut self, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let [from, c1, c2, to] = [from, c1, c2, to].map(|p| self.transform.apply(p));
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.cubic_bezier_to(point(c1.x, c1.y), point(c2.x, c2.y), point(to.x, to.y));
        builder.end(false);
        let width = width * self.transform.length_scale();
        self.stroke_path(&builder.build(), width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::FLOATS, 6);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_polygon_triangle() {
        let mut state = VectorState::new();
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(50.0, 100.0),
        ];
        state.fill_polygon(&points, RED);

        // A triangle should produce exactly 3 vertices (1 triangle)
        assert_eq!(state.vertex_count(), 3);
        assert!(state.vertices().iter().all(|v| v.r == 1.0 && v.a == 1.0));
    }

    #[test]
    fn fill_rect_produces_triangles() {
        let mut state = VectorState::new();
        state.fill_rect(Vec2::ZERO, 100.0, 50.0, Color::WHITE);

        // A rectangle should produce 6 vertices (2 triangles)
        assert_eq!(state.vertex_count(), 6);
    }

    #[test]
    fn transform_is_applied_before_tessellation() {
        let mut state = VectorState::new();
        state.translate(Vec2::new(500.0, 300.0));
        state.fill_rect(Vec2::ZERO, 10.0, 10.0, Color::WHITE);
        for v in state.vertices() {
            assert!(v.x >= 500.0 && v.x <= 510.0);
            assert!(v.y >= 300.0 && v.y <= 310.0);
        }
    }

    #[test]
    fn curves_and_circles_produce_vertices() {
        let mut state = VectorState::new();
        state.fill_circle(Vec2::new(50.0, 50.0), 25.0, RED);
        let after_circle = state.vertex_count();
        assert!(after_circle > 0);

        state.stroke_quadratic(Vec2::ZERO, Vec2::new(50.0, -40.0), Vec2::new(100.0, 0.0), 2.0, RED);
        assert!(state.vertex_count() > after_circle);
    }

    #[test]
    fn transparent_shapes_are_skipped() {
        let mut state = VectorState::new();
        state.fill_rect(Vec2::ZERO, 100.0, 50.0, Color::TRANSPARENT);
        state.stroke_line(Vec2::ZERO, Vec2::ONE, 2.0, Color::TRANSPARENT);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer_and_transform() {
        let mut state = VectorState::new();
        state.translate(Vec2::splat(10.0));
        state.fill_rect(Vec2::ZERO, 100.0, 50.0, Color::WHITE);
        assert!(state.vertex_count() > 0);

        state.clear();
        assert_eq!(state.vertex_count(), 0);
        assert!(state.transform().is_identity());
    }

    #[test]
    fn empty_polygon_produces_nothing() {
        let mut state = VectorState::new();
        state.fill_polygon(&[], RED);
        state.fill_polygon(&[Vec2::ZERO], RED);
        state.fill_polygon(&[Vec2::ZERO, Vec2::ONE], RED);
        assert_eq!(state.vertex_count(), 0);
    }
}
