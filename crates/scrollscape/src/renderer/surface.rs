//! Drawing surface contract.
//!
//! Every actor system draws through `Surface`, never through a concrete
//! backend. The lyon tessellator (`VectorState`) turns commands into triangle
//! lists for the browser; `DrawList` records them so geometry can be inspected
//! without a GPU.
//!
//! Points passed to a surface are in local coordinates and go through the
//! surface's `TransformStack` before they are emitted.

use std::f32::consts::TAU;

use glam::Vec2;

use super::color::Color;
use crate::extensions::bezier;
use crate::extensions::transform::TransformStack;

/// Segments used when a curve is flattened by the default implementations.
pub const CURVE_SEGMENTS: usize = 16;

/// Number of segments for a circle or arc of the given radius.
pub fn circle_segments(radius: f32) -> usize {
    ((radius * 0.8) as usize).clamp(12, 64)
}

/// Points along an arc from `start` to `end` (radians, y-down screen space).
pub fn arc_points(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Vec2> {
    let span = (end - start).abs();
    let segments = ((circle_segments(radius) as f32 * span / TAU).ceil() as usize).max(2);
    (0..=segments)
        .map(|i| {
            let a = start + (end - start) * i as f32 / segments as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Points around an axis-aligned ellipse.
pub fn ellipse_points(center: Vec2, radii: Vec2) -> Vec<Vec2> {
    let segments = circle_segments(radii.x.max(radii.y));
    (0..segments)
        .map(|i| {
            let a = TAU * i as f32 / segments as f32;
            center + Vec2::new(a.cos() * radii.x, a.sin() * radii.y)
        })
        .collect()
}

/// A 2D drawing target with a canvas-like transform stack.
pub trait Surface {
    fn transform(&self) -> &TransformStack;
    fn transform_mut(&mut self) -> &mut TransformStack;

    /// Fill a closed polygon given in local coordinates.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Stroke an open polyline given in local coordinates.
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color);

    fn push(&mut self) {
        self.transform_mut().push();
    }

    fn pop(&mut self) {
        self.transform_mut().pop();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform_mut().translate(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform_mut().rotate(angle);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform_mut().scale(factor);
    }

    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color) {
        let points = [
            pos,
            Vec2::new(pos.x + width, pos.y),
            Vec2::new(pos.x + width, pos.y + height),
            Vec2::new(pos.x, pos.y + height),
        ];
        self.fill_polygon(&points, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.fill_polygon(&ellipse_points(center, radii), color);
    }

    /// Fill the region bounded by an arc and the chord joining its endpoints.
    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.fill_polygon(&arc_points(center, radius, start, end), color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut points = arc_points(center, radius, 0.0, TAU);
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        self.stroke_polyline(&points, width, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.stroke_polyline(&[from, to], width, color);
    }

    fn stroke_quadratic(&mut self, from: Vec2, ctrl: Vec2, to: Vec2, width: f32, color: Color) {
        let points = bezier::sample_quadratic(from, ctrl, to, CURVE_SEGMENTS);
        self.stroke_polyline(&points, width, color);
    }

    fn stroke_cubic(&mut self, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, width: f32, color: Color) {
        let points = bezier::sample_cubic(from, c1, c2, to, CURVE_SEGMENTS);
        self.stroke_polyline(&points, width, color);
    }
}

/// A recorded drawing operation, in surface space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { points: Vec<Vec2>, color: Color },
    Stroke { points: Vec<Vec2>, width: f32, color: Color },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Fill { color, .. } | DrawCommand::Stroke { color, .. } => *color,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        match self {
            DrawCommand::Fill { points, .. } | DrawCommand::Stroke { points, .. } => points,
        }
    }
}

/// Surface that records commands instead of rasterizing them.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    transform: TransformStack,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform.reset();
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Fill { .. }))
    }
}

impl Surface for DrawList {
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
        let points = self.transform.apply_all(points);
        self.commands.push(DrawCommand::Fill { points, color });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 || width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let width = width * self.transform.length_scale();
        let points = self.transform.apply_all(points);
        self.commands.push(DrawCommand::Stroke { points, width, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut list = DrawList::new();
        list.fill_polygon(&[Vec2::ZERO, Vec2::ONE], Color::WHITE);
        list.stroke_polyline(&[Vec2::ZERO], 2.0, Color::WHITE);
        list.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        list.fill_rect(Vec2::ZERO, 10.0, 10.0, Color::TRANSPARENT);
        assert!(list.is_empty());
    }

    #[test]
    fn commands_are_recorded_in_surface_space() {
        let mut list = DrawList::new();
        list.push();
        list.translate(Vec2::new(100.0, 50.0));
        list.fill_rect(Vec2::ZERO, 10.0, 5.0, Color::WHITE);
        list.pop();
        list.fill_rect(Vec2::ZERO, 10.0, 5.0, Color::WHITE);

        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[0].points()[0], Vec2::new(100.0, 50.0));
        assert_eq!(list.commands()[1].points()[0], Vec2::ZERO);
    }

    #[test]
    fn arc_points_hit_both_ends() {
        let pts = arc_points(Vec2::ZERO, 10.0, 0.0, std::f32::consts::PI);
        let first = pts[0];
        let last = *pts.last().unwrap();
        assert!((first - Vec2::new(10.0, 0.0)).length() < 1e-4);
        assert!((last - Vec2::new(-10.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn stroke_width_follows_transform_scale() {
        let mut list = DrawList::new();
        list.scale(Vec2::splat(2.0));
        list.stroke_line(Vec2::ZERO, Vec2::X, 1.5, Color::WHITE);
        match &list.commands()[0] {
            DrawCommand::Stroke { width, .. } => assert!((width - 3.0).abs() < 1e-5),
            other => panic!("expected stroke, got {other:?}"),
        }
    }
}
