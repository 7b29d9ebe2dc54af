// extensions/transform.rs
//
// Save/restore transform stack for drawing surfaces.
// Mirrors the push/translate/rotate/scale/pop model of a 2D canvas context.
//
// Usage:
//   stack.push();
//   stack.translate(fish.pos);
//   stack.scale(Vec2::new(facing, 1.0));
//   let p = stack.apply(local_point);
//   stack.pop();

use glam::{Affine2, Vec2};

/// Current affine transform plus the saved states beneath it.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Affine2,
    saved: Vec<Affine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Affine2::IDENTITY,
            saved: Vec::with_capacity(16),
        }
    }

    /// Save the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved transform. Unbalanced pops reset to identity.
    pub fn pop(&mut self) {
        self.current = self.saved.pop().unwrap_or(Affine2::IDENTITY);
    }

    /// Drop every saved state and return to identity.
    pub fn reset(&mut self) {
        self.current = Affine2::IDENTITY;
        self.saved.clear();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.current = self.current * Affine2::from_angle(angle);
    }

    pub fn scale(&mut self, factor: Vec2) {
        self.current = self.current * Affine2::from_scale(factor);
    }

    /// Map a local point into surface space.
    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.current.transform_point2(p)
    }

    /// Map a slice of local points into surface space.
    pub fn apply_all(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|p| self.apply(*p)).collect()
    }

    /// Uniform length scale of the current transform (sqrt of |det|).
    /// Used for radii and stroke widths.
    pub fn length_scale(&self) -> f32 {
        self.current.matrix2.determinant().abs().sqrt()
    }

    pub fn is_identity(&self) -> bool {
        self.current == Affine2::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn translate_then_rotate_composes_like_a_canvas() {
        let mut t = TransformStack::new();
        t.translate(Vec2::new(10.0, 0.0));
        t.rotate(FRAC_PI_2);
        // Local +x now points along +y, offset by the translation.
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 1.0)));
    }

    #[test]
    fn pop_restores_saved_state() {
        let mut t = TransformStack::new();
        t.translate(Vec2::new(5.0, 5.0));
        t.push();
        t.scale(Vec2::new(-1.0, 1.0));
        assert!(close(t.apply(Vec2::new(2.0, 0.0)), Vec2::new(3.0, 5.0)));
        t.pop();
        assert!(close(t.apply(Vec2::new(2.0, 0.0)), Vec2::new(7.0, 5.0)));
    }

    #[test]
    fn unbalanced_pop_resets_to_identity() {
        let mut t = TransformStack::new();
        t.translate(Vec2::new(3.0, 4.0));
        t.pop();
        assert!(t.is_identity());
    }

    #[test]
    fn mirrored_scale_keeps_positive_length_scale() {
        let mut t = TransformStack::new();
        t.scale(Vec2::new(-2.0, 2.0));
        assert!((t.length_scale() - 2.0).abs() < 1e-5);
    }
}
