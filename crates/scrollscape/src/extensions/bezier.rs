// extensions/bezier.rs
//
// Quadratic and cubic bezier evaluation for actor trajectories and curved shapes.
// Pure math, no state.

use glam::Vec2;

/// Below this per-frame displacement the observed heading is numerically unstable.
pub const MIN_HEADING_DELTA: f32 = 1e-3;

#[inline]
pub fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// First derivative of a quadratic bezier with respect to t.
#[inline]
pub fn quadratic_derivative(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    (p1 - p0) * (2.0 * (1.0 - t)) + (p2 - p1) * (2.0 * t)
}

#[inline]
pub fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

pub fn sample_quadratic(p0: Vec2, p1: Vec2, p2: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| quadratic(p0, p1, p2, i as f32 / segments as f32))
        .collect()
}

pub fn sample_cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| cubic(p0, p1, p2, p3, i as f32 / segments as f32))
        .collect()
}

/// Heading angle from an observed movement, falling back to an analytic
/// tangent when the movement is too small to give a stable direction.
pub fn heading(previous: Vec2, current: Vec2, tangent: Vec2) -> f32 {
    let delta = current - previous;
    let dir = if delta.length() > MIN_HEADING_DELTA { delta } else { tangent };
    dir.y.atan2(dir.x)
}

/// A quadratic bezier trajectory (start, control, end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticPath {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl QuadraticPath {
    pub const fn new(start: Vec2, control: Vec2, end: Vec2) -> Self {
        Self { start, control, end }
    }

    pub fn point(&self, t: f32) -> Vec2 {
        quadratic(self.start, self.control, self.end, t.clamp(0.0, 1.0))
    }

    pub fn derivative(&self, t: f32) -> Vec2 {
        quadratic_derivative(self.start, self.control, self.end, t.clamp(0.0, 1.0))
    }

    /// Heading at `t` given where the actor was on the previous frame.
    pub fn heading_from(&self, previous: Vec2, t: f32) -> f32 {
        heading(previous, self.point(t), self.derivative(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_hits_endpoints() {
        let path = QuadraticPath::new(Vec2::ZERO, Vec2::new(50.0, -100.0), Vec2::new(100.0, 0.0));
        assert_eq!(path.point(0.0), Vec2::ZERO);
        assert_eq!(path.point(1.0), Vec2::new(100.0, 0.0));
        // Symmetric control point puts the apex at the middle.
        assert!((path.point(0.5) - Vec2::new(50.0, -50.0)).length() < 1e-4);
    }

    #[test]
    fn cubic_hits_endpoints() {
        let a = Vec2::new(1.0, 2.0);
        let d = Vec2::new(9.0, -3.0);
        assert_eq!(cubic(a, Vec2::ZERO, Vec2::ONE, d, 0.0), a);
        assert!((cubic(a, Vec2::ZERO, Vec2::ONE, d, 1.0) - d).length() < 1e-5);
    }

    #[test]
    fn heading_uses_observed_delta_when_large_enough() {
        let angle = heading(Vec2::ZERO, Vec2::new(0.0, 5.0), Vec2::X);
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn heading_falls_back_to_tangent_when_stationary() {
        let p = Vec2::new(3.0, 3.0);
        let angle = heading(p, p, Vec2::new(-1.0, 0.0));
        assert!((angle.abs() - std::f32::consts::PI).abs() < 1e-5);
        assert!(angle.is_finite());
    }

    #[test]
    fn derivative_at_start_points_toward_control() {
        let path = QuadraticPath::new(Vec2::ZERO, Vec2::new(0.0, -10.0), Vec2::new(10.0, 0.0));
        let d = path.derivative(0.0);
        assert!(d.x.abs() < 1e-6 && d.y < 0.0);
    }

    #[test]
    fn sampling_includes_both_ends() {
        let pts = sample_quadratic(Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, 0.0), 8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Vec2::ZERO);
        assert_eq!(pts[8], Vec2::new(2.0, 0.0));
    }
}
