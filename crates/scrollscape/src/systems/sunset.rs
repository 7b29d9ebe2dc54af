//! Sun trajectory, horizon line and the horizon-clipped circle.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::SceneFrame;
use crate::extensions::bezier::QuadraticPath;
use crate::extensions::easing::lerp;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const SUN_HIGH: Color = Color::rgb(1.0, 0.93, 0.55);
const SUN_LOW: Color = Color::rgb(1.0, 0.45, 0.2);
/// Glow copies drawn behind the disc.
const GLOW_LAYERS: usize = 4;

/// Horizon in pixels from the top. Bobs gently during sunset and climbs to
/// near the top edge as the deep sea takes over.
pub fn horizon_y(frame: f32, height: f32, deep_sea: f32) -> f32 {
    let sunset = height * (0.62 + 0.04 * (frame * 0.01).sin());
    lerp(sunset, height * 0.08, deep_sea.clamp(0.0, 1.0))
}

/// How much of a circle lies above a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleClip {
    /// Entirely above the horizon.
    Full,
    /// Entirely at or below the horizon.
    Hidden,
    /// The part above the horizon, as an arc closed by its chord.
    /// Angles are in y-down screen space.
    Arc { start: f32, end: f32 },
}

pub fn clip_circle(center: Vec2, radius: f32, horizon: f32) -> CircleClip {
    if horizon >= center.y + radius {
        return CircleClip::Full;
    }
    if horizon <= center.y - radius {
        return CircleClip::Hidden;
    }
    let theta = ((horizon - center.y) / radius).clamp(-1.0, 1.0).asin();
    CircleClip::Arc {
        start: PI - theta,
        end: TAU + theta,
    }
}

pub fn draw_clipped_circle(
    surface: &mut dyn Surface,
    center: Vec2,
    radius: f32,
    horizon: f32,
    color: Color,
) {
    match clip_circle(center, radius, horizon) {
        CircleClip::Full => surface.fill_circle(center, radius, color),
        CircleClip::Hidden => {}
        CircleClip::Arc { start, end } => surface.fill_arc(center, radius, start, end, color),
    }
}

/// The sun's trajectory for a viewport: high on the left, setting on the right.
pub fn sun_path(size: Vec2) -> QuadraticPath {
    QuadraticPath::new(
        Vec2::new(size.x * 0.2, size.y * 0.12),
        Vec2::new(size.x * 0.62, size.y * 0.02),
        Vec2::new(size.x * 0.78, size.y * 0.8),
    )
}

#[derive(Debug, Clone)]
pub struct SunSystem {
    /// Progress range over which the sun crosses the sky.
    start: f32,
    end: f32,
}

impl SunSystem {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Position along the trajectory for a scroll progress.
    pub fn travel(&self, progress: f32) -> f32 {
        crate::core::zones::sub_progress(progress, self.start, self.end)
    }

    pub fn radius(size: Vec2) -> f32 {
        size.x.min(size.y) * 0.07
    }

    pub fn position(&self, frame: &SceneFrame) -> Vec2 {
        sun_path(frame.size).point(self.travel(frame.progress))
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame, alpha: f32) {
        let t = self.travel(frame.progress);
        let center = sun_path(frame.size).point(t);
        let radius = Self::radius(frame.size);
        let color = SUN_HIGH.lerp(SUN_LOW, t);

        for k in (1..=GLOW_LAYERS).rev() {
            let grow = 1.0 + 0.35 * k as f32;
            let glow = color.with_alpha(0.12 / k as f32 * alpha);
            draw_clipped_circle(surface, center, radius * grow, frame.horizon, glow);
        }
        draw_clipped_circle(surface, center, radius, frame.horizon, color.fade(alpha));
    }
}
