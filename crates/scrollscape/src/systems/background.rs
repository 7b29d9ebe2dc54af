//! Background compositor.
//!
//! Flat mode fills the viewport with one weighted color. Gradient mode is
//! used while a gradient zone (aurora or sunset) is visible and fills one
//! full-width band per sampled scanline.

use glam::Vec2;

use super::SceneFrame;
use crate::core::zones::{Zone, ZoneWeights};
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Top and bottom colors of a zone. Flat zones use the same color for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGradient {
    pub top: Color,
    pub bottom: Color,
}

impl ZoneGradient {
    pub const fn flat(color: Color) -> Self {
        Self { top: color, bottom: color }
    }

    pub const fn vertical(top: Color, bottom: Color) -> Self {
        Self { top, bottom }
    }

    pub fn at(&self, ratio: f32) -> Color {
        self.top.lerp(self.bottom, ratio.clamp(0.0, 1.0))
    }
}

/// Background colors indexed by zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    zones: [ZoneGradient; 5],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            zones: [
                ZoneGradient::flat(Color::rgb(0.02, 0.024, 0.06)),
                ZoneGradient::vertical(Color::rgb(0.01, 0.03, 0.08), Color::rgb(0.04, 0.16, 0.22)),
                ZoneGradient::flat(Color::rgb(0.5, 0.72, 0.9)),
                ZoneGradient::vertical(Color::rgb(0.17, 0.1, 0.29), Color::rgb(0.94, 0.54, 0.29)),
                ZoneGradient::flat(Color::rgb(0.01, 0.1, 0.17)),
            ],
        }
    }
}

impl Palette {
    pub fn get(&self, zone: Zone) -> ZoneGradient {
        self.zones[zone.index()]
    }

    /// Flat blend: Σ top_i × w_i.
    pub fn flat(&self, weights: &ZoneWeights) -> Color {
        Color::weighted_sum(weights.iter().map(|(z, w)| (self.get(z).top, w)))
    }

    /// Gradient blend at a vertical ratio in [0, 1].
    pub fn gradient(&self, weights: &ZoneWeights, ratio: f32) -> Color {
        Color::weighted_sum(weights.iter().map(|(z, w)| (self.get(z).at(ratio), w)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    Flat,
    Gradient,
}

/// Gradient mode whenever aurora or sunset is at or above the threshold.
pub fn background_mode(weights: &ZoneWeights, threshold: f32) -> BackgroundMode {
    if weights[Zone::Aurora] < threshold && weights[Zone::Sunset] < threshold {
        BackgroundMode::Flat
    } else {
        BackgroundMode::Gradient
    }
}

#[derive(Debug, Clone)]
pub struct Background {
    palette: Palette,
    step: f32,
    threshold: f32,
}

impl Background {
    pub fn new(step: f32, threshold: f32) -> Self {
        Self {
            palette: Palette::default(),
            step: step.max(1.0),
            threshold,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Scanline bands `(y, color)` for gradient mode, `step` pixels apart.
    pub fn bands(&self, weights: &ZoneWeights, height: f32) -> Vec<(f32, Color)> {
        if height <= 0.0 {
            return Vec::new();
        }
        let count = (height / self.step).ceil() as usize;
        (0..count)
            .map(|i| {
                let y = i as f32 * self.step;
                (y, self.palette.gradient(weights, y / height))
            })
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame) {
        let (w, h) = (frame.width(), frame.height());
        match background_mode(&frame.weights, self.threshold) {
            BackgroundMode::Flat => {
                surface.fill_rect(Vec2::ZERO, w, h, self.palette.flat(&frame.weights));
            }
            BackgroundMode::Gradient => {
                for (y, color) in self.bands(&frame.weights, h) {
                    // Bands overlap by a pixel to hide seams.
                    surface.fill_rect(Vec2::new(0.0, y), w, self.step + 1.0, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    fn frame_with(weights: ZoneWeights) -> SceneFrame {
        SceneFrame { weights, ..SceneFrame::new(Vec2::new(300.0, 90.0)) }
    }

    #[test]
    fn pure_sky_is_flat() {
        let weights = ZoneWeights::pure(Zone::Sky);
        assert_eq!(background_mode(&weights, 0.01), BackgroundMode::Flat);

        let bg = Background::new(3.0, 0.01);
        let mut list = DrawList::new();
        bg.draw(&mut list, &frame_with(weights));
        assert_eq!(list.len(), 1);
        assert_eq!(list.commands()[0].color(), bg.palette().get(Zone::Sky).top);
    }

    #[test]
    fn aurora_switches_to_gradient() {
        let mut weights = ZoneWeights::default();
        weights.set(Zone::Space, 0.5);
        weights.set(Zone::Aurora, 0.5);
        assert_eq!(background_mode(&weights, 0.01), BackgroundMode::Gradient);

        let bg = Background::new(3.0, 0.01);
        let mut list = DrawList::new();
        bg.draw(&mut list, &frame_with(weights));
        assert_eq!(list.len(), 30);
    }

    #[test]
    fn flat_blend_is_weighted_sum() {
        let palette = Palette::default();
        let mut weights = ZoneWeights::default();
        weights.set(Zone::Space, 0.25);
        weights.set(Zone::Sky, 0.75);
        let c = palette.flat(&weights);
        let space = palette.get(Zone::Space).top;
        let sky = palette.get(Zone::Sky).top;
        assert!((c.r - (space.r * 0.25 + sky.r * 0.75)).abs() < 1e-6);
        assert!((c.b - (space.b * 0.25 + sky.b * 0.75)).abs() < 1e-6);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let palette = Palette::default();
        let weights = ZoneWeights::pure(Zone::Sunset);
        let sunset = palette.get(Zone::Sunset);
        assert_eq!(palette.gradient(&weights, 0.0).r, sunset.top.r);
        assert!((palette.gradient(&weights, 1.0).r - sunset.bottom.r).abs() < 1e-6);
    }
}
