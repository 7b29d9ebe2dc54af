//! Sea surface below the horizon: a filled body with a sharpened wave edge,
//! layered wave strokes and short-lived foam.

use glam::Vec2;

use super::SceneFrame;
use crate::core::rng::Rng;
use crate::extensions::noise::Noise;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const WATER: Color = Color::rgb(0.05, 0.22, 0.38);
const WAVE: Color = Color::rgb(0.55, 0.75, 0.9);
const FOAM: Color = Color::rgb(0.95, 0.97, 1.0);

/// Pixel spacing of wave samples.
const WAVE_STEP: f32 = 12.0;
/// Wave amplitude in pixels.
const AMPLITUDE: f32 = 6.0;
/// Foam can spawn where the wave rises above this fraction of the amplitude.
pub const FOAM_THRESHOLD: f32 = 0.8;
const FOAM_CHANCE: f32 = 0.08;
const FOAM_CAP: usize = 48;

/// Signed power that sharpens crests and flattens troughs.
fn sharpen(s: f32) -> f32 {
    s.signum() * s.abs().powf(0.7)
}

/// Wave offset at `x` for a layer, in pixels. Negative is up.
pub fn wave_height(noise: &Noise, x: f32, frame: f32, layer: usize) -> f32 {
    let l = layer as f32;
    let s = (x * 0.018 + frame * 0.04 + l * 1.7).sin();
    let drift = noise.perlin(x * 0.004 + l * 11.0, frame * 0.006) * 0.35;
    -(sharpen(s) + drift) * AMPLITUDE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Foam {
    pub pos: Vec2,
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct SeaSurface {
    layers: usize,
    foam: Vec<Foam>,
    rng: Rng,
}

impl SeaSurface {
    pub fn new(layers: usize, rng: Rng) -> Self {
        Self {
            layers: layers.max(1),
            foam: Vec::with_capacity(FOAM_CAP),
            rng,
        }
    }

    pub fn foam(&self) -> &[Foam] {
        &self.foam
    }

    pub fn clear(&mut self) {
        self.foam.clear();
    }

    /// Vertical offset of a layer below the horizon.
    fn layer_offset(layer: usize) -> f32 {
        layer as f32 * 14.0
    }

    fn samples(width: f32) -> usize {
        (width / WAVE_STEP).ceil() as usize + 1
    }

    pub fn update(&mut self, frame: &SceneFrame, noise: &Noise) {
        for f in self.foam.iter_mut() {
            f.life -= 0.02;
        }
        self.foam.retain(|f| f.life > 0.0);

        let t = frame.frame_f32();
        for layer in 0..self.layers {
            // Highest crest of this layer.
            let Some((x, h)) = (0..Self::samples(frame.width()))
                .map(|i| {
                    let x = i as f32 * WAVE_STEP;
                    (x, wave_height(noise, x, t, layer))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
            else {
                continue;
            };
            if -h > FOAM_THRESHOLD * AMPLITUDE && self.rng.chance(FOAM_CHANCE) && self.foam.len() < FOAM_CAP {
                let y = frame.horizon + Self::layer_offset(layer) + h;
                self.foam.push(Foam { pos: Vec2::new(x + self.rng.signed() * 4.0, y), life: 1.0 });
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, noise: &Noise, frame: &SceneFrame, alpha: f32) {
        let (w, h) = (frame.width(), frame.height());
        let t = frame.frame_f32();
        let n = Self::samples(w);

        let mut body = Vec::with_capacity(n + 2);
        for i in 0..n {
            let x = i as f32 * WAVE_STEP;
            body.push(Vec2::new(x, frame.horizon + wave_height(noise, x, t, 0)));
        }
        body.push(Vec2::new(w, h));
        body.push(Vec2::new(0.0, h));
        surface.fill_polygon(&body, WATER.fade(alpha));

        for layer in 1..self.layers {
            let base = frame.horizon + Self::layer_offset(layer);
            let line: Vec<Vec2> = (0..n)
                .map(|i| {
                    let x = i as f32 * WAVE_STEP;
                    Vec2::new(x, base + wave_height(noise, x, t, layer))
                })
                .collect();
            let fade = 1.0 - layer as f32 / (self.layers + 1) as f32;
            surface.stroke_polyline(&line, 1.2, WAVE.with_alpha(0.5 * fade * alpha));
        }

        for f in &self.foam {
            surface.fill_circle(f.pos, 1.5 + f.life * 1.5, FOAM.with_alpha(f.life * 0.8 * alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    #[test]
    fn sharpen_keeps_sign_and_range() {
        assert_eq!(sharpen(0.0), 0.0);
        assert_eq!(sharpen(1.0), 1.0);
        assert_eq!(sharpen(-1.0), -1.0);
        assert!(sharpen(0.5) > 0.5);
        assert!(sharpen(-0.5) < -0.5);
    }

    #[test]
    fn waves_stay_within_amplitude() {
        let noise = Noise::new(3);
        for i in 0..500 {
            let h = wave_height(&noise, i as f32 * 3.7, i as f32, i % 4);
            assert!(h.abs() <= AMPLITUDE * 1.5, "{h}");
        }
    }

    #[test]
    fn foam_is_bounded_and_fades() {
        let noise = Noise::new(3);
        let mut sea = SeaSurface::new(4, Rng::new(5));
        let size = Vec2::new(800.0, 600.0);
        for n in 0..5000 {
            sea.update(&SceneFrame { frame: n, horizon: 370.0, ..SceneFrame::new(size) }, &noise);
            assert!(sea.foam().len() <= FOAM_CAP);
        }
        assert!(sea.foam().iter().all(|f| f.life > 0.0 && f.life <= 1.0));
    }

    #[test]
    fn draws_body_and_layers() {
        let noise = Noise::new(3);
        let sea = SeaSurface::new(4, Rng::new(5));
        let frame = SceneFrame { horizon: 370.0, ..SceneFrame::new(Vec2::new(800.0, 600.0)) };
        let mut list = DrawList::new();
        sea.draw(&mut list, &noise, &frame, 1.0);
        assert_eq!(list.len(), 4);
        assert_eq!(list.fills().count(), 1);
    }
}
