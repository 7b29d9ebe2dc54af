//! Fader card decoration.

use std::collections::VecDeque;

use glam::Vec2;

use super::count_for_width;
use crate::api::animation::{Animation, FrameContext};
use crate::extensions::noise::Noise;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// One channel per this many pixels of width.
pub const CHANNEL_SPACING: f32 = 24.0;
/// Level samples kept per channel.
pub const HISTORY_CAP: usize = 40;

const TRACK: Color = Color::rgb(0.25, 0.27, 0.33);
const LEVEL: Color = Color::rgb(1.0, 0.75, 0.3);

#[derive(Debug, Clone)]
pub struct Channel {
    pub level: f32,
    pub history: VecDeque<f32>,
}

/// Mixing-desk faders whose levels wander on a noise field.
#[derive(Debug, Clone)]
pub struct Fader {
    noise: Noise,
    channels: Vec<Channel>,
    size: Vec2,
    time: f32,
}

impl Fader {
    pub fn new(seed: u64) -> Self {
        Self {
            noise: Noise::new(seed),
            channels: Vec::new(),
            size: Vec2::ZERO,
            time: 0.0,
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

impl Animation for Fader {
    fn initialize(&mut self, size: Vec2) {
        self.size = size;
        let count = count_for_width(size.x, CHANNEL_SPACING);
        self.channels = (0..count)
            .map(|_| Channel { level: 0.0, history: VecDeque::with_capacity(HISTORY_CAP) })
            .collect();
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.time += 0.02 * ctx.intensity;
        for (i, ch) in self.channels.iter_mut().enumerate() {
            ch.level = self.noise.fbm(i as f32 * 0.7, self.time, 2);
            if ch.history.len() >= HISTORY_CAP {
                ch.history.pop_front();
            }
            ch.history.push_back(ch.level);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let h = self.size.y;
        let alpha = 0.4 + 0.6 * ctx.intensity;
        for (i, ch) in self.channels.iter().enumerate() {
            let x = (i as f32 + 0.5) * CHANNEL_SPACING;
            surface.stroke_line(Vec2::new(x, h * 0.1), Vec2::new(x, h * 0.9), 2.0, TRACK.with_alpha(alpha));

            // History as a short trace to the left of the track.
            let n = ch.history.len();
            if n >= 2 {
                let trace: Vec<Vec2> = ch
                    .history
                    .iter()
                    .enumerate()
                    .map(|(k, level)| {
                        let dx = (k as f32 - (n - 1) as f32) / HISTORY_CAP as f32 * CHANNEL_SPACING * 0.45;
                        Vec2::new(x + dx, h * 0.9 - level * h * 0.8)
                    })
                    .collect();
                surface.stroke_polyline(&trace, 1.0, LEVEL.with_alpha(alpha * 0.5));
            }

            let y = h * 0.9 - ch.level * h * 0.8;
            surface.fill_rect(Vec2::new(x - 6.0, y - 3.0), 12.0, 6.0, LEVEL.with_alpha(alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_capped() {
        let size = Vec2::new(240.0, 100.0);
        let mut fader = Fader::new(6);
        fader.initialize(size);
        assert_eq!(fader.channels().len(), 10);
        let ctx = FrameContext::new(size);
        for _ in 0..200 {
            fader.update(&ctx);
            assert!(fader.channels().iter().all(|c| c.history.len() <= HISTORY_CAP));
        }
        assert!(fader.channels().iter().all(|c| c.history.len() == HISTORY_CAP));
        assert!(fader.channels().iter().all(|c| (0.0..=1.0).contains(&c.level)));
    }

    #[test]
    fn resize_reseeds_channels() {
        let size = Vec2::new(240.0, 100.0);
        let mut fader = Fader::new(6);
        fader.initialize(size);
        fader.update(&FrameContext::new(size));
        fader.on_resize(Vec2::new(96.0, 100.0));
        assert_eq!(fader.channels().len(), 4);
        assert!(fader.channels().iter().all(|c| c.history.is_empty()));
    }
}
