//! Matrix rain card decoration.

use glam::Vec2;

use super::count_for_width;
use crate::api::animation::{Animation, FrameContext};
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Column width and glyph cell height in pixels.
pub const CELL: f32 = 14.0;
const HEAD: Color = Color::rgb(0.85, 1.0, 0.88);
const TAIL: Color = Color::rgb(0.2, 0.9, 0.4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Head position in pixels from the top.
    pub head: f32,
    pub speed: f32,
    /// Tail length in cells.
    pub length: usize,
    /// Seed for the per-cell glyph shapes.
    pub glyphs: u32,
}

/// Falling glyph columns, one per 14 px of width.
#[derive(Debug, Clone)]
pub struct MatrixRain {
    rng: Rng,
    columns: Vec<Column>,
    size: Vec2,
}

impl MatrixRain {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            columns: Vec::new(),
            size: Vec2::ZERO,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn spawn(rng: &mut Rng, height: f32) -> Column {
        Column {
            head: -rng.range(0.0, height.max(CELL)),
            speed: rng.range(1.0, 3.5),
            length: 4 + rng.next_int(10) as usize,
            glyphs: rng.next_int(u32::MAX),
        }
    }
}

impl Animation for MatrixRain {
    fn initialize(&mut self, size: Vec2) {
        self.size = size;
        let count = count_for_width(size.x, CELL);
        self.columns.clear();
        for _ in 0..count {
            let column = Self::spawn(&mut self.rng, size.y);
            self.columns.push(column);
        }
    }

    fn update(&mut self, ctx: &FrameContext) {
        let height = self.size.y;
        for col in self.columns.iter_mut() {
            col.head += col.speed * ctx.intensity;
            // Respawn once the whole tail has left the card.
            if col.head - col.length as f32 * CELL > height {
                *col = Self::spawn(&mut self.rng, height);
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        for (i, col) in self.columns.iter().enumerate() {
            let x = i as f32 * CELL;
            let head_cell = (col.head / CELL).floor();
            for k in 0..col.length {
                let y = (head_cell - k as f32) * CELL;
                if y < -CELL || y > self.size.y {
                    continue;
                }
                let fade = 1.0 - k as f32 / col.length as f32;
                let color = if k == 0 { HEAD } else { TAIL };
                // Glyph stand-in: a bar whose width varies per cell.
                let bits = col.glyphs.rotate_left((k as u32 * 5) % 32) & 0x7;
                let w = CELL * (0.35 + 0.08 * bits as f32);
                surface.fill_rect(
                    Vec2::new(x + (CELL - w) * 0.5, y + 2.0),
                    w,
                    CELL - 4.0,
                    color.with_alpha(fade * (0.3 + 0.7 * ctx.intensity)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_follows_width() {
        let mut rain = MatrixRain::new(2);
        rain.initialize(Vec2::new(280.0, 200.0));
        assert_eq!(rain.columns().len(), 20);

        rain.on_resize(Vec2::new(140.0, 200.0));
        assert_eq!(rain.columns().len(), 10);
    }

    #[test]
    fn columns_respawn_above_the_card() {
        let size = Vec2::new(140.0, 100.0);
        let mut rain = MatrixRain::new(2);
        rain.initialize(size);
        let ctx = FrameContext::new(size);
        for _ in 0..2000 {
            rain.update(&ctx);
            for col in rain.columns() {
                assert!(col.head - col.length as f32 * CELL <= size.y);
            }
        }
    }
}
