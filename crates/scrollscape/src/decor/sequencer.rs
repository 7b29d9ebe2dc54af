//! Step-sequencer card decoration.

use glam::Vec2;

use crate::api::animation::{Animation, FrameContext};
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

pub const COLUMNS: usize = 16;
pub const ROWS: usize = 6;
/// Fraction of cells switched on.
const DENSITY: f32 = 0.28;
/// Steps between playhead moves at full intensity.
const STEPS_PER_COLUMN: f32 = 8.0;
const FLASH_DECAY: f32 = 0.9;

const IDLE: Color = Color::rgb(0.3, 0.32, 0.4);
const ACTIVE: Color = Color::rgb(0.45, 0.95, 0.85);
const PLAYHEAD: Color = Color::rgb(1.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub active: bool,
    /// 1 when the playhead crosses an active cell, then decays.
    pub flash: f32,
}

/// Step-sequencer grid with a sweeping playhead.
#[derive(Debug, Clone)]
pub struct Sequencer {
    rng: Rng,
    cells: Vec<Cell>,
    size: Vec2,
    /// Fractional column position of the playhead.
    head: f32,
}

impl Sequencer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            cells: Vec::new(),
            size: Vec2::ZERO,
            head: 0.0,
        }
    }

    pub fn column(&self) -> usize {
        (self.head as usize) % COLUMNS
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[row * COLUMNS + col]
    }

    fn trigger(&mut self, col: usize) {
        for row in 0..ROWS {
            let cell = &mut self.cells[row * COLUMNS + col];
            if cell.active {
                cell.flash = 1.0;
            }
        }
    }
}

impl Animation for Sequencer {
    fn initialize(&mut self, size: Vec2) {
        self.size = size;
        self.head = 0.0;
        let rng = &mut self.rng;
        self.cells = (0..COLUMNS * ROWS)
            .map(|_| Cell { active: rng.chance(DENSITY), flash: 0.0 })
            .collect();
        self.trigger(0);
    }

    fn update(&mut self, ctx: &FrameContext) {
        for cell in self.cells.iter_mut() {
            cell.flash *= FLASH_DECAY;
        }
        let before = self.column();
        self.head = (self.head + ctx.intensity / STEPS_PER_COLUMN) % COLUMNS as f32;
        let after = self.column();
        if after != before {
            self.trigger(after);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let cell_size = Vec2::new(self.size.x / COLUMNS as f32, self.size.y / ROWS as f32);
        let pad = cell_size * 0.15;
        let col = self.column();

        surface.fill_rect(
            Vec2::new(col as f32 * cell_size.x, 0.0),
            cell_size.x,
            self.size.y,
            PLAYHEAD.with_alpha(0.08 * ctx.intensity),
        );
        for row in 0..ROWS {
            for c in 0..COLUMNS {
                let cell = self.cell(c, row);
                let color = if cell.active {
                    ACTIVE.lerp(PLAYHEAD, cell.flash).with_alpha(0.35 + 0.65 * cell.flash.max(ctx.intensity * 0.5))
                } else {
                    IDLE.with_alpha(0.25)
                };
                let origin = Vec2::new(c as f32 * cell_size.x, row as f32 * cell_size.y) + pad;
                let inner = cell_size - pad * 2.0;
                surface.fill_rect(origin, inner.x, inner.y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    fn seq_with_column(col: usize) -> Sequencer {
        let mut seq = Sequencer::new(1);
        seq.initialize(Vec2::new(320.0, 120.0));
        for row in 0..ROWS {
            for c in 0..COLUMNS {
                seq.cells[row * COLUMNS + c] = Cell { active: c == col, flash: 0.0 };
            }
        }
        seq
    }

    #[test]
    fn playhead_flashes_active_cells() {
        let mut seq = seq_with_column(1);
        let ctx = FrameContext::new(Vec2::new(320.0, 120.0));
        for _ in 0..STEPS_PER_COLUMN as usize {
            seq.update(&ctx);
        }
        assert_eq!(seq.column(), 1);
        assert_eq!(seq.cell(1, 0).flash, 1.0);
        assert_eq!(seq.cell(2, 0).flash, 0.0);

        seq.update(&ctx);
        assert!(seq.cell(1, 0).flash < 1.0);
    }

    #[test]
    fn playhead_wraps() {
        let mut seq = seq_with_column(0);
        let ctx = FrameContext::new(Vec2::new(320.0, 120.0));
        for _ in 0..(STEPS_PER_COLUMN as usize * COLUMNS + 1) {
            seq.update(&ctx);
            assert!(seq.column() < COLUMNS);
        }
        assert_eq!(seq.column(), 0);
    }

    #[test]
    fn draws_every_cell_and_the_playhead() {
        let seq = seq_with_column(3);
        let mut list = DrawList::new();
        seq.draw(&mut list, &FrameContext::new(Vec2::new(320.0, 120.0)));
        assert_eq!(list.len(), COLUMNS * ROWS + 1);
    }
}
