//! Sea plants, generated once per size: swaying seaweed blades and
//! recursive coral trees.

use std::f32::consts::TAU;

use glam::Vec2;

use super::SceneFrame;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const SEAWEED: Color = Color::rgb(0.15, 0.55, 0.35);
const CORAL: Color = Color::rgb(0.95, 0.45, 0.5);

/// Deepest level of a coral tree; the trunk is depth 0.
pub const MAX_CORAL_DEPTH: u32 = 3;
const BLADES_PER_SEAWEED: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Seaweed {
    pub base: Vec2,
    pub height: f32,
    pub phase: f32,
}

impl Seaweed {
    /// Control and tip of blade `k` at `frame`.
    fn blade(&self, k: usize, frame: f32) -> (Vec2, Vec2) {
        let spread = (k as f32 - (BLADES_PER_SEAWEED - 1) as f32 * 0.5) * 6.0;
        let sway = (frame * 0.03 + self.phase + k as f32 * 0.7).sin() * self.height * 0.15;
        let ctrl = self.base + Vec2::new(spread - sway * 0.5, -self.height * 0.55);
        let tip = self.base + Vec2::new(spread * 1.6 + sway, -self.height);
        (ctrl, tip)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub length: f32,
    /// Angle relative to the parent, radians.
    pub angle: f32,
    pub depth: u32,
    pub children: Vec<Branch>,
}

impl Branch {
    /// Grow a tree; branch count shrinks with depth and stops at the cap.
    pub fn grow(rng: &mut Rng, length: f32, angle: f32, depth: u32) -> Branch {
        let mut children = Vec::new();
        if depth < MAX_CORAL_DEPTH {
            let max = MAX_CORAL_DEPTH - depth;
            let count = 1 + rng.next_int(max);
            for _ in 0..count {
                let child_angle = rng.range(-0.7, 0.7);
                let child_len = length * rng.range(0.55, 0.8);
                children.push(Branch::grow(rng, child_len, child_angle, depth + 1));
            }
        }
        Branch { length, angle, depth, children }
    }

    pub fn max_depth(&self) -> u32 {
        self.children.iter().map(Branch::max_depth).max().unwrap_or(self.depth)
    }

    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Branch::count).sum::<usize>()
    }

    fn draw(&self, surface: &mut dyn Surface, sway: f32, color: Color) {
        surface.push();
        surface.rotate(self.angle + sway / (self.depth + 1) as f32);
        let width = (4.0 - self.depth as f32).max(1.0);
        surface.stroke_line(Vec2::ZERO, Vec2::new(0.0, -self.length), width, color);
        surface.translate(Vec2::new(0.0, -self.length));
        for child in &self.children {
            child.draw(surface, sway, color);
        }
        surface.pop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coral {
    pub base: Vec2,
    pub phase: f32,
    pub root: Branch,
}

#[derive(Debug, Clone)]
pub struct SeaFlora {
    seaweed: Vec<Seaweed>,
    coral: Vec<Coral>,
    counts: (usize, usize),
    rng: Rng,
}

impl SeaFlora {
    pub fn new(seaweed: usize, coral: usize, rng: Rng) -> Self {
        Self {
            seaweed: Vec::with_capacity(seaweed),
            coral: Vec::with_capacity(coral),
            counts: (seaweed, coral),
            rng,
        }
    }

    pub fn initialize(&mut self, size: Vec2) {
        let (ns, nc) = self.counts;
        let rng = &mut self.rng;
        self.seaweed.clear();
        for _ in 0..ns {
            self.seaweed.push(Seaweed {
                base: Vec2::new(rng.range(0.0, size.x), size.y + 4.0),
                height: rng.range(size.y * 0.12, size.y * 0.3),
                phase: rng.range(0.0, TAU),
            });
        }
        self.coral.clear();
        for _ in 0..nc {
            let base = Vec2::new(rng.range(size.x * 0.05, size.x * 0.95), size.y + 2.0);
            let trunk = rng.range(size.y * 0.05, size.y * 0.1);
            let phase = rng.range(0.0, TAU);
            self.coral.push(Coral { base, phase, root: Branch::grow(rng, trunk, 0.0, 0) });
        }
    }

    pub fn seaweed(&self) -> &[Seaweed] {
        &self.seaweed
    }

    pub fn coral(&self) -> &[Coral] {
        &self.coral
    }

    /// Plants are static apart from sway, which is a function of the frame.
    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame, alpha: f32) {
        let f = frame.frame_f32();
        for weed in &self.seaweed {
            for k in 0..BLADES_PER_SEAWEED {
                let (ctrl, tip) = weed.blade(k, f);
                surface.stroke_quadratic(weed.base, ctrl, tip, 3.0, SEAWEED.with_alpha(0.85 * alpha));
            }
        }
        for c in &self.coral {
            let sway = (f * 0.02 + c.phase).sin() * 0.15;
            surface.push();
            surface.translate(c.base);
            c.root.draw(surface, sway, CORAL.with_alpha(0.9 * alpha));
            surface.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    #[test]
    fn coral_depth_is_capped() {
        let mut rng = Rng::new(17);
        for _ in 0..50 {
            let tree = Branch::grow(&mut rng, 40.0, 0.0, 0);
            assert!(tree.max_depth() <= MAX_CORAL_DEPTH);
            assert!(!tree.children.is_empty());
        }
    }

    #[test]
    fn deeper_levels_branch_less() {
        let mut rng = Rng::new(2);
        let tree = Branch::grow(&mut rng, 40.0, 0.0, 0);
        fn check(b: &Branch) {
            assert!(b.children.len() as u32 <= MAX_CORAL_DEPTH - b.depth);
            b.children.iter().for_each(check);
        }
        check(&tree);
    }

    #[test]
    fn one_stroke_per_branch_and_blade() {
        let size = Vec2::new(800.0, 600.0);
        let mut flora = SeaFlora::new(2, 2, Rng::new(5));
        flora.initialize(size);
        let branches: usize = flora.coral().iter().map(|c| c.root.count()).sum();

        let mut list = DrawList::new();
        flora.draw(&mut list, &SceneFrame::new(size), 1.0);
        assert_eq!(list.len(), 2 * BLADES_PER_SEAWEED + branches);
    }

    #[test]
    fn flora_is_stable_across_frames() {
        let size = Vec2::new(800.0, 600.0);
        let mut flora = SeaFlora::new(3, 3, Rng::new(5));
        flora.initialize(size);
        let before = flora.coral().to_vec();
        let mut list = DrawList::new();
        for n in 0..10 {
            flora.draw(&mut list, &SceneFrame { frame: n, ..SceneFrame::new(size) }, 1.0);
        }
        assert_eq!(before, flora.coral());
    }
}
