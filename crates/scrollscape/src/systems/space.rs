//! Starfield and meteor shower.

use std::f32::consts::TAU;

use glam::Vec2;

use super::SceneFrame;
use crate::components::trail::Trail;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const STAR_COLOR: Color = Color::rgb(0.92, 0.94, 1.0);
const METEOR_COLOR: Color = Color::rgb(1.0, 0.97, 0.88);

/// Meteors are respawned once this far outside the viewport.
pub const METEOR_MARGIN: f32 = 100.0;
/// Horizontal meteor speed range (pixels per step, always leftward).
pub const METEOR_SPEED_X: (f32, f32) = (-9.0, -5.0);
/// Vertical meteor speed range (pixels per step, always downward).
pub const METEOR_SPEED_Y: (f32, f32) = (3.0, 6.0);
/// Segments in a meteor's analytic tail.
const METEOR_TAIL_SEGMENTS: usize = 8;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub phase: f32,
    /// Only moving stars carry a trail.
    pub trail: Option<Trail>,
}

impl Star {
    pub fn is_moving(&self) -> bool {
        self.trail.is_some()
    }

    /// Rendered alpha. Breathes with the frame count, position is untouched.
    pub fn alpha(&self, frame: f32) -> f32 {
        self.brightness * (0.65 + 0.35 * (frame * 0.02 + self.phase).sin())
    }
}

#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
    count: usize,
    moving_ratio: f32,
    trail_cap: usize,
}

impl StarField {
    pub fn new(count: usize, moving_ratio: f32, trail_cap: usize) -> Self {
        Self {
            stars: Vec::with_capacity(count),
            count,
            moving_ratio: moving_ratio.clamp(0.0, 1.0),
            trail_cap,
        }
    }

    pub fn initialize(&mut self, size: Vec2, rng: &mut Rng) {
        self.stars.clear();
        let moving = (self.count as f32 * self.moving_ratio).round() as usize;
        for i in 0..self.count {
            let is_moving = i < moving;
            let vel = if is_moving {
                Vec2::new(rng.signed(), rng.signed()).normalize_or(Vec2::X) * rng.range(0.05, 0.25)
            } else {
                Vec2::ZERO
            };
            self.stars.push(Star {
                pos: Vec2::new(rng.range(0.0, size.x), rng.range(0.0, size.y)),
                vel,
                size: rng.range(0.4, 1.6),
                brightness: rng.range(0.4, 1.0),
                phase: rng.range(0.0, TAU),
                trail: is_moving.then(|| Trail::new(self.trail_cap, 1.0 / self.trail_cap.max(1) as f32)),
            });
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        let size = frame.size;
        for star in self.stars.iter_mut() {
            let Some(trail) = star.trail.as_mut() else {
                continue;
            };
            trail.push(star.pos);
            trail.age();
            star.pos += star.vel;

            let wrapped = Vec2::new(star.pos.x.rem_euclid(size.x.max(1.0)), star.pos.y.rem_euclid(size.y.max(1.0)));
            if wrapped != star.pos {
                // A trail spanning the whole screen reads as a glitch.
                trail.clear();
                star.pos = wrapped;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame, alpha: f32) {
        let f = frame.frame_f32();
        for star in &self.stars {
            let a = star.alpha(f) * alpha;
            if let Some(trail) = &star.trail {
                let points: Vec<_> = trail.iter().collect();
                for pair in points.windows(2) {
                    let c = STAR_COLOR.with_alpha(pair[1].life * a * 0.5);
                    surface.stroke_line(pair[0].pos, pair[1].pos, star.size * 0.6, c);
                }
            }
            surface.fill_circle(star.pos, star.size, STAR_COLOR.with_alpha(a));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tail length in steps of velocity.
    pub length: f32,
}

impl Meteor {
    pub fn is_out_of_bounds(&self, size: Vec2) -> bool {
        self.pos.x < -METEOR_MARGIN || self.pos.y > size.y + METEOR_MARGIN
    }
}

#[derive(Debug, Clone)]
pub struct MeteorShower {
    meteors: Vec<Meteor>,
    count: usize,
    rng: Rng,
}

impl MeteorShower {
    pub fn new(count: usize, rng: Rng) -> Self {
        Self {
            meteors: Vec::with_capacity(count),
            count,
            rng,
        }
    }

    /// Spawn rectangle: the right two thirds of the screen, above the top edge.
    fn spawn(rng: &mut Rng, size: Vec2) -> Meteor {
        Meteor {
            pos: Vec2::new(rng.range(size.x * 0.35, size.x * 1.2), rng.range(-size.y * 0.5, 0.0)),
            vel: Vec2::new(
                rng.range(METEOR_SPEED_X.0, METEOR_SPEED_X.1),
                rng.range(METEOR_SPEED_Y.0, METEOR_SPEED_Y.1),
            ),
            length: rng.range(6.0, 12.0),
        }
    }

    pub fn initialize(&mut self, size: Vec2) {
        self.meteors.clear();
        for _ in 0..self.count {
            // Stagger the first wave over the full height.
            let mut m = Self::spawn(&mut self.rng, size);
            m.pos.y += self.rng.range(0.0, size.y);
            self.meteors.push(m);
        }
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    #[cfg(test)]
    pub(crate) fn meteors_mut(&mut self) -> &mut [Meteor] {
        &mut self.meteors
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        for m in self.meteors.iter_mut() {
            m.pos += m.vel;
            if m.is_out_of_bounds(frame.size) {
                *m = Self::spawn(&mut self.rng, frame.size);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, alpha: f32) {
        for m in &self.meteors {
            let tail = -m.vel * m.length;
            for i in 0..METEOR_TAIL_SEGMENTS {
                let t0 = i as f32 / METEOR_TAIL_SEGMENTS as f32;
                let t1 = (i + 1) as f32 / METEOR_TAIL_SEGMENTS as f32;
                let c = METEOR_COLOR.with_alpha((1.0 - t0) * 0.8 * alpha);
                surface.stroke_line(m.pos + tail * t0, m.pos + tail * t1, 2.0 * (1.0 - t0) + 0.3, c);
            }
            surface.fill_circle(m.pos, 2.2, METEOR_COLOR.with_alpha(alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    fn frame(n: u64) -> SceneFrame {
        SceneFrame { frame: n, ..SceneFrame::new(Vec2::new(800.0, 600.0)) }
    }

    #[test]
    fn static_stars_never_move() {
        let mut rng = Rng::new(3);
        let mut field = StarField::new(100, 0.04, 240);
        field.initialize(Vec2::new(800.0, 600.0), &mut rng);
        let before: Vec<Vec2> = field.stars().iter().filter(|s| !s.is_moving()).map(|s| s.pos).collect();
        assert_eq!(before.len(), 96);

        for n in 0..500 {
            field.update(&frame(n));
        }
        let after: Vec<Vec2> = field.stars().iter().filter(|s| !s.is_moving()).map(|s| s.pos).collect();
        assert_eq!(before, after);

        let star = field.stars().iter().find(|s| !s.is_moving()).unwrap();
        assert_ne!(star.alpha(0.0), star.alpha(40.0));
    }

    #[test]
    fn star_trails_respect_cap() {
        let mut rng = Rng::new(5);
        let mut field = StarField::new(50, 1.0, 20);
        field.initialize(Vec2::new(400.0, 300.0), &mut rng);
        for n in 0..200 {
            field.update(&SceneFrame { frame: n, ..SceneFrame::new(Vec2::new(400.0, 300.0)) });
            for s in field.stars() {
                assert!(s.trail.as_ref().unwrap().len() <= 20);
            }
        }
    }

    #[test]
    fn moving_stars_stay_on_screen() {
        let mut rng = Rng::new(8);
        let mut field = StarField::new(30, 1.0, 10);
        field.initialize(Vec2::new(200.0, 100.0), &mut rng);
        for n in 0..5000 {
            field.update(&SceneFrame { frame: n, ..SceneFrame::new(Vec2::new(200.0, 100.0)) });
        }
        for s in field.stars() {
            assert!((0.0..=200.0).contains(&s.pos.x) && (0.0..=100.0).contains(&s.pos.y));
        }
    }

    #[test]
    fn meteor_respawns_in_same_update() {
        let mut shower = MeteorShower::new(4, Rng::new(11));
        shower.initialize(Vec2::new(800.0, 600.0));
        shower.meteors_mut()[0].pos = Vec2::new(-99.0, 100.0);
        shower.meteors_mut()[0].vel = Vec2::new(-5.0, 3.0);

        shower.update(&frame(1));
        let m = shower.meteors()[0];
        assert!(!m.is_out_of_bounds(Vec2::new(800.0, 600.0)));
        assert!(m.pos.y <= 0.0);
        assert!((METEOR_SPEED_X.0..METEOR_SPEED_X.1).contains(&m.vel.x));
        assert!((METEOR_SPEED_Y.0..METEOR_SPEED_Y.1).contains(&m.vel.y));
    }

    #[test]
    fn meteor_below_bottom_margin_respawns_in_same_update() {
        let size = Vec2::new(800.0, 600.0);
        let mut shower = MeteorShower::new(4, Rng::new(13));
        shower.initialize(size);
        shower.meteors_mut()[2].pos = Vec2::new(400.0, size.y + 98.0);
        shower.meteors_mut()[2].vel = Vec2::new(-5.0, 4.0);

        shower.update(&frame(1));
        let m = shower.meteors()[2];
        assert!(!m.is_out_of_bounds(size));
        assert!((size.x * 0.35..=size.x * 1.2).contains(&m.pos.x));
        assert!((-size.y * 0.5..=0.0).contains(&m.pos.y));
        assert!((METEOR_SPEED_X.0..METEOR_SPEED_X.1).contains(&m.vel.x));
        assert!((METEOR_SPEED_Y.0..METEOR_SPEED_Y.1).contains(&m.vel.y));
    }

    #[test]
    fn meteor_draws_tail_and_head() {
        let mut shower = MeteorShower::new(1, Rng::new(2));
        shower.initialize(Vec2::new(800.0, 600.0));
        let mut list = DrawList::new();
        shower.draw(&mut list, 1.0);
        assert_eq!(list.len(), METEOR_TAIL_SEGMENTS + 1);
    }
}
