//! Satellite and rocket: the two actors that ignore zone gating.
//!
//! The satellite loops on the frame clock; the rocket is pinned to scroll
//! progress so scrolling back rewinds its flight.

use glam::Vec2;

use super::SceneFrame;
use crate::components::trail::Trail;
use crate::extensions::bezier::QuadraticPath;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// The rocket is drawn until its flight fraction reaches this.
pub const ROCKET_VISIBLE_UNTIL: f32 = 0.999;

const HULL: Color = Color::rgb(0.85, 0.87, 0.9);
const PANEL: Color = Color::rgb(0.25, 0.4, 0.75);
const FLAME: Color = Color::rgb(1.0, 0.6, 0.2);

/// Right of the screen, over a high control point, off the left edge.
pub fn satellite_path(size: Vec2) -> QuadraticPath {
    QuadraticPath::new(
        Vec2::new(size.x + 60.0, size.y * 0.3),
        Vec2::new(size.x * 0.5, size.y * 0.02),
        Vec2::new(-60.0, size.y * 0.25),
    )
}

fn tangent_heading(path: &QuadraticPath, t: f32) -> f32 {
    let d = path.derivative(t);
    d.y.atan2(d.x)
}

/// Lower left to off the right edge.
pub fn rocket_path(size: Vec2) -> QuadraticPath {
    QuadraticPath::new(
        Vec2::new(size.x * 0.12, size.y + 40.0),
        Vec2::new(size.x * 0.3, size.y * 0.15),
        Vec2::new(size.x + 80.0, -size.y * 0.1),
    )
}

#[derive(Debug, Clone)]
pub struct Satellite {
    period: u32,
    pos: Vec2,
    heading: f32,
}

impl Satellite {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            pos: Vec2::ZERO,
            heading: 0.0,
        }
    }

    /// Position along the pass for a frame count, in [0, 1).
    pub fn phase(&self, frame: u64) -> f32 {
        (frame % self.period as u64) as f32 / self.period as f32
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Park at the start of a pass, facing along the path.
    pub fn place(&mut self, size: Vec2) {
        let path = satellite_path(size);
        self.pos = path.point(0.0);
        self.heading = tangent_heading(&path, 0.0);
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        let path = satellite_path(frame.size);
        let t = self.phase(frame.frame);
        // A new pass starts from rest so the jump back to the right edge
        // doesn't register as movement.
        let previous = if t == 0.0 { path.point(0.0) } else { self.pos };
        self.pos = path.point(t);
        self.heading = path.heading_from(previous, t);
    }

    pub fn draw(&self, surface: &mut dyn Surface, alpha: f32) {
        surface.push();
        surface.translate(self.pos);
        surface.rotate(self.heading);
        surface.fill_rect(Vec2::new(-4.0, -3.0), 8.0, 6.0, HULL.fade(alpha));
        surface.fill_rect(Vec2::new(-3.0, -14.0), 6.0, 9.0, PANEL.fade(alpha));
        surface.fill_rect(Vec2::new(-3.0, 5.0), 6.0, 9.0, PANEL.fade(alpha));
        surface.pop();
    }
}

#[derive(Debug, Clone)]
pub struct Rocket {
    span: f32,
    flight: f32,
    pos: Vec2,
    heading: f32,
    exhaust: Trail,
}

impl Rocket {
    pub fn new(span: f32, trail_cap: usize) -> Self {
        Self {
            span: span.max(f32::EPSILON),
            flight: 0.0,
            pos: Vec2::ZERO,
            heading: 0.0,
            exhaust: Trail::new(trail_cap, 1.0 / 30.0),
        }
    }

    /// Flight fraction for a scroll progress.
    pub fn flight_for(&self, progress: f32) -> f32 {
        (progress / self.span).clamp(0.0, 1.0)
    }

    pub fn flight(&self) -> f32 {
        self.flight
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn exhaust(&self) -> &Trail {
        &self.exhaust
    }

    pub fn is_visible(&self) -> bool {
        self.flight < ROCKET_VISIBLE_UNTIL
    }

    /// Back to the launch point with an empty exhaust.
    pub fn reset(&mut self, size: Vec2) {
        let path = rocket_path(size);
        self.exhaust.clear();
        self.flight = 0.0;
        self.pos = path.point(0.0);
        self.heading = tangent_heading(&path, 0.0);
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        let path = rocket_path(frame.size);
        let previous = self.pos;
        self.flight = self.flight_for(frame.progress);
        self.pos = path.point(self.flight);
        self.heading = path.heading_from(previous, self.flight);

        self.exhaust.age();
        if self.is_visible() {
            let back = Vec2::from_angle(self.heading) * -14.0;
            self.exhaust.push(self.pos + back);
        }
    }

    /// Full opacity regardless of zone weights.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_visible() {
            return;
        }
        for p in self.exhaust.iter() {
            surface.fill_circle(p.pos, 1.0 + 4.0 * p.life, FLAME.with_alpha(p.life * 0.6));
        }

        surface.push();
        surface.translate(self.pos);
        surface.rotate(self.heading);
        let body = [
            Vec2::new(14.0, 0.0),
            Vec2::new(6.0, -4.0),
            Vec2::new(-10.0, -4.0),
            Vec2::new(-10.0, 4.0),
            Vec2::new(6.0, 4.0),
        ];
        surface.fill_polygon(&body, HULL);
        surface.fill_polygon(
            &[Vec2::new(-6.0, -4.0), Vec2::new(-12.0, -9.0), Vec2::new(-10.0, -4.0)],
            PANEL,
        );
        surface.fill_polygon(
            &[Vec2::new(-6.0, 4.0), Vec2::new(-12.0, 9.0), Vec2::new(-10.0, 4.0)],
            PANEL,
        );
        surface.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn satellite_loops_with_frame_count() {
        let sat = Satellite::new(100);
        assert_eq!(sat.phase(0), 0.0);
        assert_eq!(sat.phase(50), 0.5);
        assert_eq!(sat.phase(150), 0.5);
    }

    #[test]
    fn satellite_heading_points_left() {
        let mut sat = Satellite::new(1000);
        for n in 0..400 {
            sat.update(&SceneFrame { frame: n, ..SceneFrame::new(SIZE) });
        }
        // Moving leftward, so the heading is near ±π rather than 0.
        assert!(sat.heading().cos() < 0.0);
    }

    #[test]
    fn satellite_heading_falls_back_when_still() {
        let mut sat = Satellite::new(1000);
        sat.update(&SceneFrame { frame: 0, ..SceneFrame::new(SIZE) });
        let tangent = satellite_path(SIZE).derivative(0.0);
        assert!((sat.heading() - tangent.y.atan2(tangent.x)).abs() < 1e-5);
    }

    #[test]
    fn placed_satellite_starts_on_its_path() {
        let mut sat = Satellite::new(1000);
        sat.place(SIZE);
        assert_eq!(sat.pos(), satellite_path(SIZE).point(0.0));
        let tangent = satellite_path(SIZE).derivative(0.0);
        assert!((sat.heading() - tangent.y.atan2(tangent.x)).abs() < 1e-5);
    }

    #[test]
    fn first_rocket_update_heads_along_the_path() {
        let mut rocket = Rocket::new(0.12, 60);
        rocket.reset(SIZE);
        assert_eq!(rocket.pos(), rocket_path(SIZE).point(0.0));

        // Progress far enough that a heading measured from the origin would
        // differ visibly from the path tangent.
        rocket.update(&SceneFrame { progress: 0.001, ..SceneFrame::new(SIZE) });
        let path = rocket_path(SIZE);
        let expected = path.heading_from(path.point(0.0), rocket.flight());
        assert!((rocket.heading() - expected).abs() < 1e-4);
        let tangent = path.derivative(rocket.flight());
        assert!((rocket.heading() - tangent.y.atan2(tangent.x)).abs() < 0.05);
        assert!(rocket.exhaust().iter().all(|p| p.pos.distance(Vec2::ZERO) > 100.0));
    }

    #[test]
    fn rocket_follows_progress() {
        let mut rocket = Rocket::new(0.12, 60);
        assert_eq!(rocket.flight_for(0.06), 0.5);
        assert_eq!(rocket.flight_for(0.5), 1.0);

        rocket.update(&SceneFrame { progress: 0.06, ..SceneFrame::new(SIZE) });
        assert!(rocket.is_visible());
        assert_eq!(rocket.pos(), rocket_path(SIZE).point(0.5));

        rocket.update(&SceneFrame { progress: 0.3, ..SceneFrame::new(SIZE) });
        assert!(!rocket.is_visible());
        let mut list = DrawList::new();
        rocket.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn exhaust_is_capped() {
        let mut rocket = Rocket::new(0.12, 60);
        for i in 0..200 {
            let progress = 0.05 + (i % 7) as f32 * 0.001;
            rocket.update(&SceneFrame { progress, ..SceneFrame::new(SIZE) });
            assert!(rocket.exhaust().len() <= 60);
        }
        assert!(rocket.exhaust().iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn exhaust_is_drawn_before_body() {
        let mut rocket = Rocket::new(0.12, 60);
        for _ in 0..5 {
            rocket.update(&SceneFrame { progress: 0.05, ..SceneFrame::new(SIZE) });
        }
        let mut list = DrawList::new();
        rocket.draw(&mut list);
        let n = list.len();
        assert_eq!(n, 5 + 3);
        // Hull is the first opaque shape after the trail.
        assert_eq!(list.commands()[5].color(), HULL);
    }
}
