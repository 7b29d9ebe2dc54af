use std::collections::VecDeque;

use glam::Vec2;

/// A sample in a trail. `life` starts at 1 and decays toward 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub life: f32,
}

/// Bounded history of positions, newest at the back.
///
/// Pushing past the capacity drops the oldest sample, so `len() <= capacity()`
/// holds after every operation.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    /// Life lost per `age` call.
    decay: f32,
}

impl Trail {
    pub fn new(capacity: usize, decay: f32) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            decay: decay.max(0.0),
        }
    }

    pub fn push(&mut self, pos: Vec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint { pos, life: 1.0 });
    }

    /// Decay every sample and prune the dead ones.
    pub fn age(&mut self) {
        let decay = self.decay;
        for p in self.points.iter_mut() {
            p.life -= decay;
        }
        self.points.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}
