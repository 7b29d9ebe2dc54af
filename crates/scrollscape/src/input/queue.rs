/// Host notifications the backdrop understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Vertical scroll offset of the page, in pixels.
    Scroll { offset: f32 },
    /// Total scrollable content height changed.
    ContentHeight { height: f32 },
    /// Viewport was resized.
    Resize { width: f32, height: f32 },
    /// Pointer entered a decorated card.
    HoverEnter { card: u32 },
    /// Pointer left a decorated card.
    HoverLeave { card: u32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Scroll { offset: 120.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_keeps_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::HoverEnter { card: 3 });
        q.push(InputEvent::HoverLeave { card: 3 });
        let events = q.drain();
        assert_eq!(
            events,
            [InputEvent::HoverEnter { card: 3 }, InputEvent::HoverLeave { card: 3 }]
        );
    }
}
