use glam::Vec2;
use scrollscape::{
    Animation, Backdrop, ConfigError, Decoration, DecorationKind, FixedTimestep, FrameClock,
    FrameContext, FrameHeader, InputEvent, InputQueue, SceneConfig, VectorState,
};

/// Drives the full-page backdrop: input, fixed-step simulation, tessellation
/// and the frame header the host reads after every tick.
pub struct BackdropRunner {
    backdrop: Backdrop,
    surface: VectorState,
    timestep: FixedTimestep,
    clock: FrameClock,
    input: InputQueue,
    header: FrameHeader,
    initialized: bool,
}

impl BackdropRunner {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            timestep: FixedTimestep::new(config.fixed_dt),
            backdrop: Backdrop::new(config),
            surface: VectorState::new(),
            clock: FrameClock::new(),
            input: InputQueue::new(),
            header: FrameHeader::new(),
            initialized: false,
        }
    }

    /// Size the surface and create every pool. Call once after construction.
    pub fn init(&mut self, width: f32, height: f32) {
        self.backdrop.initialize(Vec2::new(width, height));
        self.initialized = true;
        self.render();
    }

    /// Parse, validate and apply a JSON configuration. On error the current
    /// configuration stays in place.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = SceneConfig::from_json(json)?;
        self.timestep = FixedTimestep::new(config.fixed_dt);
        self.backdrop.reconfigure(config);
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: apply queued input, step the simulation, then
    /// rebuild the vertex buffer and header.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        for event in self.input.drain() {
            self.backdrop.apply_input(&event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.clock.advance(self.timestep.dt());
            let ctx = self.context();
            self.backdrop.update(&ctx);
        }

        self.render();
    }

    pub fn teardown(&mut self) {
        self.backdrop.teardown();
    }

    fn context(&self) -> FrameContext {
        FrameContext {
            frame: self.clock.frame(),
            time: self.clock.time(),
            dt: self.timestep.dt(),
            size: self.backdrop.size(),
            intensity: 1.0,
        }
    }

    fn render(&mut self) {
        let ctx = self.context();
        self.surface.clear();
        self.backdrop.draw(&mut self.surface, &ctx);

        let size = self.backdrop.size();
        self.header.write(
            self.clock.frame(),
            size.x,
            size.y,
            self.backdrop.progress(),
            self.surface.vertex_count(),
            &self.backdrop.weights(),
        );
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn vertices_ptr(&self) -> *const f32 {
        self.surface.buffer_ptr()
    }

    pub fn vertex_count(&self) -> u32 {
        self.surface.vertex_count() as u32
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }
}

struct Slot {
    decoration: Decoration,
    surface: VectorState,
    timestep: FixedTimestep,
}

/// Owns every card decoration on the page. Ids are stable for the lifetime
/// of a card; destroyed ids are never reused.
pub struct DecorationRunner {
    seed: u64,
    fixed_dt: f32,
    slots: Vec<Option<Slot>>,
    input: InputQueue,
}

impl DecorationRunner {
    pub fn new(seed: u64, fixed_dt: f32) -> Self {
        Self {
            seed,
            fixed_dt,
            slots: Vec::new(),
            input: InputQueue::new(),
        }
    }

    /// Create a decoration. Unknown kind names fall back to a placeholder.
    pub fn create(&mut self, kind: &str, width: f32, height: f32) -> u32 {
        let kind = kind.parse::<DecorationKind>().unwrap_or_else(|err| {
            log::warn!("{err}, using placeholder");
            DecorationKind::Placeholder
        });
        let id = self.slots.len() as u32;
        let seed = self.seed.wrapping_add(u64::from(id).wrapping_mul(0x9E37_79B9));
        let decoration = Decoration::new(kind, Vec2::new(width, height), seed);

        let mut slot = Slot {
            decoration,
            surface: VectorState::new(),
            timestep: FixedTimestep::new(self.fixed_dt),
        };
        slot.decoration.draw(&mut slot.surface, self.fixed_dt);
        self.slots.push(Some(slot));
        id
    }

    pub fn destroy(&mut self, id: u32) {
        if let Some(slot) = self.slots.get_mut(id as usize) {
            *slot = None;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u32) -> Option<&Decoration> {
        self.slot(id).map(|s| &s.decoration)
    }

    fn slot(&self, id: u32) -> Option<&Slot> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: u32) -> Option<&mut Slot> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    pub fn set_hovered(&mut self, id: u32, hovered: bool) {
        let event = if hovered {
            InputEvent::HoverEnter { card: id }
        } else {
            InputEvent::HoverLeave { card: id }
        };
        self.input.push(event);
    }

    pub fn resize(&mut self, id: u32, width: f32, height: f32) {
        let dt = self.fixed_dt;
        if let Some(slot) = self.slot_mut(id) {
            slot.decoration.resize(Vec2::new(width, height));
            slot.surface.clear();
            slot.decoration.draw(&mut slot.surface, dt);
        }
    }

    /// Step every live decoration and rebuild its vertex buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            match event {
                InputEvent::HoverEnter { card } => {
                    if let Some(slot) = self.slot_mut(card) {
                        slot.decoration.set_hovered(true);
                    }
                }
                InputEvent::HoverLeave { card } => {
                    if let Some(slot) = self.slot_mut(card) {
                        slot.decoration.set_hovered(false);
                    }
                }
                _ => {}
            }
        }

        for slot in self.slots.iter_mut().flatten() {
            let steps = slot.timestep.accumulate(dt);
            let fixed = slot.timestep.dt();
            for _ in 0..steps {
                slot.decoration.step(fixed);
            }
            slot.surface.clear();
            slot.decoration.draw(&mut slot.surface, fixed);
        }
    }

    pub fn vertices_ptr(&self, id: u32) -> *const f32 {
        self.slot(id).map_or(std::ptr::null(), |s| s.surface.buffer_ptr())
    }

    pub fn vertex_count(&self, id: u32) -> u32 {
        self.slot(id).map_or(0, |s| s.surface.vertex_count() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollscape::bridge::protocol::{
        HEADER_FRAME_COUNTER, HEADER_HEIGHT, HEADER_PROGRESS, HEADER_VERTEX_COUNT, HEADER_W_SPACE,
        HEADER_WIDTH,
    };

    fn backdrop() -> BackdropRunner {
        let mut r = BackdropRunner::new(SceneConfig::default());
        r.init(800.0, 600.0);
        r.push_input(InputEvent::ContentHeight { height: 3000.0 });
        r
    }

    #[test]
    fn tick_before_init_is_a_no_op() {
        let mut r = BackdropRunner::new(SceneConfig::default());
        r.tick(1.0 / 60.0);
        assert_eq!(r.vertex_count(), 0);
        assert_eq!(r.header().get(HEADER_FRAME_COUNTER), 0.0);
    }

    #[test]
    fn header_describes_the_frame() {
        let mut r = backdrop();
        r.tick(1.0 / 60.0);
        r.tick(1.0 / 60.0);
        let h = r.header();
        assert_eq!(h.get(HEADER_FRAME_COUNTER), 2.0);
        assert_eq!(h.get(HEADER_WIDTH), 800.0);
        assert_eq!(h.get(HEADER_HEIGHT), 600.0);
        assert_eq!(h.get(HEADER_PROGRESS), 0.0);
        assert_eq!(h.get(HEADER_W_SPACE), 1.0);
        assert!(r.vertex_count() > 0);
        assert_eq!(h.get(HEADER_VERTEX_COUNT), r.vertex_count() as f32);
    }

    #[test]
    fn scroll_input_moves_progress() {
        let mut r = backdrop();
        r.tick(1.0 / 60.0);
        r.push_input(InputEvent::Scroll { offset: 1200.0 });
        r.tick(1.0 / 60.0);
        assert!((r.header().get(HEADER_PROGRESS) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rejected_config_keeps_the_old_one() {
        let mut r = backdrop();
        let err = r.load_config(r#"{"breakpoints": {"space_end": 0.9}}"#);
        assert!(err.is_err());
        assert_eq!(r.backdrop().config(), &SceneConfig::default());

        assert!(r.load_config(r#"{"star_count": 12}"#).is_ok());
        assert_eq!(r.backdrop().config().star_count, 12);
    }

    #[test]
    fn decorations_have_independent_buffers() {
        let mut d = DecorationRunner::new(7, 1.0 / 60.0);
        let a = d.create("flock", 200.0, 120.0);
        let b = d.create("grass", 200.0, 120.0);
        assert_ne!(a, b);
        d.tick(1.0 / 60.0);
        assert!(d.vertex_count(a) > 0);
        assert!(d.vertex_count(b) > 0);
        assert_ne!(d.vertices_ptr(a), d.vertices_ptr(b));
    }

    #[test]
    fn unknown_kind_falls_back_to_placeholder() {
        let mut d = DecorationRunner::new(7, 1.0 / 60.0);
        let id = d.create("lava-lamp", 100.0, 100.0);
        assert_eq!(d.get(id).map(|x| x.kind()), Some(DecorationKind::Placeholder));
    }

    #[test]
    fn hover_is_applied_on_tick() {
        let mut d = DecorationRunner::new(7, 1.0 / 60.0);
        let id = d.create("spirograph", 100.0, 100.0);
        d.set_hovered(id, true);
        assert_eq!(d.get(id).map(|x| x.hover().target()), Some(0.0));
        d.tick(1.0 / 60.0);
        assert_eq!(d.get(id).map(|x| x.hover().target()), Some(1.0));
    }

    #[test]
    fn destroyed_ids_read_empty() {
        let mut d = DecorationRunner::new(7, 1.0 / 60.0);
        let id = d.create("fader", 100.0, 100.0);
        d.destroy(id);
        assert!(d.is_empty());
        assert_eq!(d.vertex_count(id), 0);
        assert!(d.vertices_ptr(id).is_null());
        d.set_hovered(id, true);
        d.tick(1.0 / 60.0);
    }
}
