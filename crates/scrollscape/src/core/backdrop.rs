//! The full-page backdrop: one renderer instance owning every zone system.

use glam::Vec2;

use crate::api::animation::{Animation, FrameContext};
use crate::api::config::SceneConfig;
use crate::core::rng::Rng;
use crate::core::scroll::ScrollState;
use crate::core::zones::{Zone, ZoneScheduler, ZoneWeights};
use crate::extensions::noise::Noise;
use crate::input::queue::InputEvent;
use crate::renderer::surface::Surface;
use crate::systems::aurora::AuroraSystem;
use crate::systems::background::Background;
use crate::systems::flight::{Rocket, Satellite};
use crate::systems::flora::SeaFlora;
use crate::systems::sea::SeaLife;
use crate::systems::sky::SkySystem;
use crate::systems::space::{MeteorShower, StarField};
use crate::systems::sunset::{horizon_y, SunSystem};
use crate::systems::water::SeaSurface;
use crate::systems::SceneFrame;

const WAVE_LAYERS: usize = 4;

pub struct Backdrop {
    config: SceneConfig,
    scheduler: ZoneScheduler,
    scroll: ScrollState,
    noise: Noise,
    rng: Rng,
    size: Vec2,
    scene: SceneFrame,
    initialized: bool,

    background: Background,
    stars: StarField,
    meteors: MeteorShower,
    satellite: Satellite,
    rocket: Rocket,
    aurora: AuroraSystem,
    sky: SkySystem,
    sun: SunSystem,
    sea_surface: SeaSurface,
    sea_life: SeaLife,
    flora: SeaFlora,
}

impl Backdrop {
    /// Build every system from a configuration. Pools stay empty until
    /// `initialize` is called with a surface size.
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let b = config.breakpoints;
        Self {
            scheduler: ZoneScheduler::from_breakpoints(&b),
            scroll: ScrollState::new(),
            noise: Noise::new(config.seed),
            size: Vec2::ZERO,
            scene: SceneFrame::new(Vec2::ZERO),
            initialized: false,

            background: Background::new(config.gradient_step, config.visibility_threshold),
            stars: StarField::new(config.star_count, config.moving_star_ratio, config.star_trail_cap),
            meteors: MeteorShower::new(config.meteor_count, rng.fork()),
            satellite: Satellite::new(config.satellite_period),
            rocket: Rocket::new(config.rocket_span, config.rocket_trail_cap),
            aurora: AuroraSystem::new(
                config.aurora_token_cap,
                config.aurora_fire_chance,
                config.aurora_interval,
                config.aurora_star_count,
                config.ribbon_samples,
                rng.fork(),
            ),
            sky: SkySystem::new(config.cloud_count, config.bird_count, rng.fork()),
            sun: SunSystem::new(b.sky_full, b.sunset_end),
            sea_surface: SeaSurface::new(WAVE_LAYERS, rng.fork()),
            sea_life: SeaLife::new(
                config.bubble_count,
                config.fish_count,
                config.jellyfish_count,
                config.surface_fade_band,
                rng.fork(),
            ),
            flora: SeaFlora::new(config.seaweed_count, config.coral_count, rng.fork()),
            rng,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &ZoneScheduler {
        &self.scheduler
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// State computed by the last `update`.
    pub fn scene(&self) -> &SceneFrame {
        &self.scene
    }

    pub fn weights(&self) -> ZoneWeights {
        self.scene.weights
    }

    pub fn progress(&self) -> f32 {
        self.scene.progress
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn meteors(&self) -> &MeteorShower {
        &self.meteors
    }

    pub fn aurora(&self) -> &AuroraSystem {
        &self.aurora
    }

    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    pub fn satellite(&self) -> &Satellite {
        &self.satellite
    }

    pub fn sea_life(&self) -> &SeaLife {
        &self.sea_life
    }

    pub fn flora(&self) -> &SeaFlora {
        &self.flora
    }

    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll.set_offset(offset);
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.scroll.set_content_height(height);
    }

    /// Apply a host event. Returns false for events the backdrop ignores.
    pub fn apply_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Scroll { offset } => self.set_scroll(offset),
            InputEvent::ContentHeight { height } => self.set_content_height(height),
            InputEvent::Resize { width, height } => self.on_resize(Vec2::new(width, height)),
            InputEvent::HoverEnter { .. } | InputEvent::HoverLeave { .. } => return false,
        }
        true
    }

    /// Swap in a new configuration, keeping the scroll position and size.
    pub fn reconfigure(&mut self, config: SceneConfig) {
        let scroll = self.scroll.clone();
        let size = self.size;
        let initialized = self.initialized;
        let torn_down = !self.aurora.interval().is_active();
        *self = Backdrop::new(config);
        self.scroll = scroll;
        if initialized {
            self.initialize(size);
        }
        if torn_down {
            self.aurora.teardown();
        }
        log::debug!("backdrop reconfigured (seed {})", self.config.seed);
    }

    /// Stop the aurora evolution task. Rendering keeps working.
    pub fn teardown(&mut self) {
        self.aurora.teardown();
        log::info!("backdrop torn down");
    }

    fn visible(&self, zone: Zone) -> bool {
        self.scene.weights.visible(zone, self.config.visibility_threshold)
    }

    /// Fork a fresh generator from the backdrop's root stream.
    fn next_rng(&mut self) -> Rng {
        self.rng.fork()
    }
}

impl Animation for Backdrop {
    fn initialize(&mut self, size: Vec2) {
        let size = size.max(Vec2::ONE);
        self.size = size;
        self.scroll.set_viewport_height(size.y);

        let mut star_rng = self.next_rng();
        self.stars.initialize(size, &mut star_rng);
        self.meteors.initialize(size);
        self.aurora.initialize(size);
        self.sky.initialize(size);
        self.sea_surface.clear();
        self.sea_life.initialize(size);
        self.flora.initialize(size);
        self.satellite.place(size);
        self.rocket.reset(size);

        self.scene.size = size;
        self.scene.horizon = horizon_y(self.scene.frame_f32(), size.y, self.scene.weights[Zone::DeepSea]);
        self.initialized = true;
        log::info!("backdrop initialized at {}x{}", size.x, size.y);
    }

    fn update(&mut self, ctx: &FrameContext) {
        if !self.initialized {
            return;
        }
        self.scroll.update(ctx.dt);
        let progress = self.scroll.progress();
        let weights = self.scheduler.weights(progress);
        let frame = ctx.frame as f32;
        self.scene = SceneFrame {
            frame: ctx.frame,
            time: ctx.time,
            dt: ctx.dt,
            size: self.size,
            progress,
            weights,
            horizon: horizon_y(frame, self.size.y, weights[Zone::DeepSea]),
        };
        let scene = self.scene;

        // Evolution runs on its own clock, visible or not.
        self.aurora.advance_clock(ctx.dt);

        self.satellite.update(&scene);
        self.rocket.update(&scene);

        if self.visible(Zone::Space) {
            self.stars.update(&scene);
            self.meteors.update(&scene);
        }
        if self.visible(Zone::Aurora) {
            self.aurora.update(&scene);
        }
        if self.visible(Zone::Sky) {
            self.sky.update(&scene);
        }
        if self.visible(Zone::Sunset) || self.visible(Zone::DeepSea) {
            self.sea_surface.update(&scene, &self.noise);
        }
        if self.visible(Zone::DeepSea) {
            self.sea_life.update(&scene, &self.noise);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _ctx: &FrameContext) {
        if !self.initialized {
            return;
        }
        let scene = &self.scene;
        let w = scene.weights;

        self.background.draw(surface, scene);

        if self.visible(Zone::Space) {
            self.stars.draw(surface, scene, w[Zone::Space]);
            self.meteors.draw(surface, w[Zone::Space]);
        }
        if self.visible(Zone::Aurora) {
            self.aurora.draw(surface, &self.noise, scene, w[Zone::Aurora]);
        }
        if self.visible(Zone::Sky) {
            self.sky.draw(surface, scene, w[Zone::Sky]);
        }
        if self.visible(Zone::Sky) || self.visible(Zone::Sunset) {
            self.sun.draw(surface, scene, (w[Zone::Sky] + w[Zone::Sunset]).min(1.0));
        }
        if self.visible(Zone::Sunset) || self.visible(Zone::DeepSea) {
            let alpha = (w[Zone::Sunset] + w[Zone::DeepSea]).min(1.0);
            self.sea_surface.draw(surface, &self.noise, scene, alpha);
        }
        if self.visible(Zone::DeepSea) {
            self.flora.draw(surface, scene, w[Zone::DeepSea]);
            self.sea_life.draw(surface, scene, w[Zone::DeepSea]);
        }

        // Independent actors.
        if scene.progress < self.config.breakpoints.sky_full {
            self.satellite.draw(surface, 1.0);
        }
        self.rocket.draw(surface);
    }
}
