pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod decor;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::animation::{Animation, FrameContext};
pub use api::config::{Breakpoints, ConfigError, SceneConfig};
pub use core::backdrop::Backdrop;
pub use core::rng::Rng;
pub use core::scroll::ScrollState;
pub use core::time::{FixedTimestep, FrameClock, Interval};
pub use core::zones::{Zone, ZoneScheduler, ZoneWeights};
pub use components::trail::Trail;
pub use renderer::color::Color;
pub use renderer::surface::{DrawCommand, DrawList, Surface};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{FrameHeader, HEADER_FLOATS, PROTOCOL_VERSION, VERTEX_FLOATS};
pub use decor::{Decoration, DecorationKind, HoverLevel};
pub use systems::SceneFrame;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};

// Extensions: pure helpers shared by the systems
pub use extensions::{Easing, Noise, QuadraticPath, TransformStack, lerp};
