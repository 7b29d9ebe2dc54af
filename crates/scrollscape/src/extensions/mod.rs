// extensions/mod.rs
//
// Pure math helpers shared by every actor system.
// No dependencies on backdrop state; systems pull in what they need.

pub mod bezier;
pub mod easing;
pub mod noise;
pub mod transform;

pub use bezier::QuadraticPath;
pub use easing::{Easing, lerp};
pub use noise::Noise;
pub use transform::TransformStack;
