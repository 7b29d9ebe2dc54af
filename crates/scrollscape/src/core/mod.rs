pub mod backdrop;
pub mod rng;
pub mod scroll;
pub mod time;
pub mod zones;
