pub mod animation;
pub mod config;
