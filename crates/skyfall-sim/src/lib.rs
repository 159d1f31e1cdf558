//! Simulation core for SKYFALL.
//!
//! Owns the scene graph (a hecs-backed node arena), routes category-targeted
//! commands through it, and advances the world at a fixed tick rate.
//! Completely headless: drawing produces a `FrameSnapshot`, sound produces
//! `AudioEvent`s, and resources are resolved through `ResourceLookup`.

pub mod command;
pub mod error;
pub mod nodes;
pub mod player;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use command::{Action, Command, CommandQueue};
pub use error::SceneError;
pub use scene::{NodeId, SceneGraph};
pub use world::{World, WorldConfig};
