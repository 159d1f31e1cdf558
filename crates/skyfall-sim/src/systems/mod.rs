//! Per-tick systems run by the world orchestrator.
//!
//! Systems are free functions over the scene graph plus whatever state the
//! world hands them. They own nothing between ticks.

pub mod collision;
pub mod guidance;
pub mod spawner;
pub mod view;
