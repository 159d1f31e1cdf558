//! Core types and definitions for the SKYFALL simulation.
//!
//! This crate defines the vocabulary shared by the simulation and its
//! embedders: geometry, categories, type enums, per-type data tables,
//! tuning constants, audio events and frame snapshots.
//! It has no dependency on the scene graph or any runtime framework.

pub mod category;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod tables;
pub mod types;

pub use category::Category;

#[cfg(test)]
mod tests;
