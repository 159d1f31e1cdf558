//! Events emitted by the simulation for the audio collaborator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::SoundEffect;

/// Request to play a sound effect at a world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub effect: SoundEffect,
    pub position: Vec2,
}
