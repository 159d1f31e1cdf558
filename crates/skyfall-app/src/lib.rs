//! SKYFALL headless runner.
//!
//! Wires the simulation to a real-time game loop thread, a keyboard-level
//! command channel and a scripted pilot. Rendering and audio back ends are
//! out of scope; frames are kept as the latest `FrameSnapshot`.

pub mod config;
pub mod game_loop;
pub mod pilot;
pub mod state;
