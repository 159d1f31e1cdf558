//! State shared between the game loop thread and its driver.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use skyfall_core::state::FrameSnapshot;
use skyfall_sim::player::Key;

/// Commands sent from the input side to the game loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopCommand {
    KeyPressed(Key),
    KeyReleased(Key),
    /// Stop the loop after the current frame.
    Shutdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    Running,
    /// The player flew off the top of the world.
    Success,
    /// The player aircraft was destroyed.
    Failure,
}

/// Handles the driver keeps while the loop runs.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Latest drawn frame, replaced after every batch of ticks.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub status: Arc<Mutex<MissionStatus>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> MissionStatus {
        self.status.lock().map(|status| *status).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert_eq!(state.status(), MissionStatus::Running);
    }

    #[test]
    fn test_status_shared_between_clones() {
        let state = AppState::new();
        let other = state.clone();
        *other.status.lock().unwrap() = MissionStatus::Success;
        assert_eq!(state.status(), MissionStatus::Success);
    }
}
