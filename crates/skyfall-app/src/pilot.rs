//! Scripted pilot used by the headless runner in place of a keyboard.

use std::time::Duration;

use skyfall_sim::player::Key;

use crate::state::GameLoopCommand;

/// How long each strafe leg lasts before switching direction.
const STRAFE_LEG: Duration = Duration::from_millis(1500);

/// Time between missile launches.
const MISSILE_INTERVAL: Duration = Duration::from_secs(8);

/// Holds the trigger, weaves left and right, and fires a missile now and then.
#[derive(Debug, Default)]
pub struct Autopilot {
    started: bool,
    strafe: Option<Key>,
    missiles_fired: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key events due at `elapsed` since the mission started.
    pub fn poll(&mut self, elapsed: Duration) -> Vec<GameLoopCommand> {
        let mut commands = Vec::new();
        if !self.started {
            commands.push(GameLoopCommand::KeyPressed(Key::Space));
            self.started = true;
        }

        let leg = elapsed.as_millis() / STRAFE_LEG.as_millis();
        let wanted = if leg % 2 == 0 { Key::Left } else { Key::Right };
        if self.strafe != Some(wanted) {
            if let Some(previous) = self.strafe {
                commands.push(GameLoopCommand::KeyReleased(previous));
            }
            commands.push(GameLoopCommand::KeyPressed(wanted));
            self.strafe = Some(wanted);
        }

        let due = (elapsed.as_millis() / MISSILE_INTERVAL.as_millis()) as u32;
        if due > self.missiles_fired {
            commands.push(GameLoopCommand::KeyPressed(Key::M));
            commands.push(GameLoopCommand::KeyReleased(Key::M));
            self.missiles_fired = due;
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_grabs_trigger_and_strafes() {
        let mut pilot = Autopilot::new();
        let commands = pilot.poll(Duration::ZERO);
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::KeyPressed(Key::Space),
                GameLoopCommand::KeyPressed(Key::Left),
            ]
        );
        assert!(pilot.poll(Duration::from_millis(100)).is_empty(), "nothing changes mid-leg");
    }

    #[test]
    fn test_switches_direction_each_leg() {
        let mut pilot = Autopilot::new();
        pilot.poll(Duration::ZERO);
        let commands = pilot.poll(Duration::from_millis(1600));
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::KeyReleased(Key::Left),
                GameLoopCommand::KeyPressed(Key::Right),
            ]
        );
    }

    #[test]
    fn test_missile_tapped_once_per_interval() {
        let mut pilot = Autopilot::new();
        pilot.poll(Duration::ZERO);
        let taps = |commands: Vec<GameLoopCommand>| {
            commands
                .iter()
                .filter(|c| **c == GameLoopCommand::KeyPressed(Key::M))
                .count()
        };
        assert_eq!(taps(pilot.poll(Duration::from_millis(8100))), 1);
        assert_eq!(taps(pilot.poll(Duration::from_millis(8200))), 0);
        assert_eq!(taps(pilot.poll(Duration::from_millis(16_050))), 1);
    }
}
