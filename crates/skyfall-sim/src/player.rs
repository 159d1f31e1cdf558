//! Translation of player input into aircraft commands.
//!
//! Movement and gunfire are realtime actions, issued every tick while the
//! key is held. Missile launch is a one-shot action issued on key press.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skyfall_core::category::Category;

use crate::command::{Action, Command, CommandQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    LaunchMissile,
}

impl PlayerAction {
    pub fn is_realtime(self) -> bool {
        !matches!(self, PlayerAction::LaunchMissile)
    }

    /// Command targeting the player aircraft. `speed` scales movement.
    pub fn command(self, speed: f32) -> Command {
        let action = match self {
            PlayerAction::MoveLeft => Action::Accelerate(Vec2::new(-speed, 0.0)),
            PlayerAction::MoveRight => Action::Accelerate(Vec2::new(speed, 0.0)),
            PlayerAction::MoveUp => Action::Accelerate(Vec2::new(0.0, -speed)),
            PlayerAction::MoveDown => Action::Accelerate(Vec2::new(0.0, speed)),
            PlayerAction::Fire => Action::Fire,
            PlayerAction::LaunchMissile => Action::LaunchMissile,
        };
        Command::new(Category::PLAYER_AIRCRAFT, action)
    }
}

/// Abstract keys; the embedding application maps its own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Space,
    M,
}

/// Key-to-action map with one key per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: BTreeMap<Key, PlayerAction>,
    speed: f32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(skyfall_core::constants::PLAYER_SPEED)
    }
}

impl KeyBindings {
    /// Arrow keys to move, space to fire, M for missiles.
    pub fn new(speed: f32) -> Self {
        let bindings = BTreeMap::from([
            (Key::Left, PlayerAction::MoveLeft),
            (Key::Right, PlayerAction::MoveRight),
            (Key::Up, PlayerAction::MoveUp),
            (Key::Down, PlayerAction::MoveDown),
            (Key::Space, PlayerAction::Fire),
            (Key::M, PlayerAction::LaunchMissile),
        ]);
        Self { bindings, speed }
    }

    /// Bind `key` to `action`, dropping the action's previous key.
    pub fn assign_key(&mut self, action: PlayerAction, key: Key) {
        self.bindings.retain(|_, bound| *bound != action);
        self.bindings.insert(key, action);
    }

    pub fn assigned_key(&self, action: PlayerAction) -> Option<Key> {
        self.bindings
            .iter()
            .find_map(|(key, bound)| (*bound == action).then_some(*key))
    }

    /// One-shot actions fire on the press event only.
    pub fn handle_key_press(&self, key: Key, commands: &mut CommandQueue) {
        if let Some(&action) = self.bindings.get(&key) {
            if !action.is_realtime() {
                commands.push(action.command(self.speed));
            }
        }
    }

    /// Realtime actions fire every tick while their key is held.
    pub fn handle_realtime_input(&self, is_pressed: impl Fn(Key) -> bool, commands: &mut CommandQueue) {
        for (&key, &action) in &self.bindings {
            if action.is_realtime() && is_pressed(key) {
                commands.push(action.command(self.speed));
            }
        }
    }
}
