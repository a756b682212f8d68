// Held-key state and per-tick snapshots

use super::action::Action;
use std::collections::HashSet;

/// Keys currently held down
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Action>,
}

impl InputState {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as held. Pressing an already-held action changes nothing.
    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    /// Mark an action as released
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Immutable copy of the held keys, handed to game code once per tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            move_left: self.is_held(Action::MoveLeft),
            move_right: self.is_held(Action::MoveRight),
            jump: self.is_held(Action::Jump),
        }
    }
}

/// Held keys as seen by one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// Snapshot with the given actions held
    #[cfg(test)]
    pub fn holding(actions: &[Action]) -> Self {
        let mut state = InputState::new();
        for &action in actions {
            state.press(action);
        }
        state.snapshot()
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
        }
    }
}
