// Input manager - turns window key events into per-tick snapshots

use super::action::{action_for_key, Action};
use super::state::{InputSnapshot, InputState};
use std::collections::VecDeque;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A bound key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed(Action),
    Released(Action),
}

/// Queues key transitions between ticks and applies them at tick start
#[derive(Debug, Default)]
pub struct InputManager {
    state: InputState,
    pending: VecDeque<KeyTransition>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Held keys auto-repeat; the first press is all we need
        if event.repeat {
            return;
        }

        if let PhysicalKey::Code(code) = event.physical_key {
            self.handle_key(code, event.state == ElementState::Pressed);
        }
    }

    /// Queue a transition for `code`. Unbound keys are ignored.
    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        let Some(action) = action_for_key(code) else {
            return;
        };

        self.pending.push_back(if pressed {
            KeyTransition::Pressed(action)
        } else {
            KeyTransition::Released(action)
        });
    }

    /// Apply queued transitions in arrival order and return the snapshot for this tick.
    /// Call once at the start of every tick.
    pub fn begin_tick(&mut self) -> InputSnapshot {
        while let Some(transition) = self.pending.pop_front() {
            match transition {
                KeyTransition::Pressed(action) => self.state.press(action),
                KeyTransition::Released(action) => self.state.release(action),
            }
        }
        self.state.snapshot()
    }

    /// Number of transitions waiting for the next tick
    #[cfg(test)]
    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }

    /// Drop all held keys and queued transitions (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pending.clear();
        self.state.clear();
    }
}
