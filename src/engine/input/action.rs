// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// Logical keys the character reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// Every action, in a stable order
    #[cfg(test)]
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];
}

/// Fixed keyboard bindings (WASD layout, no remapping)
pub const KEY_BINDINGS: [(KeyCode, Action); 3] = [
    (KeyCode::KeyA, Action::MoveLeft),
    (KeyCode::KeyD, Action::MoveRight),
    (KeyCode::KeyW, Action::Jump),
];

/// Look up the action bound to a physical key, if any
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, action)| *action)
}
