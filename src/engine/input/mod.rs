// Input handling system
//
// - `action`: logical actions and their fixed key bindings
// - `state`: held-key set and the immutable per-tick snapshot
// - `manager`: queues key events from winit and applies them at tick start
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // At the start of each tick
// let snapshot = input.begin_tick();
// if snapshot.is_held(Action::Jump) {
//     // ...
// }
// ```

pub mod action;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use state::InputSnapshot;
