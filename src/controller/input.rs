/// Platform-agnostic input sampling
use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input events the sampler cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    FocusLost,
}

/// Translate a winit window event into a sampler event. Everything else
/// (resize, redraw, mouse, ...) maps to `None` and is ignored here.
pub fn from_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state,
                    physical_key: PhysicalKey::Code(code),
                    ..
                },
            ..
        } => Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(*code),
            ElementState::Released => InputEvent::KeyUp(*code),
        }),
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

/// Key table for the demos: a fixed set of rebindable actions, not a
/// general binding system.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub strafe_left: KeyCode,
    pub strafe_right: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            strafe_left: KeyCode::KeyA,
            strafe_right: KeyCode::KeyD,
            turn_left: KeyCode::KeyQ,
            turn_right: KeyCode::KeyE,
            quit: KeyCode::Escape,
        }
    }
}

/// Cumulative key state plus the exit flag. Mutated only by `process_event`,
/// read by the camera integrator once per frame.
pub struct InputState {
    held: HashSet<KeyCode>,
    exit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            exit_requested: false,
        }
    }

    /// Fold one event into the key table, in arrival order; the last write
    /// for a given key wins. A key-down of the quit binding latches
    /// `exit_requested` and drops everything that arrives after it.
    pub fn process_event(&mut self, event: &InputEvent, bindings: &KeyBindings) {
        if self.exit_requested {
            return;
        }
        match event {
            InputEvent::KeyDown(code) if *code == bindings.quit => {
                self.exit_requested = true;
            }
            InputEvent::KeyDown(code) => {
                self.held.insert(*code);
            }
            InputEvent::KeyUp(code) => {
                self.held.remove(code);
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        for event in [
            InputEvent::KeyDown(KeyCode::KeyW),
            InputEvent::KeyUp(KeyCode::KeyW),
            InputEvent::KeyDown(KeyCode::KeyW),
        ] {
            input.process_event(&event, &bindings);
        }
        assert!(input.is_held(KeyCode::KeyW));

        input.process_event(&InputEvent::KeyUp(KeyCode::KeyW), &bindings);
        assert!(!input.is_held(KeyCode::KeyW));
    }

    #[test]
    fn test_quit_key_latches_exit() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown(KeyCode::KeyW), &bindings);
        input.process_event(&InputEvent::KeyDown(KeyCode::Escape), &bindings);
        // Everything after the quit key is dropped
        input.process_event(&InputEvent::KeyDown(KeyCode::KeyD), &bindings);
        assert!(input.exit_requested());
        assert!(input.is_held(KeyCode::KeyW));
        assert!(!input.is_held(KeyCode::KeyD));
        // The quit key itself is not recorded as held
        assert!(!input.is_held(KeyCode::Escape));
    }

    #[test]
    fn test_focus_loss_clears_held_keys() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.process_event(&InputEvent::KeyDown(KeyCode::KeyW), &bindings);
        input.process_event(&InputEvent::KeyDown(KeyCode::KeyA), &bindings);
        input.process_event(&InputEvent::FocusLost, &bindings);
        assert!(!input.is_held(KeyCode::KeyW));
        assert!(!input.is_held(KeyCode::KeyA));
        assert!(!input.exit_requested());
    }

    #[test]
    fn test_unrelated_window_events_are_ignored() {
        assert_eq!(from_window_event(&WindowEvent::CloseRequested), None);
        assert_eq!(
            from_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::FocusLost)
        );
        assert_eq!(from_window_event(&WindowEvent::Focused(true)), None);
    }
}
