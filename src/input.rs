//! # Keyboard Input
//!
//! [`InputState`] tracks which keys are currently held, fed from winit window
//! events. The engine queries it once per frame to fire the registered key
//! callbacks, so "held" here means held for the whole frame, not edge
//! transitions. Keys are identified by the engine's own [`Key`] so user code
//! never imports winit.

use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Physical keys the engine reports. Ordered, so keyed collections iterate
/// in a stable order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
}

/// Set of currently held keys.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Releases every key. Used when the window loses focus, since release
    /// events stop arriving then.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Folds a window event into the held set. Unrelated events are ignored.
    pub fn apply_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key_code(code) {
                        match event.state {
                            ElementState::Pressed => self.press(key),
                            ElementState::Released => self.release(key),
                        }
                    }
                }
            }
            WindowEvent::Focused(false) => self.clear(),
            _ => {}
        }
    }
}

/// Maps a winit key code onto [`Key`]. Keys the engine does not expose map
/// to `None`.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::ControlRight => Key::RightControl,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::AltRight => Key::RightAlt,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_tracks_press_and_release() {
        let mut input = InputState::new();
        assert!(!input.pressed(Key::W));

        input.press(Key::W);
        input.press(Key::W); // key repeat
        assert!(input.pressed(Key::W));

        input.release(Key::W);
        assert!(!input.pressed(Key::W));
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.press(Key::W);
        input.press(Key::LeftShift);
        input.clear();
        assert!(!input.pressed(Key::W));
        assert!(!input.pressed(Key::LeftShift));
    }

    #[test]
    fn key_codes_map_onto_engine_keys() {
        assert_eq!(map_key_code(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key_code(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key_code(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key_code(KeyCode::F24), None);
    }

    #[test]
    fn keys_order_stably() {
        // the callback table iterates in this order
        assert!(Key::A < Key::B);
        assert!(Key::Z < Key::Digit0);
        assert!(Key::Escape < Key::LeftShift);
    }
}
