//! Input management system
//!
//! The core only ever asks one question of the input layer: is key K held
//! right now. [`InputManager`] answers it from pressed/released events fed by
//! the windowing layer.

use std::collections::HashSet;

/// Query interface used by behaviors during the input phase
pub trait InputSource {
    /// Whether `key` is currently held down
    fn is_key_held(&self, key: KeyCode) -> bool;
}

/// Held-key tracker
#[derive(Debug, Default, Clone)]
pub struct InputManager {
    held: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Release every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Iterate over held keys
    pub fn held_keys(&self) -> impl Iterator<Item = &KeyCode> {
        self.held.iter()
    }
}

impl InputSource for InputManager {
    fn is_key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key
    Num0,
    /// 1 key
    Num1,
    /// 2 key
    Num2,
    /// 3 key
    Num3,
    /// 4 key
    Num4,
    /// 5 key
    Num5,
    /// 6 key
    Num6,
    /// 7 key
    Num7,
    /// 8 key
    Num8,
    /// 9 key
    Num9,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Pause key
    Pause,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputManager::new();
        assert!(!input.is_key_held(KeyCode::Up));

        input.handle_key_input(KeyCode::Up, true);
        input.handle_key_input(KeyCode::Num1, true);
        assert!(input.is_key_held(KeyCode::Up));
        assert!(input.is_key_held(KeyCode::Num1));

        input.handle_key_input(KeyCode::Up, false);
        assert!(!input.is_key_held(KeyCode::Up));

        input.release_all();
        assert_eq!(input.held_keys().count(), 0);
    }
}
