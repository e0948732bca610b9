use std::collections::HashSet;

/// Logical keys addressable through the presenter.
///
/// Backends translate their own key identifiers into this set; every
/// other physical key is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
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
    Space,
    Return,
    Esc,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    pub const ALL: [KeyCode; 33] = [
        KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F,
        KeyCode::G, KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L,
        KeyCode::M, KeyCode::N, KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R,
        KeyCode::S, KeyCode::T, KeyCode::U, KeyCode::V, KeyCode::W, KeyCode::X,
        KeyCode::Y, KeyCode::Z,
        KeyCode::Space, KeyCode::Return, KeyCode::Esc,
        KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right,
    ];
}

/// Mouse buttons tracked by the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Backend-agnostic input event produced by the event pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: KeyCode, pressed: bool },
    MouseButton { button: MouseButton, pressed: bool },
    /// Cursor position in window-relative physical pixels
    CursorMoved { x: i32, y: i32 },
    /// Window lost keyboard focus; held keys and buttons are released
    FocusLost,
}

/// Input state frozen at the start of a present call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_x: i32,
    mouse_y: i32,
}

impl InputSnapshot {
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    /// Iterate over held keys (no particular order)
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }
}

/// Live input state, fed by pumped events between present calls
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    state: InputSnapshot,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single event to the live state
    pub fn apply(&mut self, event: InputEvent) {
        let state = &mut self.state;
        match event {
            InputEvent::Key { key, pressed: true } => {
                state.keys_down.insert(key);
            }
            InputEvent::Key { key, pressed: false } => {
                state.keys_down.remove(&key);
            }
            InputEvent::MouseButton { button, pressed: true } => {
                state.buttons_down.insert(button);
            }
            InputEvent::MouseButton { button, pressed: false } => {
                state.buttons_down.remove(&button);
            }
            InputEvent::CursorMoved { x, y } => {
                state.mouse_x = x;
                state.mouse_y = y;
            }
            InputEvent::FocusLost => {
                // Release events never arrive for an unfocused window
                state.keys_down.clear();
                state.buttons_down.clear();
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Copy the live state into `snapshot`, reusing its allocations
    pub fn capture_into(&self, snapshot: &mut InputSnapshot) {
        snapshot.clone_from(&self.state);
    }

    pub fn state(&self) -> &InputSnapshot {
        &self.state
    }
}
