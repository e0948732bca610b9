use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::input::{InputEvent, KeyCode, MouseButton};

/// Translation table between logical keys and winit physical key codes
const KEY_TABLE: [(KeyCode, WinitKeyCode); 33] = [
    (KeyCode::A, WinitKeyCode::KeyA),
    (KeyCode::B, WinitKeyCode::KeyB),
    (KeyCode::C, WinitKeyCode::KeyC),
    (KeyCode::D, WinitKeyCode::KeyD),
    (KeyCode::E, WinitKeyCode::KeyE),
    (KeyCode::F, WinitKeyCode::KeyF),
    (KeyCode::G, WinitKeyCode::KeyG),
    (KeyCode::H, WinitKeyCode::KeyH),
    (KeyCode::I, WinitKeyCode::KeyI),
    (KeyCode::J, WinitKeyCode::KeyJ),
    (KeyCode::K, WinitKeyCode::KeyK),
    (KeyCode::L, WinitKeyCode::KeyL),
    (KeyCode::M, WinitKeyCode::KeyM),
    (KeyCode::N, WinitKeyCode::KeyN),
    (KeyCode::O, WinitKeyCode::KeyO),
    (KeyCode::P, WinitKeyCode::KeyP),
    (KeyCode::Q, WinitKeyCode::KeyQ),
    (KeyCode::R, WinitKeyCode::KeyR),
    (KeyCode::S, WinitKeyCode::KeyS),
    (KeyCode::T, WinitKeyCode::KeyT),
    (KeyCode::U, WinitKeyCode::KeyU),
    (KeyCode::V, WinitKeyCode::KeyV),
    (KeyCode::W, WinitKeyCode::KeyW),
    (KeyCode::X, WinitKeyCode::KeyX),
    (KeyCode::Y, WinitKeyCode::KeyY),
    (KeyCode::Z, WinitKeyCode::KeyZ),
    (KeyCode::Space, WinitKeyCode::Space),
    (KeyCode::Return, WinitKeyCode::Enter),
    (KeyCode::Esc, WinitKeyCode::Escape),
    (KeyCode::Up, WinitKeyCode::ArrowUp),
    (KeyCode::Down, WinitKeyCode::ArrowDown),
    (KeyCode::Left, WinitKeyCode::ArrowLeft),
    (KeyCode::Right, WinitKeyCode::ArrowRight),
];

/// Map a winit key code to a logical key
pub fn key_from_winit(code: WinitKeyCode) -> Option<KeyCode> {
    match code {
        // Keypad enter reports the same logical key as the main one
        WinitKeyCode::NumpadEnter => Some(KeyCode::Return),
        _ => KEY_TABLE
            .iter()
            .find(|(_, winit)| *winit == code)
            .map(|(key, _)| *key),
    }
}

/// Map a logical key back to the winit key code it is read from
pub fn key_to_winit(key: KeyCode) -> WinitKeyCode {
    // KEY_TABLE is ordered like the KeyCode declaration
    let (logical, winit) = KEY_TABLE[key as usize];
    debug_assert_eq!(logical, key);
    winit
}

/// Map a winit mouse button to a tracked button
pub fn mouse_button_from_winit(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Translate a winit window event into an input event.
///
/// Returns `None` for events the presenter does not track.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            key_from_winit(code).map(|key| InputEvent::Key {
                key,
                pressed: event.state == ElementState::Pressed,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            mouse_button_from_winit(*button).map(|button| InputEvent::MouseButton {
                button,
                pressed: *state == ElementState::Pressed,
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
        }),
        WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}
