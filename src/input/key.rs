//! Bounded key and mouse button enumerations
//!
//! Raw platform key codes are an open set; everything the tracker stores is
//! keyed by these closed enums so that state can live in fixed-size arrays.
//! Codes with no mapping resolve to [`Key::Unknown`], which event ingestion
//! skips, so queries never need a bounds check.

use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::KeyCode;

/// Bounded set of keys the input system tracks.
///
/// `Unknown` is the sentinel for unmapped platform codes. It occupies index
/// zero of the state arrays but is never written, so every query on it
/// reports the key as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Sentinel for raw codes with no mapping
    Unknown,
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
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Shift,
    Ctrl,
    Alt,
}

impl Key {
    /// Number of tracked keys, including the sentinel.
    pub const COUNT: usize = 49;

    /// Index of this key into the tracker's state arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a winit key code onto the bounded key set.
    ///
    /// Left/right modifier pairs collapse onto a single key. Every code
    /// without a mapping resolves to [`Key::Unknown`].
    #[must_use]
    pub fn from_key_code(code: KeyCode) -> Self {
        match code {
            KeyCode::KeyA => Self::A,
            KeyCode::KeyB => Self::B,
            KeyCode::KeyC => Self::C,
            KeyCode::KeyD => Self::D,
            KeyCode::KeyE => Self::E,
            KeyCode::KeyF => Self::F,
            KeyCode::KeyG => Self::G,
            KeyCode::KeyH => Self::H,
            KeyCode::KeyI => Self::I,
            KeyCode::KeyJ => Self::J,
            KeyCode::KeyK => Self::K,
            KeyCode::KeyL => Self::L,
            KeyCode::KeyM => Self::M,
            KeyCode::KeyN => Self::N,
            KeyCode::KeyO => Self::O,
            KeyCode::KeyP => Self::P,
            KeyCode::KeyQ => Self::Q,
            KeyCode::KeyR => Self::R,
            KeyCode::KeyS => Self::S,
            KeyCode::KeyT => Self::T,
            KeyCode::KeyU => Self::U,
            KeyCode::KeyV => Self::V,
            KeyCode::KeyW => Self::W,
            KeyCode::KeyX => Self::X,
            KeyCode::KeyY => Self::Y,
            KeyCode::KeyZ => Self::Z,
            KeyCode::Digit0 => Self::Num0,
            KeyCode::Digit1 => Self::Num1,
            KeyCode::Digit2 => Self::Num2,
            KeyCode::Digit3 => Self::Num3,
            KeyCode::Digit4 => Self::Num4,
            KeyCode::Digit5 => Self::Num5,
            KeyCode::Digit6 => Self::Num6,
            KeyCode::Digit7 => Self::Num7,
            KeyCode::Digit8 => Self::Num8,
            KeyCode::Digit9 => Self::Num9,
            KeyCode::Space => Self::Space,
            KeyCode::Enter => Self::Enter,
            KeyCode::Escape => Self::Escape,
            KeyCode::Tab => Self::Tab,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::ArrowUp => Self::Up,
            KeyCode::ArrowDown => Self::Down,
            KeyCode::ArrowLeft => Self::Left,
            KeyCode::ArrowRight => Self::Right,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Self::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Self::Ctrl,
            KeyCode::AltLeft | KeyCode::AltRight => Self::Alt,
            _ => Self::Unknown,
        }
    }
}

/// Mouse buttons the input system tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Number of tracked mouse buttons.
    pub const COUNT: usize = 3;

    /// Index of this button into the tracker's state arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map a winit mouse button onto the tracked set.
    ///
    /// Returns `None` for side/extra buttons; callers drop those at the
    /// ingestion boundary so query paths stay branch-free.
    #[must_use]
    pub fn from_winit(button: WinitMouseButton) -> Option<Self> {
        match button {
            WinitMouseButton::Left => Some(Self::Left),
            WinitMouseButton::Right => Some(Self::Right),
            WinitMouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}
