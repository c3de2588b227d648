//! HID usage ids for the keyboard page, limited to the keys the keymaps in this crate type.
//!
//! Names follow the ones used by the [rmk](https://github.com/HaoboGu/rmk/) project.

use crate::keymap::Mods;

/// A raw HID keyboard usage id, as it goes into a keyboard report.
pub type HidKeyCode = u8;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    No = 0x00,
    A = 0x04,
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
    Kc1 = 0x1E,
    Kc2,
    Kc3,
    Kc4,
    Kc5,
    Kc6,
    Kc7,
    Kc8,
    Kc9,
    Kc0,
    Enter = 0x28,
    Escape,
    Backspace,
    Tab,
    Space,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    NonusHash,
    Semicolon,
    Quote,
    Grave,
    Comma,
    Dot,
    Slash,
    CapsLock,
    F1 = 0x3A,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen = 0x46,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Right,
    Left,
    Down,
    Up,
    /// JIS "ro" key (backslash and underscore on JIS hosts).
    International1 = 0x87,
    /// JIS kana key.
    International2,
    /// JIS yen key.
    International3,
    /// JIS henkan (convert).
    International4,
    /// JIS muhenkan (no convert).
    International5,
    /// Kana on Apple hosts.
    Lang1 = 0x90,
    /// Eisu on Apple hosts.
    Lang2,
    LCtrl = 0xE0,
    LShift,
    LAlt,
    LGui,
    RCtrl,
    RShift,
    RAlt,
    RGui,
}

impl KeyCode {
    pub const fn hid(self) -> HidKeyCode {
        self as u8
    }

    /// The modifier bit for a modifier [KeyCode], or empty [Mods] for anything else.
    pub const fn modifier_bit(self) -> Mods {
        match self {
            KeyCode::LCtrl => Mods::LCTRL,
            KeyCode::LShift => Mods::LSHIFT,
            KeyCode::LAlt => Mods::LALT,
            KeyCode::LGui => Mods::LGUI,
            KeyCode::RCtrl => Mods::RCTRL,
            KeyCode::RShift => Mods::RSHIFT,
            KeyCode::RAlt => Mods::RALT,
            KeyCode::RGui => Mods::RGUI,
            _ => Mods::empty(),
        }
    }

    pub const fn is_modifier(self) -> bool {
        !self.modifier_bit().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_ids_follow_the_hid_keyboard_page() {
        assert_eq!(KeyCode::Z.hid(), 0x1D);
        assert_eq!(KeyCode::Kc0.hid(), 0x27);
        assert_eq!(KeyCode::Slash.hid(), 0x38);
        assert_eq!(KeyCode::F12.hid(), 0x45);
        assert_eq!(KeyCode::Up.hid(), 0x52);
        assert_eq!(KeyCode::International5.hid(), 0x8B);
        assert_eq!(KeyCode::Lang2.hid(), 0x91);
        assert_eq!(KeyCode::RGui.hid(), 0xE7);
    }

    #[test]
    fn only_modifiers_have_a_modifier_bit() {
        assert_eq!(KeyCode::LShift.modifier_bit(), Mods::LSHIFT);
        assert_eq!(KeyCode::RGui.modifier_bit(), Mods::RGUI);
        assert!(KeyCode::LAlt.is_modifier());
        assert!(!KeyCode::A.is_modifier());
        assert!(KeyCode::Lang1.modifier_bit().is_empty());
    }
}
