use core::fmt;

use crate::keymap::ScanCode;

/// Problems with a keymap definition, found by [crate::keymap::Keymap::validate].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeymapError {
    NoLayers,
    TooManyLayers(usize),
    /// A layer key on `layer` at `at` refers to a layer that doesn't exist.
    LayerOutOfRange { layer: usize, at: ScanCode, target: u8 },
    TooManyCombos(usize),
    ComboLength { combo: usize, len: usize },
    ComboKeyOutOfRange { combo: usize, key: ScanCode },
    DuplicateComboKey { combo: usize, key: ScanCode },
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeymapError::NoLayers => write!(f, "keymap has no layers"),
            KeymapError::TooManyLayers(n) => write!(f, "keymap has {} layers, at most 32 are supported", n),
            KeymapError::LayerOutOfRange { layer, at, target } => write!(
                f,
                "key {:?} on layer {} refers to missing layer {}",
                at, layer, target
            ),
            KeymapError::TooManyCombos(n) => write!(f, "keymap has {} combos, too many", n),
            KeymapError::ComboLength { combo, len } => {
                write!(f, "combo {} has {} keys", combo, len)
            }
            KeymapError::ComboKeyOutOfRange { combo, key } => {
                write!(f, "combo {} uses key {:?} outside the matrix", combo, key)
            }
            KeymapError::DuplicateComboKey { combo, key } => {
                write!(f, "combo {} lists key {:?} twice", combo, key)
            }
        }
    }
}
