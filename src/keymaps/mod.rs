//! The keymaps themselves. Each one is a set of static layer and combo tables plus a
//! [crate::keyboard::KeymapHooks] implementation holding whatever state its custom keys need.

pub mod brackets;
pub mod logicool;

/// Where the letters of the QWERTY base layer sit. Combos are defined by position.
pub mod qwerty {
    use crate::keymap::ScanCode;

    pub const Q: ScanCode = (0, 0);
    pub const W: ScanCode = (0, 1);
    pub const E: ScanCode = (0, 2);
    pub const P: ScanCode = (0, 9);

    pub const A: ScanCode = (1, 0);
    pub const S: ScanCode = (1, 1);
    pub const D: ScanCode = (1, 2);
    pub const F: ScanCode = (1, 3);
    pub const G: ScanCode = (1, 4);
    pub const H: ScanCode = (1, 5);
    pub const J: ScanCode = (1, 6);
    pub const K: ScanCode = (1, 7);
    pub const L: ScanCode = (1, 8);

    pub const Z: ScanCode = (2, 0);
    pub const X: ScanCode = (2, 1);
    pub const C: ScanCode = (2, 2);
    pub const SLASH: ScanCode = (2, 9);
}
