//! Defines key functions (here called [Action]s) and the layers mapping physical keys to them.
//!
//! Intimately related to [crate::keyboard], which uses these definitions to interpret key
//! presses, and to [crate::keymaps], which holds the actual tables.

use crate::config::{Config, COMBO_MAX_LENGTH, COMBO_MAX_NUM, MAX_LAYERS};
use crate::error::KeymapError;
use crate::keycode::{HidKeyCode, KeyCode};
use bitflags::bitflags;

bitflags! {
    /// The USB HID modifier byte.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct Mods: u8 {
        const LCTRL = 0x01;
        const LSHIFT = 0x02;
        const LALT = 0x04;
        const LGUI = 0x08;
        const RCTRL = 0x10;
        const RSHIFT = 0x20;
        const RALT = 0x40;
        const RGUI = 0x80;
    }
}

bitflags! {
    /// Mouse buttons, in the bit order of a HID mouse report.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct MouseButtons: u8 {
        const BUTTON1 = 0x01;
        const BUTTON2 = 0x02;
        const BUTTON3 = 0x04;
    }
}

/// A HID key code together with the modifiers held while it is down.
///
/// A `code` of 0 means the key only holds modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Key {
    pub code: HidKeyCode,
    pub mods: Mods,
}

/// Requests for the trackball side of the firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerCommand {
    /// Lower the sensor resolution by 100 CPI.
    CpiDown,
    /// Raise the sensor resolution by 100 CPI.
    CpiUp,
    /// Flip scroll mode.
    ScrollToggle,
    ScrollSnap(ScrollSnap),
    /// Persist pointer settings.
    SaveConfig,
    /// Restore pointer settings to defaults.
    ResetConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSnap {
    Vertical,
    Horizontal,
    Free,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemCommand {
    Bootloader,
    RgbToggle,
}

/// What a hold-tap key does once it has been decided to be held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hold {
    Layer(u8),
    Mods(Mods),
}

/// What a hold-tap key does once it has been decided to be tapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tap<C> {
    Key(Key),
    Custom(C),
}

/// An Action which a keypress should Do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action<C> {
    Key(Key),
    /// Layer active while held.
    Momentary(u8),
    HoldTap { hold: Hold, tap: Tap<C> },
    Mouse(MouseButtons),
    Pointer(PointerCommand),
    System(SystemCommand),
    /// Handed to the keymap's own handler.
    Custom(C),
    /// Look through to the next active layer below.
    Transparent,
    Inactive,
}

/// How many physical rows there are
pub const ROWS: usize = 4;
/// How many physical columns there are
pub const COLUMNS: usize = 10;

/// Used to uniquely identify each physical key which can be pressed, as `(row, column)`.
///
/// Combos are given virtual scan codes on the row just past the matrix.
pub type ScanCode = (u8, u8);

pub const COMBO_ROW: u8 = ROWS as u8;

/// Array of [Action]s that a row of keys do
pub type Row<C> = [Action<C>; COLUMNS];
/// 2D Array of [Action]s that the whole set of keys do
pub type Layer<C> = [Row<C>; ROWS];

/// A chord of keys which together do something else.
#[derive(Clone, Copy, Debug)]
pub struct Combo<C> {
    pub keys: &'static [ScanCode],
    pub action: Action<C>,
}

impl<C> Combo<C> {
    pub fn contains(&self, key: ScanCode) -> bool {
        self.keys.contains(&key)
    }
}

/// Everything that describes one keymap.
pub struct Keymap<C: 'static> {
    pub layers: &'static [Layer<C>],
    pub combos: &'static [Combo<C>],
    pub config: Config,
}

impl<C: 'static> Keymap<C> {
    /// The action at a physical position on one layer.
    pub fn action(&self, layer: usize, (row, column): ScanCode) -> Option<&Action<C>> {
        self.layers
            .get(layer)
            .and_then(|l| l.get(row as usize))
            .and_then(|r| r.get(column as usize))
    }

    /// Checks everything the engine relies on but the type system can't express.
    pub fn validate(&self) -> Result<(), KeymapError> {
        if self.layers.is_empty() {
            return Err(KeymapError::NoLayers);
        }
        if self.layers.len() > MAX_LAYERS {
            return Err(KeymapError::TooManyLayers(self.layers.len()));
        }
        for (layer_idx, layer) in self.layers.iter().enumerate() {
            for (row_idx, row) in layer.iter().enumerate() {
                for (column_idx, action) in row.iter().enumerate() {
                    let at = (row_idx as u8, column_idx as u8);
                    self.check_layer_ref(action, layer_idx, at)?;
                }
            }
        }

        if self.combos.len() > COMBO_MAX_NUM {
            return Err(KeymapError::TooManyCombos(self.combos.len()));
        }
        for (idx, combo) in self.combos.iter().enumerate() {
            if combo.keys.len() < 2 || combo.keys.len() > COMBO_MAX_LENGTH {
                return Err(KeymapError::ComboLength { combo: idx, len: combo.keys.len() });
            }
            for (key_idx, &(row, column)) in combo.keys.iter().enumerate() {
                if row as usize >= ROWS || column as usize >= COLUMNS {
                    return Err(KeymapError::ComboKeyOutOfRange { combo: idx, key: (row, column) });
                }
                if combo.keys[..key_idx].contains(&(row, column)) {
                    return Err(KeymapError::DuplicateComboKey { combo: idx, key: (row, column) });
                }
            }
            self.check_layer_ref(&combo.action, 0, (COMBO_ROW, idx as u8))?;
        }
        Ok(())
    }

    fn check_layer_ref(&self, action: &Action<C>, layer: usize, at: ScanCode) -> Result<(), KeymapError> {
        let target = match action {
            Action::Momentary(target) => *target,
            Action::HoldTap { hold: Hold::Layer(target), .. } => *target,
            _ => return Ok(()),
        };
        if target as usize >= self.layers.len() {
            return Err(KeymapError::LayerOutOfRange { layer, at, target });
        }
        Ok(())
    }
}

/// Translate a [KeyCode] into a valid [Key]
pub const fn key(code: KeyCode) -> Key {
    let mods = code.modifier_bit();
    if !mods.is_empty() {
        return Key { code: 0, mods };
    }
    Key { code: code.hid(), mods: Mods::empty() }
}

/// Translate a [KeyCode] into a [Key] that also holds left-shift while typing that keycode
pub const fn shifted(code: KeyCode) -> Key {
    let k = key(code);
    Key { code: k.code, mods: k.mods.union(Mods::LSHIFT) }
}

/// Translate a [KeyCode] into a plain key [Action]
pub const fn k<C>(code: KeyCode) -> Action<C> {
    Action::Key(key(code))
}

/// Translate a [KeyCode] into an [Action] that also holds left-shift
pub const fn shift<C>(code: KeyCode) -> Action<C> {
    Action::Key(shifted(code))
}

/// Layer while held
pub const fn mo<C>(layer: u8) -> Action<C> {
    Action::Momentary(layer)
}

/// Layer when held, key when tapped
pub const fn lt<C>(layer: u8, code: KeyCode) -> Action<C> {
    Action::HoldTap { hold: Hold::Layer(layer), tap: Tap::Key(key(code)) }
}

/// Modifiers when held, something else when tapped
pub const fn mt<C>(mods: Mods, tap: Tap<C>) -> Action<C> {
    Action::HoldTap { hold: Hold::Mods(mods), tap }
}

pub const fn custom<C>(c: C) -> Action<C> {
    Action::Custom(c)
}

/// Mouse buttons while held
pub const fn btn<C>(buttons: MouseButtons) -> Action<C> {
    Action::Mouse(buttons)
}

pub const fn pointer<C>(command: PointerCommand) -> Action<C> {
    Action::Pointer(command)
}

pub const fn system<C>(command: SystemCommand) -> Action<C> {
    Action::System(command)
}

/// Lay out one finger row: five keys per half, left half first, each half read left to right.
pub const fn row<C: Copy>(left: [Action<C>; 5], right: [Action<C>; 5]) -> Row<C> {
    [
        left[0], left[1], left[2], left[3], left[4],
        right[0], right[1], right[2], right[3], right[4],
    ]
}

/// Lay out the thumb row: six keys on the left half and three beside the trackball.
pub const fn thumbs<C: Copy>(left: [Action<C>; 6], right: [Action<C>; 3]) -> Row<C> {
    [
        left[0], left[1], left[2], left[3], left[4], left[5],
        right[0], right[1], right[2],
        Action::Inactive,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::KeyCode::*;

    const ___: Action<()> = Action::Transparent;
    const XXX: Action<()> = Action::Inactive;

    static LAYERS: [Layer<()>; 2] = [
        [
            row([k(Q), k(W), k(E), k(R), k(T)], [k(Y), k(U), k(I), k(O), k(P)]),
            row([k(A), k(S), k(D), k(F), k(G)], [k(H), k(J), k(K), k(L), k(Enter)]),
            row([k(Z), k(X), k(C), k(V), k(B)], [k(N), k(M), k(Comma), k(Dot), k(Slash)]),
            thumbs([XXX, XXX, k(LAlt), lt(1, Escape), mo(1), k(Tab)], [k(Space), k(LShift), XXX]),
        ],
        [
            row([k(Kc1), k(Kc2), k(Kc3), k(Kc4), k(Kc5)], [___, ___, ___, ___, ___]),
            row([___, ___, ___, ___, ___], [___, ___, ___, ___, ___]),
            row([___, ___, ___, ___, ___], [___, ___, ___, ___, ___]),
            thumbs([___, ___, ___, ___, ___, ___], [___, ___, ___]),
        ],
    ];

    static COMBOS: [Combo<()>; 1] = [Combo { keys: &[(1, 3), (1, 4)], action: k(Backspace) }];

    #[test]
    fn modifier_keycodes_become_modifier_only_keys() {
        assert_eq!(key(LAlt), Key { code: 0, mods: Mods::LALT });
        assert_eq!(key(A), Key { code: 0x04, mods: Mods::empty() });
        assert_eq!(shifted(Kc1), Key { code: 0x1E, mods: Mods::LSHIFT });
    }

    #[test]
    fn rows_place_halves_side_by_side() {
        let layer = &LAYERS[0];
        assert_eq!(layer[0][0], k(Q));
        assert_eq!(layer[0][5], k(Y));
        assert_eq!(layer[3][6], k(Space));
        assert_eq!(layer[3][9], Action::Inactive);
    }

    #[test]
    fn valid_keymap_passes() {
        let keymap = Keymap { layers: &LAYERS, combos: &COMBOS, config: Config::default() };
        assert_eq!(keymap.validate(), Ok(()));
        assert_eq!(keymap.action(1, (0, 2)), Some(&k(Kc3)));
        assert_eq!(keymap.action(2, (0, 2)), None);
    }

    #[test]
    fn layer_references_must_exist() {
        let keymap = Keymap { layers: &LAYERS[..1], combos: &[], config: Config::default() };
        assert_eq!(
            keymap.validate(),
            Err(KeymapError::LayerOutOfRange { layer: 0, at: (3, 3), target: 1 })
        );
    }

    #[test]
    fn combos_are_checked() {
        static SHORT: [Combo<()>; 1] = [Combo { keys: &[(1, 3)], action: k(Backspace) }];
        static OUTSIDE: [Combo<()>; 1] = [Combo { keys: &[(1, 3), (4, 0)], action: k(Backspace) }];
        static TWICE: [Combo<()>; 1] = [Combo { keys: &[(1, 3), (1, 3)], action: k(Backspace) }];

        let check = |combos: &'static [Combo<()>]| {
            Keymap { layers: &LAYERS, combos, config: Config::default() }.validate()
        };
        assert_eq!(check(&SHORT), Err(KeymapError::ComboLength { combo: 0, len: 1 }));
        assert_eq!(check(&OUTSIDE), Err(KeymapError::ComboKeyOutOfRange { combo: 0, key: (4, 0) }));
        assert_eq!(check(&TWICE), Err(KeymapError::DuplicateComboKey { combo: 0, key: (1, 3) }));

        static NINE: [Combo<()>; COMBO_MAX_NUM + 1] =
            [Combo { keys: &[(1, 3), (1, 4)], action: k(Backspace) }; COMBO_MAX_NUM + 1];
        assert_eq!(check(&NINE), Err(KeymapError::TooManyCombos(COMBO_MAX_NUM + 1)));
    }

    #[test]
    fn empty_keymap_is_rejected() {
        let keymap: Keymap<()> = Keymap { layers: &[], combos: &[], config: Config::default() };
        assert_eq!(keymap.validate(), Err(KeymapError::NoLayers));
    }

    #[test]
    fn layer_count_is_limited() {
        static MANY: [Layer<()>; MAX_LAYERS + 1] = [[[XXX; COLUMNS]; ROWS]; MAX_LAYERS + 1];
        let keymap = Keymap { layers: &MANY, combos: &[], config: Config::default() };
        assert_eq!(keymap.validate(), Err(KeymapError::TooManyLayers(MAX_LAYERS + 1)));
    }
}
