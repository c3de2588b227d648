//! Timing settings each keymap carries, and the compile-time capacities of the engine.

/// Default time a hold-tap key has to be held before it counts as held.
pub const TAPPING_TERM_MS: u16 = 200;
/// Default time within which all keys of a combo must come down.
pub const COMBO_TERM_MS: u16 = 50;

/// How many keys (and combos) can be held down at once.
pub const HELD_KEYS_LIMIT: usize = 16;
/// How many key events can queue up behind an undecided hold-tap key.
pub const WAITING_BUFFER_SIZE: usize = 8;
pub const COMBO_MAX_NUM: usize = 8;
pub const COMBO_MAX_LENGTH: usize = 4;
/// Layers are tracked as bits of a `u32`.
pub const MAX_LAYERS: usize = 32;

/// Milliseconds from a free-running timer. Compared with wrapping arithmetic.
pub type Millis = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub tapping_term_ms: u16,
    /// Decide "hold" as soon as another key is pressed and released inside the hold-tap.
    pub permissive_hold: bool,
    pub combo_term_ms: u16,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            tapping_term_ms: TAPPING_TERM_MS,
            permissive_hold: false,
            combo_term_ms: COMBO_TERM_MS,
        }
    }

    pub const fn with_tapping_term(self, tapping_term_ms: u16) -> Self {
        Config { tapping_term_ms, ..self }
    }

    pub const fn with_permissive_hold(self) -> Self {
        Config { permissive_hold: true, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// Time passed between two timer readings, across timer wrap-around.
pub const fn elapsed(since: Millis, now: Millis) -> Millis {
    now.wrapping_sub(since)
}
