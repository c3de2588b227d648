//! Which layers are active, and how a physical key resolves through them.

use crate::keymap::{Action, Keymap, ScanCode};

/// Set of active layers, one bit per layer. Layer 0 is the default layer and always underneath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerState(u32);

impl LayerState {
    pub const fn new() -> Self {
        LayerState(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        LayerState(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn on(&mut self, layer: u8) {
        self.0 |= 1 << layer;
    }

    pub fn off(&mut self, layer: u8) {
        self.0 &= !(1 << layer);
    }

    #[must_use]
    pub const fn with(self, layer: u8) -> Self {
        LayerState(self.0 | (1 << layer))
    }

    #[must_use]
    pub const fn without(self, layer: u8) -> Self {
        LayerState(self.0 & !(1 << layer))
    }

    /// Whether a layer is active. With nothing set, only the default layer counts as active.
    pub const fn contains(self, layer: u8) -> bool {
        if self.0 == 0 {
            layer == 0
        } else {
            self.0 & (1 << layer) != 0
        }
    }

    /// The topmost active layer.
    pub const fn highest(self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            31 - self.0.leading_zeros() as u8
        }
    }

    /// Walk active layers from the top down, skipping transparent keys.
    pub fn resolve<C: Copy>(self, keymap: &Keymap<C>, key: ScanCode) -> Action<C> {
        let mut layer = self.highest();
        loop {
            if layer == 0 || self.contains(layer) {
                match keymap.action(layer as usize, key) {
                    Some(Action::Transparent) | None => {}
                    Some(action) => return *action,
                }
            }
            if layer == 0 {
                return Action::Inactive;
            }
            layer -= 1;
        }
    }
}
