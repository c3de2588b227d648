//! Keymap putting the frequent brackets under the index and middle fingers of layer 1, so
//! that `{}`, `()` and `[]` never leave the home row. Symbols are the US ones, for a Mac.
//!
//! Layer 2 holds function keys, mouse buttons and pointer settings, and is reached with the
//! Q+W combo. Combos also give Enter and the input method keys.
//!
//! The thumb rows are laid out as the keys sit physically (left `Bsp Alt Cmd/Eisu Ctrl L1 Tab`,
//! right `Shift Space Enter`), not in the order QMK's `LAYOUT_right_ball` arguments list them.

use core::convert::Infallible;

use crate::config::Config;
use crate::host::Context;
use crate::keycode::KeyCode::{self, *};
use crate::keyboard::KeymapHooks;
use crate::keymap::{
    btn, k, key, mo, mt, pointer, row, shift, system, thumbs, Action, Combo, Keymap, Layer, Mods,
    MouseButtons, PointerCommand, ScrollSnap, SystemCommand, Tap,
};
use crate::keymaps::qwerty::{A, C, D, E, H, J, Q, S, W, X, Z};
use crate::layer::LayerState;

const ___: Action<Infallible> = Action::Transparent;
const XXX: Action<Infallible> = Action::Inactive;

/// Cmd while held, Eisu when tapped.
const CMD_EISU: Action<Infallible> = mt(Mods::LGUI, Tap::Key(key(Lang2)));

static LAYERS: [Layer<Infallible>; 3] = [
    [
        row(
            [k(KeyCode::Q), k(KeyCode::W), k(KeyCode::E), k(R), k(T)],
            [k(Y), k(U), k(I), k(O), k(P)],
        ),
        row(
            [k(KeyCode::A), k(KeyCode::S), k(KeyCode::D), k(F), k(G)],
            [k(KeyCode::H), k(KeyCode::J), k(K), k(L), k(Semicolon)],
        ),
        row(
            [k(KeyCode::Z), k(KeyCode::X), k(KeyCode::C), k(V), k(B)],
            [k(N), k(M), k(Comma), k(Dot), k(Slash)],
        ),
        thumbs(
            [k(Backspace), k(LAlt), CMD_EISU, k(LCtrl), mo(1), k(Tab)],
            [k(LShift), k(Space), k(Enter)],
        ),
    ],
    [
        row([k(Kc1), k(Kc2), k(Kc3), k(Kc4), k(Kc5)], [k(Kc6), k(Kc7), k(Kc8), k(Kc9), k(Kc0)]),
        row(
            [k(LeftBracket), shift(Kc9), shift(LeftBracket), k(Equal), k(Escape)],
            [k(Minus), shift(RightBracket), shift(Kc0), k(RightBracket), shift(Semicolon)],
        ),
        row(
            [k(Home), k(End), k(PageUp), k(PageDown), shift(Minus)],
            [k(Left), k(Down), k(Up), k(Right), k(Slash)],
        ),
        thumbs(
            [k(Grave), shift(Grave), k(Quote), shift(Quote), ___, ___],
            [___, k(Semicolon), k(Backslash)],
        ),
    ],
    [
        row([k(F1), k(F2), k(F3), k(F4), k(F5)], [k(F6), k(F7), k(F8), k(F9), k(F10)]),
        row(
            [shift(Kc1), shift(Kc2), shift(Kc3), shift(Kc4), shift(Kc5)],
            [
                btn(MouseButtons::BUTTON1),
                btn(MouseButtons::BUTTON2),
                btn(MouseButtons::BUTTON3),
                k(F11),
                k(F12),
            ],
        ),
        row(
            [shift(Kc6), shift(Kc7), shift(Kc8), shift(Equal), shift(Backslash)],
            [
                pointer(PointerCommand::CpiDown),
                pointer(PointerCommand::CpiUp),
                pointer(PointerCommand::ScrollToggle),
                pointer(PointerCommand::ScrollSnap(ScrollSnap::Free)),
                pointer(PointerCommand::SaveConfig),
            ],
        ),
        thumbs(
            [
                system(SystemCommand::Bootloader),
                pointer(PointerCommand::ResetConfig),
                system(SystemCommand::RgbToggle),
                XXX,
                XXX,
                XXX,
            ],
            [XXX, XXX, XXX],
        ),
    ],
];

static COMBOS: [Combo<Infallible>; 5] = [
    Combo { keys: &[H, J], action: k(Enter) },
    Combo { keys: &[Q, W, E], action: k(Lang2) },
    Combo { keys: &[A, S, D], action: k(Lang1) },
    // Hankaku/zenkaku on Windows.
    Combo { keys: &[Z, X, C], action: k(Grave) },
    Combo { keys: &[Q, W], action: mo(2) },
];

pub static KEYMAP: Keymap<Infallible> = Keymap { layers: &LAYERS, combos: &COMBOS, config: Config::new() };

/// This keymap has no custom keys and no state.
#[derive(Debug, Default)]
pub struct Brackets;

impl KeymapHooks for Brackets {
    type Custom = Infallible;

    fn keymap(&self) -> &'static Keymap<Infallible> {
        &KEYMAP
    }

    fn process_custom(&mut self, custom: Infallible, _pressed: bool, _ctx: &mut Context<'_>) {
        match custom {}
    }

    fn layer_state_set(&mut self, state: LayerState, ctx: &mut Context<'_>) -> LayerState {
        ctx.set_scroll_mode(state.highest() == 1);
        state
    }
}
