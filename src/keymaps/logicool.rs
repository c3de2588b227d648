//! Keymap in the style of a Logicool Japanese keyboard.
//!
//! The thumbs carry dedicated IME on and IME off keys (rather than a toggle), doubling as
//! modifiers when held. Layer 1 is a calculator-style number pad with brackets and arrows on
//! the right hand; while it is active the trackball scrolls. Layer 2 has shell and Vim symbols,
//! shifted arrows for selecting text and the pointer settings.
//!
//! Apple hosts are assumed to use an ANSI layout and Lang1/Lang2 for the IME; everything else
//! a JIS layout with henkan/muhenkan.

use crate::config::{Config, Millis};
use crate::host::{Context, HostOs};
use crate::jis::Symbol;
use crate::keycode::KeyCode::{self, *};
use crate::keyboard::KeymapHooks;
use crate::keymap::{
    btn, custom, k, key, lt, mt, pointer, row, shift, thumbs, Action, Combo, Key, Keymap, Layer, Mods,
    MouseButtons, PointerCommand, ScrollSnap, Tap,
};
use crate::keymaps::qwerty::{F, G, J, K, L, P};
use crate::layer::LayerState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Custom {
    /// Kana on Apple hosts, henkan elsewhere.
    ImeOn,
    /// Eisu on Apple hosts, muhenkan elsewhere.
    ImeOff,
    /// Cmd+Tab or Alt+Tab, holding the modifier until layer 2 is left.
    AppSwitch,
    ImeToggle,
    /// Tab when tapped, Cmd (Apple) or Ctrl (others) while held.
    TabCtrlGui,
    /// `/` when tapped, scroll mode while held.
    SlashScroll,
    /// A US symbol, typed so that it comes out right on ANSI and JIS hosts alike.
    Ju(Symbol),
}

const ___: Action<Custom> = Action::Transparent;
const XXX: Action<Custom> = Action::Inactive;

const fn ju(symbol: Symbol) -> Action<Custom> {
    custom(Custom::Ju(symbol))
}

const fn snap(snap: ScrollSnap) -> Action<Custom> {
    pointer(PointerCommand::ScrollSnap(snap))
}

static LAYERS: [Layer<Custom>; 3] = [
    [
        row([k(Q), k(W), k(E), k(R), k(T)], [k(Y), k(U), k(I), k(O), k(KeyCode::P)]),
        row(
            [k(A), k(S), k(D), k(KeyCode::F), k(KeyCode::G)],
            [k(H), k(KeyCode::J), k(KeyCode::K), k(KeyCode::L), k(Enter)],
        ),
        row([k(Z), k(X), k(C), k(V), k(B)], [k(N), k(M), k(Comma), k(Dot), custom(Custom::SlashScroll)]),
        thumbs(
            [
                XXX,
                XXX,
                mt(Mods::LGUI, Tap::Custom(Custom::ImeOff)),
                k(LAlt),
                lt(1, Escape),
                custom(Custom::TabCtrlGui),
            ],
            [lt(2, Space), mt(Mods::LSHIFT, Tap::Custom(Custom::ImeOn)), XXX],
        ),
    ],
    [
        row(
            [ju(Symbol::Plus), k(Kc7), k(Kc8), k(Kc9), k(Minus)],
            [
                ju(Symbol::LeftCurly),
                ju(Symbol::RightCurly),
                ju(Symbol::LeftBracket),
                ju(Symbol::RightBracket),
                k(Backspace),
            ],
        ),
        row(
            [ju(Symbol::Asterisk), k(Kc4), k(Kc5), k(Kc6), ju(Symbol::Equal)],
            [k(Left), k(Down), k(Up), k(Right), ju(Symbol::Colon)],
        ),
        row(
            [k(Kc0), k(Kc1), k(Kc2), k(Kc3), shift(Kc5)],
            [
                ju(Symbol::LeftParen),
                ju(Symbol::RightParen),
                ju(Symbol::Quote),
                ju(Symbol::DoubleQuote),
                ju(Symbol::Pipe),
            ],
        ),
        thumbs([XXX, XXX, ___, ___, ___, ___], [___, k(Enter), XXX]),
    ],
    [
        row(
            [custom(Custom::AppSwitch), snap(ScrollSnap::Vertical), snap(ScrollSnap::Horizontal), k(F5), k(F10)],
            [k(Semicolon), k(Home), k(End), k(Delete), k(Backspace)],
        ),
        row(
            [shift(Kc1), shift(Kc4), ju(Symbol::Caret), ju(Symbol::At), ju(Symbol::Ampersand)],
            [shift(Left), shift(Down), shift(Up), shift(Right), ju(Symbol::Tilde)],
        ),
        row(
            [ju(Symbol::Grave), shift(Kc3), ju(Symbol::Backslash), shift(Comma), shift(Dot)],
            [
                pointer(PointerCommand::CpiDown),
                pointer(PointerCommand::CpiUp),
                k(PageUp),
                k(PageDown),
                ju(Symbol::Underscore),
            ],
        ),
        thumbs([XXX, XXX, ___, ___, ___, ___], [___, pointer(PointerCommand::ScrollToggle), XXX]),
    ],
];

static COMBOS: [Combo<Custom>; 4] = [
    Combo { keys: &[F, G], action: custom(Custom::ImeToggle) },
    Combo { keys: &[J, K], action: btn(MouseButtons::BUTTON1) },
    Combo { keys: &[K, L], action: btn(MouseButtons::BUTTON2) },
    Combo { keys: &[P, K], action: k(Backspace) },
];

pub static KEYMAP: Keymap<Custom> = Keymap {
    layers: &LAYERS,
    combos: &COMBOS,
    config: Config::new().with_tapping_term(150).with_permissive_hold(),
};

/// State kept between custom key events.
#[derive(Debug, Default)]
pub struct Logicool {
    ime_on: bool,
    /// Modifier held by the app switcher.
    app_switch: Option<Mods>,
    /// When the slash key went down, while it is down.
    slash_scroll: Option<Millis>,
    /// Modifier registered by the Tab key and when, while it is down.
    tab_ctrl_gui: Option<(Mods, Millis)>,
}

impl Logicool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last IME toggle switched the IME on.
    pub fn ime_on(&self) -> bool {
        self.ime_on
    }

    pub fn is_app_switching(&self) -> bool {
        self.app_switch.is_some()
    }
}

fn ime_on_key(host_os: HostOs) -> Key {
    if host_os.is_apple() {
        key(Lang1)
    } else {
        key(International4)
    }
}

fn ime_off_key(host_os: HostOs) -> Key {
    if host_os.is_apple() {
        key(Lang2)
    } else {
        key(International5)
    }
}

/// Cmd on Apple hosts, Ctrl elsewhere.
fn shortcut_mods(host_os: HostOs) -> Mods {
    if host_os.is_apple() {
        Mods::LGUI
    } else {
        Mods::LCTRL
    }
}

/// Cmd on Apple hosts, Alt elsewhere.
fn app_switch_mods(host_os: HostOs) -> Mods {
    if host_os.is_apple() {
        Mods::LGUI
    } else {
        Mods::LALT
    }
}

fn mods_only(mods: Mods) -> Key {
    Key { code: 0, mods }
}

impl KeymapHooks for Logicool {
    type Custom = Custom;

    fn keymap(&self) -> &'static Keymap<Custom> {
        &KEYMAP
    }

    fn process_custom(&mut self, custom: Custom, pressed: bool, ctx: &mut Context<'_>) {
        let host_os = ctx.host_os();
        match custom {
            Custom::ImeOn if pressed => ctx.tap(ime_on_key(host_os)),
            Custom::ImeOff if pressed => ctx.tap(ime_off_key(host_os)),
            Custom::TabCtrlGui => {
                if pressed {
                    let mods = shortcut_mods(host_os);
                    ctx.register(mods_only(mods));
                    self.tab_ctrl_gui = Some((mods, ctx.now()));
                } else if let Some((mods, since)) = self.tab_ctrl_gui.take() {
                    ctx.unregister(mods_only(mods));
                    if ctx.within_tapping_term(since) {
                        ctx.tap(key(Tab));
                    }
                }
            }
            Custom::ImeToggle if pressed => {
                self.ime_on = !self.ime_on;
                if self.ime_on {
                    ctx.tap(ime_on_key(host_os));
                } else {
                    ctx.tap(ime_off_key(host_os));
                }
            }
            Custom::AppSwitch if pressed => {
                if self.app_switch.is_none() {
                    let mods = app_switch_mods(host_os);
                    ctx.register(mods_only(mods));
                    self.app_switch = Some(mods);
                }
                ctx.tap(key(Tab));
            }
            Custom::SlashScroll => {
                if pressed {
                    self.slash_scroll = Some(ctx.now());
                    ctx.set_scroll_mode(true);
                } else if let Some(since) = self.slash_scroll.take() {
                    if ctx.within_tapping_term(since) {
                        ctx.tap(key(Slash));
                    }
                    let scroll_mode = ctx.layer_state().contains(1);
                    ctx.set_scroll_mode(scroll_mode);
                }
            }
            Custom::Ju(symbol) if pressed => ctx.tap(symbol.key(host_os.layout())),
            _ => {}
        }
    }

    fn layer_state_set(&mut self, state: LayerState, ctx: &mut Context<'_>) -> LayerState {
        if !state.contains(2) {
            if let Some(mods) = self.app_switch.take() {
                ctx.unregister(mods_only(mods));
            }
        }
        // A held slash key keeps scrolling regardless of layers.
        if self.slash_scroll.is_none() {
            ctx.set_scroll_mode(state.contains(1));
        }
        state
    }
}
