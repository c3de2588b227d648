//! Typing US symbols on hosts set up for either ANSI or JIS keyboards.
//!
//! A JIS host interprets the same HID usages differently from an ANSI one (shift+2 is `"`, the
//! key right of `P` is `@`, and so on), so symbols whose position differs need a key chosen per
//! host layout.

use crate::host::HostLayout;
use crate::keycode::KeyCode::*;
use crate::keymap::{key, shifted, Key};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    Pipe,
    Backslash,
    Tilde,
    Grave,
    At,
    Caret,
    LeftParen,
    RightParen,
    Plus,
    Asterisk,
    Equal,
    Colon,
    Quote,
    DoubleQuote,
    Ampersand,
    Underscore,
}

impl Symbol {
    /// The key that types this symbol on a host with the given layout.
    pub const fn key(self, layout: HostLayout) -> Key {
        let (ansi, jis) = self.keys();
        match layout {
            HostLayout::Ansi => ansi,
            HostLayout::Jis => jis,
        }
    }

    const fn keys(self) -> (Key, Key) {
        match self {
            Symbol::LeftCurly => (shifted(LeftBracket), shifted(RightBracket)),
            Symbol::RightCurly => (shifted(RightBracket), shifted(Backslash)),
            Symbol::LeftBracket => (key(LeftBracket), key(RightBracket)),
            Symbol::RightBracket => (key(RightBracket), key(Backslash)),
            Symbol::Pipe => (shifted(Backslash), shifted(International3)),
            Symbol::Backslash => (key(Backslash), key(International3)),
            Symbol::Tilde => (shifted(Grave), shifted(Equal)),
            Symbol::Grave => (key(Grave), shifted(LeftBracket)),
            Symbol::At => (shifted(Kc2), key(LeftBracket)),
            Symbol::Caret => (shifted(Kc6), key(Equal)),
            Symbol::LeftParen => (shifted(Kc9), shifted(Kc8)),
            Symbol::RightParen => (shifted(Kc0), shifted(Kc9)),
            Symbol::Plus => (shifted(Equal), shifted(Semicolon)),
            Symbol::Asterisk => (shifted(Kc8), shifted(Quote)),
            Symbol::Equal => (key(Equal), shifted(Minus)),
            Symbol::Colon => (shifted(Semicolon), key(Quote)),
            Symbol::Quote => (key(Quote), shifted(Kc7)),
            Symbol::DoubleQuote => (shifted(Quote), shifted(Kc2)),
            Symbol::Ampersand => (shifted(Kc7), shifted(Kc6)),
            Symbol::Underscore => (shifted(Minus), shifted(International1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Mods;

    #[test]
    fn brackets_move_one_key_right_on_jis() {
        assert_eq!(Symbol::LeftBracket.key(HostLayout::Ansi), key(LeftBracket));
        assert_eq!(Symbol::LeftBracket.key(HostLayout::Jis), key(RightBracket));
        assert_eq!(Symbol::RightCurly.key(HostLayout::Jis), shifted(Backslash));
    }

    #[test]
    fn some_symbols_lose_shift_on_jis() {
        let at = Symbol::At.key(HostLayout::Jis);
        assert_eq!(at.code, LeftBracket.hid());
        assert!(at.mods.is_empty());

        let colon = Symbol::Colon.key(HostLayout::Jis);
        assert_eq!(colon, key(Quote));
        assert_eq!(Symbol::Colon.key(HostLayout::Ansi).mods, Mods::LSHIFT);
    }

    #[test]
    fn yen_and_ro_keys_stand_in_for_backslash() {
        assert_eq!(Symbol::Backslash.key(HostLayout::Jis), key(International3));
        assert_eq!(Symbol::Underscore.key(HostLayout::Jis), shifted(International1));
        assert_eq!(Symbol::Underscore.key(HostLayout::Ansi), shifted(Minus));
    }
}
