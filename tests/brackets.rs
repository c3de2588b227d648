mod common;

use common::{empty, plain, report, typed, Harness};
use keyball_keymaps::keycode::KeyCode;
use keyball_keymaps::keymap::{Mods, MouseButtons, SystemCommand};
use keyball_keymaps::keymaps::brackets::Brackets;
use keyball_keymaps::keymaps::qwerty::{A, D, E, H, J, Q, S, W};
use keyball_keymaps::layer::LayerState;
use keyball_keymaps::{Event, HostOs};

const CMD_EISU: (u8, u8) = (3, 2);
const LOWER: (u8, u8) = (3, 4);

fn harness() -> Harness<Brackets> {
    Harness::new(Brackets, HostOs::MacOs)
}

fn layers(bits: u32) -> Event {
    Event::Layers(LayerState::from_bits(bits))
}

#[test]
fn lower_layer_scrolls_and_types_brackets() {
    let mut kb = harness();
    kb.press(LOWER, 0);
    assert_eq!(kb.take(), vec![Event::ScrollMode(true), layers(0b10)]);

    // { ( [ under the left index, middle and ring fingers.
    kb.press((1, 2), 10);
    kb.release((1, 2), 10);
    kb.press((1, 1), 10);
    kb.release((1, 1), 10);
    kb.press((1, 0), 10);
    kb.release((1, 0), 10);
    kb.release(LOWER, 10);

    let mut expected = Vec::new();
    expected.extend(typed(Mods::LSHIFT, KeyCode::LeftBracket));
    expected.extend(typed(Mods::LSHIFT, KeyCode::Kc9));
    expected.extend(typed(Mods::empty(), KeyCode::LeftBracket));
    expected.extend([Event::ScrollMode(false), layers(0)]);
    assert_eq!(kb.take(), expected);
}

#[test]
fn lower_layer_thumbs() {
    let mut kb = harness();
    kb.press(LOWER, 0);
    kb.take();

    kb.press((3, 0), 10);
    kb.release((3, 0), 10);
    kb.press((3, 8), 10);
    kb.release((3, 8), 10);
    let mut expected = Vec::new();
    expected.extend(typed(Mods::empty(), KeyCode::Grave));
    expected.extend(typed(Mods::empty(), KeyCode::Backslash));
    assert_eq!(kb.take(), expected);
}

#[test]
fn cmd_eisu_without_permissive_hold() {
    let mut kb = harness();
    kb.press(CMD_EISU, 0);
    kb.press(A, 20);
    kb.release(A, 20);
    kb.release(CMD_EISU, 20);
    assert_eq!(
        kb.take(),
        vec![plain(&[KeyCode::Lang2]), empty(), plain(&[KeyCode::A]), empty()]
    );
}

#[test]
fn cmd_eisu_held_past_default_term() {
    let mut kb = harness();
    kb.press(CMD_EISU, 0);
    kb.wait(199);
    assert!(kb.take().is_empty());
    kb.wait(1);
    kb.release(CMD_EISU, 10);
    assert_eq!(kb.take(), vec![report(Mods::LGUI, &[]), empty()]);
}

#[test]
fn enter_combo() {
    let mut kb = harness();
    kb.press(H, 0);
    kb.press(J, 10);
    kb.release(H, 50);
    kb.release(J, 5);
    assert_eq!(kb.take(), typed(Mods::empty(), KeyCode::Enter));
}

#[test]
fn input_method_combos() {
    let mut kb = harness();
    kb.press(Q, 0);
    kb.press(W, 5);
    kb.press(E, 5);
    kb.release(Q, 40);
    kb.release(W, 5);
    kb.release(E, 5);
    assert_eq!(kb.take(), typed(Mods::empty(), KeyCode::Lang2));

    kb.press(D, 100);
    kb.press(S, 5);
    kb.press(A, 5);
    kb.release(S, 40);
    kb.release(A, 5);
    kb.release(D, 5);
    assert_eq!(kb.take(), typed(Mods::empty(), KeyCode::Lang1));
}

#[test]
fn two_key_chord_waits_for_third_key() {
    let mut kb = harness();
    kb.press(Q, 0);
    kb.press(W, 10);
    assert!(kb.take().is_empty());

    // No E within the combo term: the Q+W combo holds layer 2.
    kb.wait(40);
    assert_eq!(kb.take(), vec![layers(0b100)]);
    assert!(!kb.keyboard.scroll_mode());

    kb.press((1, 5), 10);
    kb.release((1, 5), 10);
    kb.press((3, 0), 10);
    kb.release((3, 0), 10);
    kb.release(Q, 10);
    kb.release(W, 10);
    assert_eq!(
        kb.take(),
        vec![
            Event::MouseButtons(MouseButtons::BUTTON1),
            Event::MouseButtons(MouseButtons::empty()),
            Event::System(SystemCommand::Bootloader),
            layers(0),
        ]
    );
    assert!(kb.keyboard.is_idle());
}

#[test]
fn single_combo_key_types_normally() {
    let mut kb = harness();
    kb.press(Q, 0);
    kb.release(Q, 30);
    kb.press(H, 10);
    kb.press((0, 4), 10);
    kb.release(H, 10);
    kb.release((0, 4), 10);
    assert_eq!(
        kb.take(),
        vec![
            plain(&[KeyCode::Q]),
            empty(),
            plain(&[KeyCode::H]),
            plain(&[KeyCode::H, KeyCode::T]),
            plain(&[KeyCode::T]),
            empty(),
        ]
    );
}
