#![allow(dead_code)]

use arrayvec::ArrayVec;
use keyball_keymaps::config::Millis;
use keyball_keymaps::keycode::KeyCode;
use keyball_keymaps::keymap::{Mods, ScanCode};
use keyball_keymaps::report::{Report, REPORT_KEYS};
use keyball_keymaps::{Event, HostOs, KeyEvent, Keyboard, KeymapHooks};

/// Drives a [Keyboard] with a fake clock, collecting what it emits.
pub struct Harness<H: KeymapHooks> {
    pub keyboard: Keyboard<H>,
    pub now: Millis,
    events: ArrayVec<Event, 64>,
}

impl<H: KeymapHooks> Harness<H> {
    pub fn new(hooks: H, host_os: HostOs) -> Self {
        let mut keyboard = Keyboard::new(hooks).expect("keymap should be valid");
        keyboard.set_host_os(host_os);
        Harness { keyboard, now: 1_000, events: ArrayVec::new() }
    }

    pub fn press(&mut self, key: ScanCode, after: Millis) {
        self.now += after;
        self.keyboard.handle_event(KeyEvent::Press(key), self.now, &mut self.events);
    }

    pub fn release(&mut self, key: ScanCode, after: Millis) {
        self.now += after;
        self.keyboard.handle_event(KeyEvent::Release(key), self.now, &mut self.events);
    }

    /// Let time pass without key activity.
    pub fn wait(&mut self, ms: Millis) {
        self.now += ms;
        self.keyboard.tick(self.now, &mut self.events);
    }

    pub fn take(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}

pub fn report(modifier: Mods, keys: &[KeyCode]) -> Event {
    let mut keycodes = [0; REPORT_KEYS];
    for (slot, key) in keycodes.iter_mut().zip(keys) {
        *slot = key.hid();
    }
    Event::Keyboard(Report { modifier, keycodes })
}

pub fn plain(keys: &[KeyCode]) -> Event {
    report(Mods::empty(), keys)
}

pub fn empty() -> Event {
    Event::Keyboard(Report::default())
}

/// A key typed on its own: down, then nothing.
pub fn typed(modifier: Mods, key: KeyCode) -> [Event; 2] {
    [report(modifier, &[key]), empty()]
}
