//! HID output state: which keys, modifiers and mouse buttons are down, and whether the
//! trackball is scrolling. Every change is pushed out as an [Event].

use arrayvec::ArrayVec;
use log::{debug, warn};
use usbd_hid::descriptor::KeyboardReport;

use crate::host::{Event, EventQueue};
use crate::keycode::HidKeyCode;
use crate::keymap::{Key, Mods, MouseButtons};

/// How many non-modifier keys fit in a boot keyboard report.
pub const REPORT_KEYS: usize = 6;

/// The keyboard half of what the host sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub modifier: Mods,
    pub keycodes: [HidKeyCode; REPORT_KEYS],
}

impl Report {
    pub fn to_hid(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier.bits(),
            keycodes: self.keycodes,
            ..KeyboardReport::default()
        }
    }
}

impl From<Report> for KeyboardReport {
    fn from(report: Report) -> Self {
        report.to_hid()
    }
}

#[derive(Default)]
pub struct HidOutput {
    keys: ArrayVec<HidKeyCode, REPORT_KEYS>,
    mods: Mods,
    buttons: MouseButtons,
    scroll_mode: bool,
    last_report: Report,
}

impl HidOutput {
    pub fn report(&self) -> Report {
        let mut report = Report { modifier: self.mods, ..Default::default() };
        report.keycodes[..self.keys.len()].copy_from_slice(&self.keys);
        report
    }

    pub fn scroll_mode(&self) -> bool {
        self.scroll_mode
    }

    pub fn register(&mut self, key: Key, events: &mut dyn EventQueue) {
        self.mods |= key.mods;
        if key.code != 0 && !self.keys.contains(&key.code) && self.keys.try_push(key.code).is_err() {
            warn!("report full, dropping key {:#x}", key.code);
        }
        self.send(events);
    }

    pub fn unregister(&mut self, key: Key, events: &mut dyn EventQueue) {
        self.mods.remove(key.mods);
        self.keys.retain(|code| *code != key.code);
        self.send(events);
    }

    /// Press and release straight away.
    pub fn tap(&mut self, key: Key, events: &mut dyn EventQueue) {
        self.register(key, events);
        self.unregister(key, events);
    }

    pub fn press_buttons(&mut self, buttons: MouseButtons, events: &mut dyn EventQueue) {
        self.buttons |= buttons;
        events.push(Event::MouseButtons(self.buttons));
    }

    pub fn release_buttons(&mut self, buttons: MouseButtons, events: &mut dyn EventQueue) {
        self.buttons.remove(buttons);
        events.push(Event::MouseButtons(self.buttons));
    }

    pub fn set_scroll_mode(&mut self, scroll_mode: bool, events: &mut dyn EventQueue) {
        if self.scroll_mode != scroll_mode {
            debug!("scroll mode {}", scroll_mode);
            self.scroll_mode = scroll_mode;
            events.push(Event::ScrollMode(scroll_mode));
        }
    }

    /// Only reports that differ from the last one sent go out.
    fn send(&mut self, events: &mut dyn EventQueue) {
        let report = self.report();
        if report != self.last_report {
            events.push(Event::Keyboard(report));
            self.last_report = report;
        }
    }
}
