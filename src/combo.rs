//! Recognising combos: chords of keys that together stand for a different action.
//!
//! Key presses that might be the start of a combo are held back until either a combo completes,
//! or it becomes clear none will, at which point they are passed on unchanged and in order.
//! A fired combo shows up downstream as a press of a virtual key on [COMBO_ROW].

use arrayvec::ArrayVec;
use log::debug;

use crate::config::{elapsed, Millis, COMBO_MAX_LENGTH, COMBO_MAX_NUM};
use crate::keyboard::{KeyEvent, Record};
use crate::keymap::{Combo, ScanCode, COMBO_ROW};

/// Records let through by one step of combo recognition.
pub type Passed = ArrayVec<Record, { COMBO_MAX_LENGTH + 2 }>;

/// A combo that has fired and still has some of its keys down.
struct Active {
    index: u8,
    down: ArrayVec<ScanCode, COMBO_MAX_LENGTH>,
    released: bool,
}

#[derive(Default)]
pub struct Combos {
    pending: ArrayVec<Record, COMBO_MAX_LENGTH>,
    active: ArrayVec<Active, COMBO_MAX_NUM>,
}

impl Combos {
    /// Run one key event through combo recognition.
    ///
    /// `enabled` says whether a new chord may start right now.
    pub fn handle<C>(&mut self, record: Record, combos: &[Combo<C>], enabled: bool, term_ms: u16, out: &mut Passed) {
        if let Some(first) = self.pending.first() {
            if elapsed(first.time, record.time) >= Millis::from(term_ms) {
                self.resolve(combos, out);
            }
        }

        match record.event {
            KeyEvent::Press(key) => self.press(record, key, combos, enabled, out),
            KeyEvent::Release(key) => self.release(record, key, combos, out),
        }
    }

    /// Give up on a chord that took too long.
    pub fn tick<C>(&mut self, now: Millis, combos: &[Combo<C>], term_ms: u16, out: &mut Passed) {
        if let Some(first) = self.pending.first() {
            if elapsed(first.time, now) >= Millis::from(term_ms) {
                self.resolve(combos, out);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn press<C>(&mut self, record: Record, key: ScanCode, combos: &[Combo<C>], enabled: bool, out: &mut Passed) {
        if !self.pending.is_empty() && !self.extends(key, combos) {
            self.resolve(combos, out);
        }

        if self.pending.is_empty() && !(enabled && self.extends(key, combos)) {
            out.push(record);
            return;
        }

        self.pending.push(record);
        let complete = self.largest_complete(combos);
        let more_possible = combos.iter().any(|c| c.keys.len() > self.pending.len() && self.pending_within(c));
        if let Some(index) = complete {
            if !more_possible {
                self.fire(index, combos, out);
            }
        }
    }

    fn release<C>(&mut self, record: Record, key: ScanCode, combos: &[Combo<C>], out: &mut Passed) {
        if self.pending.iter().any(|r| r.event == KeyEvent::Press(key)) {
            self.resolve(combos, out);
        }

        if let Some(pos) = self.active.iter().position(|a| a.down.contains(&key)) {
            let active = &mut self.active[pos];
            active.down.retain(|k| *k != key);
            if !active.released {
                active.released = true;
                out.push(Record { event: KeyEvent::Release((COMBO_ROW, active.index)), time: record.time });
            }
            if active.down.is_empty() {
                self.active.remove(pos);
            }
            return;
        }

        out.push(record);
    }

    /// Fire the largest combo the pending keys make up, or let them all through as they are.
    fn resolve<C>(&mut self, combos: &[Combo<C>], out: &mut Passed) {
        match self.largest_complete(combos) {
            Some(index) => self.fire(index, combos, out),
            None => {
                for record in self.pending.drain(..) {
                    out.push(record);
                }
            }
        }
    }

    fn fire<C>(&mut self, index: usize, combos: &[Combo<C>], out: &mut Passed) {
        let combo = &combos[index];
        debug!("combo {} fired", index);

        let time = self.pending.last().map(|r| r.time).unwrap_or_default();
        out.push(Record { event: KeyEvent::Press((COMBO_ROW, index as u8)), time });

        let mut down = ArrayVec::new();
        let mut leftover = ArrayVec::<Record, COMBO_MAX_LENGTH>::new();
        for record in self.pending.drain(..) {
            let key = record.event.key();
            if combo.contains(key) {
                down.push(key);
            } else {
                leftover.push(record);
            }
        }
        for record in leftover {
            out.push(record);
        }

        if self.active.try_push(Active { index: index as u8, down, released: false }).is_err() {
            log::warn!("too many combos held, combo {} won't release", index);
        }
    }

    /// Whether the pending keys plus `key` could still grow into some combo.
    fn extends<C>(&self, key: ScanCode, combos: &[Combo<C>]) -> bool {
        combos.iter().any(|c| {
            c.contains(key)
                && c.keys.len() > self.pending.len()
                && self.pending_within(c)
                && !self.pending.iter().any(|r| r.event.key() == key)
        })
    }

    fn pending_within<C>(&self, combo: &Combo<C>) -> bool {
        self.pending.iter().all(|r| combo.contains(r.event.key()))
    }

    fn largest_complete<C>(&self, combos: &[Combo<C>]) -> Option<usize> {
        combos
            .iter()
            .enumerate()
            .filter(|(_, c)| c.keys.iter().all(|k| self.pending.iter().any(|r| r.event.key() == *k)))
            .max_by_key(|(_, c)| c.keys.len())
            .map(|(index, _)| index)
    }
}
