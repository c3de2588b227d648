//! Deciding whether a dual-role key was tapped or held.
//!
//! Only one hold-tap key is undecided at a time. Everything that happens while it is undecided
//! waits in a buffer, and is replayed by [crate::keyboard] once the decision is made, so that
//! it sees the layers and modifiers the decision produced.

use arrayvec::ArrayVec;

use crate::config::{elapsed, Config, Millis, WAITING_BUFFER_SIZE};
use crate::keyboard::{KeyEvent, Record};
use crate::keymap::{Hold, ScanCode, Tap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Tap,
    Hold,
}

/// The hold-tap key waiting for a decision.
#[derive(Clone, Copy, Debug)]
pub struct Waiting<C> {
    pub key: ScanCode,
    pub hold: Hold,
    pub tap: Tap<C>,
    pub since: Millis,
}

pub struct TapHold<C> {
    waiting: Option<Waiting<C>>,
    buffer: ArrayVec<Record, WAITING_BUFFER_SIZE>,
}

impl<C> Default for TapHold<C> {
    fn default() -> Self {
        TapHold { waiting: None, buffer: ArrayVec::new() }
    }
}

impl<C: Copy> TapHold<C> {
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    pub fn start(&mut self, waiting: Waiting<C>) {
        debug_assert!(self.waiting.is_none());
        self.waiting = Some(waiting);
    }

    /// Whether `record` decides the waiting key. Doesn't change any state.
    pub fn decide_on(&self, record: &Record, config: &Config) -> Option<Decision> {
        let waiting = self.waiting.as_ref()?;
        let term = Millis::from(config.tapping_term_ms);
        match record.event {
            KeyEvent::Release(key) if key == waiting.key => {
                if elapsed(waiting.since, record.time) < term {
                    Some(Decision::Tap)
                } else {
                    Some(Decision::Hold)
                }
            }
            _ if elapsed(waiting.since, record.time) >= term => Some(Decision::Hold),
            // Another key went down and up entirely inside the hold-tap.
            KeyEvent::Release(key) if config.permissive_hold && self.pressed_while_waiting(key) => {
                Some(Decision::Hold)
            }
            _ if self.buffer.is_full() => Some(Decision::Hold),
            _ => None,
        }
    }

    /// Whether time alone decides the waiting key.
    pub fn decide_on_tick(&self, now: Millis, config: &Config) -> Option<Decision> {
        let waiting = self.waiting.as_ref()?;
        if elapsed(waiting.since, now) >= Millis::from(config.tapping_term_ms) {
            Some(Decision::Hold)
        } else {
            None
        }
    }

    /// Hold on to a record until the waiting key is decided.
    pub fn defer(&mut self, record: Record) {
        if self.buffer.try_push(record).is_err() {
            log::warn!("hold-tap buffer full, dropping {:?}", record);
        }
    }

    /// Stop waiting, handing back the key that was waiting and everything deferred meanwhile.
    pub fn finish(&mut self) -> Option<(Waiting<C>, ArrayVec<Record, WAITING_BUFFER_SIZE>)> {
        let waiting = self.waiting.take()?;
        Some((waiting, core::mem::take(&mut self.buffer)))
    }

    fn pressed_while_waiting(&self, key: ScanCode) -> bool {
        self.buffer.iter().any(|r| r.event == KeyEvent::Press(key))
    }
}
