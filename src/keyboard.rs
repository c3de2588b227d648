//! Turns key transitions into HID output: combo recognition, hold-tap decisions, layer
//! selection and the other state related to typing. Uses definitions from [crate::keymap], and
//! hands its output to the firmware through [crate::host].
//!
//! The firmware owns scanning and debouncing; it feeds [Keyboard::handle_event] one transition
//! at a time and calls [Keyboard::tick] regularly so that timeouts are noticed without new keys.

use arrayvec::ArrayVec;
use core::fmt::Debug;
use log::{debug, warn};

use crate::combo::{Combos, Passed};
use crate::config::{Config, Millis, HELD_KEYS_LIMIT};
use crate::error::KeymapError;
use crate::host::{Context, Event, EventQueue, HostOs};
use crate::keymap::{Action, Hold, Key, Keymap, PointerCommand, ScanCode, Tap, COMBO_ROW};
use crate::layer::LayerState;
use crate::report::{HidOutput, Report};
use crate::tap_hold::{Decision, TapHold, Waiting};

/// Key events indicate keys going up or down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Press(ScanCode),
    Release(ScanCode),
}

impl KeyEvent {
    pub fn key(&self) -> ScanCode {
        match self {
            KeyEvent::Press(k) => *k,
            KeyEvent::Release(k) => *k,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, KeyEvent::Press(_))
    }
}

/// A [KeyEvent] and when it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub event: KeyEvent,
    pub time: Millis,
}

/// The parts of a keymap that are code rather than tables.
pub trait KeymapHooks {
    /// The keymap's own keycodes, for [Action::Custom].
    type Custom: Copy + Debug + PartialEq + 'static;

    fn keymap(&self) -> &'static Keymap<Self::Custom>;

    /// Called on press and on release of a custom key.
    fn process_custom(&mut self, key: Self::Custom, pressed: bool, ctx: &mut Context<'_>);

    /// Called whenever the set of active layers is about to change. Returns the set to use.
    fn layer_state_set(&mut self, state: LayerState, ctx: &mut Context<'_>) -> LayerState {
        let _ = ctx;
        state
    }
}

/// What a key that is down turned out to do.
#[derive(Clone, Copy, Debug)]
enum Role<C> {
    Plain(Action<C>),
    Held(Hold),
}

#[derive(Clone, Copy, Debug)]
struct KeyHold<C> {
    key: ScanCode,
    role: Role<C>,
}

/// Keys currently down, in order of when they were pressed.
struct HeldKeys<C>(ArrayVec<KeyHold<C>, HELD_KEYS_LIMIT>);

impl<C> Default for HeldKeys<C> {
    fn default() -> Self {
        HeldKeys(ArrayVec::new())
    }
}

impl<C> HeldKeys<C> {
    fn record_pressed(&mut self, key: ScanCode, role: Role<C>) -> bool {
        if self.0.try_push(KeyHold { key, role }).is_err() {
            warn!("too many keys held, ignoring {:?}", key);
            return false;
        }
        true
    }

    fn take_released(&mut self, key: ScanCode) -> Option<KeyHold<C>> {
        let idx = self.0.iter().position(|hold| hold.key == key)?;
        Some(self.0.remove(idx))
    }

    fn is_all_released(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct Keyboard<H: KeymapHooks> {
    hooks: H,
    keymap: &'static Keymap<H::Custom>,
    host_os: HostOs,
    layers: LayerState,
    combos: Combos,
    tap_hold: TapHold<H::Custom>,
    held_keys: HeldKeys<H::Custom>,
    output: HidOutput,
}

impl<H: KeymapHooks> Keyboard<H> {
    pub fn new(hooks: H) -> Result<Self, KeymapError> {
        let keymap = hooks.keymap();
        keymap.validate()?;
        Ok(Keyboard {
            hooks,
            keymap,
            host_os: HostOs::default(),
            layers: LayerState::new(),
            combos: Combos::default(),
            tap_hold: TapHold::default(),
            held_keys: HeldKeys::default(),
            output: HidOutput::default(),
        })
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn host_os(&self) -> HostOs {
        self.host_os
    }

    /// The USB stack's guess of the host may arrive some time after keys are first typed.
    pub fn set_host_os(&mut self, host_os: HostOs) {
        debug!("host os {:?}", host_os);
        self.host_os = host_os;
    }

    pub fn layer_state(&self) -> LayerState {
        self.layers
    }

    pub fn report(&self) -> Report {
        self.output.report()
    }

    pub fn scroll_mode(&self) -> bool {
        self.output.scroll_mode()
    }

    /// Nothing down, nothing waiting to be decided.
    pub fn is_idle(&self) -> bool {
        self.held_keys.is_all_released() && !self.tap_hold.is_waiting() && !self.combos.is_pending()
    }

    fn config(&self) -> Config {
        self.keymap.config
    }

    pub fn handle_event(&mut self, event: KeyEvent, now: Millis, events: &mut dyn EventQueue) {
        let record = Record { event, time: now };
        // Chords are only recognised on the base layer.
        let combos_enabled = self.layers.highest() == 0;
        let mut passed = Passed::new();
        self.combos.handle(record, self.keymap.combos, combos_enabled, self.config().combo_term_ms, &mut passed);
        for record in passed {
            self.process(record, events);
        }
    }

    pub fn tick(&mut self, now: Millis, events: &mut dyn EventQueue) {
        let mut passed = Passed::new();
        self.combos.tick(now, self.keymap.combos, self.config().combo_term_ms, &mut passed);
        for record in passed {
            self.process(record, events);
        }

        if let Some(decision) = self.tap_hold.decide_on_tick(now, &self.config()) {
            self.decide(decision, now, None, events);
        }
    }

    fn process(&mut self, record: Record, events: &mut dyn EventQueue) {
        if self.tap_hold.is_waiting() {
            match self.tap_hold.decide_on(&record, &self.config()) {
                Some(decision) => self.decide(decision, record.time, Some(record), events),
                None => self.tap_hold.defer(record),
            }
            return;
        }

        match record.event {
            KeyEvent::Press(key) => self.press(key, record.time, events),
            KeyEvent::Release(key) => self.release(key, record.time, events),
        }
    }

    /// Settle the waiting hold-tap key, then catch up on everything that waited behind it.
    fn decide(&mut self, decision: Decision, time: Millis, trigger: Option<Record>, events: &mut dyn EventQueue) {
        let Some((waiting, deferred)) = self.tap_hold.finish() else {
            return;
        };
        let mut trigger = trigger;

        match decision {
            Decision::Tap => {
                debug!("{:?} tapped", waiting.key);
                self.tap(waiting.tap, time, events);
                if trigger.map(|r| r.event) == Some(KeyEvent::Release(waiting.key)) {
                    trigger = None;
                }
            }
            Decision::Hold => {
                debug!("{:?} held", waiting.key);
                if self.held_keys.record_pressed(waiting.key, Role::Held(waiting.hold)) {
                    self.apply_hold(waiting.hold, true, time, events);
                }
            }
        }

        for record in deferred {
            self.process(record, events);
        }
        if let Some(record) = trigger {
            self.process(record, events);
        }
    }

    fn resolve(&self, key: ScanCode) -> Action<H::Custom> {
        if key.0 == COMBO_ROW {
            return self
                .keymap
                .combos
                .get(key.1 as usize)
                .map(|combo| combo.action)
                .unwrap_or(Action::Inactive);
        }
        self.layers.resolve(self.keymap, key)
    }

    fn press(&mut self, key: ScanCode, time: Millis, events: &mut dyn EventQueue) {
        let action = self.resolve(key);
        if let Action::HoldTap { hold, tap } = action {
            self.tap_hold.start(Waiting { key, hold, tap, since: time });
            return;
        }
        if self.held_keys.record_pressed(key, Role::Plain(action)) {
            self.execute(action, true, time, events);
        }
    }

    /// Releases act on whatever the key did when it went down, whatever the layers are now.
    fn release(&mut self, key: ScanCode, time: Millis, events: &mut dyn EventQueue) {
        let Some(hold) = self.held_keys.take_released(key) else {
            return;
        };
        match hold.role {
            Role::Plain(action) => self.execute(action, false, time, events),
            Role::Held(h) => self.apply_hold(h, false, time, events),
        }
    }

    fn execute(&mut self, action: Action<H::Custom>, pressed: bool, time: Millis, events: &mut dyn EventQueue) {
        match action {
            Action::Key(key) => {
                if pressed {
                    self.output.register(key, events);
                } else {
                    self.output.unregister(key, events);
                }
            }
            Action::Momentary(layer) => self.set_layer(layer, pressed, time, events),
            Action::Mouse(buttons) => {
                if pressed {
                    self.output.press_buttons(buttons, events);
                } else {
                    self.output.release_buttons(buttons, events);
                }
            }
            Action::Pointer(PointerCommand::ScrollToggle) => {
                if pressed {
                    let scroll_mode = !self.output.scroll_mode();
                    self.output.set_scroll_mode(scroll_mode, events);
                }
            }
            Action::Pointer(command) => {
                if pressed {
                    events.push(Event::Pointer(command));
                }
            }
            Action::System(command) => {
                if pressed {
                    events.push(Event::System(command));
                }
            }
            Action::Custom(custom) => self.custom(custom, pressed, time, events),
            // Decided in `press`, never stored as plain.
            Action::HoldTap { .. } => {}
            Action::Transparent | Action::Inactive => {}
        }
    }

    fn tap(&mut self, tap: Tap<H::Custom>, time: Millis, events: &mut dyn EventQueue) {
        match tap {
            Tap::Key(key) => self.output.tap(key, events),
            Tap::Custom(custom) => {
                self.custom(custom, true, time, events);
                self.custom(custom, false, time, events);
            }
        }
    }

    fn apply_hold(&mut self, hold: Hold, on: bool, time: Millis, events: &mut dyn EventQueue) {
        match hold {
            Hold::Mods(mods) => {
                let key = Key { code: 0, mods };
                if on {
                    self.output.register(key, events);
                } else {
                    self.output.unregister(key, events);
                }
            }
            Hold::Layer(layer) => self.set_layer(layer, on, time, events),
        }
    }

    fn custom(&mut self, custom: H::Custom, pressed: bool, time: Millis, events: &mut dyn EventQueue) {
        let mut ctx = Context {
            output: &mut self.output,
            events,
            layers: self.layers,
            host_os: self.host_os,
            now: time,
            tapping_term_ms: self.keymap.config.tapping_term_ms,
        };
        self.hooks.process_custom(custom, pressed, &mut ctx);
    }

    fn set_layer(&mut self, layer: u8, on: bool, time: Millis, events: &mut dyn EventQueue) {
        let requested = if on { self.layers.with(layer) } else { self.layers.without(layer) };
        if requested == self.layers {
            return;
        }
        let mut ctx = Context {
            output: &mut self.output,
            events: &mut *events,
            layers: self.layers,
            host_os: self.host_os,
            now: time,
            tapping_term_ms: self.keymap.config.tapping_term_ms,
        };
        let state = self.hooks.layer_state_set(requested, &mut ctx);
        debug!("layers {:#x} -> {:#x}", self.layers.bits(), state.bits());
        self.layers = state;
        events.push(Event::Layers(state));
    }
}
