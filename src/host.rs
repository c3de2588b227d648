//! The boundary with the firmware around the engine: what it tells us about the host computer,
//! what we hand back to it, and the API keymap callbacks get to use.

use arrayvec::ArrayVec;
use log::warn;

use crate::config::{elapsed, Millis};
use crate::keymap::{Key, MouseButtons, PointerCommand, SystemCommand};
use crate::layer::LayerState;
use crate::report::{HidOutput, Report};

/// The operating system on the other end of the USB cable, as guessed by the USB stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostOs {
    #[default]
    Unsure,
    Linux,
    Windows,
    MacOs,
    Ios,
}

impl HostOs {
    /// Apple hosts switch input methods with Lang1/Lang2 and use Cmd where others use Ctrl.
    pub const fn is_apple(self) -> bool {
        matches!(self, HostOs::MacOs | HostOs::Ios)
    }

    /// Physical layout the host is assumed to be configured for.
    pub const fn layout(self) -> HostLayout {
        if self.is_apple() {
            HostLayout::Ansi
        } else {
            HostLayout::Jis
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostLayout {
    Ansi,
    Jis,
}

/// Something the firmware should act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// New keyboard report for the host.
    Keyboard(Report),
    /// New state of the mouse buttons, to merge into the pointing device report.
    MouseButtons(MouseButtons),
    /// Trackball motion should (or should no longer) be turned into scrolling.
    ScrollMode(bool),
    Pointer(PointerCommand),
    System(SystemCommand),
    /// The set of active layers changed, e.g. for a layer indicator.
    Layers(LayerState),
}

/// Where the engine puts its [Event]s.
pub trait EventQueue {
    // Events are discarded if the queue is full.
    fn push(&mut self, event: Event);
}

impl<const N: usize> EventQueue for ArrayVec<Event, N> {
    fn push(&mut self, event: Event) {
        if self.try_push(event).is_err() {
            warn!("event queue full, dropping {:?}", event);
        }
    }
}

#[cfg(test)]
impl EventQueue for Vec<Event> {
    fn push(&mut self, event: Event) {
        Vec::push(self, event);
    }
}

/// What custom key handlers and the layer-state hook can see and do.
pub struct Context<'a> {
    pub(crate) output: &'a mut HidOutput,
    pub(crate) events: &'a mut dyn EventQueue,
    pub(crate) layers: LayerState,
    pub(crate) host_os: HostOs,
    pub(crate) now: Millis,
    pub(crate) tapping_term_ms: u16,
}

impl Context<'_> {
    pub fn host_os(&self) -> HostOs {
        self.host_os
    }

    /// Layers active before the change currently being handled.
    pub fn layer_state(&self) -> LayerState {
        self.layers
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn elapsed(&self, since: Millis) -> Millis {
        elapsed(since, self.now)
    }

    /// Whether a timer started at `since` is still within the keymap's tapping term.
    pub fn within_tapping_term(&self, since: Millis) -> bool {
        self.elapsed(since) < Millis::from(self.tapping_term_ms)
    }

    pub fn register(&mut self, key: Key) {
        self.output.register(key, self.events);
    }

    pub fn unregister(&mut self, key: Key) {
        self.output.unregister(key, self.events);
    }

    pub fn tap(&mut self, key: Key) {
        self.output.tap(key, self.events);
    }

    pub fn scroll_mode(&self) -> bool {
        self.output.scroll_mode()
    }

    pub fn set_scroll_mode(&mut self, scroll_mode: bool) {
        self.output.set_scroll_mode(scroll_mode, self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::KeyCode::*;
    use crate::keymap::key;

    #[test]
    fn apple_hosts_are_ansi_and_everything_else_jis() {
        assert_eq!(HostOs::MacOs.layout(), HostLayout::Ansi);
        assert_eq!(HostOs::Ios.layout(), HostLayout::Ansi);
        assert_eq!(HostOs::Windows.layout(), HostLayout::Jis);
        assert_eq!(HostOs::Linux.layout(), HostLayout::Jis);
        assert_eq!(HostOs::Unsure.layout(), HostLayout::Jis);
    }

    #[test]
    fn fixed_queue_drops_when_full() {
        let mut queue: ArrayVec<Event, 1> = ArrayVec::new();
        EventQueue::push(&mut queue, Event::ScrollMode(true));
        EventQueue::push(&mut queue, Event::ScrollMode(false));
        assert_eq!(queue.as_slice(), &[Event::ScrollMode(true)]);
    }

    #[test]
    fn context_measures_against_tapping_term() {
        let mut output = HidOutput::default();
        let mut events: Vec<Event> = Vec::new();
        let mut ctx = Context {
            output: &mut output,
            events: &mut events,
            layers: LayerState::new(),
            host_os: HostOs::Windows,
            now: 1_000,
            tapping_term_ms: 150,
        };
        assert!(ctx.within_tapping_term(900));
        assert!(!ctx.within_tapping_term(850));
        ctx.tap(key(Tab));
        assert_eq!(events.len(), 2);
    }
}
