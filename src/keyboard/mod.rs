//! Keyberon host for the overlay
//!
//! Ready-made [`Host`] for firmware that runs the [`keyberon`] layout engine.
//! Matrix events go into the layout; custom keys coming out of it are routed
//! to the [`Overlay`] and layer changes go back into the layout.

use keyberon::key_code::KeyCode;
use keyberon::layout::{CustomEvent, Event};

use crate::config::PanelConfig;
use crate::display::Canvas;
use crate::layers::{self, Layout};
use crate::overlay::{Host, KeyRecord, Overlay, UserHooks};

/// Host services backed by a keyberon layout
pub struct Board<C> {
    layout: Layout,
    display: Option<C>,
}

impl<C: Canvas> Host for Board<C> {
    type Canvas = C;

    fn display(&mut self, _panel: &PanelConfig) -> Option<C> {
        self.display.take()
    }

    fn layer_move(&mut self, layer: u8) {
        self.layout.set_default_layer(layer as usize);
    }
}

/// Macropad logic: layout engine plus overlay features
pub struct Keyboard<C: Canvas> {
    board: Board<C>,
    overlay: Overlay<C>,
}

impl<C: Canvas> Keyboard<C> {
    /// Create keyboard with the default keymap; `display` is handed to the
    /// overlay in [`Self::init`]
    pub fn new(display: Option<C>) -> Self {
        Self {
            board: Board {
                layout: layers::layout(),
                display,
            },
            overlay: Overlay::new(),
        }
    }

    /// To be called once after the hardware is up
    pub fn init(&mut self) {
        self.overlay.post_init(&mut self.board);
    }

    /// Push key matrix event
    pub fn event(&mut self, event: Event) {
        self.board.layout.event(event);
    }

    /// Periodic processing with `now` in milliseconds
    ///
    /// Advances the layout, dispatches custom keys, refreshes the stopwatch
    /// and returns the keycodes to report to the USB host.
    ///
    /// Only custom keys go through [`UserHooks::process_record`]; basic keys
    /// stay in the layout and come out in the returned keycodes. Records carry
    /// `now`, the time of the tick in which keyberon dequeues the event, not of
    /// the matrix event itself. keyberon handles one queued event per tick, so
    /// call this at least as often as events arrive to keep hold durations
    /// accurate.
    pub fn tick(&mut self, now: u32) -> impl Iterator<Item = KeyCode> + '_ {
        if let Some((action, pressed)) = self.board.layout.tick().transposed() {
            debug!("Custom key pressed={}", pressed);
            let record = KeyRecord { keycode: (*action).into(), pressed, time: now };
            self.overlay.process_record(&mut self.board, record);
        }
        self.overlay.housekeeping(&mut self.board, now);
        self.board.layout.keycodes()
    }

    /// Key to tap for an encoder detent on the current layer
    pub fn encoder(&self, index: usize, clockwise: bool) -> Option<KeyCode> {
        layers::encoder_key(self.current_layer(), index, clockwise)
    }

    pub fn current_layer(&self) -> usize {
        self.board.layout.current_layer()
    }

    pub fn overlay(&self) -> &Overlay<C> {
        &self.overlay
    }
}

/// Extension trait for [`CustomEvent`]
pub trait CustomEventExt<T: 'static> {
    /// Convert NoEvent into None, else return Some(T, pressed)
    fn transposed(self) -> Option<(&'static T, bool)>;
}

impl<T> CustomEventExt<T> for CustomEvent<T> {
    fn transposed(self) -> Option<(&'static T, bool)> {
        match self {
            CustomEvent::NoEvent => None,
            CustomEvent::Press(act) => Some((act, true)),
            CustomEvent::Release(act) => Some((act, false)),
        }
    }
}
