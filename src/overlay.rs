//! User features on top of the host keyboard firmware
//!
//! [`Overlay`] owns all feature state: the stopwatch, the layer index and the
//! display handles. The host calls in through [`UserHooks`] from a single
//! execution context and the overlay calls back out through [`Host`].

use keyberon::key_code::KeyCode;

use crate::build_info;
use crate::config::{PanelConfig, PANEL};
use crate::display::{self, Canvas, Status};
use crate::layers::{CustomAction, N_LAYERS};
use crate::stopwatch::Stopwatch;

/// Number of layers reachable by cycling
pub const LAYER_CYCLE: u8 = N_LAYERS as u8;

/// Services of the host firmware used by the overlay
pub trait Host {
    type Canvas: Canvas;

    /// Bring up the display panel, `None` if there is no panel to drive
    fn display(&mut self, panel: &PanelConfig) -> Option<Self::Canvas>;

    /// Make `layer` the only active layer
    fn layer_move(&mut self, layer: u8);
}

/// Entry points called by the host firmware
///
/// None of these may block; the host never calls them concurrently.
pub trait UserHooks<H: Host> {
    /// Called once after hardware initialization
    fn post_init(&mut self, host: &mut H);

    /// Called on every key transition; returns `false` if the host should
    /// skip its default handling of the key
    fn process_record(&mut self, host: &mut H, record: KeyRecord) -> bool;

    /// Called periodically, at whatever rate the host manages
    fn housekeeping(&mut self, host: &mut H, now: u32);
}

/// Logical key as seen by [`UserHooks::process_record`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Keycode {
    Custom(CustomAction),
    Basic(KeyCode),
}

impl From<CustomAction> for Keycode {
    fn from(action: CustomAction) -> Self {
        Self::Custom(action)
    }
}

/// Key transition event
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyRecord {
    pub keycode: Keycode,
    pub pressed: bool,
    /// Event time in milliseconds
    pub time: u32,
}

/// Feature state for the whole lifetime of the firmware
pub struct Overlay<C: Canvas> {
    stopwatch: Stopwatch,
    layer: u8,
    display: Option<C>,
    font: Option<C::Font>,
}

impl<C: Canvas> Default for Overlay<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Canvas> Overlay<C> {
    pub fn new() -> Self {
        Self {
            stopwatch: Stopwatch::default(),
            layer: 0,
            display: None,
            font: None,
        }
    }

    /// Current contents of the status screen
    pub fn status(&self) -> Status {
        Status {
            elapsed: self.stopwatch.elapsed(),
            running: self.stopwatch.is_running(),
            layer: self.layer,
        }
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// Display handle, once acquired in [`UserHooks::post_init`]
    pub fn display(&self) -> Option<&C> {
        self.display.as_ref()
    }

    /// True if the display and its font are both available
    pub fn can_render(&self) -> bool {
        self.display.is_some() && self.font.is_some()
    }

    fn update_display(&mut self) {
        let status = self.status();
        if let (Some(canvas), Some(font)) = (self.display.as_mut(), self.font.as_ref()) {
            display::render(canvas, font, &status);
        }
    }

    fn cycle_layer<H: Host<Canvas = C>>(&mut self, host: &mut H) {
        self.layer = (self.layer + 1) % LAYER_CYCLE;
        info!("Layer {}", self.layer);
        host.layer_move(self.layer);
        self.update_display();
    }
}

impl<C: Canvas, H: Host<Canvas = C>> UserHooks<H> for Overlay<C> {
    fn post_init(&mut self, host: &mut H) {
        info!("teakey {} init", build_info::PKG_VERSION);

        let Some(mut canvas) = host.display(&PANEL) else {
            warn!("No display, status screen disabled");
            return;
        };
        canvas.init(&PANEL);
        self.font = canvas.load_font();
        self.display = Some(canvas);

        if self.font.is_none() {
            warn!("Font not loaded, status screen disabled");
            return;
        }
        self.update_display();
    }

    fn process_record(&mut self, host: &mut H, record: KeyRecord) -> bool {
        match record.keycode {
            Keycode::Custom(CustomAction::Timer) => {
                if record.pressed {
                    self.stopwatch.press(record.time);
                } else if self.stopwatch.release(record.time).is_some() {
                    self.update_display();
                }
                false
            },
            Keycode::Custom(CustomAction::LayerCycle) => {
                if record.pressed {
                    self.cycle_layer(host);
                }
                false
            },
            Keycode::Basic(_) => true,
        }
    }

    fn housekeeping(&mut self, _host: &mut H, now: u32) {
        if self.stopwatch.tick(now) {
            self.update_display();
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::vec::Vec;

    use super::*;
    use crate::display::mock::Recorder;

    /// Host with a recording canvas
    pub struct MockHost {
        pub canvas: Option<Recorder>,
        pub layers: Vec<u8>,
    }

    impl MockHost {
        pub fn new(canvas: Option<Recorder>) -> Self {
            Self { canvas, layers: Vec::new() }
        }
    }

    impl Host for MockHost {
        type Canvas = Recorder;

        fn display(&mut self, _panel: &PanelConfig) -> Option<Recorder> {
            self.canvas.take()
        }

        fn layer_move(&mut self, layer: u8) {
            self.layers.push(layer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockHost;
    use crate::display::mock::Recorder;
    use crate::stopwatch::States;

    fn record(keycode: impl Into<Keycode>, pressed: bool, time: u32) -> KeyRecord {
        KeyRecord { keycode: keycode.into(), pressed, time }
    }

    fn setup(canvas: Recorder) -> (Overlay<Recorder>, MockHost) {
        let mut host = MockHost::new(Some(canvas));
        let mut overlay = Overlay::new();
        overlay.post_init(&mut host);
        (overlay, host)
    }

    fn canvas(overlay: &Overlay<Recorder>) -> &Recorder {
        overlay.display().unwrap()
    }

    fn tap(overlay: &mut Overlay<Recorder>, host: &mut MockHost, key: CustomAction, at: u32, held: u32) {
        assert!(!overlay.process_record(host, record(key, true, at)));
        assert!(!overlay.process_record(host, record(key, false, at + held)));
    }

    #[test]
    fn post_init_draws_initial_screen() {
        let (overlay, _host) = setup(Recorder::default());
        let canvas = canvas(&overlay);
        assert_eq!(canvas.panel, Some(PANEL));
        assert_eq!(canvas.frames(), 1);
        assert_eq!(canvas.last_texts(), ["00:00:00", "Layer 0"]);
    }

    #[test]
    fn basic_keys_pass_through() {
        let (mut overlay, mut host) = setup(Recorder::default());
        assert!(overlay.process_record(&mut host, record(Keycode::Basic(KeyCode::Kb1), true, 10)));
        assert!(overlay.process_record(&mut host, record(Keycode::Basic(KeyCode::Kb1), false, 20)));
        assert_eq!(canvas(&overlay).frames(), 1);
        assert!(host.layers.is_empty());
    }

    #[test]
    fn timer_key_toggles_and_repaints() {
        let (mut overlay, mut host) = setup(Recorder::default());

        assert!(!overlay.process_record(&mut host, record(CustomAction::Timer, true, 1000)));
        // Press alone does not repaint
        assert_eq!(canvas(&overlay).frames(), 1);

        assert!(!overlay.process_record(&mut host, record(CustomAction::Timer, false, 1100)));
        assert!(overlay.status().running);
        assert_eq!(canvas(&overlay).frames(), 2);

        overlay.housekeeping(&mut host, 3100);
        assert_eq!(overlay.status().elapsed, 2000);
        assert_eq!(canvas(&overlay).frames(), 3);
        assert_eq!(canvas(&overlay).last_texts(), ["00:00:02", "Layer 0"]);
    }

    #[test]
    fn housekeeping_idle_while_paused() {
        let (mut overlay, mut host) = setup(Recorder::default());
        for t in [0, 100, 5000] {
            overlay.housekeeping(&mut host, t);
        }
        assert_eq!(canvas(&overlay).frames(), 1);

        tap(&mut overlay, &mut host, CustomAction::Timer, 0, 0);
        tap(&mut overlay, &mut host, CustomAction::Timer, 4000, 0);
        let frames = canvas(&overlay).frames();
        overlay.housekeeping(&mut host, 9000);
        overlay.housekeeping(&mut host, 9999);
        assert_eq!(overlay.status().elapsed, 4000);
        assert_eq!(canvas(&overlay).frames(), frames);
    }

    #[test]
    fn layer_cycle_wraps_after_five() {
        let (mut overlay, mut host) = setup(Recorder::default());
        for i in 0..5 {
            tap(&mut overlay, &mut host, CustomAction::LayerCycle, i * 100, 10);
        }
        assert_eq!(overlay.layer(), 0);
        assert_eq!(host.layers, [1, 2, 3, 4, 0]);
        // One repaint per press, none on release
        assert_eq!(canvas(&overlay).frames(), 1 + 5);

        for i in 0..4 {
            tap(&mut overlay, &mut host, CustomAction::LayerCycle, 1000 + i * 100, 10);
        }
        assert_eq!(canvas(&overlay).last_texts(), ["00:00:00", "Layer 4"]);
        tap(&mut overlay, &mut host, CustomAction::LayerCycle, 2000, 10);
        assert_eq!(overlay.layer(), 0);
        assert_eq!(host.layers.last(), Some(&0));
    }

    #[test]
    fn glyph_tracks_timer_state() {
        let (mut overlay, mut host) = setup(Recorder::default());
        tap(&mut overlay, &mut host, CustomAction::Timer, 0, 100);
        assert_eq!(canvas(&overlay).last_frame(), overlay.status().primitives().as_slice());
        assert!(canvas(&overlay).last_frame().iter().any(|p| matches!(p, display::Primitive::Rect { top: 11, .. })));

        tap(&mut overlay, &mut host, CustomAction::Timer, 1000, 100);
        assert!(!canvas(&overlay).last_frame().iter().any(|p| matches!(p, display::Primitive::Rect { top: 11, .. })));
    }

    #[test]
    fn timer_scenario() {
        let t0 = 50_000;
        let (mut overlay, mut host) = setup(Recorder::default());
        tap(&mut overlay, &mut host, CustomAction::Timer, t0 - 50, 50);
        overlay.housekeeping(&mut host, t0 + 65_000);
        assert_eq!(canvas(&overlay).last_texts()[0], "00:01:05");

        tap(&mut overlay, &mut host, CustomAction::Timer, t0 + 64_950, 50);
        assert_eq!(overlay.stopwatch().state(), &States::Paused);
        assert_eq!(overlay.status().elapsed, 65_000);

        tap(&mut overlay, &mut host, CustomAction::Timer, t0 + 69_950, 50);
        overlay.housekeeping(&mut host, t0 + 75_000);
        assert_eq!(overlay.status().elapsed, 70_000);

        tap(&mut overlay, &mut host, CustomAction::Timer, t0 + 79_000, 1000);
        assert_eq!(overlay.status(), Status { elapsed: 0, running: false, layer: 0 });
        assert_eq!(canvas(&overlay).last_texts()[0], "00:00:00");
    }

    #[test]
    fn taps_within_one_tick_repaint_each_release() {
        let t = 20_000;
        let (mut overlay, mut host) = setup(Recorder::default());

        for (i, running) in [true, false, true].into_iter().enumerate() {
            tap(&mut overlay, &mut host, CustomAction::Timer, t, 0);
            assert_eq!(overlay.status().running, running);
            assert_eq!(overlay.status().elapsed, 0);
            assert_eq!(canvas(&overlay).frames(), 2 + i);
        }
        assert_eq!(canvas(&overlay).last_texts(), ["00:00:00", "Layer 0"]);

        overlay.housekeeping(&mut host, t + 3000);
        assert_eq!(overlay.status().elapsed, 3000);
    }

    #[test]
    fn missing_font_disables_rendering() {
        let (mut overlay, mut host) = setup(Recorder::without_font());
        assert!(!overlay.can_render());

        tap(&mut overlay, &mut host, CustomAction::Timer, 0, 10);
        overlay.housekeeping(&mut host, 5000);
        tap(&mut overlay, &mut host, CustomAction::LayerCycle, 6000, 10);
        tap(&mut overlay, &mut host, CustomAction::Timer, 7000, 900);

        // State still advances, nothing is drawn
        assert_eq!(overlay.layer(), 1);
        assert_eq!(host.layers, [1]);
        assert_eq!(overlay.status().elapsed, 0);
        assert!(canvas(&overlay).calls.is_empty());
    }

    #[test]
    fn missing_display_disables_rendering() {
        let mut host = MockHost::new(None);
        let mut overlay: Overlay<Recorder> = Overlay::new();
        overlay.post_init(&mut host);
        assert!(!overlay.can_render());

        tap(&mut overlay, &mut host, CustomAction::Timer, 0, 10);
        overlay.housekeeping(&mut host, 1010);
        assert_eq!(overlay.status().elapsed, 1000);
    }

    #[test]
    fn hooks_before_init_do_not_draw() {
        let mut host = MockHost::new(Some(Recorder::default()));
        let mut overlay: Overlay<Recorder> = Overlay::new();
        tap(&mut overlay, &mut host, CustomAction::LayerCycle, 0, 10);
        assert!(overlay.display().is_none());

        overlay.post_init(&mut host);
        assert_eq!(canvas(&overlay).last_texts(), ["00:00:00", "Layer 1"]);
    }
}
