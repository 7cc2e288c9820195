use smlang::statemachine;

/// Stopwatch driven by presses of a single key
pub type Stopwatch = StateMachine<Context>;

/// Holding the key longer than this (in milliseconds) resets the stopwatch
pub const HOLD_THRESHOLD: u32 = 500;

statemachine! {
    transitions: {
        // Short press toggles, resuming from the frozen value
        *Reset + Toggle / resume = Running,
        Paused + Toggle / resume = Running,
        Running + Toggle / pause = Paused,

        // Long press always resets
        Reset + Hold / reset = Reset,
        Paused + Hold / reset = Reset,
        Running + Hold / reset = Reset,

        Running + Refresh / refresh = Running,
    }
}

/// How the key was used, classified on release
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Released within [`HOLD_THRESHOLD`]
    Tap,
    /// Held longer than [`HOLD_THRESHOLD`]
    Hold,
}

impl Gesture {
    pub fn classify(held: u32) -> Self {
        if held > HOLD_THRESHOLD {
            Self::Hold
        } else {
            Self::Tap
        }
    }
}

/// Stopwatch timing state
///
/// All timestamps are milliseconds of a monotonic host clock. Differences use
/// wrapping arithmetic so the clock may roll over.
pub struct Context {
    now: u32,
    start: u32,
    elapsed: u32,
    pressed_at: Option<u32>,
}

impl StateMachineContext for Context {
    fn resume(&mut self) {
        self.start = self.now.wrapping_sub(self.elapsed);
    }

    fn pause(&mut self) {
        self.elapsed = self.now.wrapping_sub(self.start);
    }

    fn reset(&mut self) {
        self.elapsed = 0;
    }

    fn refresh(&mut self) {
        self.elapsed = self.now.wrapping_sub(self.start);
    }
}

impl Default for StateMachine<Context> {
    fn default() -> Self {
        Self::new(Context {
            now: 0,
            start: 0,
            elapsed: 0,
            pressed_at: None,
        })
    }
}

impl StateMachine<Context> {
    /// Key went down; only remembers the time
    pub fn press(&mut self, now: u32) {
        self.context.pressed_at = Some(now);
    }

    /// Key went up; returns the gesture if there was a matching press
    pub fn release(&mut self, now: u32) -> Option<Gesture> {
        let Some(pressed_at) = self.context.pressed_at.take() else {
            warn!("Stopwatch release without press at {}", now);
            return None;
        };
        let gesture = Gesture::classify(now.wrapping_sub(pressed_at));
        self.context.now = now;
        let event = match gesture {
            Gesture::Tap => Events::Toggle,
            Gesture::Hold => Events::Hold,
        };
        self.process_event(event).ok();
        info!("Stopwatch {} at {} ms", self.phase_name(), self.context.elapsed);
        Some(gesture)
    }

    /// Advance time; returns true if the elapsed value was recomputed
    ///
    /// Only a running stopwatch reacts. Correctness depends on `now` only, not
    /// on how often this is called.
    pub fn tick(&mut self, now: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.context.now = now;
        self.process_event(Events::Refresh).is_ok()
    }

    pub fn is_running(&self) -> bool {
        *self.state() == States::Running
    }

    /// Elapsed milliseconds as of the last transition or tick
    pub fn elapsed(&self) -> u32 {
        self.context.elapsed
    }

    /// Elapsed time split for display
    pub fn clock(&self) -> Clock {
        Clock::from_millis(self.context.elapsed)
    }

    fn phase_name(&self) -> &'static str {
        match *self.state() {
            States::Reset => "reset",
            States::Paused => "paused",
            States::Running => "running",
        }
    }
}

/// Elapsed time as shown on the display: `HH:MM:SS`
///
/// Hours wrap at 100 to keep the width fixed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Clock {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Clock {
    pub const fn from_millis(ms: u32) -> Self {
        Self {
            hours: ((ms / 3_600_000) % 100) as u8,
            minutes: ((ms / 60_000) % 60) as u8,
            seconds: ((ms / 1_000) % 60) as u8,
        }
    }
}

fn two_digits<W: ufmt::uWrite + ?Sized>(f: &mut ufmt::Formatter<'_, W>, value: u8) -> Result<(), W::Error> {
    f.write_char(char::from(b'0' + value / 10))?;
    f.write_char(char::from(b'0' + value % 10))
}

impl ufmt::uDisplay for Clock {
    fn fmt<W: ufmt::uWrite + ?Sized>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error> {
        two_digits(f, self.hours)?;
        f.write_char(':')?;
        two_digits(f, self.minutes)?;
        f.write_char(':')?;
        two_digits(f, self.seconds)
    }
}

impl core::fmt::Display for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
