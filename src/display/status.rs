//! Contents and layout of the status screen

use heapless::Vec;
use static_assertions as sa;

use crate::config::PANEL;
use crate::stopwatch::Clock;
use super::{Label, Primitive, WHITE};

/// Upper bound on primitives in one frame
pub const MAX_PRIMITIVES: usize = 16;

pub type Primitives = Vec<Primitive, MAX_PRIMITIVES>;

/// Top-left corner of the elapsed time text
pub const TIMER_TEXT: (u16, u16) = (5, 5);
/// Center of the ring around the play/pause glyph
pub const TIMER_RING: (u16, u16) = (113, 16);
/// Top-left corner of the layer text
pub const LAYER_TEXT: (u16, u16) = (5, 40);
/// Center of the ring around the layers glyph
pub const LAYER_RING: (u16, u16) = (113, 50);
/// Both rings are 27 px wide
pub const RING_RADIUS: u16 = 13;

const fn ring_fits(center: (u16, u16)) -> bool {
    center.0 >= RING_RADIUS
        && center.1 >= RING_RADIUS
        && center.0 + RING_RADIUS < PANEL.width
        && center.1 + RING_RADIUS < PANEL.height
}

sa::const_assert!(ring_fits(TIMER_RING));
sa::const_assert!(ring_fits(LAYER_RING));
sa::const_assert!(TIMER_TEXT.0 < PANEL.width && TIMER_TEXT.1 < PANEL.height);
sa::const_assert!(LAYER_TEXT.0 < PANEL.width && LAYER_TEXT.1 < PANEL.height);

/// Everything the status screen shows
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Status {
    /// Stopwatch value in milliseconds
    pub elapsed: u32,
    pub running: bool,
    /// Active layer index
    pub layer: u8,
}

impl Status {
    /// Drawing operations for one full frame, ending with a flush
    pub fn primitives(&self) -> Primitives {
        let mut out = Primitives::new();
        let mut push = |p: Primitive| {
            if out.push(p).is_err() {
                warn!("Status frame exceeds {} primitives", MAX_PRIMITIVES);
            }
        };

        push(Primitive::Clear);

        let (x, y) = TIMER_TEXT;
        push(Primitive::Text { x, y, text: self.clock_label() });
        push(ring(TIMER_RING));
        // The glyph shows what a tap would do: pause while running
        if self.running {
            pause_glyph(TIMER_RING).into_iter().for_each(&mut push);
        } else {
            play_glyph(TIMER_RING).into_iter().for_each(&mut push);
        }

        let (x, y) = LAYER_TEXT;
        push(Primitive::Text { x, y, text: self.layer_label() });
        push(ring(LAYER_RING));
        layers_glyph(LAYER_RING).into_iter().for_each(&mut push);

        push(Primitive::Flush);
        out
    }

    /// `HH:MM:SS`
    pub fn clock_label(&self) -> Label {
        let mut label = Label::new();
        // Always 8 characters, fits
        ufmt::uwrite!(label, "{}", Clock::from_millis(self.elapsed)).ok();
        label
    }

    /// `Layer N`
    pub fn layer_label(&self) -> Label {
        let mut label = Label::new();
        ufmt::uwrite!(label, "Layer {}", self.layer).ok();
        label
    }
}

fn ring((x, y): (u16, u16)) -> Primitive {
    Primitive::Circle { x, y, radius: RING_RADIUS, color: WHITE, filled: false }
}

fn bar(left: u16, top: u16, right: u16, bottom: u16) -> Primitive {
    Primitive::Rect { left, top, right, bottom, color: WHITE, filled: true }
}

fn line(x0: u16, y0: u16, x1: u16, y1: u16) -> Primitive {
    Primitive::Line { x0, y0, x1, y1, color: WHITE }
}

/// Two vertical bars
fn pause_glyph((x, y): (u16, u16)) -> [Primitive; 2] {
    [
        bar(x - 4, y - 5, x - 2, y + 5),
        bar(x + 2, y - 5, x + 4, y + 5),
    ]
}

/// Right-pointing triangle outline
fn play_glyph((x, y): (u16, u16)) -> [Primitive; 3] {
    [
        line(x - 3, y - 5, x - 3, y + 5),
        line(x - 3, y - 5, x + 5, y),
        line(x - 3, y + 5, x + 5, y),
    ]
}

/// Three stacked bars narrowing downwards
fn layers_glyph((x, y): (u16, u16)) -> [Primitive; 3] {
    [
        bar(x - 5, y - 5, x + 5, y - 3),
        bar(x - 3, y - 2, x + 3, y),
        bar(x - 1, y + 2, x + 1, y + 4),
    ]
}
