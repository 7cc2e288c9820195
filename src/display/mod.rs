//! OLED status screen
//!
//! Rendering is split in two: [`status`] computes the list of [`Primitive`]s
//! for the current state and a [`Canvas`] paints them. The host provides the
//! canvas, either its own or [`graphics::GraphicsCanvas`] over any
//! `embedded-graphics` target.

pub mod graphics;
pub mod status;

use heapless::String;
use rgb::RGB8;

use crate::config::PanelConfig;

pub use status::Status;

/// Stroke color of a monochrome panel
pub const WHITE: RGB8 = RGB8::new(255, 255, 255);

/// Text storage used by [`Primitive::Text`]
pub type Label = String<10>;

/// Single drawing operation on the panel
///
/// Coordinates are pixels relative to the top-left corner. Rectangle and
/// line end points are inclusive.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Primitive {
    /// Blank the whole canvas
    Clear,
    /// Text with its top-left corner at (x, y)
    Text { x: u16, y: u16, text: Label },
    /// Circle outline or disc centered at (x, y)
    Circle { x: u16, y: u16, radius: u16, color: RGB8, filled: bool },
    Rect { left: u16, top: u16, right: u16, bottom: u16, color: RGB8, filled: bool },
    Line { x0: u16, y0: u16, x1: u16, y1: u16, color: RGB8 },
    /// Push the frame to the panel
    Flush,
}

/// Drawing API of the host display driver
pub trait Canvas {
    /// Loaded font handle
    type Font;

    /// Configure the panel: orientation, brightness
    fn init(&mut self, panel: &PanelConfig);

    /// Acquire the status screen font, `None` if it cannot be loaded
    fn load_font(&mut self) -> Option<Self::Font>;

    fn clear(&mut self);
    fn text(&mut self, x: u16, y: u16, font: &Self::Font, text: &str);
    fn circle(&mut self, x: u16, y: u16, radius: u16, color: RGB8, filled: bool);
    fn rect(&mut self, left: u16, top: u16, right: u16, bottom: u16, color: RGB8, filled: bool);
    fn line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: RGB8);
    fn flush(&mut self);

    /// Execute a single primitive
    fn draw(&mut self, font: &Self::Font, primitive: &Primitive) {
        match primitive {
            Primitive::Clear => self.clear(),
            Primitive::Text { x, y, text } => self.text(*x, *y, font, text),
            Primitive::Circle { x, y, radius, color, filled } =>
                self.circle(*x, *y, *radius, *color, *filled),
            Primitive::Rect { left, top, right, bottom, color, filled } =>
                self.rect(*left, *top, *right, *bottom, *color, *filled),
            Primitive::Line { x0, y0, x1, y1, color } =>
                self.line(*x0, *y0, *x1, *y1, *color),
            Primitive::Flush => self.flush(),
        }
    }
}

/// Fully repaint the status screen
pub fn render<C: Canvas>(canvas: &mut C, font: &C::Font, status: &Status) {
    for primitive in status.primitives().iter() {
        canvas.draw(font, primitive);
    }
}
