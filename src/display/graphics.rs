//! [`Canvas`] implementation on top of `embedded-graphics`
//!
//! The board driver supplies a monochrome `DrawTarget` that also knows how to
//! rotate, dim and flush the panel.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use rgb::RGB8;

use crate::config::{PanelConfig, Rotation};
use super::Canvas;

/// Panel controls that `DrawTarget` does not cover
pub trait Panel {
    fn set_rotation(&mut self, rotation: Rotation);
    fn set_brightness(&mut self, brightness: u8);
    /// Send the frame buffer to the panel
    fn flush(&mut self);
}

/// [`Canvas`] drawing with `embedded-graphics` on a monochrome target
pub struct GraphicsCanvas<D> {
    target: D,
    font: Option<&'static MonoFont<'static>>,
}

impl<D> GraphicsCanvas<D> {
    /// Wrap a draw target; `font` is `None` if the board has no font to offer
    pub fn new(target: D, font: Option<&'static MonoFont<'static>>) -> Self {
        Self { target, font }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }
}

fn point(x: u16, y: u16) -> Point {
    Point::new(x.into(), y.into())
}

/// Any lit channel turns the pixel on
fn binary(color: RGB8) -> BinaryColor {
    BinaryColor::from(color.r | color.g | color.b != 0)
}

fn style(color: RGB8, filled: bool) -> PrimitiveStyle<BinaryColor> {
    if filled {
        PrimitiveStyle::with_fill(binary(color))
    } else {
        PrimitiveStyle::with_stroke(binary(color), 1)
    }
}

fn check<T, E>(result: Result<T, E>, what: &str) {
    if result.is_err() {
        warn!("Drawing {} failed", what);
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = BinaryColor> + Panel,
{
    type Font = &'static MonoFont<'static>;

    fn init(&mut self, panel: &PanelConfig) {
        self.target.set_rotation(panel.rotation);
        self.target.set_brightness(panel.brightness);
    }

    fn load_font(&mut self) -> Option<Self::Font> {
        self.font
    }

    fn clear(&mut self) {
        check(self.target.clear(BinaryColor::Off), "clear");
    }

    fn text(&mut self, x: u16, y: u16, font: &Self::Font, text: &str) {
        let style = MonoTextStyle::new(*font, BinaryColor::On);
        let text = Text::with_baseline(text, point(x, y), style, Baseline::Top);
        check(text.draw(&mut self.target), "text");
    }

    fn circle(&mut self, x: u16, y: u16, radius: u16, color: RGB8, filled: bool) {
        let diameter = 2 * u32::from(radius) + 1;
        let circle = Circle::with_center(point(x, y), diameter)
            .into_styled(style(color, filled));
        check(circle.draw(&mut self.target), "circle");
    }

    fn rect(&mut self, left: u16, top: u16, right: u16, bottom: u16, color: RGB8, filled: bool) {
        let rect = Rectangle::with_corners(point(left, top), point(right, bottom))
            .into_styled(style(color, filled));
        check(rect.draw(&mut self.target), "rect");
    }

    fn line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: RGB8) {
        let line = Line::new(point(x0, y0), point(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(binary(color), 1));
        check(line.draw(&mut self.target), "line");
    }

    fn flush(&mut self) {
        self.target.flush();
    }
}
