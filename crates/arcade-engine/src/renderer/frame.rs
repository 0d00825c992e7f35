//! 128×64 one-bit frame buffer.
//!
//! Pixels are packed in SSD1306 page order: eight horizontal pages of
//! 128 column bytes, bit 0 being the top row of the page. Drawing goes
//! through `embedded-graphics`, so any of its primitives can also be drawn
//! straight onto the buffer.

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;
pub const FRAME_BYTES: usize = (SCREEN_WIDTH * SCREEN_HEIGHT / 8) as usize;

/// Glyph cell of the built-in font.
pub const CHAR_WIDTH: i32 = 5;
pub const CHAR_HEIGHT: i32 = 8;

#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; FRAME_BYTES],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }

    /// Blank the whole frame.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Packed pixel data, ready to be shipped to the panel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let page = (y / 8) as usize;
        Some((page * SCREEN_WIDTH as usize + x as usize, 1 << (y % 8)))
    }

    /// Set or clear one pixel. Off-screen coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((i, bit)) = Self::index(x, y) {
            if on {
                self.bytes[i] |= bit;
            } else {
                self.bytes[i] &= !bit;
            }
        }
    }

    /// Read one pixel. Off-screen reads are dark.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(i, bit)| self.bytes[i] & bit != 0)
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Whether any pixel inside the rectangle is lit.
    pub fn any_lit_in(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        (y..y + h).any(|py| (x..x + w).any(|px| self.pixel(px, py)))
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Rectangle::new(
            Point::new(x, y),
            Size::new(w as u32, h as u32),
        ))
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if let Some(r) = Self::rect(x, y, w, h) {
            let _ = r
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(self);
        }
    }

    /// Blank a rectangle (used by overlays drawn over a game frame).
    pub fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if let Some(r) = Self::rect(x, y, w, h) {
            let _ = r
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(self);
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if let Some(r) = Self::rect(x, y, w, h) {
            let _ = r
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(self);
        }
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self);
    }

    /// Outlined circle around `(cx, cy)`.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32) {
        if radius < 0 {
            return;
        }
        let _ = Circle::with_center(Point::new(cx, cy), (radius * 2 + 1) as u32)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self);
    }

    /// Text with its top-left corner at `(x, y)`.
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        self.text_colored(x, y, text, BinaryColor::On);
    }

    /// Dark text, for use on top of a filled highlight bar.
    pub fn text_inverted(&mut self, x: i32, y: i32, text: &str) {
        self.text_colored(x, y, text, BinaryColor::Off);
    }

    fn text_colored(&mut self, x: i32, y: i32, text: &str, color: BinaryColor) {
        let style = MonoTextStyle::new(&FONT_5X8, color);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    /// Pixel width of `text` in the built-in font.
    pub fn text_width(text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.lit_count())
            .finish()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
