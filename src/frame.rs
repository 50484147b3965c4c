//! Row-major pixel buffer for one matrix image. See [`Frame`].

use core::convert::Infallible;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};
use smart_leds::RGB8;

/// Convert RGB8 (smart-leds) to Rgb888 (embedded-graphics).
#[must_use]
pub const fn rgb8_to_rgb888(color: RGB8) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Convert Rgb888 (embedded-graphics) to RGB8 (smart-leds).
#[must_use]
pub fn rgb888_to_rgb8(color: Rgb888) -> RGB8 {
    RGB8::new(color.r(), color.g(), color.b())
}

/// A 2D array of RGB pixels representing a single display frame.
///
/// Stored in row-major order: `frame[row][col]` is the pixel at display coordinates
/// (col, row). The display converts it to strip order through its
/// [`LedLayout`](crate::LedLayout) before writing.
///
/// Frames are [`embedded-graphics`](https://docs.rs/embedded-graphics) draw targets; pixels
/// drawn outside the grid are clipped.
///
/// ```
/// use embedded_graphics::{prelude::*, primitives::{Line, PrimitiveStyle}};
/// use ws_flow::frame::{Frame, rgb8_to_rgb888};
/// use ws_flow::RGB8;
///
/// let mut frame = Frame::<8, 32>::new();
/// frame[0][0] = RGB8::new(255, 0, 0);
/// let color = rgb8_to_rgb888(RGB8::new(0, 0, 255));
/// Line::new(Point::new(0, 7), Point::new(31, 7))
///     .into_styled(PrimitiveStyle::with_stroke(color, 1))
///     .draw(&mut frame)
///     .unwrap();
/// assert_eq!(frame[7][31], RGB8::new(0, 0, 255));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const ROWS: usize, const COLS: usize>(pub [[RGB8; COLS]; ROWS]);

impl<const ROWS: usize, const COLS: usize> Frame<ROWS, COLS> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); COLS]; ROWS])
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: RGB8) {
        for row in &mut self.0 {
            row.fill(color);
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.fill(RGB8::default());
    }

    /// True when no pixel is lit.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.0
            .iter()
            .flatten()
            .all(|pixel| *pixel == RGB8::default())
    }
}

impl<const ROWS: usize, const COLS: usize> core::ops::Deref for Frame<ROWS, COLS> {
    type Target = [[RGB8; COLS]; ROWS];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const ROWS: usize, const COLS: usize> core::ops::DerefMut for Frame<ROWS, COLS> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Frame<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> OriginDimensions for Frame<ROWS, COLS> {
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const ROWS: usize, const COLS: usize> DrawTarget for Frame<ROWS, COLS> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(column_index), Ok(row_index)) =
                (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if let Some(pixel) = self
                .0
                .get_mut(row_index)
                .and_then(|row| row.get_mut(column_index))
            {
                *pixel = rgb888_to_rgb8(color);
            }
        }
        Ok(())
    }
}
