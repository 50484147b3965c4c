//! A device abstraction that scrolls one line of text across a WS2812-style LED matrix.
//!
//! See [`ScrollingTextDisplay`] for the usage example.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::brightness::{self, Milliamps};
use crate::font::{GlyphMetrics, GlyphSpacing, MatrixFont};
use crate::frame::{Frame, rgb8_to_rgb888};
use crate::led_layout::LedLayout;
use crate::{Error, Result};

/// Longest text kept, in bytes. Longer text is cut at the last whole character.
pub const MAX_TEXT_LEN: usize = 256;

/// Most colors [`ScrollingTextDisplay::set_colors`] cycles through.
pub const MAX_TEXT_COLORS: usize = 8;

/// Appearance and pacing of a [`ScrollingTextDisplay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Global brightness, 0-255.
    pub brightness: u8,
    /// Optional supply budget; caps brightness further so a full-white frame stays within it.
    pub max_current: Option<Milliamps>,
    /// Pixels the text moves left per [`text_flow`](ScrollingTextDisplay::text_flow) call.
    pub scroll_step: u16,
    /// Built-in font; see [`ScrollingTextDisplay::set_mono_font`] for other fonts.
    pub font: MatrixFont,
    /// Proportional or monospace packing of the glyphs.
    pub spacing: GlyphSpacing,
    /// Text color; see [`ScrollingTextDisplay::set_colors`] for multicolor text.
    pub color: RGB8,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            brightness: 40,
            max_current: None,
            scroll_step: 1,
            font: MatrixFont::default(),
            spacing: GlyphSpacing::default(),
            color: smart_leds::colors::WHITE,
        }
    }
}

/// Text and scroll position of a display.
///
/// Between calls the offset lies in `(-text_pixel_width, matrix_width]`: it starts at the
/// matrix width (text just off the right edge) and wraps back there once the text has left
/// the left edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    current_text: String<MAX_TEXT_LEN>,
    scroll_offset: i32,
    text_pixel_width: i32,
    is_running: bool,
}

impl DisplayState {
    #[must_use]
    pub fn text(&self) -> &str {
        self.current_text.as_str()
    }

    /// Column where the text's left edge is drawn next.
    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    #[must_use]
    pub const fn text_pixel_width(&self) -> i32 {
        self.text_pixel_width
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }
}

/// Scrolls text right to left across an LED matrix, one step per call.
///
/// The display owns a [`SmartLedsWrite`] writer (the LED driver) and a blocking
/// [`DelayNs`] used by [`boot_test`](Self::boot_test). Matrix geometry comes from the
/// [`LedLayout`]: `N` LEDs wired as `COLS` × `ROWS`.
///
/// # Example
///
/// ```
/// use core::convert::Infallible;
/// use embedded_hal::delay::DelayNs;
/// use smart_leds::{RGB8, SmartLedsWrite};
/// use ws_flow::{LedLayout, MatrixConfig, ScrollingTextDisplay};
///
/// struct Strip;
/// impl SmartLedsWrite for Strip {
///     type Error = Infallible;
///     type Color = RGB8;
///     fn write<T, I>(&mut self, _pixels: T) -> Result<(), Infallible>
///     where
///         T: IntoIterator<Item = I>,
///         I: Into<RGB8>,
///     {
///         Ok(())
///     }
/// }
///
/// struct NoDelay;
/// impl DelayNs for NoDelay {
///     fn delay_ns(&mut self, _ns: u32) {}
/// }
///
/// const LAYOUT: LedLayout<256, 32, 8> = LedLayout::serpentine_column_major();
///
/// let mut display = ScrollingTextDisplay::new(Strip, NoDelay, LAYOUT, MatrixConfig::default())?;
/// display.boot_test(255, 0, 0, 500);
/// for _ in 0..3 {
///     display.text_flow("HELLO");
/// }
/// assert_eq!(display.state().scroll_offset(), 32 - 3);
/// # Ok::<(), ws_flow::Error>(())
/// ```
pub struct ScrollingTextDisplay<W, D, const N: usize, const COLS: usize, const ROWS: usize> {
    writer: W,
    delay: D,
    mapping: [u16; N],
    font: MonoFont<'static>,
    metrics: GlyphMetrics,
    colors: Vec<RGB8, MAX_TEXT_COLORS>,
    brightness: u8,
    scroll_step: i32,
    state: DisplayState,
    frame: Frame<ROWS, COLS>,
}

impl<W, D, const N: usize, const COLS: usize, const ROWS: usize>
    ScrollingTextDisplay<W, D, N, COLS, ROWS>
where
    W: SmartLedsWrite<Color = RGB8>,
    D: DelayNs,
{
    const MATRIX_WIDTH: i32 = COLS as i32;
    const MATRIX_HEIGHT: i32 = ROWS as i32;

    /// Set up the matrix and clear it.
    ///
    /// The text starts empty with the offset at the right edge.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidScrollStep`] if `config.scroll_step` is zero.
    pub fn new(
        writer: W,
        delay: D,
        layout: LedLayout<N, COLS, ROWS>,
        config: MatrixConfig,
    ) -> Result<Self> {
        if config.scroll_step == 0 {
            return Err(Error::InvalidScrollStep);
        }

        let mut colors = Vec::new();
        // Capacity is at least one.
        let _ = colors.push(config.color);

        let mut display = Self {
            writer,
            delay,
            mapping: layout.mapping_by_xy(),
            font: config.font.to_font(),
            metrics: GlyphMetrics::for_font(config.font, config.spacing),
            colors,
            brightness: effective_brightness(config.brightness, config.max_current, N),
            scroll_step: i32::from(config.scroll_step),
            state: DisplayState {
                current_text: String::new(),
                scroll_offset: Self::MATRIX_WIDTH,
                text_pixel_width: 0,
                is_running: true,
            },
            frame: Frame::new(),
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ScrollingTextDisplay::new: {}x{} matrix, brightness {}",
            COLS,
            ROWS,
            display.brightness
        );
        display.show();
        Ok(display)
    }

    /// Pixel width of one character in the active font, gap included.
    #[must_use]
    pub fn char_width(&self, c: char) -> i32 {
        self.metrics.char_width(c)
    }

    /// Pixel width of `text`: the sum of [`char_width`](Self::char_width) over its characters.
    #[must_use]
    pub fn string_width(&self, text: &str) -> i32 {
        self.metrics.string_width(text)
    }

    /// Draw one animation frame of `text` and move it one step left.
    ///
    /// New text (anything different from the current text) restarts from the right edge.
    /// Once the text has completely left the matrix it wraps back to the right edge.
    /// While [paused](Self::pause) the frame is redrawn without moving.
    pub fn text_flow(&mut self, text: &str) {
        let text = fit_to_capacity(text);
        if text != self.state.current_text {
            self.replace_text(text);
        }

        render_text_to_frame(
            &mut self.frame,
            &self.font,
            &self.metrics,
            self.state.current_text.as_str(),
            &self.colors,
            self.state.scroll_offset,
            (Self::MATRIX_HEIGHT - self.metrics.cell_height()) / 2,
        );
        #[cfg(feature = "defmt")]
        defmt::trace!("text_flow: frame at offset {}", self.state.scroll_offset);
        self.show();

        if self.state.is_running {
            self.advance();
        }
    }

    /// Put the text just off the right edge so the next [`text_flow`](Self::text_flow)
    /// starts it from there. The text itself is kept.
    pub fn reset_scroll(&mut self) {
        self.state.scroll_offset = Self::MATRIX_WIDTH;
    }

    /// Light every pixel with one color for `duration_ms`, then turn every pixel off.
    ///
    /// Blocks for the whole duration. The scroll state is left alone; the next
    /// [`text_flow`](Self::text_flow) redraws the text where it was.
    pub fn boot_test(&mut self, r: u8, g: u8, b: u8, duration_ms: u16) {
        #[cfg(feature = "defmt")]
        defmt::info!("boot_test: rgb({}, {}, {}) for {} ms", r, g, b, duration_ms);
        self.frame.fill(RGB8::new(r, g, b));
        self.show();
        self.delay.delay_ms(u32::from(duration_ms));
        self.frame.clear();
        self.show();
    }

    /// Stop advancing. [`text_flow`](Self::text_flow) still redraws and accepts new text.
    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    pub fn resume(&mut self) {
        self.state.is_running = true;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Colors cycled glyph by glyph. An empty slice draws white; extra colors are ignored.
    pub fn set_colors(&mut self, colors: &[RGB8]) {
        self.colors.clear();
        for color in colors.iter().take(MAX_TEXT_COLORS) {
            let _ = self.colors.push(*color);
        }
    }

    /// Change the global brightness; the current budget, if any, still applies.
    pub fn set_brightness(&mut self, brightness: u8, max_current: Option<Milliamps>) {
        self.brightness = effective_brightness(brightness, max_current, N);
    }

    /// Switch to a built-in font. The text restarts from the right edge.
    pub fn set_font(&mut self, font: MatrixFont, spacing: GlyphSpacing) {
        self.font = font.to_font();
        self.metrics = GlyphMetrics::for_font(font, spacing);
        self.remeasure();
    }

    /// Switch to any `embedded-graphics` monospaced font. The text restarts from the right edge.
    pub fn set_mono_font(&mut self, font: MonoFont<'static>, spacing: GlyphSpacing) {
        self.metrics = GlyphMetrics::new(&font, spacing, 0);
        self.font = font;
        self.remeasure();
    }

    /// Push the last drawn frame again.
    ///
    /// # Errors
    ///
    /// [`Error::PixelWrite`] if the LED writer fails.
    pub fn refresh(&mut self) -> Result<()> {
        self.write_frame()
    }

    #[must_use]
    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    /// The last drawn image, before brightness scaling and LED reordering.
    #[must_use]
    pub const fn frame(&self) -> &Frame<ROWS, COLS> {
        &self.frame
    }

    /// Calls to [`text_flow`](Self::text_flow) for the current text to make one full pass.
    #[must_use]
    pub fn period(&self) -> u32 {
        let distance = Self::MATRIX_WIDTH.saturating_add(self.state.text_pixel_width);
        let steps = distance.saturating_add(self.scroll_step - 1) / self.scroll_step;
        u32::try_from(steps).unwrap_or(0)
    }

    /// Give back the writer and delay.
    pub fn release(self) -> (W, D) {
        (self.writer, self.delay)
    }

    fn replace_text(&mut self, text: String<MAX_TEXT_LEN>) {
        self.state.current_text = text;
        #[cfg(feature = "defmt")]
        defmt::debug!("text_flow: new text {=str}", self.state.current_text.as_str());
        self.remeasure();
    }

    fn remeasure(&mut self) {
        self.state.text_pixel_width = self.metrics.string_width(self.state.current_text.as_str());
        self.reset_scroll();
    }

    fn advance(&mut self) {
        let state = &mut self.state;
        state.scroll_offset = state.scroll_offset.saturating_sub(self.scroll_step);
        if state.scroll_offset <= -state.text_pixel_width {
            #[cfg(feature = "defmt")]
            defmt::debug!("text_flow: wrapped after {} px", state.text_pixel_width);
            state.scroll_offset = Self::MATRIX_WIDTH;
        }
    }

    fn show(&mut self) {
        if let Err(err) = self.write_frame() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ScrollingTextDisplay: {}", err);
            #[cfg(not(feature = "defmt"))]
            let _ = err;
        }
    }

    fn write_frame(&mut self) -> Result<()> {
        let mut pixels = [RGB8::default(); N];
        for (color, led_index) in self.frame.iter().flatten().zip(self.mapping) {
            if let Some(pixel) = pixels.get_mut(usize::from(led_index)) {
                *pixel = *color;
            }
        }
        brightness::apply_brightness(&mut pixels, self.brightness);
        self.writer
            .write(pixels.iter().copied())
            .map_err(|_| Error::PixelWrite)
    }
}

/// Render one line of text into `frame` with its left edge at column `offset`.
///
/// `top` is the row of the glyph cell's top edge. Glyphs are packed by `metrics`; colors
/// cycle per character and default to white. Anything outside the frame is clipped.
pub fn render_text_to_frame<const ROWS: usize, const COLS: usize>(
    frame: &mut Frame<ROWS, COLS>,
    font: &MonoFont<'_>,
    metrics: &GlyphMetrics,
    text: &str,
    colors: &[RGB8],
    offset: i32,
    top: i32,
) {
    let width_limit = COLS as i32;
    frame.clear();

    let mut pen = offset;
    for (index, ch) in text.chars().enumerate() {
        if pen >= width_limit {
            break;
        }
        let advance = metrics.char_width(ch);
        if pen.saturating_add(advance) <= 0 || ch.is_whitespace() {
            pen = pen.saturating_add(advance);
            continue;
        }

        let color = match colors.len() {
            0 => smart_leds::colors::WHITE,
            len => colors.get(index % len).copied().unwrap_or(smart_leds::colors::WHITE),
        };
        let mut buf = [0u8; 4];
        let style = MonoTextStyle::new(font, rgb8_to_rgb888(color));
        let position = Point::new(pen - metrics.draw_offset(ch), top);
        if let Err(never) =
            Text::with_baseline(ch.encode_utf8(&mut buf), position, style, Baseline::Top)
                .draw(frame)
        {
            match never {}
        }

        pen = pen.saturating_add(advance);
    }
}

fn effective_brightness(brightness: u8, max_current: Option<Milliamps>, len: usize) -> u8 {
    max_current.map_or(brightness, |budget| {
        brightness.min(brightness::max_brightness(len, budget.as_u32()))
    })
}

/// Longest whole-character prefix of `text` that fits the text buffer.
fn fit_to_capacity(text: &str) -> String<MAX_TEXT_LEN> {
    let mut fitted = String::new();
    for c in text.chars() {
        if fitted.push(c).is_err() {
            break;
        }
    }
    fitted
}
