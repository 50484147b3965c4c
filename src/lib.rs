//! Scrolling text on a WS2812-style LED matrix.
//!
//! See [`ScrollingTextDisplay`] for the main usage example.
#![no_std]

pub mod brightness;
pub mod display;
mod error;
pub mod font;
pub mod frame;
pub mod led_layout;
#[cfg(feature = "pico1")]
pub mod ws2812_pio;

// Re-export commonly used items
pub use brightness::Milliamps;
pub use display::{DisplayState, MatrixConfig, ScrollingTextDisplay};
pub use error::{Error, Result};
pub use font::{GlyphMetrics, GlyphSpacing, MatrixFont};
pub use frame::Frame;
pub use led_layout::LedLayout;
/// RGB color constants.
pub use smart_leds::colors;
pub use smart_leds::RGB8;

/// GPIO number of the LED matrix data line on the reference board.
pub const RGB_CONTROL_PIN: u8 = 14;
