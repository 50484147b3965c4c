//! Brightness scaling and current budgeting for WS2812-style pixels.

use smart_leds::RGB8;

/// Worst-case draw of one WS2812 pixel at full white.
const MILLIAMPS_PER_LED: u32 = 60;

/// Current budget for LED strips, specified in milliamps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Milliamps(pub u16);

impl Milliamps {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }
}

/// Computes a max brightness value given a current budget (mA) and strip length.
///
/// ```
/// use ws_flow::brightness::max_brightness;
///
/// // 256 pixels on a 500 mA supply may not go past 8/255.
/// assert_eq!(max_brightness(256, 500), 8);
/// assert_eq!(max_brightness(4, 1000), 255);
/// ```
#[must_use]
pub const fn max_brightness(len: usize, max_current_ma: u32) -> u8 {
    let worst_case_ma = (len as u32).saturating_mul(MILLIAMPS_PER_LED);
    if worst_case_ma == 0 {
        return u8::MAX;
    }
    let scaled = max_current_ma.saturating_mul(255) / worst_case_ma;
    if scaled > 255 { 255 } else { scaled as u8 }
}

#[inline]
#[must_use]
pub const fn scale_brightness(value: u8, brightness: u8) -> u8 {
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Scale one color channel-wise.
#[must_use]
pub const fn scale_color(color: RGB8, brightness: u8) -> RGB8 {
    RGB8::new(
        scale_brightness(color.r, brightness),
        scale_brightness(color.g, brightness),
        scale_brightness(color.b, brightness),
    )
}

/// Applies a brightness cap to an entire frame in place.
pub fn apply_brightness(pixels: &mut [RGB8], brightness: u8) {
    if brightness == u8::MAX {
        return;
    }
    for color in pixels.iter_mut() {
        *color = scale_color(*color, brightness);
    }
}
