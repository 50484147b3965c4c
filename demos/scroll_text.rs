//! Scrolls `WS_FLOW_TEXT` across a 32x8 WS2812 matrix wired to GPIO 14.
//!
//! Build with `cargo build --release --features pico1 --target thumbv6m-none-eabi`.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Delay, Timer};
use panic_probe as _;
use ws_flow::ws2812_pio::Pio0Ws2812;
use ws_flow::{LedLayout, MatrixConfig, Milliamps, RGB_CONTROL_PIN, ScrollingTextDisplay, colors};

const MATRIX_LAYOUT: LedLayout<256, 32, 8> = LedLayout::serpentine_column_major();
const FRAME_MS: u64 = 50;
const TEXT: &str = env!("WS_FLOW_TEXT");

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());
    info!("scroll_text: matrix on GPIO {}", RGB_CONTROL_PIN);

    let strip = Pio0Ws2812::new(p.PIO0, p.PIN_14);
    let config = MatrixConfig {
        brightness: 40,
        max_current: Some(Milliamps(500)),
        ..MatrixConfig::default()
    };
    let Ok(mut display) = ScrollingTextDisplay::new(strip, Delay, MATRIX_LAYOUT, config) else {
        defmt::panic!("invalid matrix configuration");
    };

    display.boot_test(255, 0, 0, 300);
    display.boot_test(0, 255, 0, 300);
    display.boot_test(0, 0, 255, 300);
    display.set_colors(&[colors::CYAN, colors::MAGENTA, colors::YELLOW]);

    loop {
        display.text_flow(TEXT);
        Timer::after_millis(FRAME_MS).await;
    }
}
