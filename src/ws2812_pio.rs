//! Blocking WS2812 output on an RP2040 PIO state machine.
//!
//! [`PioWs2812`] implements [`SmartLedsWrite`], so it plugs straight into
//! [`ScrollingTextDisplay`](crate::ScrollingTextDisplay).

use core::convert::Infallible;
use core::marker::PhantomData;

use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::program::{Assembler, JmpCondition, OutDestination, SetDestination, SideSet};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::pio_programs::ws2812::{Grb, RgbColorOrder};
use embassy_rp::Peri;
use embassy_time::{Duration, block_for};
use fixed::types::U24F8;
use smart_leds::{RGB8, SmartLedsWrite};

const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;
const RESET_DELAY_US: u64 = 55;

bind_interrupts!(pub struct Pio0Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

fn load_ws2812_program<'d, P: Instance>(common: &mut Common<'d, P>) -> LoadedProgram<'d, P> {
    let side_set = SideSet::new(false, 1, false);
    let mut assembler: Assembler<32> = Assembler::new_with_side_set(side_set);

    let mut wrap_target = assembler.label();
    let mut wrap_source = assembler.label();
    let mut do_zero = assembler.label();
    assembler.set_with_side_set(SetDestination::PINDIRS, 1, 0);
    assembler.bind(&mut wrap_target);
    assembler.out_with_delay_and_side_set(OutDestination::X, 1, T3 - 1, 0);
    assembler.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
    assembler.jmp_with_delay_and_side_set(JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
    assembler.bind(&mut do_zero);
    assembler.nop_with_delay_and_side_set(T2 - 1, 0);
    assembler.bind(&mut wrap_source);

    let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
    common.load_program(&program)
}

/// CPU-fed WS2812 driver for a single state machine.
///
/// Writes block until the last word is in the TX FIFO, then wait out the latch time.
pub struct PioWs2812<'d, P: Instance, const S: usize, ORDER = Grb>
where
    ORDER: RgbColorOrder,
{
    sm: StateMachine<'d, P, S>,
    _order: PhantomData<ORDER>,
}

impl<'d, P: Instance, const S: usize, ORDER> PioWs2812<'d, P, S, ORDER>
where
    ORDER: RgbColorOrder,
{
    /// Load the WS2812 program, configure the state machine on `pin`, and start it.
    pub fn new(
        common: &mut Common<'d, P>,
        mut sm: StateMachine<'d, P, S>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = load_ws2812_program(common);
        let mut cfg = Config::default();

        let out_pin = common.make_pio_pin(pin);
        cfg.set_out_pins(&[&out_pin]);
        cfg.set_set_pins(&[&out_pin]);
        cfg.use_program(&program, &[&out_pin]);

        let clock_freq = U24F8::from_num(clk_sys_freq() / 1000);
        let ws2812_freq = U24F8::from_num(800);
        let bit_freq = ws2812_freq * CYCLES_PER_BIT;
        cfg.clock_divider = clock_freq / bit_freq;

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 24,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_enable(true);

        Self {
            sm,
            _order: PhantomData,
        }
    }
}

impl<P: Instance, const S: usize, ORDER> SmartLedsWrite for PioWs2812<'_, P, S, ORDER>
where
    ORDER: RgbColorOrder,
{
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let tx = self.sm.tx();
        for color in iterator {
            let word = ORDER::pack(color.into());
            while !tx.try_push(word) {}
        }
        while !tx.empty() {}

        block_for(Duration::from_micros(RESET_DELAY_US));
        Ok(())
    }
}

/// A WS2812 strip on PIO0 state machine 0, keeping the PIO block alive.
pub struct Pio0Ws2812<'d> {
    _common: Common<'d, PIO0>,
    strip: PioWs2812<'d, PIO0, 0, Grb>,
}

impl<'d> Pio0Ws2812<'d> {
    /// Bind PIO0 and drive the strip on `pin` from its state machine 0.
    pub fn new(pio: Peri<'d, PIO0>, pin: Peri<'d, impl PioPin>) -> Self {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(pio, Pio0Irqs);
        let strip = PioWs2812::new(&mut common, sm0, pin);
        Self {
            _common: common,
            strip,
        }
    }
}

impl SmartLedsWrite for Pio0Ws2812<'_> {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.strip.write(iterator)
    }
}
