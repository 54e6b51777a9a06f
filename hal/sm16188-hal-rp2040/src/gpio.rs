//! GPIO data lines
//!
//! SM16188 data lines are plain push-pull outputs while the panel is being
//! driven. At teardown they are switched back to inputs so the pins float
//! and another device can use them.

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;
use sm16188_hal::{OutputPin, TristatePin};

/// Data line on one RP2040 GPIO
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    /// Configure `pin` as an output driven low
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_output();
        Self { pin }
    }
}

impl OutputPin for FlexLine<'_> {
    #[inline(always)]
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.pin.set_low();
    }
}

impl TristatePin for FlexLine<'_> {
    fn release(&mut self) {
        self.pin.set_as_input();
    }
}
