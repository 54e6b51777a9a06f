//! Microsecond clock
//!
//! The embassy-rp time driver runs the RP2040 timer peripheral at 1 MHz,
//! so one tick is one microsecond and reads never wrap in practice.

use embassy_time::Instant;
use sm16188_hal::Monotonic;

/// [`Monotonic`] backed by `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Monotonic for EmbassyClock {
    #[inline(always)]
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}
