//! SM16188 two-line transfer protocol
//!
//! The panel has no clock line. Each data line carries a self-clocked pulse
//! train: every bit occupies one fixed-length cell, starting with a rising
//! edge. A one stays high for most of the cell, a zero falls immediately.
//! The receiving shift register samples the level at a fixed delay after
//! the edge, so every cell must have the same total length.
//!
//! Framebuffer bytes are split across the two lines by index parity. The
//! odd line is sent first, then the even line, each followed by a 4-bit
//! brightness value:
//!
//! ```text
//! odd:  fb[last odd] .. fb[3] fb[1] brightness
//! even: fb[last even] .. fb[2] fb[0] brightness
//! ```
//!
//! There is no acknowledgement and no retry; a stretched cell corrupts the
//! rest of the frame. Each byte is therefore clocked out inside a critical
//! section.

use sm16188_core::config::{Brightness, ConfigError};
use sm16188_hal::{Monotonic, OutputPin};

/// Bits in the brightness value sent after each line's payload
pub const BRIGHTNESS_BITS: u8 = 4;

/// Bit cell timing in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    /// Total cell length
    pub cell_us: u32,
    /// High phase of a one
    pub one_high_us: u32,
    /// High phase of a zero
    pub zero_high_us: u32,
}

impl BitTiming {
    /// Timing the SM16188 is specified for
    pub const DEFAULT: Self = Self {
        cell_us: 4,
        one_high_us: 3,
        zero_high_us: 0,
    };

    /// Check that ones and zeros are distinguishable and fit in a cell
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.one_high_us >= self.cell_us || self.zero_high_us >= self.one_high_us {
            Err(ConfigError::InvalidTiming)
        } else {
            Ok(())
        }
    }

    /// Minimum duration of one refresh of a `framebuffer_len` byte buffer
    ///
    /// Both lines are sent back to back, so this is the time the CPU is
    /// busy with a refresh (and, in pieces, the time spent with interrupts
    /// masked).
    pub const fn frame_micros(&self, framebuffer_len: usize) -> u64 {
        let bits = framebuffer_len as u64 * 8 + 2 * BRIGHTNESS_BITS as u64;
        bits * self.cell_us as u64
    }

    fn high_us(&self, bit: bool) -> u64 {
        u64::from(if bit {
            self.one_high_us
        } else {
            self.zero_high_us
        })
    }
}

impl Default for BitTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The pair of data lines feeding the panel
#[derive(Debug)]
pub struct DataLines<E, O> {
    /// Carries the even-indexed framebuffer bytes
    pub even: E,
    /// Carries the odd-indexed framebuffer bytes
    pub odd: O,
}

impl<E: OutputPin, O: OutputPin> DataLines<E, O> {
    pub const fn new(even: E, odd: O) -> Self {
        Self { even, odd }
    }

    /// Drive both lines to the idle (low) level
    pub fn idle(&mut self) {
        self.even.set_low();
        self.odd.set_low();
    }

    /// Clock out a whole frame: odd line, then even line
    pub fn send_frame<C: Monotonic>(
        &mut self,
        clock: &C,
        timing: &BitTiming,
        bytes: &[u8],
        brightness: Brightness,
    ) {
        for &byte in bytes.iter().skip(1).step_by(2).rev() {
            send_bits(&mut self.odd, clock, timing, byte, 8);
        }
        send_bits(&mut self.odd, clock, timing, brightness.nibble(), BRIGHTNESS_BITS);

        for &byte in bytes.iter().step_by(2).rev() {
            send_bits(&mut self.even, clock, timing, byte, 8);
        }
        send_bits(&mut self.even, clock, timing, brightness.nibble(), BRIGHTNESS_BITS);
    }
}

/// Send the low `count` bits of `value`, MSB first, as one uninterrupted burst
pub fn send_bits<P, C>(line: &mut P, clock: &C, timing: &BitTiming, value: u8, count: u8)
where
    P: OutputPin,
    C: Monotonic,
{
    critical_section::with(|_| {
        for shift in (0..count).rev() {
            send_bit(line, clock, timing, value & (1 << shift) != 0);
        }
    });
}

/// One bit cell. The cell end is awaited for both values.
fn send_bit<P, C>(line: &mut P, clock: &C, timing: &BitTiming, bit: bool)
where
    P: OutputPin,
    C: Monotonic,
{
    let start = clock.now_micros();
    line.set_high();
    clock.wait_until(start, timing.high_us(bit));
    line.set_low();
    clock.wait_until(start, u64::from(timing.cell_us));
}
