//! RP2040-specific HAL for SM16188 displays
//!
//! Implements the `sm16188-hal` traits on top of `embassy-rp`:
//!
//! - [`FlexLine`]: a GPIO data line that can be released to high impedance
//! - [`EmbassyClock`]: microsecond clock backed by the embassy time driver

#![no_std]

pub mod clock;
pub mod gpio;

pub use clock::EmbassyClock;
pub use gpio::FlexLine;

// Re-export shared traits from sm16188-hal for convenience
pub use sm16188_hal::{Monotonic, OutputPin, TristatePin};
