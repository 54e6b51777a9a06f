//! SM16188 LED matrix driver
//!
//! Implements the panel side of the display on top of `sm16188-core`:
//!
//! - Bit-cell transfer protocol over two data lines
//! - `Sm16188` display facade (drawing, brightness, refresh, teardown)
//! - `SharedDisplay` for splitting refresh and drawing between contexts
//!
//! Pins and the time source come in through the `sm16188-hal` traits, so
//! the same driver runs on any MCU and under host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod shared;
pub mod transfer;

pub use display::{DisplayError, Sm16188};
pub use shared::SharedDisplay;
pub use transfer::{BitTiming, DataLines};
