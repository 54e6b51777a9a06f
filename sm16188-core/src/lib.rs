//! Board-agnostic core logic for SM16188 tiled LED matrix displays
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Display configuration (tile grid, brightness) and its persistence
//! - Framebuffer storage and the panel's pixel address mapping
//! - Graphics primitives with blend modes, plus test patterns
//! - Font decoding, text rendering and marquee layout
//!
//! The transfer protocol that clocks a framebuffer out to the panel lives
//! in `sm16188-driver`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod framebuffer;
pub mod graphics;
pub mod text;

pub use config::{Brightness, ConfigError, DisplayConfig, TileGrid};
pub use framebuffer::{map_pixel, Framebuffer, PixelAddress};
pub use graphics::{Canvas, GraphicsMode, TestPattern};
pub use text::{Font, FontError, Marquee};
