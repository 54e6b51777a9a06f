//! SM16188 Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the matrix driver is
//! written against. Chip-specific HALs (RP2040, ...) implement them so the
//! same driver code can run on different hardware platforms.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sm16188-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sm16188-driver (transfer protocol)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sm16188-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ sm16188-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::TristatePin`] - Data lines
//! - [`clock::Monotonic`] - Microsecond time source for bit-cell timing

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::Monotonic;
pub use gpio::{HalPin, OutputPin, TristatePin};
