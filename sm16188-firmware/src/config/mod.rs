//! Firmware configuration
//!
//! The configuration is compiled in from `display.toml`, checked by
//! build.rs and parsed at startup by a small no_std parser.

pub mod toml;

use heapless::String;
use sm16188_core::config::DisplayConfig;
use sm16188_driver::BitTiming;

pub use toml::{parse_config, ParseError};

/// Longest marquee text accepted from the config
pub const MAX_MARQUEE_LEN: usize = 64;

/// Demo scene settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    /// Text shown by the marquee scene
    pub marquee: String<MAX_MARQUEE_LEN>,
    /// Time each scene stays on screen
    pub interval_ms: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut marquee = String::new();
        let _ = marquee.push_str("SM16188");
        Self {
            marquee,
            interval_ms: 3000,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareConfig {
    pub display: DisplayConfig,
    pub timing: BitTiming,
    /// Period of the refresh task
    pub refresh_interval_ms: u32,
    pub scene: SceneConfig,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            timing: BitTiming::DEFAULT,
            refresh_interval_ms: 20,
            scene: SceneConfig::default(),
        }
    }
}
