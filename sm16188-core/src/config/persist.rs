//! Persisted display configuration
//!
//! Stores a [`DisplayConfig`] as postcard binary data with a header so a
//! blank or foreign flash sector is never mistaken for a configuration.

use serde::{Deserialize, Serialize};

use super::types::{Brightness, ConfigError, DisplayConfig};

/// Magic number to identify valid stored configuration
pub const CONFIG_MAGIC: u32 = 0x3136_3138; // "1618"

/// Current stored configuration version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size of [`StoredConfig`]
pub const MAX_ENCODED_LEN: usize = 16;

/// Configuration as written to persistent storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The configuration itself
    pub config: DisplayConfig,
}

impl StoredConfig {
    /// Wrap a configuration for storage
    pub const fn new(config: DisplayConfig) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config,
        }
    }

    /// Check if the header matches this firmware
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }
}

impl DisplayConfig {
    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        let used = postcard::to_slice(&StoredConfig::new(*self), buffer)
            .map_err(|_| ConfigError::Encoding)?;
        Ok(used.len())
    }

    /// Decode and validate a stored configuration
    ///
    /// Brightness is re-clamped since storage may hold any byte.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)?;
        if !stored.is_valid() {
            return Err(ConfigError::Encoding);
        }

        let mut config = stored.config;
        config.validate()?;
        config.brightness = Brightness::new(config.brightness.get());
        Ok(config)
    }
}
