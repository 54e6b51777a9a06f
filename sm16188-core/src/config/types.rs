//! Configuration type definitions
//!
//! These types describe the physical panel: how many SM16188 tiles are
//! chained together and how bright they are driven. Everything else about
//! the geometry is derived from the tile grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixels across one tile
pub const TILE_WIDTH: u16 = 32;

/// Pixels down one tile
pub const TILE_HEIGHT: u16 = 16;

/// Pixels down one half tile (one framebuffer byte)
pub const HALF_TILE_HEIGHT: u16 = TILE_HEIGHT / 2;

/// Framebuffer bytes per tile (1 bit per pixel)
pub const BYTES_PER_TILE: usize = (TILE_WIDTH as usize * TILE_HEIGHT as usize) / 8;

/// Maximum brightness level
pub const MAX_BRIGHTNESS: u8 = 15;

/// Framebuffer length for a grid of `columns` × `rows` tiles
///
/// Usable in const context to size the framebuffer capacity:
///
/// ```
/// use sm16188_core::config::framebuffer_len;
/// const FB: usize = framebuffer_len(2, 1);
/// assert_eq!(FB, 128);
/// ```
pub const fn framebuffer_len(columns: u8, rows: u8) -> usize {
    columns as usize * rows as usize * BYTES_PER_TILE
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tile grid has zero columns or zero rows
    EmptyGrid,
    /// Framebuffer capacity cannot hold the configured grid
    FramebufferTooSmall {
        /// Bytes the grid needs
        required: usize,
        /// Bytes available
        capacity: usize,
    },
    /// Bit-cell timing is not physically realisable
    InvalidTiming,
    /// Stored configuration could not be encoded or decoded
    Encoding,
}

/// Panel brightness (0-15)
///
/// Values above 15 are clamped on construction, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brightness(u8);

impl Brightness {
    /// Full brightness
    pub const MAX: Self = Self(MAX_BRIGHTNESS);

    /// Panel dark
    pub const MIN: Self = Self(0);

    /// Create a brightness level, clamping to 15
    pub const fn new(level: u8) -> Self {
        if level > MAX_BRIGHTNESS {
            Self(MAX_BRIGHTNESS)
        } else {
            Self(level)
        }
    }

    /// Get the level (always 0-15)
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The 4-bit value sent after the pixel payload
    pub const fn nibble(self) -> u8 {
        self.0 & 0x0F
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// Arrangement of tiles forming the complete display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileGrid {
    /// Tiles across
    pub columns: u8,
    /// Tiles down
    pub rows: u8,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl TileGrid {
    /// Create a grid of `columns` × `rows` tiles
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self { columns, rows }
    }

    /// Check that the grid holds at least one tile
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            Err(ConfigError::EmptyGrid)
        } else {
            Ok(())
        }
    }

    /// Number of tiles
    pub const fn total_tiles(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.columns as u16 * TILE_WIDTH
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.rows as u16 * TILE_HEIGHT
    }

    /// Number of pixels
    pub const fn total_pixels(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Framebuffer length in bytes
    pub const fn framebuffer_len(&self) -> usize {
        framebuffer_len(self.columns, self.rows)
    }

    /// Check whether signed coordinates fall on the panel
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width()) && y < i32::from(self.height())
    }
}

/// Display configuration
///
/// Created once at session start. Only the brightness changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Tile arrangement
    pub grid: TileGrid,
    /// Initial brightness
    pub brightness: Brightness,
}

impl DisplayConfig {
    /// Create a configuration at full brightness
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self {
            grid: TileGrid::new(columns, rows),
            brightness: Brightness::MAX,
        }
    }

    /// Set the initial brightness (clamped)
    pub const fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = Brightness::new(level);
        self
    }

    /// Validate the configuration
    pub const fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()
    }
}
