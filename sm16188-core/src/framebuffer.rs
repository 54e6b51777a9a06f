//! Bit-packed framebuffer and pixel address mapping
//!
//! Each framebuffer byte holds eight vertically adjacent pixels of one
//! column in one half-tile. Byte order interleaves the upper and lower half
//! of every column so the transfer driver can feed the two data lines by
//! walking odd and even indices separately:
//!
//! ```text
//! byte = x * 2 * tile_rows + y / 8
//! bit  = y % 8
//! ```
//!
//! The layout mirrors the panel wiring and must not change.

use heapless::Vec;

use crate::config::{ConfigError, TileGrid, HALF_TILE_HEIGHT};

/// Location of one pixel in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Byte index
    pub byte: usize,
    /// Bit within the byte (0-7)
    pub bit: u8,
}

/// Map an in-range pixel to its framebuffer bit
///
/// Pure function of the grid height. Coordinates are not range-checked;
/// use [`TileGrid::address`] for that.
pub const fn map_pixel(tile_rows: u8, x: u16, y: u16) -> PixelAddress {
    PixelAddress {
        byte: x as usize * 2 * tile_rows as usize + (y / HALF_TILE_HEIGHT) as usize,
        bit: (y % HALF_TILE_HEIGHT) as u8,
    }
}

impl TileGrid {
    /// Framebuffer address of `(x, y)`, or `None` when off the panel
    pub fn address(&self, x: i32, y: i32) -> Option<PixelAddress> {
        if !self.contains(x, y) {
            return None;
        }
        Some(map_pixel(self.rows, x as u16, y as u16))
    }
}

/// Framebuffer store
///
/// Owns the pixel memory in a fixed-capacity buffer of `N` bytes. Only the
/// first `len` bytes (as required by the tile grid) are used; the length
/// never changes after creation.
#[derive(Debug, Clone)]
pub struct Framebuffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> Framebuffer<N> {
    /// Create an all-off framebuffer of `len` bytes
    ///
    /// Fails when `N` cannot hold `len` bytes. This is the one fatal
    /// startup condition: nothing can be drawn without pixel memory.
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        let mut bytes = Vec::new();
        bytes
            .resize(len, 0x00)
            .map_err(|_| ConfigError::FramebufferTooSmall {
                required: len,
                capacity: N,
            })?;
        Ok(Self { bytes })
    }

    /// Create a framebuffer sized for `grid`
    pub fn for_grid(grid: &TileGrid) -> Result<Self, ConfigError> {
        grid.validate()?;
        Self::new(grid.framebuffer_len())
    }

    /// Set every byte to 0x00 (`all_off`) or 0xFF
    pub fn clear(&mut self, all_off: bool) {
        let fill = if all_off { 0x00 } else { 0xFF };
        self.bytes.fill(fill);
    }

    /// Read-only view of the pixel memory
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the framebuffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read one bit
    pub fn bit(&self, addr: PixelAddress) -> bool {
        self.bytes
            .get(addr.byte)
            .is_some_and(|byte| byte & (1 << addr.bit) != 0)
    }

    /// Write one bit
    pub fn set_bit(&mut self, addr: PixelAddress, on: bool) {
        if let Some(byte) = self.bytes.get_mut(addr.byte) {
            if on {
                *byte |= 1 << addr.bit;
            } else {
                *byte &= !(1 << addr.bit);
            }
        }
    }

    /// Flip one bit
    pub fn toggle_bit(&mut self, addr: PixelAddress) {
        if let Some(byte) = self.bytes.get_mut(addr.byte) {
            *byte ^= 1 << addr.bit;
        }
    }
}
