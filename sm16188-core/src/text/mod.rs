//! Text rendering
//!
//! Decodes glyphs from a [`Font`] and composites them into a [`Canvas`]
//! through [`Canvas::write_pixel`], so text honours the same blend modes
//! and clipping as every other primitive.

pub mod font;
pub mod marquee;

use crate::graphics::{Canvas, GraphicsMode};

pub use font::{Font, FontError, Glyph};
pub use marquee::{Marquee, MARQUEE_CAPACITY};

/// Result of [`Canvas::draw_char`] when the position is off the panel
pub const INVALID_POSITION: i32 = -1;

impl<const N: usize> Canvas<N> {
    /// Draw one character with its top-left corner at `(x, y)`
    ///
    /// Returns the glyph width, 0 for a character the font does not define,
    /// or [`INVALID_POSITION`] when `(x, y)` lies right of or below the
    /// panel. Space is drawn as a cleared box instead of a bitmap.
    pub fn draw_char(&mut self, font: &Font<'_>, x: i32, y: i32, code: u8, mode: GraphicsMode) -> i32 {
        if x >= self.width() || y >= self.height() {
            return INVALID_POSITION;
        }
        let height = i32::from(font.height());

        if code == b' ' {
            let width = i32::from(font.char_width(b' '));
            if width > 0 {
                self.draw_filled_box(x, y, x + width - 1, y + height - 1, GraphicsMode::Inverse);
            }
            return width;
        }

        let Some(glyph) = font.glyph(code) else {
            return 0;
        };
        let width = i32::from(glyph.width);

        // Wholly left of or above the panel: advance without drawing
        if x < -width || y < -height {
            return width;
        }

        let bytes = font.bytes_per_column();
        for column in 0..usize::from(glyph.width) {
            for row in (0..bytes).rev() {
                let data = font.bitmap_byte(glyph.offset + column + row * usize::from(glyph.width));
                let row_top = (row * 8) as i32;

                // The last byte of a multi-byte column is aligned to the
                // bottom of the glyph and overlaps the byte above it
                let offset = if row == bytes - 1 && bytes > 1 {
                    height - 8
                } else {
                    row_top
                };

                for bit in 0..8 {
                    let line = offset + bit;
                    if line < row_top || line >= height {
                        continue;
                    }
                    self.write_pixel(x + column as i32, y + line, mode, data & (1 << bit) != 0);
                }
            }
        }

        width
    }

    /// Draw `text` left to right starting at `(x, y)`
    ///
    /// A cleared one-pixel column precedes the string and follows every
    /// glyph. Drawing stops silently once the cursor leaves the panel.
    pub fn draw_string(&mut self, font: &Font<'_>, x: i32, y: i32, text: &[u8], mode: GraphicsMode) {
        let height = i32::from(font.height());
        if x >= self.width() || y >= self.height() || y + height < 0 {
            return;
        }

        self.separator(x.saturating_sub(1), y, height);

        let mut cursor = 0;
        for &code in text {
            let advance = self.draw_char(font, x.saturating_add(cursor), y, code, mode);
            if advance > 0 {
                cursor += advance;
                self.separator(x.saturating_add(cursor), y, height);
                cursor += 1;
            } else if advance < 0 {
                return;
            }

            if x.saturating_add(cursor) >= self.width() {
                return;
            }
        }
    }

    fn separator(&mut self, x: i32, y: i32, height: i32) {
        if height > 0 {
            self.draw_line(x, y, x, y + height - 1, GraphicsMode::Inverse);
        }
    }
}
