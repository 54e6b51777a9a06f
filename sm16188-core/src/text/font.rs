//! Font asset decoder
//!
//! Fonts are read-only byte tables supplied by the application, usually
//! `static` data in flash. Layout:
//!
//! | offset | size        | field                                    |
//! |--------|-------------|------------------------------------------|
//! | 0      | 2           | total bitmap length, 0 = fixed width     |
//! | 2      | 1           | fixed glyph width                        |
//! | 3      | 1           | glyph height                             |
//! | 4      | 1           | first character code                     |
//! | 5      | 1           | character count                          |
//! | 6      | char count  | width table (variable-width fonts only)  |
//! | ...    |             | glyph bitmaps                            |
//!
//! Each glyph stores `ceil(height / 8)` rows of bytes, one byte per column
//! per row; bit `k` of a byte is the pixel `k` rows below the top of that
//! byte row.

const LENGTH: usize = 0;
const FIXED_WIDTH: usize = 2;
const HEIGHT: usize = 3;
const FIRST_CHAR: usize = 4;
const CHAR_COUNT: usize = 5;
const WIDTH_TABLE: usize = 6;

/// Size of the fixed font header
pub const HEADER_LEN: usize = WIDTH_TABLE;

/// Font validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Fewer bytes than the header
    TruncatedHeader,
    /// Variable-width font without a complete width table
    TruncatedWidthTable,
}

/// Location of one decoded glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Byte offset of the glyph bitmap within the font
    pub offset: usize,
    /// Width in pixel columns
    pub width: u8,
}

/// Borrowed view of a font asset
///
/// Copying a `Font` copies the reference only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font<'a> {
    data: &'a [u8],
}

impl<'a> Font<'a> {
    /// Wrap a font table, checking that its header is complete
    pub fn new(data: &'a [u8]) -> Result<Self, FontError> {
        if data.len() < HEADER_LEN {
            return Err(FontError::TruncatedHeader);
        }

        let font = Self { data };
        if !font.is_fixed_width() && data.len() < HEADER_LEN + font.char_count() as usize {
            return Err(FontError::TruncatedWidthTable);
        }
        Ok(font)
    }

    /// Raw font bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Byte at `index`; bytes past the end read as zero
    fn byte(&self, index: usize) -> u8 {
        self.data.get(index).copied().unwrap_or(0)
    }

    /// True when the length field is zero (no width table)
    pub fn is_fixed_width(&self) -> bool {
        self.byte(LENGTH) == 0 && self.byte(LENGTH + 1) == 0
    }

    /// Width of every glyph in a fixed-width font
    pub fn fixed_width(&self) -> u8 {
        self.byte(FIXED_WIDTH)
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.byte(HEIGHT)
    }

    /// First character code in the font
    pub fn first_char(&self) -> u8 {
        self.byte(FIRST_CHAR)
    }

    /// Number of characters in the font
    pub fn char_count(&self) -> u8 {
        self.byte(CHAR_COUNT)
    }

    /// Bitmap bytes per glyph column
    pub fn bytes_per_column(&self) -> usize {
        (self.height() as usize).div_ceil(8)
    }

    /// Check whether `code` has a glyph
    pub fn contains(&self, code: u8) -> bool {
        let first = u16::from(self.first_char());
        let code = u16::from(code);
        code >= first && code < first + u16::from(self.char_count())
    }

    /// Bitmap byte `index` bytes into the font
    pub fn bitmap_byte(&self, index: usize) -> u8 {
        self.byte(index)
    }

    /// Width of the glyph for `code`, 0 if undefined
    ///
    /// Space is rarely stored in fonts; without an explicit glyph it takes
    /// the width of 'n'.
    pub fn char_width(&self, code: u8) -> u8 {
        let code = if code == b' ' && !self.contains(b' ') {
            b'n'
        } else {
            code
        };
        self.glyph(code).map_or(0, |glyph| glyph.width)
    }

    /// Width of `text` as laid out by `Canvas::draw_string`, counting the
    /// separator column after every glyph
    pub fn text_width(&self, text: &[u8]) -> i32 {
        text.iter()
            .map(|&code| match self.char_width(code) {
                0 => 0,
                width => i32::from(width) + 1,
            })
            .sum()
    }

    /// Locate the glyph for `code`
    pub fn glyph(&self, code: u8) -> Option<Glyph> {
        if !self.contains(code) {
            return None;
        }
        let index = usize::from(code - self.first_char());
        let bytes = self.bytes_per_column();

        if self.is_fixed_width() {
            let width = self.fixed_width();
            Some(Glyph {
                offset: WIDTH_TABLE + index * bytes * usize::from(width),
                width,
            })
        } else {
            let preceding: usize = (0..index)
                .map(|i| usize::from(self.byte(WIDTH_TABLE + i)))
                .sum();
            Some(Glyph {
                offset: WIDTH_TABLE + usize::from(self.char_count()) + preceding * bytes,
                width: self.byte(WIDTH_TABLE + index),
            })
        }
    }
}
