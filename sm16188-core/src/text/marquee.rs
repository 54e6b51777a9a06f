//! Marquee text state
//!
//! Holds the last marquee string and its layout so callers can query the
//! rendered extent after drawing.

use heapless::Vec;

use super::font::Font;
use crate::graphics::{Canvas, GraphicsMode};

/// Maximum marquee length in bytes; longer text is truncated
pub const MARQUEE_CAPACITY: usize = 255;

/// Bounded marquee text plus its placement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marquee {
    text: Vec<u8, MARQUEE_CAPACITY>,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl Marquee {
    pub const fn new() -> Self {
        Self {
            text: Vec::new(),
            left: 0,
            top: 0,
            width: 0,
            height: 0,
        }
    }

    /// Replace the text and recompute the layout for `font`
    pub fn set(&mut self, font: &Font<'_>, text: &[u8], left: i32, top: i32) {
        let len = text.len().min(MARQUEE_CAPACITY);
        self.text.clear();
        // Cannot fail, `len` is within capacity
        let _ = self.text.extend_from_slice(&text[..len]);

        self.left = left;
        self.top = top;
        self.width = self
            .text
            .iter()
            .map(|&code| i32::from(font.char_width(code)) + 1)
            .sum();
        self.height = i32::from(font.height());
    }

    /// Stored (possibly truncated) text
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    /// Total width including one spacing column per character
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl<const N: usize> Canvas<N> {
    /// Store `text` in `marquee` and draw it at `(left, top)`
    pub fn draw_marquee(
        &mut self,
        font: &Font<'_>,
        marquee: &mut Marquee,
        text: &[u8],
        left: i32,
        top: i32,
    ) {
        marquee.set(font, text, left, top);
        self.draw_string(font, left, top, marquee.text(), GraphicsMode::Normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::tests::{canvas, lit};
    use crate::text::font::tests::FIXED_5X7;

    #[test]
    fn test_layout() {
        let font = Font::new(&FIXED_5X7).unwrap();
        let mut marquee = Marquee::new();
        marquee.set(&font, b"Hello", 3, -2);

        assert_eq!(marquee.text(), b"Hello");
        assert_eq!(marquee.left(), 3);
        assert_eq!(marquee.top(), -2);
        assert_eq!(marquee.width(), 30);
        assert_eq!(marquee.height(), 7);
    }

    #[test]
    fn test_undefined_chars_still_space() {
        let font = Font::new(&FIXED_5X7).unwrap();
        let mut marquee = Marquee::new();
        marquee.set(&font, &[b'a', 0x80, b'b'], 0, 0);
        assert_eq!(marquee.width(), 6 + 1 + 6);
    }

    #[test]
    fn test_truncates_long_text() {
        let font = Font::new(&FIXED_5X7).unwrap();
        let long = [b'x'; 300];
        let mut marquee = Marquee::new();
        marquee.set(&font, &long, 0, 0);

        assert_eq!(marquee.text().len(), MARQUEE_CAPACITY);
        assert_eq!(marquee.width(), 6 * MARQUEE_CAPACITY as i32);
    }

    #[test]
    fn test_set_replaces_previous_text() {
        let font = Font::new(&FIXED_5X7).unwrap();
        let mut marquee = Marquee::new();
        marquee.set(&font, b"first", 0, 0);
        marquee.set(&font, b"2nd", 1, 1);
        assert_eq!(marquee.text(), b"2nd");
        assert_eq!(marquee.width(), 18);
    }

    #[test]
    fn test_draw_marquee_renders_text() {
        // 'A' is a 2x8 block, every other glyph blank
        const BLOCK_A: [u8; 6 + 2 * 3] = [0, 0, 2, 8, b'@', 3, 0, 0, 0xFF, 0xFF, 0, 0];
        let font = Font::new(&BLOCK_A).unwrap();
        let mut marquee = Marquee::new();
        let mut c = canvas();

        c.draw_marquee(&font, &mut marquee, b"AA", 1, 4);

        assert_eq!(marquee.width(), 6);
        assert_eq!(lit(&c), 2 * 2 * 8);
        assert_eq!(c.pixel(1, 4), Some(true));
        assert_eq!(c.pixel(2, 11), Some(true));
        assert_eq!(c.pixel(3, 4), Some(false));
        assert_eq!(c.pixel(4, 4), Some(true));
    }
}
