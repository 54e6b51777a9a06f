//! Panel test patterns
//!
//! Fixed, deterministic fills used to check every LED and the wiring of the
//! two data lines. Each pattern walks the linear pixel index `i` and writes
//! the bit for `i & 1`, optionally inverted on odd rows.

use super::{Canvas, GraphicsMode};

/// Test pattern selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPattern {
    /// Checkerboard; even rows take `i & 1`, odd rows its inverse
    Alternate0,
    /// Checkerboard; even rows take `!(i & 1)`, odd rows `i & 1`
    Alternate1,
    /// Vertical stripes taking `i & 1`
    Stripe0,
    /// Vertical stripes taking `!(i & 1)`
    Stripe1,
}

impl TestPattern {
    /// All patterns, in selector order
    pub const ALL: [TestPattern; 4] = [
        TestPattern::Alternate0,
        TestPattern::Alternate1,
        TestPattern::Stripe0,
        TestPattern::Stripe1,
    ];

    /// Pixel value for linear index `index` on row `row`
    fn value(self, index: usize, row: usize) -> bool {
        let odd_index = index & 1 != 0;
        let odd_row = row & 1 != 0;
        match self {
            TestPattern::Alternate0 => odd_index != odd_row,
            TestPattern::Alternate1 => odd_index == odd_row,
            TestPattern::Stripe0 => odd_index,
            TestPattern::Stripe1 => !odd_index,
        }
    }
}

impl<const N: usize> Canvas<N> {
    /// Fill the whole panel with `pattern`
    pub fn draw_test_pattern(&mut self, pattern: TestPattern) {
        let width = self.grid().width() as usize;
        let total = self.grid().total_pixels();
        if width == 0 {
            return;
        }

        // Panels of 1, 2, 4... tiles across split the index with masks
        let mask = width.is_power_of_two().then(|| (width - 1, width.trailing_zeros()));

        for index in 0..total {
            let (col, row) = match mask {
                Some((mask, shift)) => (index & mask, index >> shift),
                None => (index % width, index / width),
            };
            self.write_pixel(
                col as i32,
                row as i32,
                GraphicsMode::Normal,
                pattern.value(index, row),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{framebuffer_len, TileGrid};
    use crate::graphics::tests::{canvas, lit};

    #[test]
    fn test_alternate_patterns_are_checkerboards() {
        let mut c = canvas();
        c.draw_test_pattern(TestPattern::Alternate0);

        assert_eq!(c.pixel(0, 0), Some(false));
        assert_eq!(c.pixel(1, 0), Some(true));
        assert_eq!(c.pixel(0, 1), Some(true));
        assert_eq!(c.pixel(1, 1), Some(false));
        assert_eq!(lit(&c), 32 * 16 / 2);

        let mut inverse = canvas();
        inverse.draw_test_pattern(TestPattern::Alternate1);
        for (a, b) in c
            .framebuffer()
            .as_bytes()
            .iter()
            .zip(inverse.framebuffer().as_bytes())
        {
            assert_eq!(*a, !*b);
        }
    }

    #[test]
    fn test_stripes_ignore_row() {
        let mut c = canvas();
        c.draw_test_pattern(TestPattern::Stripe0);

        for y in 0..16 {
            assert_eq!(c.pixel(0, y), Some(false));
            assert_eq!(c.pixel(1, y), Some(true));
            assert_eq!(c.pixel(30, y), Some(false));
            assert_eq!(c.pixel(31, y), Some(true));
        }

        // Odd columns hold whole bytes of lit pixels
        let bytes = c.framebuffer().as_bytes();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[2], 0xFF);

        c.draw_test_pattern(TestPattern::Stripe1);
        assert_eq!(c.pixel(0, 5), Some(true));
        assert_eq!(c.pixel(1, 5), Some(false));
    }

    #[test]
    fn test_pattern_overwrites_previous_content() {
        let mut c = canvas();
        c.clear(false);
        c.draw_test_pattern(TestPattern::Stripe1);
        assert_eq!(lit(&c), 32 * 16 / 2);
    }

    #[test]
    fn test_non_power_of_two_width() {
        let mut c = Canvas::<{ framebuffer_len(3, 1) }>::new(TileGrid::new(3, 1)).unwrap();
        c.draw_test_pattern(TestPattern::Alternate0);

        assert_eq!(c.pixel(95, 0), Some(true));
        assert_eq!(c.pixel(95, 1), Some(false));
        assert_eq!(c.pixel(0, 15), Some(true));
    }
}
