//! Property-based tests for the framebuffer and graphics engine.
//! Verifies invariants hold for arbitrary coordinates and grids, not just
//! fixed examples.

use sm16188_core::config::{framebuffer_len, Brightness, TileGrid};
use sm16188_core::{map_pixel, Canvas, GraphicsMode};

const MAX_GRID: usize = framebuffer_len(4, 4);

fn canvas(columns: u8, rows: u8) -> Canvas<MAX_GRID> {
    Canvas::new(TileGrid::new(columns, rows)).unwrap()
}

fn mode(index: u8) -> GraphicsMode {
    match index % 5 {
        0 => GraphicsMode::Normal,
        1 => GraphicsMode::Inverse,
        2 => GraphicsMode::Toggle,
        3 => GraphicsMode::Or,
        _ => GraphicsMode::Nor,
    }
}

proptest::proptest! {
    /// Mapping hits every byte/bit of the buffer exactly once.
    #[test]
    fn mapping_is_bijective(columns in 1u8..=4, rows in 1u8..=4) {
        let grid = TileGrid::new(columns, rows);
        let mut seen = [0u8; MAX_GRID];
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                let addr = map_pixel(rows, x, y);
                assert!(addr.byte < grid.framebuffer_len());
                let mask = 1 << addr.bit;
                assert_eq!(seen[addr.byte] & mask, 0, "({}, {}) mapped twice", x, y);
                seen[addr.byte] |= mask;
            }
        }
        assert!(seen[..grid.framebuffer_len()].iter().all(|&b| b == 0xFF));
    }

    /// A Normal write is read back and touches nothing else.
    #[test]
    fn normal_write_reads_back(
        x in 0i32..64, y in 0i32..32, value: bool, all_off: bool,
    ) {
        let mut c = canvas(2, 2);
        c.clear(all_off);
        c.write_pixel(x, y, GraphicsMode::Normal, value);

        assert_eq!(c.pixel(x, y), Some(value));
        let changed: u32 = c
            .framebuffer()
            .as_bytes()
            .iter()
            .map(|&b| (b ^ if all_off { 0x00 } else { 0xFF }).count_ones())
            .sum();
        assert_eq!(changed, u32::from(value == all_off));
    }

    /// Writes outside the panel never change the buffer, in any mode.
    #[test]
    fn out_of_range_write_is_noop(
        x in -200i32..200, y in -200i32..200, m in 0u8..5, value: bool,
    ) {
        let mut c = canvas(2, 1);
        c.draw_test_pattern(sm16188_core::TestPattern::Alternate1);
        let before = c.framebuffer().clone();

        proptest::prop_assume!(c.pixel(x, y).is_none());
        c.write_pixel(x, y, mode(m), value);
        assert_eq!(c.framebuffer().as_bytes(), before.as_bytes());
    }

    /// Clear establishes a uniform baseline regardless of prior content.
    #[test]
    fn clear_is_uniform(x1 in 0i32..32, y1 in 0i32..16, x2 in 0i32..32, y2 in 0i32..16, all_off: bool) {
        let mut c = canvas(1, 1);
        c.draw_line(x1, y1, x2, y2, GraphicsMode::Toggle);
        c.clear(all_off);
        let expected = if all_off { 0x00 } else { 0xFF };
        assert!(c.framebuffer().as_bytes().iter().all(|&b| b == expected));
    }

    /// Swapping line endpoints yields the same pixels.
    #[test]
    fn line_is_symmetric(
        x1 in -20i32..80, y1 in -20i32..50, x2 in -20i32..80, y2 in -20i32..50,
    ) {
        let mut forward = canvas(2, 2);
        let mut reverse = canvas(2, 2);
        forward.draw_line(x1, y1, x2, y2, GraphicsMode::Normal);
        reverse.draw_line(x2, y2, x1, y1, GraphicsMode::Normal);
        assert_eq!(forward.framebuffer().as_bytes(), reverse.framebuffer().as_bytes());
    }

    /// Both endpoints of an on-panel line are lit.
    #[test]
    fn line_includes_endpoints(x1 in 0i32..64, y1 in 0i32..32, x2 in 0i32..64, y2 in 0i32..32) {
        let mut c = canvas(2, 2);
        c.draw_line(x1, y1, x2, y2, GraphicsMode::Normal);
        assert_eq!(c.pixel(x1, y1), Some(true));
        assert_eq!(c.pixel(x2, y2), Some(true));
    }

    /// Circle outlines are mirror-symmetric and write each point once.
    #[test]
    fn circle_is_symmetric(cx in 20i32..44, cy in 12i32..20, r in 0i32..12) {
        let mut normal = canvas(2, 2);
        let mut toggled = canvas(2, 2);
        normal.draw_circle(cx, cy, r, GraphicsMode::Normal);
        toggled.draw_circle(cx, cy, r, GraphicsMode::Toggle);
        assert_eq!(normal.framebuffer().as_bytes(), toggled.framebuffer().as_bytes());

        for x in 0..64 {
            for y in 0..32 {
                if normal.pixel(x, y) == Some(true) {
                    assert_eq!(normal.pixel(2 * cx - x, y), Some(true));
                    assert_eq!(normal.pixel(x, 2 * cy - y), Some(true));
                    assert_eq!(normal.pixel(cx + (y - cy), cy + (x - cx)), Some(true));
                }
            }
        }
    }

    /// Brightness is always within the nibble range.
    #[test]
    fn brightness_clamps(level in 0u8..=255u8) {
        let b = Brightness::new(level);
        assert!(b.get() <= 15);
        assert_eq!(b.get(), level.min(15));
        assert_eq!(b.nibble(), b.get());
    }
}
