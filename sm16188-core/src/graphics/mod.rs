//! Graphics primitive engine
//!
//! [`Canvas`] pairs a tile grid with its framebuffer and implements every
//! drawing primitive on top of a single operation, [`Canvas::write_pixel`].
//! Coordinates are signed so shapes may start or end off the panel; pixels
//! outside the addressable area are silently clipped.

#[cfg(feature = "graphics")]
mod embedded;
pub mod pattern;

use crate::config::{ConfigError, TileGrid};
use crate::framebuffer::Framebuffer;

pub use pattern::TestPattern;

/// Blend rule applied when writing a pixel
///
/// | mode    | value = true         | value = false |
/// |---------|----------------------|---------------|
/// | Normal  | set bit              | clear bit     |
/// | Inverse | clear bit            | set bit       |
/// | Toggle  | flip bit             | no-op         |
/// | Or      | set bit              | no-op         |
/// | Nor     | clear bit if set     | no-op         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphicsMode {
    #[default]
    Normal,
    Inverse,
    Toggle,
    Or,
    Nor,
}

/// Drawing surface for one display
#[derive(Debug, Clone)]
pub struct Canvas<const N: usize> {
    grid: TileGrid,
    framebuffer: Framebuffer<N>,
}

impl<const N: usize> Canvas<N> {
    /// Create an all-off canvas for `grid`
    pub fn new(grid: TileGrid) -> Result<Self, ConfigError> {
        Ok(Self {
            grid,
            framebuffer: Framebuffer::for_grid(&grid)?,
        })
    }

    /// Tile arrangement
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        i32::from(self.grid.width())
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        i32::from(self.grid.height())
    }

    /// Underlying pixel memory
    pub fn framebuffer(&self) -> &Framebuffer<N> {
        &self.framebuffer
    }

    /// Clear the screen: all pixels off (`all_off`) or all on
    pub fn clear(&mut self, all_off: bool) {
        critical_section::with(|_| self.framebuffer.clear(all_off));
    }

    /// Read a pixel, `None` when off the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.grid.address(x, y).map(|addr| self.framebuffer.bit(addr))
    }

    /// Set or clear the pixel at `(x, y)` according to `mode`
    ///
    /// Out-of-range coordinates are a no-op. The read-modify-write runs in a
    /// critical section so a refresh from interrupt context never observes a
    /// half-written byte.
    pub fn write_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode, value: bool) {
        let Some(addr) = self.grid.address(x, y) else {
            return;
        };

        critical_section::with(|_| {
            let fb = &mut self.framebuffer;
            match (mode, value) {
                (GraphicsMode::Normal, on) => fb.set_bit(addr, on),
                (GraphicsMode::Inverse, on) => fb.set_bit(addr, !on),
                (GraphicsMode::Toggle, true) => fb.toggle_bit(addr),
                (GraphicsMode::Or, true) => fb.set_bit(addr, true),
                (GraphicsMode::Nor, true) => {
                    if fb.bit(addr) {
                        fb.set_bit(addr, false);
                    }
                }
                (GraphicsMode::Toggle | GraphicsMode::Or | GraphicsMode::Nor, false) => {}
            }
        });
    }

    /// Draw a line from `(x1, y1)` to `(x2, y2)` inclusive
    ///
    /// Integer Bresenham. The endpoints are ordered along the dominant axis
    /// first, so swapping them yields the same pixels. Any `i32` endpoints
    /// are accepted; only the part of the line over the panel is walked.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        let (width, height) = (i64::from(self.width()), i64::from(self.height()));
        let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

        // The line stays inside the bounding box of its endpoints
        if (x1 < 0 && x2 < 0)
            || (x1 >= width && x2 >= width)
            || (y1 < 0 && y2 < 0)
            || (y1 >= height && y2 >= height)
        {
            return;
        }

        let x_major = (x2 - x1).abs() > (y2 - y1).abs();
        let (a1, b1, a2, b2, major_len) = if x_major {
            (x1, y1, x2, y2, width)
        } else {
            (y1, x1, y2, x2, height)
        };
        let (mut a, mut b, a_end, b_end) = if a1 > a2 {
            (a2, b2, a1, b1)
        } else {
            (a1, b1, a2, b2)
        };

        let d_major = (a_end - a) << 1;
        let d_minor = (b_end - b).abs() << 1;
        let step = if b_end < b { -1 } else { 1 };
        let mut fraction = d_minor - (d_major >> 1);

        // Jump to the panel edge. After k steps the error term lies in
        // [d_minor - d_major, d_minor), which fixes the minor steps taken.
        if a < 0 {
            let k = i128::from(-a);
            let taken = (i128::from(fraction) + (k - 1) * i128::from(d_minor))
                .div_euclid(i128::from(d_major))
                + 1;
            let rest = i128::from(fraction) + k * i128::from(d_minor) - taken * i128::from(d_major);
            // Both stay within the endpoint span, so they fit
            b += step * taken as i64;
            fraction = rest as i64;
            a = 0;
        }

        let a_stop = a_end.min(major_len - 1);
        self.plot_axes(x_major, a, b, mode);
        while a < a_stop {
            if fraction >= 0 {
                b += step;
                fraction -= d_major;
            }
            a += 1;
            fraction += d_minor;
            self.plot_axes(x_major, a, b, mode);
        }
    }

    fn plot_axes(&mut self, x_major: bool, a: i64, b: i64, mode: GraphicsMode) {
        if x_major {
            self.plot(a, b, mode);
        } else {
            self.plot(b, a, mode);
        }
    }

    /// `write_pixel` for widened coordinates; anything outside `i32` is off
    /// the panel anyway
    fn plot(&mut self, x: i64, y: i64, mode: GraphicsMode) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.write_pixel(x, y, mode, true);
        }
    }

    /// Draw a circle outline of radius `radius` around `(cx, cy)`
    ///
    /// Midpoint algorithm; every octant point is written exactly once.
    /// Negative radii draw nothing.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, mode: GraphicsMode) {
        if radius < 0 {
            return;
        }
        if radius == 0 {
            self.write_pixel(cx, cy, mode, true);
            return;
        }
        if !self.circle_may_touch(i64::from(cx), i64::from(cy), i64::from(radius)) {
            return;
        }

        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let mut x = 0;
        let mut y = i64::from(radius);
        let mut p = (5 - y * 4) / 4;

        self.circle_points(cx, cy, x, y, mode);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            self.circle_points(cx, cy, x, y, mode);
        }
    }

    /// Whether a circle of radius `r` can light any panel pixel
    ///
    /// Midpoint points sit less than one pixel from the true circle, so the
    /// panel must not lie wholly outside radius `r + 1` or wholly inside
    /// radius `r - 1`.
    fn circle_may_touch(&self, cx: i64, cy: i64, r: i64) -> bool {
        let (right, bottom) = (i64::from(self.width()) - 1, i64::from(self.height()) - 1);
        let square = |v: i64| i128::from(v) * i128::from(v);

        let near_x = cx.clamp(0, right) - cx;
        let near_y = cy.clamp(0, bottom) - cy;
        if square(near_x) + square(near_y) > square(r + 1) {
            return false;
        }

        let far_x = cx.abs().max((cx - right).abs());
        let far_y = cy.abs().max((cy - bottom).abs());
        square(far_x) + square(far_y) >= square(r - 1)
    }

    fn circle_points(&mut self, cx: i64, cy: i64, x: i64, y: i64, mode: GraphicsMode) {
        if x == 0 {
            self.plot(cx, cy + y, mode);
            self.plot(cx, cy - y, mode);
            self.plot(cx + y, cy, mode);
            self.plot(cx - y, cy, mode);
        } else if x == y {
            self.plot(cx + x, cy + y, mode);
            self.plot(cx - x, cy + y, mode);
            self.plot(cx + x, cy - y, mode);
            self.plot(cx - x, cy - y, mode);
        } else if x < y {
            self.plot(cx + x, cy + y, mode);
            self.plot(cx - x, cy + y, mode);
            self.plot(cx + x, cy - y, mode);
            self.plot(cx - x, cy - y, mode);
            self.plot(cx + y, cy + x, mode);
            self.plot(cx - y, cy + x, mode);
            self.plot(cx + y, cy - x, mode);
            self.plot(cx - y, cy - x, mode);
        }
    }

    /// Draw a one-pixel rectangle outline with corners `(x1, y1)`, `(x2, y2)`
    pub fn draw_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.draw_line(x1, y1, x2, y1, mode);
        self.draw_line(x2, y1, x2, y2, mode);
        self.draw_line(x2, y2, x1, y2, mode);
        self.draw_line(x1, y2, x1, y1, mode);
    }

    /// Fill the rectangle with corners `(x1, y1)`, `(x2, y2)`
    ///
    /// Sweeps vertical lines from `x1` to `x2` inclusive; nothing is drawn
    /// when `x1 > x2`. Columns off the panel are skipped.
    pub fn draw_filled_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        for x in x1.max(0)..=x2.min(self.width() - 1) {
            self.draw_line(x, y1, x, y2, mode);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::framebuffer_len;

    pub(crate) const ONE_TILE: usize = framebuffer_len(1, 1);

    pub(crate) fn canvas() -> Canvas<ONE_TILE> {
        Canvas::new(TileGrid::new(1, 1)).unwrap()
    }

    /// Count lit pixels
    pub(crate) fn lit(canvas: &Canvas<ONE_TILE>) -> usize {
        canvas
            .framebuffer()
            .as_bytes()
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum()
    }

    #[test]
    fn test_blend_table() {
        use GraphicsMode::*;

        // (mode, value, initial bit, expected bit)
        let cases = [
            (Normal, true, false, true),
            (Normal, true, true, true),
            (Normal, false, true, false),
            (Normal, false, false, false),
            (Inverse, true, true, false),
            (Inverse, true, false, false),
            (Inverse, false, false, true),
            (Inverse, false, true, true),
            (Toggle, true, false, true),
            (Toggle, true, true, false),
            (Toggle, false, true, true),
            (Toggle, false, false, false),
            (Or, true, false, true),
            (Or, true, true, true),
            (Or, false, false, false),
            (Or, false, true, true),
            (Nor, true, true, false),
            (Nor, true, false, false),
            (Nor, false, true, true),
            (Nor, false, false, false),
        ];

        for (mode, value, initial, expected) in cases {
            let mut c = canvas();
            c.write_pixel(10, 9, Normal, initial);
            c.write_pixel(10, 9, mode, value);
            assert_eq!(
                c.pixel(10, 9),
                Some(expected),
                "{:?} value={} initial={}",
                mode,
                value,
                initial
            );
            // Nothing else touched
            assert_eq!(lit(&c), expected as usize);
        }
    }

    #[test]
    fn test_write_pixel_out_of_range_is_noop() {
        let mut c = canvas();
        c.clear(false);
        let before: [u8; ONE_TILE] = c.framebuffer().as_bytes().try_into().unwrap();

        c.write_pixel(-1, 0, GraphicsMode::Normal, false);
        c.write_pixel(0, -1, GraphicsMode::Normal, false);
        c.write_pixel(32, 0, GraphicsMode::Normal, false);
        c.write_pixel(0, 16, GraphicsMode::Normal, false);

        assert_eq!(c.framebuffer().as_bytes(), &before[..]);
    }

    #[test]
    fn test_clear_after_drawing() {
        let mut c = canvas();
        c.draw_circle(15, 8, 6, GraphicsMode::Normal);
        c.draw_line(0, 0, 31, 15, GraphicsMode::Toggle);
        c.clear(true);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn test_line_single_point() {
        let mut c = canvas();
        c.draw_line(5, 5, 5, 5, GraphicsMode::Normal);
        assert_eq!(lit(&c), 1);
        assert_eq!(c.pixel(5, 5), Some(true));
    }

    #[test]
    fn test_line_shallow() {
        let mut c = canvas();
        c.draw_line(0, 0, 10, 4, GraphicsMode::Normal);

        let expected = [
            (0, 0),
            (1, 0),
            (2, 1),
            (3, 1),
            (4, 2),
            (5, 2),
            (6, 2),
            (7, 3),
            (8, 3),
            (9, 4),
            (10, 4),
        ];
        assert_eq!(lit(&c), expected.len());
        for (x, y) in expected {
            assert_eq!(c.pixel(x, y), Some(true), "({}, {})", x, y);
        }
    }

    #[test]
    fn test_line_reverse_matches() {
        let mut forward = canvas();
        let mut reverse = canvas();
        forward.draw_line(0, 0, 10, 4, GraphicsMode::Normal);
        reverse.draw_line(10, 4, 0, 0, GraphicsMode::Normal);
        assert_eq!(
            forward.framebuffer().as_bytes(),
            reverse.framebuffer().as_bytes()
        );
    }

    #[test]
    fn test_line_vertical_and_clipped() {
        let mut c = canvas();
        c.draw_line(3, -5, 3, 20, GraphicsMode::Normal);
        assert_eq!(lit(&c), 16);
        for y in 0..16 {
            assert_eq!(c.pixel(3, y), Some(true));
        }
    }

    #[test]
    fn test_circle_radius_zero() {
        let mut c = canvas();
        c.draw_circle(4, 4, 0, GraphicsMode::Normal);
        assert_eq!(lit(&c), 1);
        assert_eq!(c.pixel(4, 4), Some(true));
    }

    #[test]
    fn test_circle_toggle_writes_each_point_once() {
        // A duplicated write would toggle a pixel back off
        let mut once = canvas();
        let mut toggled = canvas();
        once.draw_circle(15, 7, 5, GraphicsMode::Normal);
        toggled.draw_circle(15, 7, 5, GraphicsMode::Toggle);
        assert_eq!(
            once.framebuffer().as_bytes(),
            toggled.framebuffer().as_bytes()
        );
    }

    #[test]
    fn test_circle_symmetry() {
        let mut c = canvas();
        let (cx, cy) = (15, 7);
        c.draw_circle(cx, cy, 6, GraphicsMode::Normal);

        for y in 0..16 {
            for x in 0..32 {
                if c.pixel(x, y) == Some(true) {
                    assert_eq!(c.pixel(2 * cx - x, y), Some(true));
                    assert_eq!(c.pixel(x, 2 * cy - y), Some(true));
                }
            }
        }
        assert_eq!(c.pixel(cx, cy - 6), Some(true));
        assert_eq!(c.pixel(cx + 6, cy), Some(true));
    }

    #[test]
    fn test_box_outline() {
        let mut c = canvas();
        c.draw_box(2, 3, 6, 7, GraphicsMode::Normal);

        // Perimeter of a 5x5 box
        assert_eq!(lit(&c), 16);
        assert_eq!(c.pixel(2, 3), Some(true));
        assert_eq!(c.pixel(6, 7), Some(true));
        assert_eq!(c.pixel(4, 5), Some(false));
    }

    #[test]
    fn test_filled_box() {
        let mut c = canvas();
        c.draw_filled_box(2, 3, 6, 7, GraphicsMode::Normal);
        assert_eq!(lit(&c), 25);

        // Reversed x range draws nothing
        let mut c = canvas();
        c.draw_filled_box(6, 3, 2, 7, GraphicsMode::Normal);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn test_filled_box_inverse_clears() {
        let mut c = canvas();
        c.clear(false);
        c.draw_filled_box(0, 0, 31, 15, GraphicsMode::Inverse);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn test_filled_box_clips_columns() {
        let mut c = canvas();
        c.draw_filled_box(i32::MIN, 2, i32::MAX, 3, GraphicsMode::Normal);
        assert_eq!(lit(&c), 64);
        assert_eq!(c.pixel(0, 2), Some(true));
        assert_eq!(c.pixel(31, 3), Some(true));
    }

    #[test]
    fn test_line_with_extreme_endpoints() {
        let mut c = canvas();
        c.draw_line(i32::MIN, 0, 10, 0, GraphicsMode::Normal);
        assert_eq!(lit(&c), 11);
        assert_eq!(c.pixel(10, 0), Some(true));
        assert_eq!(c.pixel(11, 0), Some(false));

        // Diagonal across the whole i32 range still crosses at (t, t)
        let mut c = canvas();
        c.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, GraphicsMode::Normal);
        assert_eq!(lit(&c), 16);
        assert!((0..16).all(|t| c.pixel(t, t) == Some(true)));

        // Both ends beyond the same edge
        let mut c = canvas();
        c.draw_line(-5, i32::MIN, -1, i32::MAX, GraphicsMode::Normal);
        assert_eq!(lit(&c), 0);
    }

    #[test]
    fn test_line_entering_from_far_off_panel() {
        let mut jumped = canvas();
        jumped.draw_line(-1_000_000, -250_000, 31, 7, GraphicsMode::Normal);

        // Same line walked one step at a time from its far endpoint
        let mut walked = canvas();
        let (x1, y1, x2, y2) = (-1_000_000i64, -250_000i64, 31i64, 7i64);
        let (dx, dy) = ((x2 - x1) << 1, (y2 - y1) << 1);
        let (mut x, mut y, mut fraction) = (x1, y1, dy - (dx >> 1));
        loop {
            if (0..32).contains(&x) && (0..16).contains(&y) {
                walked.write_pixel(x as i32, y as i32, GraphicsMode::Normal, true);
            }
            if x == x2 {
                break;
            }
            if fraction >= 0 {
                y += 1;
                fraction -= dx;
            }
            x += 1;
            fraction += dy;
        }

        assert!(lit(&walked) > 0);
        assert_eq!(jumped.framebuffer().as_bytes(), walked.framebuffer().as_bytes());
    }

    #[test]
    fn test_circle_with_extreme_radius() {
        let mut c = canvas();

        // Panel entirely inside the circle
        c.draw_circle(0, 0, 600_000_000, GraphicsMode::Normal);
        c.draw_circle(i32::MAX, i32::MIN, i32::MAX, GraphicsMode::Normal);
        assert_eq!(lit(&c), 0);

        // Bottom of a large circle dips onto the panel
        c.draw_circle(16, 100_005, 100_000, GraphicsMode::Normal);
        assert_eq!(c.pixel(16, 5), Some(true));
        assert_eq!(c.pixel(16, 4), Some(false));
    }
}
