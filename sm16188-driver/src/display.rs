//! SM16188 display facade
//!
//! Ties a [`Canvas`] to the two data lines and a clock. Drawing calls only
//! touch the framebuffer; nothing reaches the panel until [`Sm16188::refresh`]
//! clocks the whole buffer out.

use sm16188_core::config::{Brightness, ConfigError, DisplayConfig, TileGrid};
use sm16188_core::graphics::{Canvas, GraphicsMode, TestPattern};
use sm16188_core::text::{Font, Marquee};
use sm16188_hal::{Monotonic, OutputPin, TristatePin};

use crate::transfer::{BitTiming, DataLines};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Configuration rejected (empty grid, undersized framebuffer, bad timing)
    Config(ConfigError),
}

impl From<ConfigError> for DisplayError {
    fn from(err: ConfigError) -> Self {
        DisplayError::Config(err)
    }
}

/// One chained SM16188 panel
///
/// `N` is the framebuffer capacity in bytes; size it with
/// [`framebuffer_len`](sm16188_core::config::framebuffer_len).
pub struct Sm16188<'f, E, O, C, const N: usize> {
    canvas: Canvas<N>,
    lines: DataLines<E, O>,
    clock: C,
    timing: BitTiming,
    brightness: Brightness,
    font: Option<Font<'f>>,
    marquee: Marquee,
}

impl<'f, E, O, C, const N: usize> Sm16188<'f, E, O, C, N>
where
    E: OutputPin,
    O: OutputPin,
    C: Monotonic,
{
    /// Set up the display
    ///
    /// Validates the configuration and timing, drives both lines low and
    /// starts from an all-off framebuffer.
    pub fn new(
        config: DisplayConfig,
        lines: DataLines<E, O>,
        clock: C,
        timing: BitTiming,
    ) -> Result<Self, DisplayError> {
        config.validate()?;
        timing.validate()?;

        let mut display = Self {
            canvas: Canvas::new(config.grid)?,
            lines,
            clock,
            timing,
            brightness: config.brightness,
            font: None,
            marquee: Marquee::new(),
        };
        display.lines.idle();
        display.canvas.clear(true);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SM16188: {}x{} tiles, {} byte framebuffer, brightness {}",
            config.grid.columns,
            config.grid.rows,
            config.grid.framebuffer_len(),
            display.brightness.get()
        );

        Ok(display)
    }

    /// Tile arrangement
    pub fn grid(&self) -> &TileGrid {
        self.canvas.grid()
    }

    /// Drawing surface
    pub fn canvas(&self) -> &Canvas<N> {
        &self.canvas
    }

    /// Mutable drawing surface, e.g. for `embedded-graphics`
    pub fn canvas_mut(&mut self) -> &mut Canvas<N> {
        &mut self.canvas
    }

    pub fn timing(&self) -> &BitTiming {
        &self.timing
    }

    /// Time one [`refresh`](Self::refresh) keeps the CPU busy
    pub fn frame_micros(&self) -> u64 {
        self.timing.frame_micros(self.canvas.framebuffer().len())
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Set the brightness sent with the next refresh (clamped to 0-15)
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = Brightness::new(level);

        #[cfg(feature = "defmt")]
        defmt::debug!("SM16188: brightness {}", self.brightness.get());
    }

    /// Use `font` for subsequent text operations
    pub fn select_font(&mut self, font: Font<'f>) {
        self.font = Some(font);
    }

    /// Currently selected font
    pub fn font(&self) -> Option<&Font<'f>> {
        self.font.as_ref()
    }

    /// Layout of the last marquee drawn
    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    /// Clear the framebuffer to all off (`all_off`) or all on
    pub fn clear(&mut self, all_off: bool) {
        self.canvas.clear(all_off);
    }

    pub fn write_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode, value: bool) {
        self.canvas.write_pixel(x, y, mode, value);
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.canvas.draw_line(x1, y1, x2, y2, mode);
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, mode: GraphicsMode) {
        self.canvas.draw_circle(cx, cy, radius, mode);
    }

    pub fn draw_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.canvas.draw_box(x1, y1, x2, y2, mode);
    }

    pub fn draw_filled_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.canvas.draw_filled_box(x1, y1, x2, y2, mode);
    }

    pub fn draw_test_pattern(&mut self, pattern: TestPattern) {
        self.canvas.draw_test_pattern(pattern);
    }

    /// Draw one character in the selected font
    ///
    /// Returns the glyph width, 0 if undefined or no font is selected, -1
    /// if the position is right of or below the panel.
    pub fn draw_char(&mut self, x: i32, y: i32, code: u8, mode: GraphicsMode) -> i32 {
        match self.font {
            Some(font) => self.canvas.draw_char(&font, x, y, code, mode),
            None => 0,
        }
    }

    /// Draw a string in the selected font; no-op without a font
    pub fn draw_string(&mut self, x: i32, y: i32, text: &[u8], mode: GraphicsMode) {
        if let Some(font) = self.font {
            self.canvas.draw_string(&font, x, y, text, mode);
        }
    }

    /// Store `text` as the marquee and draw it at `(left, top)`
    pub fn draw_marquee(&mut self, text: &[u8], left: i32, top: i32) {
        if let Some(font) = self.font {
            self.canvas
                .draw_marquee(&font, &mut self.marquee, text, left, top);
        }
    }

    /// Send the framebuffer and brightness to the panel
    ///
    /// Blocks for [`frame_micros`](Self::frame_micros). Called directly,
    /// interrupts are masked one byte at a time. Called through
    /// [`SharedDisplay::with`](crate::SharedDisplay::with), the lock's
    /// critical section covers the call, so interrupts stay masked for at
    /// most one full refresh.
    pub fn refresh(&mut self) {
        self.lines.send_frame(
            &self.clock,
            &self.timing,
            self.canvas.framebuffer().as_bytes(),
            self.brightness,
        );
    }
}

impl<'f, E, O, C, const N: usize> Sm16188<'f, E, O, C, N>
where
    E: TristatePin,
    O: TristatePin,
    C: Monotonic,
{
    /// Release both lines to high impedance and hand back the resources
    pub fn teardown(self) -> (E, O, C) {
        let DataLines { mut even, mut odd } = self.lines;
        even.release();
        odd.release();

        #[cfg(feature = "defmt")]
        defmt::debug!("SM16188: lines released");

        (even, odd, self.clock)
    }
}
