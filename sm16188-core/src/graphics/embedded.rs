//! `embedded-graphics` integration
//!
//! Lets e-g primitives, images and mono fonts render into the same
//! framebuffer as the native primitives. `On` pixels are written with
//! [`GraphicsMode::Normal`] set, `Off` pixels cleared.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use super::{Canvas, GraphicsMode};

impl<const N: usize> OriginDimensions for Canvas<N> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.grid().width()), u32::from(self.grid().height()))
    }
}

impl<const N: usize> DrawTarget for Canvas<N> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.write_pixel(point.x, point.y, GraphicsMode::Normal, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Canvas::clear(self, color.is_off());
        Ok(())
    }
}
