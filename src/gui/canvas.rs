//! RGB frame buffer the panel draws into.
//!
//! [`Canvas`] wraps an [`image::RgbImage`] and implements the embedded-graphics
//! [`DrawTarget`] trait, so primitives and mono fonts render straight into the
//! image. Pixels outside the frame are dropped.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use image::{Rgb, RgbImage};

/// Background of a freshly cleared frame.
pub const BACKGROUND: Rgb888 = hex(0x313431);

/// Converts a `0xRRGGBB` literal into a color.
pub const fn hex(rgb: u32) -> Rgb888 {
    Rgb888::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Fixed-size frame presented once per cycle.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Frame of `width` x `height` pixels filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width, height, to_rgb(BACKGROUND)),
        }
    }

    /// Refills the frame with [`BACKGROUND`].
    pub fn reset(&mut self) {
        let bg = to_rgb(BACKGROUND);
        for pixel in self.image.pixels_mut() {
            *pixel = bg;
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb888::new(p[0], p[1], p[2]))
    }

    /// Writes the frame as packed `0RGB` words, the layout window backends expect.
    pub fn write_argb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.image.pixels().map(|p| {
            let [r, g, b] = p.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        }));
    }
}

fn to_rgb(color: Rgb888) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.image.dimensions();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < width && y < height {
                self.image.put_pixel(x, y, to_rgb(color));
            }
        }
        Ok(())
    }
}
