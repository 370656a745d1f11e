//! Monochrome frame buffer
//!
//! 128x64 pixels, 1 bit per pixel, organized as 8 horizontal pages of
//! 8 pixel rows each. This is the native GDDRAM layout of SSD1306-class
//! controllers, so a page can be sent to the panel as-is.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / 8;

/// Off-screen page buffer
#[derive(Clone)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set one pixel, ignoring out-of-bounds coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let bit = 1 << (y % 8);
        if on {
            self.pages[y / 8][x] |= bit;
        } else {
            self.pages[y / 8][x] &= !bit;
        }
    }

    /// Read one pixel (off when out of bounds)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw bytes of one page
    pub fn page(&self, index: usize) -> &[u8; WIDTH] {
        &self.pages[index]
    }

    /// Check if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.iter().all(|&b| b == 0))
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|b| b.count_ones())
            .sum()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
