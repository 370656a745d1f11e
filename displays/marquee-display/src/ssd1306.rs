//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.
//! Drawing goes to a local frame buffer; [`Ssd1306::flush`] sends it to
//! the panel. Hardware scroll commands act on the panel immediately.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;

use marquee_core::{Panel, ScrollDirection};

use crate::backend::DisplayError;
use crate::framebuffer::{FrameBuffer, HEIGHT, PAGES, WIDTH};
use crate::text;

/// SSD1306 I2C address (typically 0x3C or 0x3D)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
    pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: FrameBuffer,
    initialized: bool,
    scrolling: Option<ScrollDirection>,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    /// Create a new SSD1306 driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            initialized: false,
            scrolling: None,
        }
    }

    /// Initialize the display
    ///
    /// Uses the internal charge pump and horizontal addressing, so a full
    /// frame is sent as one sequential page run.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_ALL_ON_RESUME,
            cmd::SET_NORMAL,
            cmd::DEACTIVATE_SCROLL,
            cmd::DISPLAY_ON,
        ];

        self.commands(init_cmds)?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("SSD1306 initialized at 0x{:02x}", self.address);

        Ok(())
    }

    /// Check if [`Ssd1306::init`] succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Active hardware scroll, if any
    pub fn scrolling(&self) -> Option<ScrollDirection> {
        self.scrolling
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|_e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("SSD1306 command 0x{:02x} failed: {}", cmd, defmt::Debug2Format(&_e));
                DisplayError::Communication
            })
    }

    fn commands(&mut self, cmds: &[u8]) -> Result<(), DisplayError> {
        for &c in cmds {
            self.command(c)?;
        }
        Ok(())
    }

    /// Borrow the frame buffer
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutably borrow the frame buffer
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Flush the frame buffer to the display
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        self.commands(&[
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ])?;

        for page in 0..PAGES {
            // Send page data
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.buffer.page(page));
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }

    /// Start continuous horizontal scrolling of every page
    pub fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), DisplayError> {
        let setup = match direction {
            ScrollDirection::Left => cmd::LEFT_HORIZONTAL_SCROLL,
            ScrollDirection::Right => cmd::RIGHT_HORIZONTAL_SCROLL,
        };
        self.commands(&[
            setup,
            0x00, // Dummy
            0x00, // Start page
            0x00, // Frame interval
            (PAGES - 1) as u8,
            0x00, // Dummy
            0xFF, // Dummy
            cmd::ACTIVATE_SCROLL,
        ])?;
        self.scrolling = Some(direction);
        Ok(())
    }

    /// Stop hardware scrolling
    pub fn stop_scroll(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::DEACTIVATE_SCROLL)?;
        self.scrolling = None;
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.buffer.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl<I2C: I2c> Panel for Ssd1306<I2C> {
    type Error = DisplayError;

    fn render_text(
        &mut self,
        row_start: u8,
        char_count: u8,
        font_size: u8,
        text: &str,
    ) -> Result<(), DisplayError> {
        match text::draw_text(&mut self.buffer, row_start, char_count, font_size, text) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn clear_panel(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush()
    }

    fn start_scroll(&mut self, direction: ScrollDirection) -> Result<(), DisplayError> {
        Ssd1306::start_scroll(self, direction)
    }

    fn stop_scroll(&mut self) -> Result<(), DisplayError> {
        Ssd1306::stop_scroll(self)
    }
}
