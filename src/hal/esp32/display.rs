//! SSD1306 OLED frame buffer for ESP32.
//!
//! Drawing goes into the driver's RAM buffer; [`present`] flushes it over
//! I2C in one transfer per frame.
//!
//! # Wiring
//!
//! - SCL → GPIO18
//! - SDA → GPIO19 (bus shared with the MPU6050)
//! - VCC → 3.3V
//! - GND → GND
//!
//! [`present`]: crate::traits::FrameBuffer::present

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use crate::traits::{on_screen, FrameBuffer};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver<I2C> = Ssd1306<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// SSD1306 OLED display for ESP32.
///
/// Generic over the I2C bus so it can sit on a dedicated driver or on a
/// shared-bus device next to the motion sensor.
pub struct Esp32Display<I2C> {
    display: DisplayDriver<I2C>,
}

impl<I2C: I2c> Esp32Display<I2C> {
    /// Creates and initializes the display at address 0x3C.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel does not acknowledge initialization.
    pub fn new(i2c: I2C) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init()?;
        display.clear_buffer();
        display.flush()?;

        Ok(Self { display })
    }
}

impl<I2C: I2c> FrameBuffer for Esp32Display<I2C> {
    type Error = DisplayError;

    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if on_screen(x, y) {
            self.display.set_pixel(x as u32, y as u32, on);
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        // Drawing into the RAM buffer cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display);
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.display.flush()?;
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SSD1306 I2C transfer failed")
    }
}

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}
