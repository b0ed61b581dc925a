//! ESP32 hardware abstraction layer for the Los Bunkers console.
//!
//! This module provides hardware implementations for an ESP32 DevKit wired
//! to an SSD1306 OLED, an MPU6050 and an analog joystick.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 (Xtensa dual-core 240MHz)
//! - **Display**: SSD1306 128x64 OLED (I2C)
//! - **Motion**: MPU6050 gyroscope/accelerometer (same I2C bus)
//! - **Joystick**: two-axis analog stick with push switch
//! - **Shoot**: momentary push button
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod buttons;
mod clock;
mod joystick;
mod motion;

pub use buttons::ButtonIrq;
pub use clock::Esp32Clock;
pub use joystick::Esp32Joystick;
pub use motion::{Mpu6050, MPU6050_ADDR};

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

/// Pin assignments for the ESP32 DevKit.
pub mod pins {
    // =========================================================================
    // I2C Bus (SSD1306 + MPU6050)
    // =========================================================================

    /// I2C clock line
    pub const I2C_SCL: i32 = 18;

    /// I2C data line
    pub const I2C_SDA: i32 = 19;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;

    // =========================================================================
    // Joystick
    // =========================================================================

    /// X axis (ADC1, input only)
    pub const JOY_X: i32 = 34;

    /// Y axis (ADC1, input only)
    pub const JOY_Y: i32 = 35;

    /// Push switch, toggles the control mode (active low)
    pub const JOY_SW: i32 = 32;

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Shoot button (active low)
    pub const SHOOT: i32 = 16;
}
