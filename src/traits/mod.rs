//! Trait definitions for hardware abstraction.
//!
//! This module defines the collaborator abstractions that allow rs-bunkers to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Swap the display, motion sensor and joystick independently
//!
//! # Submodules
//!
//! - `hardware`: Motion sensor, analog stick, clock
//! - `display`: Frame buffer trait
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`FrameBuffer`]: 128x64 monochrome drawing surface
//! - [`MotionSensor`]: Gyroscope and accelerometer
//! - [`AnalogStick`]: Two-axis 12-bit joystick
//! - [`Clock`]: Time source for `no_std` environments

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;
