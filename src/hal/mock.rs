//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every collaborator the game talks
//! to, enabling development and testing on desktop without an ESP32.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDisplay`] | [`FrameBuffer`] | 128x64 pixel grid, records text and presents |
//! | [`MockMotion`] | [`MotionSensor`] | Settable gyro/accelerometer, failure injection |
//! | [`MockStick`] | [`AnalogStick`] | Settable ADC axes, failure injection |
//! | [`MockButton`] | [`InputPin`] | Active-low button with scripted presses |
//! | [`MockClock`] | [`Clock`] + [`DelayNs`] | Controllable time; delays advance it |
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::hal::{MockClock, MockDisplay};
//! use rs_bunkers::traits::{Clock, FrameBuffer};
//! use embedded_hal::delay::DelayNs;
//!
//! let mut display = MockDisplay::new();
//! display.set_pixel(3, 4, true);
//! display.draw_text("P:0", 0, 0);
//! display.present().unwrap();
//! assert!(display.pixel(3, 4));
//! assert!(display.has_text("P:0"));
//!
//! let mut clock = MockClock::new();
//! clock.delay_ms(50);
//! assert_eq!(clock.now_ms(), 50);
//! assert_eq!(clock.delays_ms, vec![50]);
//! ```
//!
//! [`FrameBuffer`]: crate::traits::FrameBuffer
//! [`MotionSensor`]: crate::traits::MotionSensor
//! [`AnalogStick`]: crate::traits::AnalogStick
//! [`Clock`]: crate::traits::Clock
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};

use crate::traits::{
    on_screen, AnalogStick, Clock, FrameBuffer, MotionSensor, SCREEN_HEIGHT, SCREEN_WIDTH,
};

// ============================================================================
// Display Mock
// ============================================================================

/// Mock 128x64 monochrome display.
///
/// Keeps a real pixel buffer plus the text drawn since the last clear, so
/// tests can assert on what a frame looks like. Every [`present`] takes a
/// snapshot of the text lines into [`frames`](Self::frames).
///
/// [`present`]: FrameBuffer::present
#[derive(Debug)]
pub struct MockDisplay {
    pixels: Vec<bool>,
    texts: Vec<(String, (i32, i32))>,
    /// Text lines of every presented frame, oldest first.
    pub frames: Vec<Vec<String>>,
    /// Number of times clear() was called.
    pub clear_count: usize,
    /// Number of present() calls, failed ones included.
    pub present_count: usize,
    /// When set, present() returns an error.
    pub fail_present: bool,
}

impl MockDisplay {
    /// Creates a blank display.
    pub fn new() -> Self {
        Self {
            pixels: vec![false; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            texts: Vec::new(),
            frames: Vec::new(),
            clear_count: 0,
            present_count: 0,
            fail_present: false,
        }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        on_screen(x, y).then(|| (y * SCREEN_WIDTH + x) as usize)
    }

    /// Sets every pixel to `on`.
    pub fn fill(&mut self, on: bool) {
        self.pixels.iter_mut().for_each(|p| *p = on);
    }

    /// Returns the pixel at `(x, y)`; off-screen reads are off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Number of lit pixels.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Text drawn since the last clear, with positions.
    pub fn texts(&self) -> &[(String, (i32, i32))] {
        &self.texts
    }

    /// Returns true if `text` was drawn since the last clear.
    pub fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|(t, _)| t == text)
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer for MockDisplay {
    type Error = ();

    fn clear(&mut self) {
        self.fill(false);
        self.texts.clear();
        self.clear_count += 1;
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = on;
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.texts.push((text.into(), (x, y)));
    }

    fn present(&mut self) -> Result<(), ()> {
        self.present_count += 1;
        if self.fail_present {
            return Err(());
        }
        self.frames
            .push(self.texts.iter().map(|(t, _)| t.clone()).collect());
        Ok(())
    }
}

// ============================================================================
// Sensor Mocks
// ============================================================================

/// Mock MPU6050.
///
/// Returns whatever was last set. At rest the accelerometer reports 1g on Z.
///
/// # Example
///
/// ```rust
/// use rs_bunkers::hal::MockMotion;
/// use rs_bunkers::traits::MotionSensor;
///
/// let mut mpu = MockMotion::new();
/// mpu.set_accel(0.0, 0.0, 2.0);
/// assert_eq!(mpu.acceleration_magnitude_squared().unwrap(), 4.0);
///
/// mpu.fail_reads(true);
/// assert!(mpu.angular_velocity().is_err());
/// ```
#[derive(Debug)]
pub struct MockMotion {
    /// Angular velocity around X and Y.
    pub gyro: (f32, f32),
    /// Acceleration along X, Y and Z in g.
    pub accel: (f32, f32, f32),
    /// Gyro reads fail while set.
    pub gyro_fails: bool,
    /// Accelerometer reads fail while set.
    pub accel_fails: bool,
    /// Number of successful reads.
    pub read_count: usize,
}

impl MockMotion {
    /// Creates a sensor lying still.
    pub fn new() -> Self {
        Self {
            gyro: (0.0, 0.0),
            accel: (0.0, 0.0, 1.0),
            gyro_fails: false,
            accel_fails: false,
            read_count: 0,
        }
    }

    /// Sets the angular velocity.
    pub fn set_gyro(&mut self, x: f32, y: f32) {
        self.gyro = (x, y);
    }

    /// Sets the acceleration.
    pub fn set_accel(&mut self, x: f32, y: f32, z: f32) {
        self.accel = (x, y, z);
    }

    /// Makes every read fail (or succeed again).
    pub fn fail_reads(&mut self, fail: bool) {
        self.gyro_fails = fail;
        self.accel_fails = fail;
    }

    /// Makes accelerometer reads fail (or succeed again).
    pub fn fail_accel(&mut self, fail: bool) {
        self.accel_fails = fail;
    }
}

impl Default for MockMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensor for MockMotion {
    type Error = ();

    fn angular_velocity(&mut self) -> Result<(f32, f32), ()> {
        if self.gyro_fails {
            return Err(());
        }
        self.read_count += 1;
        Ok(self.gyro)
    }

    fn acceleration(&mut self) -> Result<(f32, f32, f32), ()> {
        if self.accel_fails {
            return Err(());
        }
        self.read_count += 1;
        Ok(self.accel)
    }
}

/// Mock two-axis joystick, centered by default.
#[derive(Debug)]
pub struct MockStick {
    /// Raw `(x, y)` ADC samples.
    pub axes: (u16, u16),
    /// Reads fail while set.
    pub fails: bool,
}

impl MockStick {
    /// Creates a stick at rest (2048, 2048).
    pub fn new() -> Self {
        Self {
            axes: (2048, 2048),
            fails: false,
        }
    }

    /// Sets the raw samples.
    pub fn set_axes(&mut self, x: u16, y: u16) {
        self.axes = (x, y);
    }

    /// Makes reads fail (or succeed again).
    pub fn fail_reads(&mut self, fail: bool) {
        self.fails = fail;
    }
}

impl Default for MockStick {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogStick for MockStick {
    type Error = ();

    fn read_axes(&mut self) -> Result<(u16, u16), ()> {
        if self.fails {
            Err(())
        } else {
            Ok(self.axes)
        }
    }
}

// ============================================================================
// Button Mock
// ============================================================================

/// Mock active-low push button.
///
/// Scripted levels are consumed one per read; once the script runs out the
/// button stays at its resting level.
///
/// # Example
///
/// ```rust
/// use rs_bunkers::hal::MockButton;
/// use embedded_hal::digital::InputPin;
///
/// let mut button = MockButton::new();
/// button.press_after(2);
/// assert!(button.is_high().unwrap());
/// assert!(button.is_high().unwrap());
/// assert!(button.is_low().unwrap()); // pressed
/// ```
#[derive(Debug, Default)]
pub struct MockButton {
    script: VecDeque<bool>,
    pressed: bool,
    /// Number of reads.
    pub poll_count: usize,
}

impl MockButton {
    /// Creates a released button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds the button down (or releases it).
    pub fn set_pressed(&mut self, pressed: bool) {
        self.script.clear();
        self.pressed = pressed;
    }

    /// Reports released for `polls` reads, then pressed.
    pub fn press_after(&mut self, polls: usize) {
        self.script.clear();
        self.script.extend(core::iter::repeat(false).take(polls));
        self.pressed = true;
    }

    fn next_pressed(&mut self) -> bool {
        self.poll_count += 1;
        self.script.pop_front().unwrap_or(self.pressed)
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.next_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.next_pressed())
    }
}

// ============================================================================
// Clock Mock
// ============================================================================

/// Mock clock for testing time-dependent behavior.
///
/// Delays advance the clock and are recorded in
/// [`delays_ms`](Self::delays_ms). An optional auto-advance moves time
/// forward on every [`now_ms`](Clock::now_ms) read, simulating work done
/// between two readings.
///
/// # Example
///
/// ```rust
/// use rs_bunkers::hal::MockClock;
/// use rs_bunkers::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: Cell<u64>,
    auto_advance_ms: u64,
    pending_ns: u64,
    /// Every delay requested, in milliseconds (rounded down).
    pub delays_ms: Vec<u32>,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances time by `ms` on every read after returning the reading.
    pub fn with_auto_advance(mut self, ms: u64) -> Self {
        self.auto_advance_ms = ms;
        self
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }

    /// Sum of every recorded delay.
    pub fn total_delay_ms(&self) -> u64 {
        self.delays_ms.iter().map(|&d| d as u64).sum()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let now = self.current_ms.get();
        self.current_ms.set(now + self.auto_advance_ms);
        now
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        let total = self.pending_ns + ns as u64;
        let ms = total / 1_000_000;
        self.pending_ns = total % 1_000_000;
        self.delays_ms.push(ms as u32);
        self.advance(ms);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.advance(ms as u64);
    }
}
