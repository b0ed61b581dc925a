//! Hardware abstraction traits for motion sensing, analog input, and time.
//!
//! This module defines the sensor interfaces that allow rs-bunkers to run
//! the same game on an ESP32 and on a desktop with mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotionSensor`] | Gyroscope + accelerometer (MPU6050) |
//! | [`AnalogStick`] | Two-axis 12-bit analog joystick |
//! | [`Clock`] | Monotonic millisecond time source |
//!
//! Delays use [`embedded_hal::delay::DelayNs`] and polled buttons use
//! [`embedded_hal::digital::InputPin`], so any embedded-hal driver plugs in
//! directly.
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::traits::MotionSensor;
//! use rs_bunkers::hal::MockMotion;
//!
//! let mut mpu = MockMotion::new();
//! mpu.set_gyro(0.5, -0.2);
//! assert_eq!(mpu.angular_velocity().unwrap(), (0.5, -0.2));
//! ```

/// Full-scale value of a 12-bit ADC reading.
pub const ADC_MAX: u16 = 4095;

/// Gyroscope and accelerometer trait.
///
/// Readings are in sensor-native units. Acceleration is gravity-normalized,
/// so a sensor lying still reports a magnitude of roughly 1.0.
///
/// # Implementation Notes
///
/// - Each call performs a fresh bus transaction; there is no caching
/// - Errors mean the sample is unavailable for this frame, the caller
///   falls back to its last known value
pub trait MotionSensor {
    /// Error type for sensor reads.
    type Error;

    /// Returns the angular velocity around the X and Y axes.
    fn angular_velocity(&mut self) -> Result<(f32, f32), Self::Error>;

    /// Returns the acceleration along X, Y and Z.
    fn acceleration(&mut self) -> Result<(f32, f32, f32), Self::Error>;

    /// Squared magnitude of the acceleration vector.
    ///
    /// Compare against a squared threshold to avoid a square root.
    fn acceleration_magnitude_squared(&mut self) -> Result<f32, Self::Error> {
        let (ax, ay, az) = self.acceleration()?;
        Ok(ax * ax + ay * ay + az * az)
    }
}

/// Two-axis analog joystick trait.
///
/// Values are raw 12-bit ADC samples (`0..=4095`) with the stick at rest
/// near the middle of the range.
pub trait AnalogStick {
    /// Error type for ADC reads.
    type Error;

    /// Returns the raw `(x, y)` samples.
    fn read_axes(&mut self) -> Result<(u16, u16), Self::Error>;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debouncing and frame pacing.
/// On ESP32 this wraps the high-resolution timer; in tests use
/// [`MockClock`](crate::hal::MockClock).
///
/// # Example
///
/// ```rust
/// use rs_bunkers::traits::Clock;
/// use rs_bunkers::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
