//! Aim control from the gyroscope or the analog joystick.
//!
//! [`InputController`] owns the aim cursor and turns raw sensor samples
//! into cursor movement once per frame. Both control paths are
//! incremental: a deflection outside the dead-zone moves the cursor a
//! fixed step in its direction, and a centered stick or still sensor leaves
//! the cursor where it is.
//!
//! # Control Modes
//!
//! | Mode | Source | Step |
//! |------|--------|------|
//! | [`ControlMode::Gyro`] | MPU6050 angular velocity | 3px, 6px while fast-moving |
//! | [`ControlMode::Joystick`] | Two 12-bit ADC axes | 2px |
//!
//! The accelerometer is read in both modes. A shake stronger than the
//! fast-move threshold enlarges the crosshair and widens the hitbox.
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::config::InputConfig;
//! use rs_bunkers::hal::{MockMotion, MockStick};
//! use rs_bunkers::input::InputController;
//!
//! let mut input = InputController::new(&InputConfig::default());
//! let mut mpu = MockMotion::new();
//! let mut stick = MockStick::new();
//!
//! mpu.set_gyro(0.0, 1.5); // rotate around Y: move right
//! input.update(&mut mpu, &mut stick).unwrap();
//! assert_eq!(input.aim().x, 64);
//! ```

use crate::config::InputConfig;
use crate::entities::Aim;
use crate::events::Debouncer;
use crate::sprite::{render, scale, PixelMask, ScaledBitmap, AIM, QUICK_AIM};
use crate::traits::{AnalogStick, FrameBuffer, MotionSensor};

/// Scale applied to the quick-aim sprite while fast-moving.
pub const FAST_AIM_SCALE: usize = 2;

/// Active aim control source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ControlMode {
    /// Steer by tilting the board (gyroscope).
    #[default]
    Gyro,
    /// Steer with the analog stick.
    Joystick,
}

impl ControlMode {
    /// The other mode.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            ControlMode::Gyro => ControlMode::Joystick,
            ControlMode::Joystick => ControlMode::Gyro,
        }
    }

    /// Short label for logs and the HUD.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Gyro => "gyro",
            ControlMode::Joystick => "joystick",
        }
    }
}

/// Which sensor failed to deliver a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    /// Angular velocity read failed.
    Gyroscope,
    /// Acceleration read failed.
    Accelerometer,
    /// ADC read failed.
    Joystick,
}

impl SensorKind {
    const fn bit(self) -> u8 {
        match self {
            SensorKind::Gyroscope => 1 << 0,
            SensorKind::Accelerometer => 1 << 1,
            SensorKind::Joystick => 1 << 2,
        }
    }
}

/// A sensor read failed this frame; the last known value was kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorUnavailable {
    /// The failing sensor.
    pub sensor: SensorKind,
}

impl core::fmt::Display for SensorUnavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} unavailable, holding last value", self.sensor)
    }
}

/// Zeroes `value` when its magnitude is strictly below `deadzone`.
#[inline]
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value > -deadzone && value < deadzone {
        0.0
    } else {
        value
    }
}

/// Centers a raw ADC sample and zeroes it inside the dead-zone.
///
/// Unlike the gyro path the boundary is inclusive: a deflection must
/// exceed `deadzone` to count.
#[inline]
pub fn centered_deflection(raw: u16, center: u16, deadzone: u16) -> i32 {
    let diff = raw as i32 - center as i32;
    if diff.unsigned_abs() <= deadzone as u32 {
        0
    } else {
        diff
    }
}

/// Fixed step in the direction of `value`, zero for zero.
#[inline]
fn step_toward_f32(value: f32, step: i32) -> i32 {
    if value > 0.0 {
        step
    } else if value < 0.0 {
        -step
    } else {
        0
    }
}

/// Aim cursor controller.
///
/// Call [`update`](Self::update) once per frame from the main loop, and
/// [`toggle_mode`](Self::toggle_mode) for every mode-switch event drained
/// from the event queue.
pub struct InputController {
    mode: ControlMode,
    aim: Aim,
    fast_move: bool,
    debounce: Debouncer,
    config: InputConfig,
    /// Enlarged crosshair, built once
    quick_aim: Option<ScaledBitmap>,
    /// Sensors whose last read failed, one `SensorKind::bit` each
    outages: u8,
}

impl InputController {
    /// Creates a controller with the cursor centered.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            mode: config.initial_mode,
            aim: Aim::centered(),
            fast_move: false,
            debounce: Debouncer::new(config.mode_debounce_ms),
            config: config.clone(),
            quick_aim: scale(&QUICK_AIM, FAST_AIM_SCALE).ok(),
            outages: 0,
        }
    }

    /// Current control mode.
    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Current cursor.
    #[inline]
    pub fn aim(&self) -> Aim {
        self.aim
    }

    /// True while the accelerometer reports a fast movement.
    #[inline]
    pub fn fast_move(&self) -> bool {
        self.fast_move
    }

    /// Cursor step the gyro path uses this frame.
    #[inline]
    pub fn gyro_step(&self) -> i32 {
        if self.fast_move {
            self.config.gyro_fast_step
        } else {
            self.config.gyro_step
        }
    }

    /// Puts the cursor back to the center of the screen.
    pub fn recenter(&mut self) {
        self.aim.recenter();
    }

    /// Toggles gyro/joystick control unless a switch was accepted less than
    /// the debounce window ago. Returns true if the mode changed.
    pub fn toggle_mode(&mut self, at_ms: u64) -> bool {
        if !self.debounce.accept(at_ms) {
            log::debug!("mode switch at {}ms ignored (bounce)", at_ms);
            return false;
        }
        self.mode = self.mode.toggled();
        log::info!("control mode: {}", self.mode.as_str());
        true
    }

    /// Reads the active sensor and moves the cursor, then refreshes the
    /// fast-move state from the accelerometer.
    ///
    /// A failed read keeps the previous cursor (or fast-move flag). The first
    /// failure of a sensor is logged as a warning and repeats at debug level
    /// until it reads again. The first failure of the frame is returned.
    pub fn update<S, J>(&mut self, motion: &mut S, stick: &mut J) -> Result<(), SensorUnavailable>
    where
        S: MotionSensor,
        J: AnalogStick,
    {
        let (steer_sensor, steer) = match self.mode {
            ControlMode::Gyro => (SensorKind::Gyroscope, self.steer_gyro(motion)),
            ControlMode::Joystick => (SensorKind::Joystick, self.steer_joystick(stick)),
        };
        let shake = self.sense_fast_move(motion);

        self.track_outage(steer_sensor, &steer);
        self.track_outage(SensorKind::Accelerometer, &shake);
        steer.and(shake)
    }

    /// Whether the last read of `sensor` failed.
    #[inline]
    pub fn sensor_down(&self, sensor: SensorKind) -> bool {
        self.outages & sensor.bit() != 0
    }

    fn track_outage(&mut self, sensor: SensorKind, result: &Result<(), SensorUnavailable>) {
        let was_down = self.sensor_down(sensor);
        match result {
            Err(e) if was_down => log::debug!("{}", e),
            Err(e) => {
                log::warn!("{}", e);
                self.outages |= sensor.bit();
            }
            Ok(()) if was_down => {
                log::info!("{:?} reading again", sensor);
                self.outages &= !sensor.bit();
            }
            Ok(()) => {}
        }
    }

    fn steer_gyro<S: MotionSensor>(&mut self, motion: &mut S) -> Result<(), SensorUnavailable> {
        let (gx, gy) = motion.angular_velocity().map_err(|_| SensorUnavailable {
            sensor: SensorKind::Gyroscope,
        })?;

        let deadzone = self.config.gyro_deadzone;
        let step = self.gyro_step();
        // Rotation around Y pans horizontally, around X vertically
        let dx = step_toward_f32(apply_deadzone(gy, deadzone), step);
        let dy = step_toward_f32(apply_deadzone(gx, deadzone), step);
        self.aim.nudge(dx, dy);
        Ok(())
    }

    fn steer_joystick<J: AnalogStick>(&mut self, stick: &mut J) -> Result<(), SensorUnavailable> {
        let (raw_x, raw_y) = stick.read_axes().map_err(|_| SensorUnavailable {
            sensor: SensorKind::Joystick,
        })?;

        let center = self.config.joystick_center;
        let deadzone = self.config.joystick_deadzone;
        let step = self.config.joystick_step;
        let dx = centered_deflection(raw_x, center, deadzone).signum() * step;
        let dy = centered_deflection(raw_y, center, deadzone).signum() * step;
        self.aim.nudge(dx, dy);
        Ok(())
    }

    fn sense_fast_move<S: MotionSensor>(&mut self, motion: &mut S) -> Result<(), SensorUnavailable> {
        let magnitude_sq = motion
            .acceleration_magnitude_squared()
            .map_err(|_| SensorUnavailable {
                sensor: SensorKind::Accelerometer,
            })?;

        let threshold = self.config.fast_move_threshold;
        let fast = magnitude_sq > threshold * threshold;
        if fast != self.fast_move {
            log::debug!("fast move: {}", fast);
        }
        self.fast_move = fast;
        Ok(())
    }

    /// Draws the crosshair centered on the cursor: the normal aim, or the
    /// enlarged quick aim while fast-moving.
    pub fn render<D: FrameBuffer + ?Sized>(&self, display: &mut D) {
        if self.fast_move {
            if let Some(big) = &self.quick_aim {
                let half = (big.width() / 2) as i32;
                render(display, self.aim.x - half, self.aim.y - half, big);
                return;
            }
            render(display, self.aim.x - 4, self.aim.y - 4, &QUICK_AIM);
        } else {
            render(display, self.aim.x - 4, self.aim.y - 4, &AIM);
        }
    }
}
