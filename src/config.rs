//! Game configuration shared by the desktop tests and the ESP32 firmware.
//!
//! All tuning constants live here with defaults matching the hardware the
//! game was built for (MPU6050 in degrees per second, 12-bit joystick ADC,
//! 128x64 OLED at 20 frames per second).
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::config::{Config, InputConfig, TimingConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.timing.frame_interval_ms, 50);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_input(InputConfig::default().with_gyro_deadzone(0.1))
//!     .with_timing(TimingConfig::default().with_frame_interval_ms(40));
//! ```

use crate::input::ControlMode;

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Scoring and spawn rules
    pub game: GameConfig,
    /// Gyro, joystick and mode-switch tuning
    pub input: InputConfig,
    /// Frame pacing and screen durations
    pub timing: TimingConfig,
}

impl Config {
    /// Set game configuration
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set input configuration
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Set timing configuration
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

// ============================================================================
// Game Config
// ============================================================================

/// Scoring and spawn rules
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Y coordinate a killed enemy respawns at (above the screen)
    pub spawn_y: i32,
    /// Points awarded per kill
    pub points_per_kill: u32,
    /// Extra hitbox margin on each side while fast-move is active
    pub fast_hitbox_padding: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_y: -20,
            points_per_kill: 1,
            fast_hitbox_padding: 6,
        }
    }
}

impl GameConfig {
    /// Set the respawn height (clamped to at most 0, never below the top edge)
    pub fn with_spawn_y(mut self, y: i32) -> Self {
        self.spawn_y = y.min(0);
        self
    }

    /// Set points per kill
    pub fn with_points_per_kill(mut self, points: u32) -> Self {
        self.points_per_kill = points;
        self
    }

    /// Set the fast-move hitbox padding (clamped to be non-negative)
    pub fn with_fast_hitbox_padding(mut self, padding: i32) -> Self {
        self.fast_hitbox_padding = padding.max(0);
        self
    }
}

// ============================================================================
// Input Config
// ============================================================================

/// Gyro, joystick and mode-switch tuning
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// Control mode at start-up
    pub initial_mode: ControlMode,
    /// Gyro readings with smaller magnitude are treated as zero
    pub gyro_deadzone: f32,
    /// Cursor step per frame from the gyro
    pub gyro_step: i32,
    /// Cursor step per frame from the gyro while fast-move is active
    pub gyro_fast_step: i32,
    /// Acceleration magnitude (in g) above which fast-move activates
    pub fast_move_threshold: f32,
    /// Joystick ADC reading at rest
    pub joystick_center: u16,
    /// Joystick deviations with smaller magnitude are treated as zero
    pub joystick_deadzone: u16,
    /// Cursor step per frame from the joystick
    pub joystick_step: i32,
    /// Minimum time between accepted mode switches
    pub mode_debounce_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            initial_mode: ControlMode::Gyro,
            gyro_deadzone: 0.08,
            gyro_step: 3,
            gyro_fast_step: 6,
            fast_move_threshold: 1.3,
            joystick_center: 2048,
            joystick_deadzone: 300,
            joystick_step: 2,
            mode_debounce_ms: 300,
        }
    }
}

impl InputConfig {
    /// Set the start-up control mode
    pub fn with_initial_mode(mut self, mode: ControlMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Set the gyro dead-zone (clamped to be non-negative)
    pub fn with_gyro_deadzone(mut self, deadzone: f32) -> Self {
        self.gyro_deadzone = deadzone.max(0.0);
        self
    }

    /// Set the normal and fast gyro steps (clamped to be non-negative)
    pub fn with_gyro_steps(mut self, step: i32, fast_step: i32) -> Self {
        self.gyro_step = step.max(0);
        self.gyro_fast_step = fast_step.max(0);
        self
    }

    /// Set the fast-move threshold in g
    pub fn with_fast_move_threshold(mut self, threshold: f32) -> Self {
        self.fast_move_threshold = threshold.max(0.0);
        self
    }

    /// Set the joystick rest value and dead-zone
    pub fn with_joystick_calibration(mut self, center: u16, deadzone: u16) -> Self {
        self.joystick_center = center.min(crate::traits::ADC_MAX);
        self.joystick_deadzone = deadzone;
        self
    }

    /// Set the joystick step (clamped to be non-negative)
    pub fn with_joystick_step(mut self, step: i32) -> Self {
        self.joystick_step = step.max(0);
        self
    }

    /// Set the mode-switch debounce window
    pub fn with_mode_debounce_ms(mut self, ms: u64) -> Self {
        self.mode_debounce_ms = ms;
        self
    }
}

// ============================================================================
// Timing Config
// ============================================================================

/// Frame pacing and screen durations
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Frame budget in milliseconds
    pub frame_interval_ms: u32,
    /// How often the game-over screen polls the shoot button
    pub restart_poll_ms: u32,
    /// Pause after the restart press before the new game starts
    pub restart_debounce_ms: u32,
    /// How long each informational presentation screen is held
    pub screen_hold_ms: u32,
    /// How long the final "ready?" screen is held
    pub ready_hold_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            restart_poll_ms: 100,
            restart_debounce_ms: 300,
            screen_hold_ms: 3000,
            ready_hold_ms: 2000,
        }
    }
}

impl TimingConfig {
    /// Set the frame budget (at least 1ms)
    pub fn with_frame_interval_ms(mut self, ms: u32) -> Self {
        self.frame_interval_ms = ms.max(1);
        self
    }

    /// Set the restart poll interval (at least 1ms)
    pub fn with_restart_poll_ms(mut self, ms: u32) -> Self {
        self.restart_poll_ms = ms.max(1);
        self
    }

    /// Set the restart debounce pause
    pub fn with_restart_debounce_ms(mut self, ms: u32) -> Self {
        self.restart_debounce_ms = ms;
        self
    }

    /// Set presentation screen durations
    pub fn with_screen_hold_ms(mut self, screen_ms: u32, ready_ms: u32) -> Self {
        self.screen_hold_ms = screen_ms;
        self.ready_hold_ms = ready_ms;
        self
    }
}
