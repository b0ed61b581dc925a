//! # rs-bunkers
//!
//! "Los Bunkers", a Space-Invaders-style shooter for an ESP32 with a 128x64
//! OLED, an MPU6050 and an analog joystick.
//!
//! ## Features
//!
//! - **Nine rails**: one bunker and one descending alien per lane
//! - **Two control modes**: tilt (gyroscope) or analog stick, switched with the stick button
//! - **Fast-move**: shaking the board enlarges the crosshair and its hitbox
//! - **Progressive difficulty**: enemies speed up every five kills
//! - **Interrupt-safe input**: button handlers only push timestamped events
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Display and sensor abstractions
//! - `sprite` / `entities` - Bitmaps, rails, enemies, bunkers, the aim and hit testing
//! - `input` - Gyro/joystick cursor control
//! - `game` - Session state and phase machine
//! - `runner` - Frame loop binding the game to its hardware
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_bunkers::{
//!     config::GameConfig,
//!     entities::Aim,
//!     game::{Game, GamePhase},
//!     hal::MockDisplay,
//! };
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut game = Game::new(&GameConfig::default());
//! game.start_playing();
//!
//! // One frame: draw the playfield and advance one enemy
//! let mut display = MockDisplay::new();
//! let mut rng = SmallRng::seed_from_u64(0);
//! game.play_frame(&mut display, &mut rng);
//!
//! // Shoot at the cursor
//! game.shoot(&Aim::centered(), 0);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration for desktop and ESP32.
pub mod config;
/// Difficulty curve and enemy advance policy.
pub mod difficulty;
/// Game entities and hit testing.
pub mod entities;
/// Interrupt-to-main-loop event queue and debouncing.
pub mod events;
/// Session state and phase machine.
pub mod game;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Gyro and joystick aim control.
pub mod input;
/// Main loop and frame pacing.
pub mod runner;
/// Presentation, score and game-over screens.
pub mod screens;
/// Bitmap sprites and rendering.
pub mod sprite;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{Config, GameConfig, InputConfig, TimingConfig};
pub use entities::{Aim, Bunker, Enemy, Rail, RailSet};
pub use events::{Debouncer, EventKind, EventQueue, InputEvent};
pub use game::{Game, GamePhase, Kill};
pub use input::{ControlMode, InputController, SensorKind, SensorUnavailable};
pub use runner::{GameRunner, Hardware};
pub use sprite::{render, scale, PixelMask, ScaleError, ScaledBitmap, Sprite};
pub use traits::{AnalogStick, Clock, FrameBuffer, MotionSensor};
