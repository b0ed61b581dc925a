//! Main loop: binds the game to its hardware and paces it.
//!
//! [`GameRunner`] owns the collaborators and drives the phase machine of
//! [`Game`]:
//!
//! 1. **Presentation** - four text screens, one scheduled delay each
//! 2. **Playing** - one frame per call, padded to the frame budget
//! 3. **Game over** - poll the shoot button until pressed, then restart
//!
//! Button interrupts never touch the runner. They push into the shared
//! [`EventQueue`], which the runner drains at the start of every frame.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use rs_bunkers::config::Config;
//! use rs_bunkers::events::EventQueue;
//! use rs_bunkers::game::GamePhase;
//! use rs_bunkers::hal::{MockButton, MockClock, MockDisplay, MockMotion, MockStick};
//! use rs_bunkers::runner::{GameRunner, Hardware};
//!
//! let events = EventQueue::new();
//! let hardware = Hardware {
//!     display: MockDisplay::new(),
//!     motion: MockMotion::new(),
//!     stick: MockStick::new(),
//!     button: MockButton::new(),
//!     clock: MockClock::new(),
//! };
//! let mut runner = GameRunner::new(&Config::default(), hardware, SmallRng::seed_from_u64(1), &events);
//!
//! runner.step(); // presentation
//! assert_eq!(runner.game().phase(), GamePhase::Playing);
//! runner.step(); // first frame
//! assert!(runner.hardware().display.has_text("P:0"));
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use rand::RngCore;

use crate::config::{Config, GameConfig, TimingConfig};
use crate::events::{EventKind, EventQueue, InputEvent};
use crate::game::{Game, GamePhase};
use crate::input::InputController;
use crate::screens::{draw_game_over, draw_score, PRESENTATION};
use crate::traits::{AnalogStick, Clock, FrameBuffer, MotionSensor};

/// The peripherals the runner drives.
pub struct Hardware<D, S, J, B, C> {
    /// OLED frame buffer.
    pub display: D,
    /// Gyroscope and accelerometer.
    pub motion: S,
    /// Analog joystick.
    pub stick: J,
    /// Shoot button, polled on the game-over screen.
    pub button: B,
    /// Time source and delay provider.
    pub clock: C,
}

/// Drives a [`Game`] on a set of [`Hardware`].
pub struct GameRunner<'q, D, S, J, B, C, R> {
    hw: Hardware<D, S, J, B, C>,
    rng: R,
    events: &'q EventQueue,
    game: Game,
    input: InputController,
    game_config: GameConfig,
    timing: TimingConfig,
}

impl<'q, D, S, J, B, C, R> GameRunner<'q, D, S, J, B, C, R>
where
    D: FrameBuffer,
    S: MotionSensor,
    J: AnalogStick,
    B: InputPin,
    C: Clock + DelayNs,
    R: RngCore,
{
    /// Creates a runner in the presentation phase.
    pub fn new(
        config: &Config,
        hardware: Hardware<D, S, J, B, C>,
        rng: R,
        events: &'q EventQueue,
    ) -> Self {
        Self {
            hw: hardware,
            rng,
            events,
            game: Game::new(&config.game),
            input: InputController::new(&config.input),
            game_config: config.game.clone(),
            timing: config.timing.clone(),
        }
    }

    /// The game session.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The aim controller.
    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// The peripherals.
    pub fn hardware(&self) -> &Hardware<D, S, J, B, C> {
        &self.hw
    }

    /// Mutable access to the peripherals, for tests and diagnostics.
    pub fn hardware_mut(&mut self) -> &mut Hardware<D, S, J, B, C> {
        &mut self.hw
    }

    /// Hitbox padding for the current fast-move state.
    pub fn hit_padding(&self) -> i32 {
        if self.input.fast_move() {
            self.game_config.fast_hitbox_padding
        } else {
            0
        }
    }

    /// Runs forever.
    pub fn run(&mut self) -> ! {
        log::info!("game loop started");
        loop {
            self.step();
        }
    }

    /// Runs one unit of work for the current phase: the whole presentation,
    /// one playing frame, or one game-over wait.
    pub fn step(&mut self) {
        match self.game.phase() {
            GamePhase::Presentation => self.run_presentation(),
            GamePhase::Playing => {
                self.run_frame();
            }
            GamePhase::GameOver => self.run_game_over(),
        }
    }

    /// Shows the presentation screens, then starts playing.
    ///
    /// Presses during the presentation are discarded.
    pub fn run_presentation(&mut self) {
        for screen in PRESENTATION.iter() {
            screen.draw(&mut self.hw.display);
            self.present();
            self.hw.clock.delay_ms(screen.hold.duration_ms(&self.timing));
        }
        self.events.clear();
        self.game.start_playing();
    }

    /// Runs one playing frame and sleeps the rest of the frame budget.
    /// Returns the phase after the frame.
    pub fn run_frame(&mut self) -> GamePhase {
        let started = self.hw.clock.now_ms();
        self.hw.display.clear();

        if self.game.check_game_over() {
            draw_game_over(&mut self.hw.display, self.game.points());
            self.present();
            return GamePhase::GameOver;
        }

        self.handle_events();
        self.game.play_frame(&mut self.hw.display, &mut self.rng);
        // Failures are logged by the controller, which holds its last state
        let _ = self.input.update(&mut self.hw.motion, &mut self.hw.stick);
        self.input.render(&mut self.hw.display);
        draw_score(&mut self.hw.display, self.game.points());
        self.present();

        let elapsed = self.hw.clock.now_ms().saturating_sub(started);
        let budget = self.timing.frame_interval_ms as u64;
        let rest = budget.saturating_sub(elapsed) as u32;
        if rest > 0 {
            self.hw.clock.delay_ms(rest);
        }
        self.game.phase()
    }

    /// Shows the game-over screen and waits for the shoot button. On press,
    /// waits out the bounce and starts a fresh session.
    pub fn run_game_over(&mut self) {
        draw_game_over(&mut self.hw.display, self.game.points());
        self.present();

        while !matches!(self.hw.button.is_low(), Ok(true)) {
            self.hw.clock.delay_ms(self.timing.restart_poll_ms);
        }
        self.hw.clock.delay_ms(self.timing.restart_debounce_ms);
        self.restart();
    }

    /// Resets the session and the cursor if the game is over.
    pub fn restart(&mut self) -> bool {
        if !self.game.restart() {
            return false;
        }
        self.input.recenter();
        self.events.clear();
        true
    }

    /// Applies every queued button event.
    pub fn handle_events(&mut self) {
        while let Some(event) = self.events.pop() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event.kind {
            EventKind::Shoot => {
                let padding = self.hit_padding();
                self.game.shoot(&self.input.aim(), padding);
            }
            EventKind::ModeSwitch => {
                self.input.toggle_mode(event.at_ms);
            }
        }
    }

    fn present(&mut self) {
        if self.hw.display.present().is_err() {
            log::warn!("display update failed, frame dropped");
        }
    }
}
