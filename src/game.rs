//! Game session state and the phase state machine.
//!
//! [`Game`] owns everything that changes during a session: the nine
//! bunkers, the nine enemies, the set of eliminated rails, the score and
//! the kill count. It knows nothing about sensors or timing; the
//! [`GameRunner`](crate::runner::GameRunner) feeds it shots and frames.
//!
//! # Phases
//!
//! ```text
//! Presentation ──start_playing──► Playing ──all rails eliminated──► GameOver
//!                                    ▲                                  │
//!                                    └──────────── restart ─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::config::GameConfig;
//! use rs_bunkers::entities::Aim;
//! use rs_bunkers::game::{Game, GamePhase};
//!
//! let mut game = Game::new(&GameConfig::default());
//! assert_eq!(game.phase(), GamePhase::Presentation);
//!
//! game.start_playing();
//! let enemy = game.enemies()[0];
//! let hit = game.shoot(&Aim::new(enemy.x + 1, enemy.y + 1), 0);
//! assert!(hit.is_some());
//! assert_eq!(game.points(), 1);
//! ```

use heapless::Vec;
use rand::Rng;

use crate::config::GameConfig;
use crate::difficulty::{plan_advance, speed_factor};
use crate::entities::{Aim, Bunker, Enemy, Positioned, Rail, RailSet, RAIL_COUNT};
use crate::sprite::render;
use crate::traits::FrameBuffer;

const RAILS: usize = RAIL_COUNT as usize;

/// Top-level game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title, story and control screens.
    #[default]
    Presentation,
    /// Enemies advancing, player shooting.
    Playing,
    /// Every bunker destroyed; waiting for a restart press.
    GameOver,
}

impl GamePhase {
    /// Returns the phase name as a static string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Presentation => "presentation",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
        }
    }
}

/// Outcome of a successful shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kill {
    /// Rail of the enemy that was hit.
    pub rail: Rail,
    /// Score after the kill.
    pub points: u32,
}

/// A game session.
pub struct Game {
    phase: GamePhase,
    bunkers: Vec<Bunker, RAILS>,
    enemies: Vec<Enemy, RAILS>,
    eliminated: RailSet,
    points: u32,
    kills: u32,
    config: GameConfig,
}

impl Game {
    /// Creates a session in the [`Presentation`](GamePhase::Presentation)
    /// phase with a full playfield.
    pub fn new(config: &GameConfig) -> Self {
        let mut game = Self {
            phase: GamePhase::Presentation,
            bunkers: Vec::new(),
            enemies: Vec::new(),
            eliminated: RailSet::new(),
            points: 0,
            kills: 0,
            config: config.clone(),
        };
        game.populate();
        game
    }

    fn populate(&mut self) {
        self.bunkers.clear();
        self.enemies.clear();
        for rail in Rail::all() {
            // Capacity equals the rail count
            let _ = self.bunkers.push(Bunker::new(rail));
            let _ = self.enemies.push(Enemy::new(rail, 0));
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Score.
    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Enemies killed this session.
    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Current speed multiplier.
    #[inline]
    pub fn speed_factor(&self) -> f32 {
        speed_factor(self.kills)
    }

    /// Rails whose bunker has been destroyed.
    #[inline]
    pub fn eliminated(&self) -> &RailSet {
        &self.eliminated
    }

    /// All bunkers, including destroyed ones.
    #[inline]
    pub fn bunkers(&self) -> &[Bunker] {
        &self.bunkers
    }

    /// All enemies, including those on eliminated rails.
    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Bunkers still standing.
    pub fn live_bunkers(&self) -> impl Iterator<Item = &Bunker> + '_ {
        self.bunkers
            .iter()
            .filter(move |b| !self.eliminated.contains(b.rail))
    }

    /// Enemies on rails that are not eliminated.
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.enemies
            .iter()
            .filter(move |e| !self.eliminated.contains(e.rail))
    }

    // ------------------------------------------------------------------------
    // Phase transitions
    // ------------------------------------------------------------------------

    /// Leaves the presentation. Returns false in any other phase.
    pub fn start_playing(&mut self) -> bool {
        if self.phase != GamePhase::Presentation {
            return false;
        }
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Enters [`GameOver`](GamePhase::GameOver) if every rail is
    /// eliminated. Only possible while playing. Returns true if the game is
    /// over.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == GamePhase::Playing && self.eliminated.is_full() {
            log::info!("all bunkers destroyed, final score {}", self.points);
            self.set_phase(GamePhase::GameOver);
        }
        self.phase == GamePhase::GameOver
    }

    /// Restores a fresh playfield and enters [`Playing`](GamePhase::Playing).
    ///
    /// Clears score, kills and eliminated rails and recreates the nine
    /// bunkers and enemies. The cursor is owned by the input controller and
    /// is recentered by the runner.
    pub fn reset(&mut self) {
        self.populate();
        self.eliminated.clear();
        self.points = 0;
        self.kills = 0;
        self.set_phase(GamePhase::Playing);
    }

    /// Resets the session if the game is over. Refused in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {}", self.phase.as_str());
            return false;
        }
        self.reset();
        true
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("{} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }

    // ------------------------------------------------------------------------
    // Gameplay
    // ------------------------------------------------------------------------

    /// Resolves a shot at `aim`.
    ///
    /// Scans live enemies in rail order and stops at the first hit. The hit
    /// enemy respawns above the screen on the same rail. Shots outside the
    /// playing phase are discarded.
    pub fn shoot(&mut self, aim: &Aim, padding: i32) -> Option<Kill> {
        if self.phase != GamePhase::Playing {
            log::debug!("shot discarded in {}", self.phase.as_str());
            return None;
        }

        let eliminated = self.eliminated;
        let enemy = self
            .enemies
            .iter_mut()
            .filter(|e| !eliminated.contains(e.rail))
            .find(|e| aim.hits(e, padding))?;

        enemy.y = self.config.spawn_y;
        self.points = self.points.saturating_add(self.config.points_per_kill);
        self.kills = self.kills.saturating_add(1);

        log::info!(
            "hit on rail {}, points {} kills {}",
            enemy.rail.number(),
            self.points,
            self.kills
        );
        Some(Kill {
            rail: enemy.rail,
            points: self.points,
        })
    }

    /// Moves one random live enemy down. Returns the rail it eliminated, if
    /// it reached the bunker line.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Rail> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        let plan = plan_advance(&self.enemies, &self.eliminated, self.kills, rng)?;
        let enemy = self.enemies.get_mut(plan.index)?;
        enemy.y = enemy.y.saturating_add(plan.step);

        if enemy.reached_bunkers() && self.eliminated.insert(enemy.rail) {
            log::warn!(
                "bunker on rail {} destroyed ({} left)",
                enemy.rail.number(),
                RAILS - self.eliminated.len()
            );
            return Some(enemy.rail);
        }
        None
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Draws the standing bunkers.
    pub fn render_bunkers<D: FrameBuffer + ?Sized>(&self, display: &mut D) {
        for bunker in self.live_bunkers() {
            draw(display, bunker);
        }
    }

    /// Draws the live enemies.
    pub fn render_enemies<D: FrameBuffer + ?Sized>(&self, display: &mut D) {
        for enemy in self.live_enemies() {
            draw(display, enemy);
        }
    }

    /// One playing frame of the playfield: bunkers, enemies, then one
    /// enemy advance.
    pub fn play_frame<D, R>(&mut self, display: &mut D, rng: &mut R) -> Option<Rail>
    where
        D: FrameBuffer + ?Sized,
        R: Rng + ?Sized,
    {
        self.render_bunkers(display);
        self.render_enemies(display);
        self.advance(rng)
    }
}

fn draw<D: FrameBuffer + ?Sized, P: Positioned>(display: &mut D, item: &P) {
    let (x, y) = item.position();
    render(display, x, y, item.sprite());
}
