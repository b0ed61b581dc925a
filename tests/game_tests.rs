//! Whole-game scenarios driven through the runner with mock hardware

use approx::assert_relative_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rs_bunkers::{
    config::{Config, GameConfig},
    entities::AIM_CENTER,
    events::{EventKind, EventQueue, InputEvent},
    hal::{MockButton, MockClock, MockDisplay, MockMotion, MockStick},
    Aim, ControlMode, Game, GamePhase, GameRunner, Hardware,
};

type TestRunner<'q> =
    GameRunner<'q, MockDisplay, MockMotion, MockStick, MockButton, MockClock, SmallRng>;

fn runner(events: &EventQueue, seed: u64) -> TestRunner<'_> {
    let hardware = Hardware {
        display: MockDisplay::new(),
        motion: MockMotion::new(),
        stick: MockStick::new(),
        button: MockButton::new(),
        clock: MockClock::new(),
    };
    GameRunner::new(
        &Config::default(),
        hardware,
        SmallRng::seed_from_u64(seed),
        events,
    )
}

/// Steps until the game is over, returning the number of frames played.
fn play_until_game_over(runner: &mut TestRunner<'_>) -> usize {
    for frame in 0..10_000 {
        runner.step();
        if runner.game().phase() == GamePhase::GameOver {
            return frame;
        }
    }
    panic!("game never ended");
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[test]
fn presentation_then_playing() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 1);
    assert_eq!(runner.game().phase(), GamePhase::Presentation);

    runner.step();
    assert_eq!(runner.game().phase(), GamePhase::Playing);
    assert_eq!(runner.hardware().clock.total_delay_ms(), 11_000);
}

#[test]
fn unattended_game_ends_with_all_rails_eliminated() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 2);
    runner.step();

    play_until_game_over(&mut runner);
    assert!(runner.game().eliminated().is_full());
    assert!(runner.hardware().display.has_text("GAME OVER"));
    assert!(runner.hardware().display.has_text("Puntos: 0"));
}

#[test]
fn restart_after_button_press() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 3);
    runner.step();
    play_until_game_over(&mut runner);

    runner.hardware_mut().clock.delays_ms.clear();
    runner.hardware_mut().button.press_after(3);
    runner.step();

    assert_eq!(runner.hardware().clock.delays_ms, vec![100, 100, 100, 300]);
    let game = runner.game();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.points(), 0);
    assert_eq!(game.kills(), 0);
    assert!(game.eliminated().is_empty());
    assert_eq!(game.bunkers().len(), 9);
    assert_eq!(game.enemies().len(), 9);
    let aim = runner.input().aim();
    assert_eq!((aim.x, aim.y), AIM_CENTER);
}

#[test]
fn eliminated_rails_stay_frozen() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 4);
    runner.step();

    for _ in 0..10_000 {
        let before: Vec<(bool, i32)> = runner
            .game()
            .enemies()
            .iter()
            .map(|e| (runner.game().eliminated().contains(e.rail), e.y))
            .collect();
        let eliminated_before = runner.game().eliminated().len();

        runner.step();
        if runner.game().phase() != GamePhase::Playing {
            break;
        }

        for (enemy, (was_eliminated, y)) in runner.game().enemies().iter().zip(before) {
            if was_eliminated {
                assert_eq!(enemy.y, y);
            }
        }
        assert!(runner.game().eliminated().len() >= eliminated_before);
    }
}

// ============================================================================
// Input Through the Queue
// ============================================================================

#[test]
fn mode_switch_bounce_yields_one_change() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 5);
    runner.step();

    events.push(InputEvent::new(EventKind::ModeSwitch, 20_000));
    events.push(InputEvent::new(EventKind::ModeSwitch, 20_150));
    runner.step();
    assert_eq!(runner.input().mode(), ControlMode::Joystick);

    events.push(InputEvent::new(EventKind::ModeSwitch, 20_299));
    runner.step();
    assert_eq!(runner.input().mode(), ControlMode::Joystick);

    events.push(InputEvent::new(EventKind::ModeSwitch, 20_400));
    runner.step();
    assert_eq!(runner.input().mode(), ControlMode::Gyro);
}

#[test]
fn joystick_steers_after_switch() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 6);
    runner.step();

    events.push(InputEvent::new(EventKind::ModeSwitch, 1));
    runner.hardware_mut().stick.set_axes(0, 2048);
    runner.step();
    assert_eq!(runner.input().aim().x, AIM_CENTER.0 - 2);

    // Gyro is ignored in joystick mode
    runner.hardware_mut().motion.set_gyro(0.0, 9.0);
    runner.hardware_mut().stick.set_axes(2048, 2048);
    runner.step();
    assert_eq!(runner.input().aim().x, AIM_CENTER.0 - 2);
}

#[test]
fn sensor_outage_holds_cursor_and_keeps_playing() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 7);
    runner.step();

    runner.hardware_mut().motion.set_gyro(0.0, 1.0);
    runner.step();
    let aim = runner.input().aim();

    runner.hardware_mut().motion.fail_reads(true);
    for _ in 0..5 {
        runner.step();
    }
    assert_eq!(runner.input().aim(), aim);
    assert_eq!(runner.game().phase(), GamePhase::Playing);
}

#[test]
fn display_failure_does_not_stop_frames() {
    let events = EventQueue::new();
    let mut runner = runner(&events, 8);
    runner.step();

    runner.hardware_mut().display.fail_present = true;
    runner.hardware_mut().clock.delays_ms.clear();
    for _ in 0..3 {
        runner.step();
    }
    assert_eq!(runner.hardware().clock.delays_ms, vec![50, 50, 50]);
}

// ============================================================================
// Scoring and Difficulty
// ============================================================================

fn shoot_first_live(game: &mut Game) {
    let target = *game.live_enemies().next().unwrap();
    let hit = game.shoot(&Aim::new(target.x + 1, target.y + 1), 0);
    assert!(hit.is_some());
}

#[test]
fn speed_factor_scenario() {
    // Respawn on the top edge so the same enemy can be shot again
    let mut game = Game::new(&GameConfig::default().with_spawn_y(0));
    game.start_playing();
    assert_relative_eq!(game.speed_factor(), 1.0);

    for _ in 0..5 {
        shoot_first_live(&mut game);
    }
    assert_relative_eq!(game.speed_factor(), 1.5);

    for _ in 0..7 {
        shoot_first_live(&mut game);
    }
    assert_eq!(game.kills(), 12);
    assert_relative_eq!(game.speed_factor(), 2.0);
}

#[test]
fn respawned_enemy_is_off_screen_until_it_descends() {
    let mut game = Game::new(&GameConfig::default());
    game.start_playing();
    shoot_first_live(&mut game);

    let respawned = game.enemies()[0];
    assert_eq!(respawned.y, -20);
    // Above the screen the enemy cannot be hit: the cursor stops at y = 2
    assert!(game.shoot(&Aim::new(respawned.x + 1, respawned.y + 1), 0).is_none());
}

#[test]
fn fast_move_widens_hitbox() {
    let mut game = Game::new(&GameConfig::default());
    game.start_playing();
    let target = game.enemies()[4];
    let aim = Aim::new(target.x + 12, target.y + 12);

    assert!(game.shoot(&aim, 0).is_none());
    assert!(game.shoot(&aim, 6).is_some());
}
