//! Edge case and boundary condition tests

use embedded_hal::delay::DelayNs;
use rs_bunkers::{
    config::{InputConfig, TimingConfig},
    entities::{Hitbox, AIM_MAX_X, AIM_MAX_Y, AIM_MIN_X, AIM_MIN_Y},
    events::EVENT_QUEUE_CAPACITY,
    hal::{MockClock, MockDisplay, MockMotion, MockStick},
    screens::presentation_ms,
    sprite::{render, scale, PixelMask, ScaleError, AIM, ENEMY, QUICK_AIM},
    traits::{Clock, FrameBuffer},
    Aim, Debouncer, Enemy, EventKind, EventQueue, InputController, InputEvent, Rail, RailSet,
};

fn rail(n: u8) -> Rail {
    Rail::new(n).unwrap()
}

// ============================================================================
// Hit Test Boundaries
// ============================================================================

#[test]
fn anchor_on_top_left_corner_misses() {
    for r in Rail::all() {
        let enemy = Enemy::new(r, 30);
        assert!(!Hitbox::around(&enemy, 0).contains(enemy.x, enemy.y));
    }
}

#[test]
fn one_pixel_inside_corner_hits() {
    for r in Rail::all() {
        let enemy = Enemy::new(r, 30);
        assert!(Hitbox::around(&enemy, 0).contains(enemy.x + 1, enemy.y + 1));
    }
}

#[test]
fn padded_box_boundaries_are_exclusive() {
    let enemy = Enemy::new(rail(4), 20);
    let hitbox = Hitbox::around(&enemy, 6);
    assert!(!hitbox.contains(enemy.x - 6, enemy.y));
    assert!(hitbox.contains(enemy.x - 5, enemy.y));
    assert!(!hitbox.contains(enemy.x + 14, enemy.y));
    assert!(hitbox.contains(enemy.x + 13, enemy.y + 13));
}

#[test]
fn aim_constructed_outside_bounds_is_clamped() {
    let aim = Aim::new(-100, 1000);
    assert_eq!((aim.x, aim.y), (AIM_MIN_X, AIM_MAX_Y));
    let aim = Aim::new(1000, -100);
    assert_eq!((aim.x, aim.y), (AIM_MAX_X, AIM_MIN_Y));
}

#[test]
fn rails_outside_range_rejected() {
    assert!(Rail::new(0).is_none());
    assert!(Rail::new(10).is_none());
    assert!(Rail::new(u8::MAX).is_none());
}

#[test]
fn rail_set_survives_repeated_insertion() {
    let mut set = RailSet::new();
    for _ in 0..5 {
        set.insert(rail(9));
    }
    assert_eq!(set.len(), 1);
}

// ============================================================================
// Sprites
// ============================================================================

#[test]
fn scale_zero_rejected() {
    assert_eq!(scale(&QUICK_AIM, 0), Err(ScaleError::InvalidFactor(0)));
}

#[test]
fn scale_one_keeps_every_pixel() {
    let same = scale(&ENEMY, 1).unwrap();
    for r in 0..8 {
        for c in 0..8 {
            assert_eq!(same.pixel(r, c), ENEMY.pixel(r, c));
        }
    }
}

#[test]
fn sprite_entirely_off_screen_draws_nothing() {
    let mut display = MockDisplay::new();
    render(&mut display, 0, -20, &ENEMY);
    render(&mut display, 200, 10, &ENEMY);
    assert_eq!(display.lit_pixels(), 0);
}

#[test]
fn sprite_on_right_edge_is_clipped() {
    let mut display = MockDisplay::new();
    render(&mut display, 124, 0, &AIM);
    let visible: usize = (0..8)
        .map(|r| (0..4).filter(|&c| AIM.pixel(r, c)).count())
        .sum();
    assert_eq!(display.lit_pixels(), visible);
}

// ============================================================================
// Debounce and Queue
// ============================================================================

#[test]
fn debounce_window_boundary() {
    let mut debounce = Debouncer::new(300);
    assert!(debounce.accept(0));
    assert!(!debounce.accept(300));
    assert!(debounce.accept(301));
}

#[test]
fn debounce_zero_window_accepts_distinct_times() {
    let mut debounce = Debouncer::new(0);
    assert!(debounce.accept(5));
    assert!(!debounce.accept(5));
    assert!(debounce.accept(6));
}

#[test]
fn full_queue_drops_newest() {
    let queue = EventQueue::new();
    for i in 0..EVENT_QUEUE_CAPACITY as u64 {
        queue.push(InputEvent::new(EventKind::Shoot, i));
    }
    assert!(!queue.push(InputEvent::new(EventKind::ModeSwitch, 999)));

    let mut last = None;
    queue.drain(|e| last = Some(e));
    assert_eq!(last.map(|e| e.kind), Some(EventKind::Shoot));
}

// ============================================================================
// Input Extremes
// ============================================================================

#[test]
fn joystick_at_rails_of_adc_range() {
    let mut input = InputController::new(&InputConfig::default());
    let mut mpu = MockMotion::new();
    let mut stick = MockStick::new();
    input.toggle_mode(0);

    stick.set_axes(4095, 4095);
    for _ in 0..100 {
        input.update(&mut mpu, &mut stick).unwrap();
    }
    assert_eq!((input.aim().x, input.aim().y), (AIM_MAX_X, AIM_MAX_Y));

    stick.set_axes(0, 0);
    for _ in 0..100 {
        input.update(&mut mpu, &mut stick).unwrap();
    }
    assert_eq!((input.aim().x, input.aim().y), (AIM_MIN_X, AIM_MIN_Y));
}

#[test]
fn zero_deadzone_moves_on_any_deflection() {
    let config = InputConfig::default().with_joystick_calibration(2048, 0);
    let mut input = InputController::new(&config);
    let mut mpu = MockMotion::new();
    let mut stick = MockStick::new();
    input.toggle_mode(0);

    stick.set_axes(2049, 2048);
    input.update(&mut mpu, &mut stick).unwrap();
    assert_eq!(input.aim().x, 63);
}

#[test]
fn enlarged_aim_near_corner_is_clipped() {
    let mut input = InputController::new(&InputConfig::default());
    let mut mpu = MockMotion::new();
    let mut stick = MockStick::new();

    mpu.set_gyro(-5.0, -5.0);
    mpu.set_accel(3.0, 0.0, 0.0);
    for _ in 0..40 {
        input.update(&mut mpu, &mut stick).unwrap();
    }
    assert_eq!((input.aim().x, input.aim().y), (AIM_MIN_X, AIM_MIN_Y));

    let mut display = MockDisplay::new();
    input.render(&mut display);
    assert!(display.lit_pixels() < QUICK_AIM.lit_count() * 4);
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn presentation_durations_configurable() {
    let timing = TimingConfig::default().with_screen_hold_ms(100, 50);
    assert_eq!(presentation_ms(&timing), 350);
}

#[test]
fn mock_clock_delay_is_observable() {
    let mut clock = MockClock::new();
    clock.delay_ms(0);
    clock.delay_ms(4_000);
    assert_eq!(clock.now_ms(), 4_000);
    assert_eq!(clock.delays_ms, vec![0, 4_000]);
}

#[test]
fn mock_display_present_counts_failures() {
    let mut display = MockDisplay::new();
    display.fail_present = true;
    assert!(display.present().is_err());
    display.fail_present = false;
    assert!(display.present().is_ok());
    assert_eq!(display.present_count, 2);
    assert_eq!(display.frames.len(), 1);
}
