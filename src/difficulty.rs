//! Difficulty curve and enemy advance policy.
//!
//! The game speeds up every five kills. Each frame exactly one live enemy,
//! chosen uniformly at random, descends by a random base step of 1 or 2
//! pixels scaled by the current speed factor.
//!
//! | Kills | Speed factor | Step for r=1 | Step for r=2 |
//! |-------|--------------|--------------|--------------|
//! | 0..=4 | 1.0 | 1 | 2 |
//! | 5..=9 | 1.5 | 2 | 3 |
//! | 10..=14 | 2.0 | 2 | 4 |
//! | 15..=19 | 2.5 | 3 | 5 |
//!
//! Steps are computed in half-pixel integer arithmetic so no float rounding
//! is involved; halves round up.

use rand::Rng;

use crate::entities::{Enemy, RailSet};

/// Kills needed to raise the speed factor by one level.
pub const KILLS_PER_LEVEL: u32 = 5;

/// Speed factor increase per level.
pub const SPEED_PER_LEVEL: f32 = 0.5;

/// Speed multiplier for the given kill count: `1 + floor(kills / 5) * 0.5`.
#[inline]
pub fn speed_factor(kills: u32) -> f32 {
    1.0 + (kills / KILLS_PER_LEVEL) as f32 * SPEED_PER_LEVEL
}

/// Speed factor expressed in half units (`2 * speed_factor`).
#[inline]
const fn speed_halves(kills: u32) -> u32 {
    2 + kills / KILLS_PER_LEVEL
}

/// Pixels an enemy moves for base step `base` at the given kill count,
/// `round(base * speed_factor)` with halves rounded up.
#[inline]
pub const fn advance_step(base: u32, kills: u32) -> i32 {
    let halves = base.saturating_mul(speed_halves(kills));
    (halves.saturating_add(1) / 2) as i32
}

/// One enemy to move this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Index into the enemy list.
    pub index: usize,
    /// Pixels to move down.
    pub step: i32,
}

/// Picks one live enemy uniformly and rolls its step.
///
/// Enemies whose rail is in `eliminated` are never chosen. Returns `None`
/// when no enemy is live.
pub fn plan_advance<R: Rng + ?Sized>(
    enemies: &[Enemy],
    eliminated: &RailSet,
    kills: u32,
    rng: &mut R,
) -> Option<Advance> {
    let live = enemies
        .iter()
        .filter(|e| !eliminated.contains(e.rail))
        .count();
    if live == 0 {
        return None;
    }

    let pick = rng.gen_range(0..live);
    let index = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !eliminated.contains(e.rail))
        .nth(pick)
        .map(|(i, _)| i)?;

    let base = rng.gen_range(1..=2u32);
    Some(Advance {
        index,
        step: advance_step(base, kills),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Rail;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn enemies() -> Vec<Enemy> {
        Rail::all().map(|r| Enemy::new(r, 0)).collect()
    }

    #[test]
    fn speed_factor_levels() {
        assert_relative_eq!(speed_factor(0), 1.0);
        assert_relative_eq!(speed_factor(4), 1.0);
        assert_relative_eq!(speed_factor(5), 1.5);
        assert_relative_eq!(speed_factor(12), 2.0);
        assert_relative_eq!(speed_factor(15), 2.5);
    }

    #[test]
    fn advance_step_matches_table() {
        assert_eq!(advance_step(1, 0), 1);
        assert_eq!(advance_step(2, 0), 2);
        assert_eq!(advance_step(1, 5), 2);
        assert_eq!(advance_step(2, 5), 3);
        assert_eq!(advance_step(1, 10), 2);
        assert_eq!(advance_step(2, 10), 4);
        assert_eq!(advance_step(1, 15), 3);
        assert_eq!(advance_step(2, 15), 5);
    }

    #[test]
    fn advance_step_tracks_float_rounding() {
        for kills in 0..60 {
            for base in 1..=2u32 {
                let exact = base as f32 * speed_factor(kills);
                let expected = (exact + 0.5).floor() as i32;
                assert_eq!(advance_step(base, kills), expected, "kills={kills} base={base}");
            }
        }
    }

    #[test]
    fn never_picks_eliminated_rail() {
        let list = enemies();
        let mut eliminated = RailSet::new();
        for n in [1, 2, 3, 5, 8, 9] {
            eliminated.insert(Rail::new(n).unwrap());
        }

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let advance = plan_advance(&list, &eliminated, 0, &mut rng).unwrap();
            assert!(!eliminated.contains(list[advance.index].rail));
            assert!((1..=2).contains(&advance.step));
        }
    }

    #[test]
    fn picks_every_live_enemy_eventually() {
        let list = enemies();
        let eliminated = RailSet::new();
        let mut seen = [false; 9];

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let advance = plan_advance(&list, &eliminated, 0, &mut rng).unwrap();
            seen[advance.index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn no_live_enemy_yields_none() {
        let list = enemies();
        let mut eliminated = RailSet::new();
        for r in Rail::all() {
            eliminated.insert(r);
        }
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(plan_advance(&list, &eliminated, 0, &mut rng), None);
        assert_eq!(plan_advance(&[], &RailSet::new(), 0, &mut rng), None);
    }
}
