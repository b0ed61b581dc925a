//! Game entities: rails, enemies, bunkers, the aim cursor, and hit testing.
//!
//! The playfield is split into nine fixed lanes ("rails"), each 14 pixels
//! wide. Every rail hosts one bunker at the bottom of the screen and one
//! enemy descending towards it. The aim is a free cursor steered by the
//! player.
//!
//! # Hit Test
//!
//! Shots use a coarse two-point test: the aim anchor `(x, y)` and the
//! offset point `(x + 4, y + 4)` are each checked against the enemy's 8x8
//! box with strict inequalities, so touching an edge is a miss.
//!
//! ```rust
//! use rs_bunkers::entities::{Aim, Enemy, Hitbox, Rail};
//!
//! let enemy = Enemy::new(Rail::new(1).unwrap(), 20);
//! assert_eq!(enemy.x, 7);
//!
//! let hitbox = Hitbox::around(&enemy, 0);
//! assert!(!hitbox.contains(7, 20)); // top-left corner
//! assert!(hitbox.contains(8, 21));
//!
//! assert!(Aim::new(8, 21).hits(&enemy, 0));
//! ```

use crate::sprite::{Sprite, BUNKER, ENEMY, SPRITE_SIZE};

/// Number of rails on the playfield.
pub const RAIL_COUNT: u8 = 9;

/// Width of a rail in pixels.
pub const RAIL_WIDTH: i32 = 14;

/// Offset of a sprite within its rail.
pub const RAIL_OFFSET: i32 = 7;

/// Y coordinate of the bunker line. An enemy reaching it destroys the bunker.
pub const BUNKER_LINE: i32 = 55;

/// Offset of the second hit-test sample point from the aim anchor.
pub const AIM_PROBE_OFFSET: i32 = 4;

/// Cursor bounds (inclusive).
pub const AIM_MIN_X: i32 = 2;
/// Cursor bounds (inclusive).
pub const AIM_MAX_X: i32 = 121;
/// Cursor bounds (inclusive).
pub const AIM_MIN_Y: i32 = 2;
/// Cursor bounds (inclusive).
pub const AIM_MAX_Y: i32 = 49;

/// Cursor position after start-up and reset.
pub const AIM_CENTER: (i32, i32) = (61, 26);

/// One of the nine lanes, numbered `1..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rail(u8);

impl Rail {
    /// Creates a rail, returning `None` outside `1..=9`.
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= RAIL_COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Rail number in `1..=9`.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// X coordinate of the sprite column for this rail.
    #[inline]
    pub const fn x(self) -> i32 {
        (self.0 as i32 - 1) * RAIL_WIDTH + RAIL_OFFSET
    }

    /// Iterates all rails from left to right.
    pub fn all() -> impl Iterator<Item = Rail> {
        (1..=RAIL_COUNT).map(Rail)
    }
}

/// Set of rails, stored as a 9-bit mask.
///
/// Used for the eliminated rails: insertion is idempotent and nothing is
/// ever removed except by [`clear`](Self::clear) on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RailSet(u16);

impl RailSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    const fn bit(rail: Rail) -> u16 {
        1 << (rail.0 - 1)
    }

    /// Adds a rail. Returns true if it was not already present.
    pub fn insert(&mut self, rail: Rail) -> bool {
        let was_absent = !self.contains(rail);
        self.0 |= Self::bit(rail);
        was_absent
    }

    /// Returns true if the rail is in the set.
    #[inline]
    pub const fn contains(&self, rail: Rail) -> bool {
        self.0 & Self::bit(rail) != 0
    }

    /// Number of rails in the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no rail is in the set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if every rail is in the set.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len() == RAIL_COUNT as usize
    }

    /// Removes every rail.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterates the rails in the set, left to right.
    pub fn iter(&self) -> impl Iterator<Item = Rail> + '_ {
        Rail::all().filter(move |r| self.contains(*r))
    }
}

/// Something with a position and a sprite.
pub trait Positioned {
    /// Top-left corner of the sprite.
    fn position(&self) -> (i32, i32);

    /// Sprite drawn at [`position`](Self::position).
    fn sprite(&self) -> &'static Sprite<8, 8>;
}

/// An alien descending along its rail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    /// Lane the enemy travels in.
    pub rail: Rail,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels. Negative while entering from above.
    pub y: i32,
}

impl Enemy {
    /// Creates an enemy at the top of `rail`'s column.
    pub const fn new(rail: Rail, y: i32) -> Self {
        Self {
            rail,
            x: rail.x(),
            y,
        }
    }

    /// Returns true if the enemy reached the bunker line.
    #[inline]
    pub const fn reached_bunkers(&self) -> bool {
        self.y >= BUNKER_LINE
    }
}

impl Positioned for Enemy {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> &'static Sprite<8, 8> {
        &ENEMY
    }
}

/// A bunker defending its rail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bunker {
    /// Lane the bunker defends.
    pub rail: Rail,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
}

impl Bunker {
    /// Creates a bunker on the bunker line of `rail`.
    pub const fn new(rail: Rail) -> Self {
        Self {
            rail,
            x: rail.x(),
            y: BUNKER_LINE,
        }
    }
}

impl Positioned for Bunker {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> &'static Sprite<8, 8> {
        &BUNKER
    }
}

/// The player's crosshair.
///
/// Unlike enemies and bunkers the aim has no rail; `(x, y)` is the hit-test
/// anchor and always stays inside the cursor bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aim {
    /// Anchor X.
    pub x: i32,
    /// Anchor Y.
    pub y: i32,
}

impl Default for Aim {
    fn default() -> Self {
        Self::centered()
    }
}

impl Aim {
    /// Creates an aim at `(x, y)`, clamped to the cursor bounds.
    pub fn new(x: i32, y: i32) -> Self {
        let mut aim = Self { x, y };
        aim.clamp();
        aim
    }

    /// Creates an aim at the screen center.
    pub const fn centered() -> Self {
        Self {
            x: AIM_CENTER.0,
            y: AIM_CENTER.1,
        }
    }

    /// Moves the anchor by `(dx, dy)` and clamps it to the cursor bounds.
    pub fn nudge(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.clamp();
    }

    /// Puts the anchor back to the screen center.
    pub fn recenter(&mut self) {
        *self = Self::centered();
    }

    fn clamp(&mut self) {
        self.x = self.x.clamp(AIM_MIN_X, AIM_MAX_X);
        self.y = self.y.clamp(AIM_MIN_Y, AIM_MAX_Y);
    }

    /// The two hit-test sample points.
    #[inline]
    pub const fn probes(&self) -> [(i32, i32); 2] {
        [
            (self.x, self.y),
            (self.x + AIM_PROBE_OFFSET, self.y + AIM_PROBE_OFFSET),
        ]
    }

    /// Returns true if either probe lands inside `enemy`'s box widened by
    /// `padding` on every side.
    pub fn hits(&self, enemy: &Enemy, padding: i32) -> bool {
        let hitbox = Hitbox::around(enemy, padding);
        self.probes()
            .iter()
            .any(|&(px, py)| hitbox.contains(px, py))
    }
}

/// Axis-aligned box used by the hit test. Bounds are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hitbox {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Hitbox {
    /// The 8x8 box of `target`, widened by `padding` on each side.
    pub fn around<P: Positioned + ?Sized>(target: &P, padding: i32) -> Self {
        let (x, y) = target.position();
        Self {
            left: x - padding,
            top: y - padding,
            right: x + SPRITE_SIZE + padding,
            bottom: y + SPRITE_SIZE + padding,
        }
    }

    /// Strict containment: points on the border are outside.
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        self.left < px && px < self.right && self.top < py && py < self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rail(n: u8) -> Rail {
        Rail::new(n).unwrap()
    }

    // =========================================================================
    // Rail Tests
    // =========================================================================

    #[test]
    fn rail_range() {
        assert!(Rail::new(0).is_none());
        assert!(Rail::new(1).is_some());
        assert!(Rail::new(9).is_some());
        assert!(Rail::new(10).is_none());
    }

    #[test]
    fn rail_columns() {
        assert_eq!(rail(1).x(), 7);
        assert_eq!(rail(2).x(), 21);
        assert_eq!(rail(9).x(), 119);
    }

    #[test]
    fn rail_all_yields_nine() {
        let numbers: Vec<u8> = Rail::all().map(Rail::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    // =========================================================================
    // RailSet Tests
    // =========================================================================

    #[test]
    fn rail_set_insert_is_idempotent() {
        let mut set = RailSet::new();
        assert!(set.insert(rail(3)));
        assert!(!set.insert(rail(3)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(rail(3)));
        assert!(!set.contains(rail(4)));
    }

    #[test]
    fn rail_set_full_and_clear() {
        let mut set = RailSet::new();
        for r in Rail::all() {
            set.insert(r);
        }
        assert!(set.is_full());
        assert_eq!(set.len(), 9);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn rail_set_iter_in_order() {
        let mut set = RailSet::new();
        set.insert(rail(7));
        set.insert(rail(2));
        let rails: Vec<u8> = set.iter().map(Rail::number).collect();
        assert_eq!(rails, vec![2, 7]);
    }

    // =========================================================================
    // Entity Tests
    // =========================================================================

    #[test]
    fn bunker_sits_on_line() {
        let b = Bunker::new(rail(5));
        assert_eq!(b.position(), (63, BUNKER_LINE));
    }

    #[test]
    fn enemy_reaches_bunkers_at_line() {
        let mut e = Enemy::new(rail(1), 54);
        assert!(!e.reached_bunkers());
        e.y = 55;
        assert!(e.reached_bunkers());
    }

    #[test]
    fn aim_clamps_to_bounds() {
        let mut aim = Aim::centered();
        aim.nudge(-500, -500);
        assert_eq!((aim.x, aim.y), (AIM_MIN_X, AIM_MIN_Y));
        aim.nudge(500, 500);
        assert_eq!((aim.x, aim.y), (AIM_MAX_X, AIM_MAX_Y));
    }

    #[test]
    fn aim_recenter() {
        let mut aim = Aim::new(3, 3);
        aim.recenter();
        assert_eq!((aim.x, aim.y), AIM_CENTER);
    }

    // =========================================================================
    // Hit Test
    // =========================================================================

    #[test]
    fn corner_is_not_a_hit() {
        let enemy = Enemy::new(rail(3), 20);
        let aim = Aim::new(enemy.x, enemy.y);
        // Second probe at +4/+4 lands inside, so check the anchor alone
        assert!(!Hitbox::around(&enemy, 0).contains(aim.x, aim.y));
    }

    #[test]
    fn aim_on_corner_hits_through_second_probe() {
        let enemy = Enemy::new(rail(3), 20);
        let aim = Aim::new(enemy.x, enemy.y);
        assert!(aim.hits(&enemy, 0));
    }

    #[test]
    fn one_pixel_inside_is_a_hit() {
        let enemy = Enemy::new(rail(3), 20);
        assert!(Hitbox::around(&enemy, 0).contains(enemy.x + 1, enemy.y + 1));
    }

    #[test]
    fn far_edge_is_not_a_hit() {
        let enemy = Enemy::new(rail(3), 20);
        let hitbox = Hitbox::around(&enemy, 0);
        assert!(!hitbox.contains(enemy.x + 8, enemy.y + 4));
        assert!(!hitbox.contains(enemy.x + 4, enemy.y + 8));
        assert!(hitbox.contains(enemy.x + 7, enemy.y + 7));
    }

    #[test]
    fn offset_probe_hits_when_anchor_misses() {
        let enemy = Enemy::new(rail(3), 20);
        // Anchor just above-left of the box, probe inside
        let aim = Aim::new(enemy.x - 2, enemy.y - 2);
        assert!(aim.hits(&enemy, 0));
    }

    #[test]
    fn both_probes_outside_misses() {
        let enemy = Enemy::new(rail(3), 20);
        let aim = Aim::new(enemy.x - 5, enemy.y - 5);
        assert!(!aim.hits(&enemy, 0));
    }

    #[test]
    fn padding_widens_hitbox() {
        let enemy = Enemy::new(rail(3), 20);
        let aim = Aim::new(enemy.x + 10, enemy.y + 10);
        assert!(!aim.hits(&enemy, 0));
        assert!(aim.hits(&enemy, 6));
    }
}
