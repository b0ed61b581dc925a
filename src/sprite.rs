//! Bitmap sprites, the pixel renderer, and integer scaling.
//!
//! Every entity in the game is drawn from a small binary pixel mask. The
//! masks are immutable `const` data shared by all entities of a kind, and a
//! single [`render`] routine draws any rectangular mask into a
//! [`FrameBuffer`].
//!
//! # Example
//!
//! ```rust
//! use rs_bunkers::sprite::{render, scale, PixelMask, ENEMY};
//! use rs_bunkers::hal::MockDisplay;
//!
//! let mut display = MockDisplay::new();
//! render(&mut display, 10, 10, &ENEMY);
//! assert!(display.pixel(13, 10)); // top row of the alien
//!
//! let big = scale(&ENEMY, 2).unwrap();
//! assert_eq!((big.width(), big.height()), (16, 16));
//! ```

extern crate alloc;

use alloc::vec::Vec;

use crate::traits::FrameBuffer;

/// A rectangular binary pixel mask.
pub trait PixelMask {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Returns the pixel at `row`, `col`. Out-of-range indices are off.
    fn pixel(&self, row: usize, col: usize) -> bool;

    /// Number of lit pixels.
    fn lit_count(&self) -> usize {
        let mut count = 0;
        for r in 0..self.height() {
            for c in 0..self.width() {
                if self.pixel(r, c) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Fixed-size sprite stored as rows of `0`/`1` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite<const W: usize, const H: usize> {
    rows: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Sprite<W, H> {
    /// Creates a sprite from rows of `0`/`1` values. Any non-zero value is lit.
    pub const fn new(rows: [[u8; W]; H]) -> Self {
        Self { rows }
    }

    /// Raw rows of the sprite.
    pub const fn rows(&self) -> &[[u8; W]; H] {
        &self.rows
    }
}

impl<const W: usize, const H: usize> PixelMask for Sprite<W, H> {
    #[inline]
    fn width(&self) -> usize {
        W
    }

    #[inline]
    fn height(&self) -> usize {
        H
    }

    #[inline]
    fn pixel(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&v| v != 0)
    }
}

/// Side length of every game sprite.
pub const SPRITE_SIZE: i32 = 8;

/// Alien invader.
pub const ENEMY: Sprite<8, 8> = Sprite::new([
    [0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 1, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 0, 0, 1, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 1, 1, 0, 1, 0],
]);

/// Normal crosshair.
pub const AIM: Sprite<8, 8> = Sprite::new([
    [0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [1, 1, 0, 1, 1, 0, 1, 1],
    [1, 1, 0, 1, 1, 0, 1, 1],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 0, 0, 0],
]);

/// Crosshair shown while the player is moving fast.
pub const QUICK_AIM: Sprite<8, 8> = Sprite::new([
    [1, 1, 0, 0, 0, 0, 1, 1],
    [1, 0, 1, 1, 1, 1, 0, 1],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [0, 1, 0, 1, 1, 0, 1, 0],
    [0, 1, 0, 1, 1, 0, 1, 0],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [1, 0, 1, 1, 1, 1, 0, 1],
    [1, 1, 0, 0, 0, 0, 1, 1],
]);

/// Defensive bunker.
pub const BUNKER: Sprite<8, 8> = Sprite::new([
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 1, 1, 0, 0, 1],
    [1, 0, 0, 1, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
]);

/// Draws `mask` with its top-left corner at `(x0, y0)`.
///
/// Every mask pixel is written, lit or not, so the sprite fully replaces
/// what was under it. No clipping happens here; the frame buffer drops
/// off-screen writes.
pub fn render<D, M>(target: &mut D, x0: i32, y0: i32, mask: &M)
where
    D: FrameBuffer + ?Sized,
    M: PixelMask + ?Sized,
{
    for r in 0..mask.height() {
        for c in 0..mask.width() {
            target.set_pixel(x0 + c as i32, y0 + r as i32, mask.pixel(r, c));
        }
    }
}

/// Errors from [`scale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleError {
    /// The factor must be at least 1.
    InvalidFactor(usize),
    /// The scaled bitmap would not fit in memory.
    TooLarge(usize),
}

impl core::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScaleError::InvalidFactor(factor) => {
                write!(f, "scale factor must be a positive integer, got {}", factor)
            }
            ScaleError::TooLarge(factor) => {
                write!(f, "scale factor {} overflows the bitmap size", factor)
            }
        }
    }
}

/// Heap-allocated bitmap produced by [`scale`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaledBitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl PixelMask for ScaledBitmap {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.pixels[row * self.width + col]
    }
}

/// Enlarges `mask` so each pixel becomes a `factor x factor` block.
///
/// A factor of 1 yields an identical copy. A factor of 0 is rejected, as is
/// one whose pixel count overflows `isize`.
pub fn scale<M: PixelMask + ?Sized>(mask: &M, factor: usize) -> Result<ScaledBitmap, ScaleError> {
    if factor < 1 {
        return Err(ScaleError::InvalidFactor(factor));
    }

    let too_large = ScaleError::TooLarge(factor);
    let width = mask.width().checked_mul(factor).ok_or(too_large)?;
    let height = mask.height().checked_mul(factor).ok_or(too_large)?;
    let area = width
        .checked_mul(height)
        .filter(|&area| area <= isize::MAX as usize)
        .ok_or(too_large)?;
    let mut pixels = Vec::with_capacity(area);

    for row in 0..height {
        for col in 0..width {
            pixels.push(mask.pixel(row / factor, col / factor));
        }
    }

    Ok(ScaledBitmap {
        width,
        height,
        pixels,
    })
}
