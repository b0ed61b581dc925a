//! Display abstraction for the game's monochrome frame buffer.
//!
//! This module defines the [`FrameBuffer`] trait the renderer and screens draw
//! through. It mirrors the handful of operations the game needs from a
//! 128x64 OLED driver and nothing more.

/// Width of the target display in pixels.
pub const SCREEN_WIDTH: i32 = 128;

/// Height of the target display in pixels.
pub const SCREEN_HEIGHT: i32 = 64;

/// Monochrome frame buffer trait.
///
/// Implementors provide hardware-specific drawing for displays like the
/// SSD1306 OLED, or a simulated pixel grid for testing. Drawing calls only
/// touch the buffer; nothing reaches the panel until [`present`](Self::present).
///
/// Pixel writes outside the `SCREEN_WIDTH x SCREEN_HEIGHT` area must be
/// ignored, so sprites partially above the screen can be drawn as-is.
///
/// # Example
///
/// ```ignore
/// use rs_bunkers::traits::FrameBuffer;
///
/// struct MyOled { /* ... */ }
///
/// impl FrameBuffer for MyOled {
///     type Error = ();
///
///     fn clear(&mut self) {}
///     fn set_pixel(&mut self, x: i32, y: i32, on: bool) {}
///     fn draw_text(&mut self, text: &str, x: i32, y: i32) {}
///     fn present(&mut self) -> Result<(), ()> { Ok(()) }
/// }
/// ```
pub trait FrameBuffer {
    /// Error type for flushing the buffer to the panel.
    type Error;

    /// Clears the whole buffer to "off".
    fn clear(&mut self);

    /// Sets a single pixel. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Draws text with its top-left corner at `(x, y)`. Screens space lines
    /// 10px apart, so the font must be at most 10px high.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Pushes the buffer to the panel.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Returns true if `(x, y)` lies on the 128x64 screen.
#[inline]
pub const fn on_screen(x: i32, y: i32) -> bool {
    x >= 0 && x < SCREEN_WIDTH && y >= 0 && y < SCREEN_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_screen_corners() {
        assert!(on_screen(0, 0));
        assert!(on_screen(127, 63));
        assert!(!on_screen(128, 0));
        assert!(!on_screen(0, 64));
        assert!(!on_screen(-1, 10));
        assert!(!on_screen(10, -20));
    }
}
