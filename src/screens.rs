//! Static text screens: the presentation sequence, the score overlay and
//! the game-over screen.
//!
//! Text is laid out for the 8px font of the 128x64 panel: 16 characters
//! per line, lines 10px apart.

use core::fmt::Write;

use crate::config::TimingConfig;
use crate::traits::FrameBuffer;

/// One line of text at a fixed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLine {
    /// Text to draw.
    pub text: &'static str,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

const fn line(text: &'static str, x: i32, y: i32) -> TextLine {
    TextLine { text, x, y }
}

/// How long a presentation screen stays up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hold {
    /// Informational screen, held for [`TimingConfig::screen_hold_ms`].
    Screen,
    /// Final prompt, held for [`TimingConfig::ready_hold_ms`].
    Ready,
}

impl Hold {
    /// Hold time in milliseconds.
    pub fn duration_ms(&self, timing: &TimingConfig) -> u32 {
        match self {
            Hold::Screen => timing.screen_hold_ms,
            Hold::Ready => timing.ready_hold_ms,
        }
    }
}

/// A full-screen page of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    /// Lines drawn on a cleared buffer.
    pub lines: &'static [TextLine],
    /// Display time.
    pub hold: Hold,
}

impl Screen {
    /// Clears the buffer and draws every line. Does not present.
    pub fn draw<D: FrameBuffer + ?Sized>(&self, display: &mut D) {
        display.clear();
        for l in self.lines {
            display.draw_text(l.text, l.x, l.y);
        }
    }
}

/// Title, credits, story, controls, then the "ready?" prompt.
pub const PRESENTATION: [Screen; 4] = [
    Screen {
        lines: &[
            line("Los bunkers", 19, 0),
            line("Integrantes:", 0, 10),
            line("Ivan A. Cadena", 0, 20),
            line("Samuel J. Juarez", 0, 30),
            line("1/10/2025", 0, 40),
        ],
        hold: Hold::Screen,
    },
    Screen {
        lines: &[
            line("Historia:", 0, 0),
            line("Los aliens invad", 0, 10),
            line("en la tierra y t", 0, 20),
            line("u objetivo es de", 0, 30),
            line("tenerlos usando", 0, 40),
            line("el space shooter", 0, 50),
        ],
        hold: Hold::Screen,
    },
    Screen {
        lines: &[
            line("Controles:", 0, 0),
            line("Boton SW: Cambiar", 0, 10),
            line("modo control", 0, 20),
            line("Gyro/Joystick", 0, 30),
            line("Boton: Disparar", 0, 40),
        ],
        hold: Hold::Screen,
    },
    Screen {
        lines: &[line("preparado?...", 11, 0)],
        hold: Hold::Ready,
    },
];

/// Total presentation time in milliseconds.
pub fn presentation_ms(timing: &TimingConfig) -> u32 {
    PRESENTATION
        .iter()
        .map(|s| s.hold.duration_ms(timing))
        .sum()
}

/// Draws `P:<points>` in the top-left corner.
pub fn draw_score<D: FrameBuffer + ?Sized>(display: &mut D, points: u32) {
    let mut buf = heapless::String::<16>::new();
    core::write!(buf, "P:{}", points).ok();
    display.draw_text(&buf, 0, 0);
}

/// Clears the buffer and draws the final score and the restart prompt.
pub fn draw_game_over<D: FrameBuffer + ?Sized>(display: &mut D, points: u32) {
    let mut buf = heapless::String::<24>::new();
    core::write!(buf, "Puntos: {}", points).ok();

    display.clear();
    display.draw_text("GAME OVER", 34, 10);
    display.draw_text(&buf, 25, 25);
    display.draw_text("Presiona boton", 15, 40);
    display.draw_text("para reintentar", 15, 50);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockDisplay;

    #[test]
    fn presentation_has_four_screens() {
        assert_eq!(PRESENTATION.len(), 4);
        assert_eq!(PRESENTATION[0].lines[0].text, "Los bunkers");
        assert_eq!(PRESENTATION[3].hold, Hold::Ready);
    }

    #[test]
    fn presentation_lasts_eleven_seconds() {
        assert_eq!(presentation_ms(&TimingConfig::default()), 11_000);
    }

    #[test]
    fn screen_draw_clears_first() {
        let mut display = MockDisplay::new();
        display.fill(true);
        PRESENTATION[1].draw(&mut display);

        assert_eq!(display.lit_pixels(), 0);
        assert_eq!(display.texts().len(), 6);
        assert_eq!(display.texts()[0].0, "Historia:");
    }

    #[test]
    fn score_overlay() {
        let mut display = MockDisplay::new();
        draw_score(&mut display, 42);
        assert!(display.has_text("P:42"));
        assert_eq!(display.texts()[0].1, (0, 0));
    }

    #[test]
    fn score_overlay_large_values() {
        let mut display = MockDisplay::new();
        draw_score(&mut display, u32::MAX);
        assert!(display.has_text("P:4294967295"));
    }

    #[test]
    fn game_over_screen() {
        let mut display = MockDisplay::new();
        draw_game_over(&mut display, 17);
        assert!(display.has_text("GAME OVER"));
        assert!(display.has_text("Puntos: 17"));
        assert!(display.has_text("para reintentar"));
    }
}
