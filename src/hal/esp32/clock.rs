//! ESP32 clock and delay implementation using the ESP-IDF timer.

use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::{Ets, FreeRtos};

use crate::traits::Clock;

/// ESP32 clock using the hardware timer.
///
/// Time comes from `esp_timer_get_time()` (microseconds since boot).
/// Millisecond delays yield to FreeRTOS so other tasks, including the
/// button interrupt service, keep running; sub-millisecond remainders
/// busy-wait.
///
/// # Example
///
/// ```ignore
/// use embedded_hal::delay::DelayNs;
/// use rs_bunkers::hal::esp32::Esp32Clock;
/// use rs_bunkers::traits::Clock;
///
/// let mut clock = Esp32Clock::new();
/// let start = clock.now_ms();
/// clock.delay_ms(50);
/// assert!(clock.now_ms() - start >= 50);
/// ```
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // Safe: plain read of the high-resolution timer
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        (micros / 1000) as u64
    }
}

impl DelayNs for Esp32Clock {
    fn delay_ns(&mut self, ns: u32) {
        let us = ns.div_ceil(1000);
        if us >= 1000 {
            FreeRtos::delay_ms(us / 1000);
        }
        if us % 1000 > 0 {
            Ets::delay_us(us % 1000);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
