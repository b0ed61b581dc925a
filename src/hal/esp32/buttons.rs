//! Edge-triggered push buttons feeding the event queue.
//!
//! Each button is an active-low input with the internal pull-up enabled.
//! A falling edge runs a short interrupt callback that stamps the edge with
//! the timer and pushes an [`InputEvent`] into a `'static` [`EventQueue`].
//! Nothing else happens in interrupt context.
//!
//! ESP-IDF disables a GPIO interrupt after it fires; call
//! [`rearm`](ButtonIrq::rearm) once per frame from the main loop.
//!
//! # Wiring
//!
//! - Shoot button → GPIO16 to GND
//! - Joystick SW → GPIO32 to GND

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use esp_idf_hal::gpio::{Input, InterruptType, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

use crate::events::{EventKind, EventQueue, InputEvent};

/// Interrupt-driven button.
///
/// Also readable as a polled [`InputPin`], which the game-over screen uses
/// for the restart press.
///
/// # Example
///
/// ```ignore
/// use rs_bunkers::events::{EventKind, EventQueue};
/// use rs_bunkers::hal::esp32::ButtonIrq;
///
/// static EVENTS: EventQueue = EventQueue::new();
///
/// let mut shoot = ButtonIrq::new(peripherals.pins.gpio16, EventKind::Shoot, &EVENTS)?;
/// loop {
///     shoot.rearm()?;
///     // ... drain EVENTS ...
/// }
/// ```
pub struct ButtonIrq<'d, P>
where
    P: esp_idf_hal::gpio::InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
    kind: EventKind,
}

impl<'d, P> ButtonIrq<'d, P>
where
    P: esp_idf_hal::gpio::InputPin + OutputPin,
{
    /// Configures the pin and installs the falling-edge handler.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO or ISR service setup fails.
    pub fn new(
        pin: impl Peripheral<P = P> + 'd,
        kind: EventKind,
        events: &'static EventQueue,
    ) -> Result<Self, EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        pin.set_interrupt_type(InterruptType::NegEdge)?;

        // Safe: the callback only reads the timer and pushes to a lock-free
        // queue, both allowed in ISR context
        unsafe {
            pin.subscribe(move || {
                let micros = esp_idf_hal::sys::esp_timer_get_time();
                events.push(InputEvent::new(kind, (micros / 1000) as u64));
            })?;
        }
        pin.enable_interrupt()?;

        Ok(Self { pin, kind })
    }

    /// Re-enables the interrupt after it fired.
    pub fn rearm(&mut self) -> Result<(), EspError> {
        self.pin.enable_interrupt()
    }

    /// Which event this button raises.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl<P> ErrorType for ButtonIrq<'_, P>
where
    P: esp_idf_hal::gpio::InputPin + OutputPin,
{
    type Error = Infallible;
}

impl<P> InputPin for ButtonIrq<'_, P>
where
    P: esp_idf_hal::gpio::InputPin + OutputPin,
{
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_low())
    }
}
