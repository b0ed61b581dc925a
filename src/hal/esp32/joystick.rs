//! Analog joystick axes via the ESP32 ADC.
//!
//! # Wiring
//!
//! - VRx → GPIO34 (ADC1)
//! - VRy → GPIO35 (ADC1)
//! - SW → GPIO32, handled by [`ButtonIrq`](super::ButtonIrq)
//!
//! Both channels use 11dB attenuation for the full 0-3.3V swing, giving
//! 12-bit readings centered near 2048.

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::{Gpio34, Gpio35};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

use crate::traits::AnalogStick;

/// Two-axis joystick on ADC1.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::adc::oneshot::AdcDriver;
/// use rs_bunkers::hal::esp32::Esp32Joystick;
/// use rs_bunkers::traits::AnalogStick;
///
/// let adc1 = AdcDriver::new(peripherals.adc1)?;
/// let mut stick = Esp32Joystick::new(&adc1, peripherals.pins.gpio34, peripherals.pins.gpio35)?;
/// let (x, y) = stick.read_axes()?;
/// ```
pub struct Esp32Joystick<'d> {
    x: AdcChannelDriver<'d, Gpio34, &'d AdcDriver<'d, ADC1>>,
    y: AdcChannelDriver<'d, Gpio35, &'d AdcDriver<'d, ADC1>>,
}

impl<'d> Esp32Joystick<'d> {
    /// Configures both axis channels.
    ///
    /// # Errors
    ///
    /// Returns an error if ADC channel initialization fails.
    pub fn new(
        adc: &'d AdcDriver<'d, ADC1>,
        x_pin: impl Peripheral<P = Gpio34> + 'd,
        y_pin: impl Peripheral<P = Gpio35> + 'd,
    ) -> Result<Self, EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        Ok(Self {
            x: AdcChannelDriver::new(adc, x_pin, &config)?,
            y: AdcChannelDriver::new(adc, y_pin, &config)?,
        })
    }
}

impl AnalogStick for Esp32Joystick<'_> {
    type Error = EspError;

    fn read_axes(&mut self) -> Result<(u16, u16), EspError> {
        Ok((self.x.read()?, self.y.read()?))
    }
}
