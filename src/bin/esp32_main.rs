//! Los Bunkers on an ESP32 DevKit.
//!
//! This is the firmware entry point. It brings up the shared I2C bus
//! (SSD1306 + MPU6050), the joystick ADC channels and the two button
//! interrupts, then hands everything to the [`GameRunner`] at 20 frames per
//! second.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32,display --bin esp32_main
//! espflash flash --monitor target/xtensa-esp32-espidf/release/esp32_main
//! ```

use std::cell::RefCell;

use embedded_hal_bus::i2c::RefCellDevice;
use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rs_bunkers::events::{EventKind, EventQueue};
use rs_bunkers::hal::esp32::{ButtonIrq, Esp32Clock, Esp32Display, Esp32Joystick, Mpu6050};
use rs_bunkers::{Config, GameRunner, Hardware};

/// Button edges from interrupt context, drained once per frame.
static EVENTS: EventQueue = EventQueue::new();

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  Los Bunkers");
    println!("================================");
    println!();

    let config = Config::default();
    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Shared I2C bus (GPIO18 SCL / GPIO19 SDA)
    // =========================================================================
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio19, // SDA
        peripherals.pins.gpio18, // SCL
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let bus = RefCell::new(i2c);
    println!("[OK] I2C bus initialized (GPIO18/19)");

    // =========================================================================
    // Display (SSD1306 at 0x3C)
    // =========================================================================
    let display = Esp32Display::new(RefCellDevice::new(&bus))
        .map_err(|e| anyhow::anyhow!("Display init failed: {:?}", e))?;
    println!("[OK] Display initialized");

    // =========================================================================
    // Motion sensor (MPU6050 at 0x68)
    // =========================================================================
    let motion = Mpu6050::new(RefCellDevice::new(&bus))
        .map_err(|e| anyhow::anyhow!("MPU6050 init failed: {:?}", e))?;
    println!("[OK] MPU6050 awake");

    // =========================================================================
    // Joystick (ADC1 on GPIO34/35)
    // =========================================================================
    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let stick = Esp32Joystick::new(&adc1, peripherals.pins.gpio34, peripherals.pins.gpio35)?;
    println!("[OK] Joystick initialized (GPIO34/35 ADC)");

    // =========================================================================
    // Buttons (falling edge interrupts)
    // =========================================================================
    let shoot = ButtonIrq::new(peripherals.pins.gpio16, EventKind::Shoot, &EVENTS)?;
    let mut mode_switch = ButtonIrq::new(peripherals.pins.gpio32, EventKind::ModeSwitch, &EVENTS)?;
    println!("[OK] Buttons armed (shoot GPIO16, mode GPIO32)");

    // =========================================================================
    // Game
    // =========================================================================
    // Safe: reads the hardware RNG register
    let seed = unsafe { esp_idf_hal::sys::esp_random() };
    let rng = SmallRng::seed_from_u64(seed as u64);

    let hardware = Hardware {
        display,
        motion,
        stick,
        button: shoot,
        clock: Esp32Clock::new(),
    };
    let mut runner = GameRunner::new(&config, hardware, rng, &EVENTS);

    println!();
    println!("Controls:");
    println!("  Tilt / stick:   Aim");
    println!("  Stick button:   Toggle gyro/joystick");
    println!("  Shoot button:   Fire, restart after game over");
    println!();
    log::info!(
        "starting game loop ({}ms frames)",
        config.timing.frame_interval_ms
    );

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        if let Err(e) = runner.hardware_mut().button.rearm() {
            log::warn!("shoot interrupt re-arm failed: {:?}", e);
        }
        if let Err(e) = mode_switch.rearm() {
            log::warn!("mode interrupt re-arm failed: {:?}", e);
        }
        runner.step();
    }
}
