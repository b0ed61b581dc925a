//! MPU6050 gyroscope/accelerometer over I2C.
//!
//! The sensor runs at its power-on full-scale ranges: ±2g for the
//! accelerometer and ±250°/s for the gyroscope. One burst read of the
//! fourteen data registers yields acceleration, temperature and rotation.

use embedded_hal::i2c::I2c;

use crate::traits::MotionSensor;

/// Default I2C address (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;

const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_GYRO_XOUT_H: u8 = 0x43;

/// LSB per g at ±2g.
const ACCEL_LSB_PER_G: f32 = 16384.0;
/// LSB per °/s at ±250°/s.
const GYRO_LSB_PER_DPS: f32 = 131.0;

/// MPU6050 driver.
///
/// # Example
///
/// ```ignore
/// use rs_bunkers::hal::esp32::Mpu6050;
/// use rs_bunkers::traits::MotionSensor;
///
/// let mut mpu = Mpu6050::new(i2c)?;
/// let (gx, gy) = mpu.angular_velocity()?;
/// ```
pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Wakes the sensor at the default address.
    pub fn new(i2c: I2C) -> Result<Self, I2C::Error> {
        Self::with_address(i2c, MPU6050_ADDR)
    }

    /// Wakes the sensor at `address`.
    pub fn with_address(i2c: I2C, address: u8) -> Result<Self, I2C::Error> {
        let mut mpu = Self { i2c, address };
        // Clear SLEEP, internal 8MHz oscillator
        mpu.i2c.write(address, &[REG_PWR_MGMT_1, 0])?;
        Ok(mpu)
    }

    fn read_triple(&mut self, register: u8) -> Result<[i16; 3], I2C::Error> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]),
            i16::from_be_bytes([buf[2], buf[3]]),
            i16::from_be_bytes([buf[4], buf[5]]),
        ])
    }

    /// Releases the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> MotionSensor for Mpu6050<I2C> {
    type Error = I2C::Error;

    fn angular_velocity(&mut self) -> Result<(f32, f32), Self::Error> {
        let [x, y, _] = self.read_triple(REG_GYRO_XOUT_H)?;
        Ok((x as f32 / GYRO_LSB_PER_DPS, y as f32 / GYRO_LSB_PER_DPS))
    }

    fn acceleration(&mut self) -> Result<(f32, f32, f32), Self::Error> {
        let [x, y, z] = self.read_triple(REG_ACCEL_XOUT_H)?;
        Ok((
            x as f32 / ACCEL_LSB_PER_G,
            y as f32 / ACCEL_LSB_PER_G,
            z as f32 / ACCEL_LSB_PER_G,
        ))
    }
}
