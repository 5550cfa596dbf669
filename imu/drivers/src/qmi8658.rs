use crate::registers::{Qmi8658Constants, Qmi8658Registers};
use crate::RegisterBus;
use byteorder::{ByteOrder, LittleEndian};
use imu_traits::driver::SiImuDriver;
use imu_traits::units::{DEG_TO_RAD, GRAVITY};
use log::{debug, error};
use std::thread;
use std::time::Duration;

/// Default QMI8658 address (SA0 pin high).
pub const QMI8658_ADDR: u16 = 0x6B;

/// Counts per g at ±8 g.
const ACCEL_LSB_PER_G: f64 = 4096.0;
/// Counts per °/s at ±512 °/s.
const GYRO_LSB_PER_DPS: f64 = 64.0;

/// QMI8658 low-power six-axis IMU. Readings come back in m/s² and rad/s.
pub struct Qmi8658<B> {
    bus: B,
}

impl<B: RegisterBus> Qmi8658<B> {
    pub fn new(bus: B) -> Self {
        Qmi8658 { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn read_axes(&mut self, start: Qmi8658Registers, factor: f64) -> Result<[f32; 3], B::Error> {
        let mut buf = [0u8; 6];
        self.bus.read_registers(start as u8, &mut buf)?;
        Ok([
            (LittleEndian::read_i16(&buf[0..2]) as f64 * factor) as f32,
            (LittleEndian::read_i16(&buf[2..4]) as f64 * factor) as f32,
            (LittleEndian::read_i16(&buf[4..6]) as f64 * factor) as f32,
        ])
    }
}

impl<B: RegisterBus> SiImuDriver for Qmi8658<B> {
    type Error = B::Error;

    fn begin(&mut self) -> Result<bool, Self::Error> {
        debug!("Initializing QMI8658...");
        let who_am_i = self.bus.read_register(Qmi8658Registers::WhoAmI as u8)?;
        if who_am_i != Qmi8658Constants::WhoAmIValue as u8 {
            error!("QMI8658 WHO_AM_I mismatch. Expected 0x05, got {:#04x}", who_am_i);
            return Ok(false);
        }

        self.bus.write_register(
            Qmi8658Registers::Reset as u8,
            Qmi8658Constants::SoftResetCmd as u8,
        )?;
        thread::sleep(Duration::from_millis(15));

        self.bus.write_register(
            Qmi8658Registers::Ctrl1 as u8,
            Qmi8658Constants::AddrAutoIncrement as u8,
        )?;
        self.bus.write_register(
            Qmi8658Registers::Ctrl2 as u8,
            Qmi8658Constants::Accel8g as u8,
        )?;
        self.bus.write_register(
            Qmi8658Registers::Ctrl3 as u8,
            Qmi8658Constants::Gyro512Dps as u8,
        )?;
        self.bus.write_register(
            Qmi8658Registers::Ctrl7 as u8,
            Qmi8658Constants::EnableAccelGyro as u8,
        )?;
        thread::sleep(Duration::from_millis(10));
        Ok(true)
    }

    fn acceleration(&mut self) -> Result<[f32; 3], Self::Error> {
        self.read_axes(Qmi8658Registers::AxL, GRAVITY / ACCEL_LSB_PER_G)
    }

    fn rotation(&mut self) -> Result<[f32; 3], Self::Error> {
        self.read_axes(Qmi8658Registers::GxL, DEG_TO_RAD / GYRO_LSB_PER_DPS)
    }
}
