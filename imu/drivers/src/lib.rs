//! Chip drivers for the IMU adapters.
//!
//! Every driver is generic over a [`RegisterBus`], which is implemented for
//! any `i2cdev` device, and owns exactly one bus handle addressed at its chip.
//! Constructors never touch the bus.

mod registers;

pub mod adxl345;
pub mod bno055;
pub mod itg3200;
pub mod mock;
pub mod mpu;
pub mod qmi8658;

pub use adxl345::Adxl345;
pub use bno055::Bno055;
pub use itg3200::Itg3200;
pub use mpu::{Mpu6050, Mpu9250};
pub use qmi8658::Qmi8658;
pub use registers::OperationMode;

use i2cdev::core::I2CDevice;

/// Byte-wide register access on one chip.
pub trait RegisterBus {
    type Error: std::error::Error + 'static;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Reads consecutive registers starting at `start`, one byte at a time.
    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_register(start + i as u8)?;
        }
        Ok(())
    }
}

impl<D> RegisterBus for D
where
    D: I2CDevice,
    D::Error: 'static,
{
    type Error = D::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.smbus_read_byte_data(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.smbus_write_byte_data(register, value)
    }

    /// Sets the register pointer, then reads the whole block in one
    /// transfer so the chip cannot latch a new sample mid-read.
    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.write(&[start])?;
        self.read(buf)
    }
}
