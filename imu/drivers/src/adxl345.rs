use crate::registers::{Adxl345Constants, Adxl345Registers};
use crate::RegisterBus;
use byteorder::{ByteOrder, LittleEndian};
use imu_traits::driver::{Device, RawAccelerometer};
use log::{debug, warn};

/// Default ADXL345 address (ALT ADDRESS pin low).
pub const ADXL345_ADDR: u16 = 0x53;

/// ADXL345 three-axis accelerometer, ±2 g, 10-bit (256 LSB/g).
pub struct Adxl345<B> {
    bus: B,
}

impl<B: RegisterBus> Adxl345<B> {
    pub fn new(bus: B) -> Self {
        Adxl345 { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> Device for Adxl345<B> {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        debug!("Initializing ADXL345...");
        self.bus.write_register(Adxl345Registers::PowerCtl as u8, 0x00)?;
        self.bus
            .write_register(Adxl345Registers::DataFormat as u8, 0x00)?;
        self.bus.write_register(
            Adxl345Registers::PowerCtl as u8,
            Adxl345Constants::MeasureBit as u8,
        )
    }

    fn test_connection(&mut self) -> Result<bool, Self::Error> {
        let id = self.bus.read_register(Adxl345Registers::DevId as u8)?;
        if id != Adxl345Constants::DeviceId as u8 {
            warn!("ADXL345 device ID mismatch. Expected 0xE5, got {:#04x}", id);
            return Ok(false);
        }
        Ok(true)
    }
}

impl<B: RegisterBus> RawAccelerometer for Adxl345<B> {
    fn acceleration(&mut self) -> Result<[i16; 3], Self::Error> {
        let mut buf = [0u8; 6];
        self.bus
            .read_registers(Adxl345Registers::DataX0 as u8, &mut buf)?;
        Ok([
            LittleEndian::read_i16(&buf[0..2]),
            LittleEndian::read_i16(&buf[2..4]),
            LittleEndian::read_i16(&buf[4..6]),
        ])
    }
}
