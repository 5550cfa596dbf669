use crate::registers::{Itg3200Constants, Itg3200Registers};
use crate::RegisterBus;
use byteorder::{BigEndian, ByteOrder};
use imu_traits::driver::{Device, RawGyroscope};
use log::{debug, warn};

/// Default ITG3200 address (AD0 pin low).
pub const ITG3200_ADDR: u16 = 0x68;

/// ITG3200 three-axis gyroscope, ±2000 °/s (14.375 LSB per °/s).
pub struct Itg3200<B> {
    bus: B,
}

impl<B: RegisterBus> Itg3200<B> {
    pub fn new(bus: B) -> Self {
        Itg3200 { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> Device for Itg3200<B> {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        debug!("Initializing ITG3200...");
        self.bus.write_register(
            Itg3200Registers::DlpfFs as u8,
            Itg3200Constants::FullScale2000 as u8,
        )?;
        self.bus.write_register(
            Itg3200Registers::PwrMgm as u8,
            Itg3200Constants::ClockPllX as u8,
        )
    }

    fn test_connection(&mut self) -> Result<bool, Self::Error> {
        let who_am_i = self.bus.read_register(Itg3200Registers::WhoAmI as u8)?;
        let id = (who_am_i >> 1) & 0x3F;
        if id != Itg3200Constants::DeviceId as u8 {
            warn!("ITG3200 WHO_AM_I mismatch. Expected 0x34, got {:#04x}", id);
            return Ok(false);
        }
        Ok(true)
    }
}

impl<B: RegisterBus> RawGyroscope for Itg3200<B> {
    fn rotation(&mut self) -> Result<[i16; 3], Self::Error> {
        let mut buf = [0u8; 6];
        self.bus
            .read_registers(Itg3200Registers::GyroXOutH as u8, &mut buf)?;
        Ok([
            BigEndian::read_i16(&buf[0..2]),
            BigEndian::read_i16(&buf[2..4]),
            BigEndian::read_i16(&buf[4..6]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RegisterMap;

    #[test]
    fn who_am_i_ignores_address_bits() {
        // 0x68 and 0x69 both carry 0x34 in bits 6..1
        for raw in [0x68, 0x69] {
            let mut gyro = Itg3200::new(RegisterMap::new().with_registers(0x00, &[raw]));
            assert!(gyro.test_connection().unwrap());
        }
        let mut gyro = Itg3200::new(RegisterMap::new().with_registers(0x00, &[0x70]));
        assert!(!gyro.test_connection().unwrap());
    }

    #[test]
    fn decodes_big_endian_axes() {
        let bus = RegisterMap::new().with_registers(0x1D, &[0x00, 0x0F, 0xFF, 0xF1, 0x80, 0x00]);
        let mut gyro = Itg3200::new(bus);
        assert_eq!(gyro.rotation().unwrap(), [15, -15, i16::MIN]);
    }

    #[test]
    fn bus_fault_propagates() {
        let mut bus = RegisterMap::new();
        bus.set_faulty(true);
        let mut gyro = Itg3200::new(bus);
        assert!(gyro.initialize().is_err());
        assert!(gyro.rotation().is_err());
    }
}
