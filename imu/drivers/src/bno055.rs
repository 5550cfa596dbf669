use crate::registers::{Bno055Constants, Bno055Registers, OperationMode};
use crate::RegisterBus;
use byteorder::{ByteOrder, LittleEndian};
use imu_traits::driver::{AxisRemap, AxisSign, FusionDriver, FusionMode};
use imu_traits::Quaternion;
use log::{debug, error, warn};
use num_traits::FromPrimitive;
use std::thread;
use std::time::Duration;

/// Default BNO055 address (COM3 pin low).
pub const BNO055_ADDR: u16 = 0x28;

/// Number of chip-id polls after a reset before giving up.
const RESET_POLLS: u32 = 100;

/// BNO055 absolute orientation sensor with onboard fusion.
///
/// Readings assume the power-on unit selection: m/s², °/s, and a
/// quaternion scaled by 2^14.
pub struct Bno055<B> {
    bus: B,
    mode: OperationMode,
}

impl<B: RegisterBus> Bno055<B> {
    pub fn new(bus: B) -> Self {
        Bno055 {
            bus,
            mode: OperationMode::Ndof,
        }
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn chip_id(&mut self) -> Result<u8, B::Error> {
        self.bus.read_register(Bno055Registers::ChipId as u8)
    }

    fn set_page(&mut self, page: u8) -> Result<(), B::Error> {
        self.bus.write_register(Bno055Registers::PageId as u8, page)
    }

    /// Writes OPR_MODE and remembers it so configuration writes can restore it.
    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), B::Error> {
        self.write_mode(mode)?;
        self.mode = mode;
        Ok(())
    }

    fn write_mode(&mut self, mode: OperationMode) -> Result<(), B::Error> {
        self.bus
            .write_register(Bno055Registers::OprMode as u8, mode as u8)?;
        // Wait for mode switch to complete
        thread::sleep(Duration::from_millis(30));
        Ok(())
    }

    /// Reads OPR_MODE back from the chip.
    pub fn current_mode(&mut self) -> Result<Option<OperationMode>, B::Error> {
        let raw = self.bus.read_register(Bno055Registers::OprMode as u8)?;
        Ok(OperationMode::from_u8(raw & 0x0F))
    }

    /// Runs `write` in config mode, then returns to the remembered mode even
    /// if the write failed.
    fn configure<F>(&mut self, write: F) -> Result<(), B::Error>
    where
        F: FnOnce(&mut B) -> Result<(), B::Error>,
    {
        self.write_mode(OperationMode::Config)?;
        let written = write(&mut self.bus);
        thread::sleep(Duration::from_millis(10));
        self.write_mode(self.mode)?;
        written
    }

    fn read_vector(&mut self, start: Bno055Registers, scale: f64) -> Result<[f64; 3], B::Error> {
        let mut buf = [0u8; 6];
        self.bus.read_registers(start as u8, &mut buf)?;
        Ok([
            LittleEndian::read_i16(&buf[0..2]) as f64 * scale,
            LittleEndian::read_i16(&buf[2..4]) as f64 * scale,
            LittleEndian::read_i16(&buf[4..6]) as f64 * scale,
        ])
    }
}

fn fusion_register(mode: FusionMode) -> OperationMode {
    match mode {
        FusionMode::ImuPlus => OperationMode::ImuPlus,
        FusionMode::Compass => OperationMode::Compass,
        FusionMode::M4g => OperationMode::M4g,
        FusionMode::NdofFmcOff => OperationMode::NdofFmcOff,
        FusionMode::Ndof => OperationMode::Ndof,
    }
}

fn remap_register(remap: AxisRemap) -> u8 {
    match remap {
        AxisRemap::P0 | AxisRemap::P3 | AxisRemap::P5 | AxisRemap::P6 => 0x21,
        AxisRemap::P1 | AxisRemap::P2 | AxisRemap::P4 | AxisRemap::P7 => 0x24,
    }
}

fn sign_register(sign: AxisSign) -> u8 {
    match sign {
        AxisSign::P0 => 0x04,
        AxisSign::P1 => 0x00,
        AxisSign::P2 => 0x06,
        AxisSign::P3 => 0x02,
        AxisSign::P4 => 0x03,
        AxisSign::P5 => 0x01,
        AxisSign::P6 => 0x07,
        AxisSign::P7 => 0x05,
    }
}

impl<B: RegisterBus> FusionDriver for Bno055<B> {
    type Error = B::Error;

    fn begin(&mut self) -> Result<bool, Self::Error> {
        debug!("Initializing BNO055...");
        let mut id = self.chip_id()?;
        if id != Bno055Constants::ChipId as u8 {
            // The chip can take up to a second to boot
            thread::sleep(Duration::from_millis(1000));
            id = self.chip_id()?;
            if id != Bno055Constants::ChipId as u8 {
                error!("Invalid chip ID. Expected 0xA0, got {:#x}", id);
                return Ok(false);
            }
        }

        self.set_operation_mode(OperationMode::Config)?;
        self.bus.write_register(
            Bno055Registers::SysTrigger as u8,
            Bno055Constants::ResetSystem as u8,
        )?;
        thread::sleep(Duration::from_millis(30));

        let mut polls = 0;
        while self.chip_id()? != Bno055Constants::ChipId as u8 {
            polls += 1;
            if polls >= RESET_POLLS {
                warn!("BNO055 did not come back after reset");
                return Ok(false);
            }
            thread::sleep(Duration::from_millis(10));
        }
        thread::sleep(Duration::from_millis(50));

        self.bus.write_register(
            Bno055Registers::PwrMode as u8,
            Bno055Constants::PowerNormal as u8,
        )?;
        thread::sleep(Duration::from_millis(10));
        self.set_page(0)?;
        self.bus.write_register(Bno055Registers::SysTrigger as u8, 0x00)?;
        thread::sleep(Duration::from_millis(10));

        self.set_operation_mode(OperationMode::Ndof)?;
        Ok(true)
    }

    fn set_ext_crystal_use(&mut self, external: bool) -> Result<(), Self::Error> {
        let trigger = if external {
            Bno055Constants::ExternalClock as u8
        } else {
            0x00
        };
        self.set_page(0)?;
        self.configure(|bus| bus.write_register(Bno055Registers::SysTrigger as u8, trigger))
    }

    fn set_mode(&mut self, mode: FusionMode) -> Result<(), Self::Error> {
        self.set_operation_mode(fusion_register(mode))
    }

    fn set_axis_remap(&mut self, remap: AxisRemap) -> Result<(), Self::Error> {
        let value = remap_register(remap);
        self.configure(|bus| bus.write_register(Bno055Registers::AxisMapConfig as u8, value))
    }

    fn set_axis_sign(&mut self, sign: AxisSign) -> Result<(), Self::Error> {
        let value = sign_register(sign);
        self.configure(|bus| bus.write_register(Bno055Registers::AxisMapSign as u8, value))
    }

    fn linear_acceleration(&mut self) -> Result<[f64; 3], Self::Error> {
        // 1 m/s² = 100 LSB
        self.read_vector(Bno055Registers::LiaDataXLsb, 1.0 / 100.0)
    }

    fn gyroscope(&mut self) -> Result<[f64; 3], Self::Error> {
        // 1 °/s = 16 LSB
        self.read_vector(Bno055Registers::GyrDataXLsb, 1.0 / 16.0)
    }

    fn quaternion(&mut self) -> Result<Quaternion, Self::Error> {
        let mut buf = [0u8; 8];
        self.bus
            .read_registers(Bno055Registers::QuaDataWLsb as u8, &mut buf)?;

        let scale = 1.0 / ((1 << 14) as f64);
        Ok(Quaternion {
            w: (LittleEndian::read_i16(&buf[0..2]) as f64) * scale,
            x: (LittleEndian::read_i16(&buf[2..4]) as f64) * scale,
            y: (LittleEndian::read_i16(&buf[4..6]) as f64) * scale,
            z: (LittleEndian::read_i16(&buf[6..8]) as f64) * scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RegisterMap;
    use approx::assert_relative_eq;

    fn chip() -> RegisterMap {
        RegisterMap::new().with_registers(0x00, &[0xA0])
    }

    #[test]
    fn begin_ends_in_ndof() {
        let mut bno = Bno055::new(chip());
        assert!(bno.begin().unwrap());
        assert_eq!(bno.current_mode().unwrap(), Some(OperationMode::Ndof));
        let bus = bno.release();
        assert!(bus.writes().contains(&(0x3F, 0x20)));
        assert_eq!(bus.register(0x3E), 0x00);
    }

    #[test]
    fn configuration_restores_previous_mode() {
        let mut bno = Bno055::new(chip());
        bno.set_mode(FusionMode::ImuPlus).unwrap();
        bno.set_axis_remap(AxisRemap::P0).unwrap();
        bno.set_axis_sign(AxisSign::P1).unwrap();
        bno.set_ext_crystal_use(true).unwrap();
        assert_eq!(bno.current_mode().unwrap(), Some(OperationMode::ImuPlus));

        let bus = bno.release();
        assert_eq!(bus.register(0x41), 0x21);
        assert_eq!(bus.register(0x42), 0x00);
        assert_eq!(bus.register(0x3F), 0x80);
        // every configuration write happens in config mode
        let writes = bus.writes();
        for target in [0x41u8, 0x42, 0x3F] {
            let at = writes.iter().position(|(reg, _)| *reg == target).unwrap();
            assert_eq!(writes[at - 1], (0x3D, 0x00));
        }
    }

    #[test]
    fn failed_configuration_write_leaves_fusion_running() {
        let mut bno = Bno055::new(chip());
        bno.set_mode(FusionMode::ImuPlus).unwrap();
        let result = bno.configure(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "nack"))
        });
        assert!(result.is_err());
        assert_eq!(bno.current_mode().unwrap(), Some(OperationMode::ImuPlus));

        // a later configuration still comes back to the fusion mode
        bno.set_axis_sign(AxisSign::P3).unwrap();
        assert_eq!(bno.current_mode().unwrap(), Some(OperationMode::ImuPlus));
        assert_eq!(bno.release().register(0x42), 0x02);
    }

    #[test]
    fn decodes_quaternion() {
        // w = 0.5, x = -0.5, y = 0.5, z = -0.5
        let bus = chip().with_registers(
            0x20,
            &[0x00, 0x20, 0x00, 0xE0, 0x00, 0x20, 0x00, 0xE0],
        );
        let mut bno = Bno055::new(bus);
        let q = bno.quaternion().unwrap();
        assert_relative_eq!(q.w, 0.5);
        assert_relative_eq!(q.x, -0.5);
        assert_relative_eq!(q.y, 0.5);
        assert_relative_eq!(q.z, -0.5);
        assert_relative_eq!(q.norm(), 1.0);
    }

    #[test]
    fn scales_vectors() {
        let bus = chip()
            // linear acceleration: 981 -> 9.81 m/s²
            .with_registers(0x28, &[0x00, 0x00, 0x00, 0x00, 0xD5, 0x03])
            // gyro: 160 -> 10 °/s
            .with_registers(0x14, &[0xA0, 0x00, 0x00, 0x00, 0x60, 0xFF]);
        let mut bno = Bno055::new(bus);
        let lia = bno.linear_acceleration().unwrap();
        assert_relative_eq!(lia[2], 9.81, epsilon = 1e-9);
        let gyro = bno.gyroscope().unwrap();
        assert_relative_eq!(gyro[0], 10.0);
        assert_relative_eq!(gyro[2], -10.0);
    }
}
