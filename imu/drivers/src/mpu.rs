use crate::registers::{MpuConstants, MpuRegisters};
use crate::RegisterBus;
use byteorder::{BigEndian, ByteOrder};
use imu_traits::driver::{Device, RawAccelerometer, RawGyroscope, SelfCalibrating};
use log::{debug, warn};
use std::thread;
use std::time::Duration;

/// Default MPU6050/MPU9250 address (AD0 pin low).
pub const MPU_ADDR: u16 = 0x68;

/// Raw counts for 1 g at ±2 g.
const ONE_G: i32 = 16384;
const CALIBRATION_SAMPLES: i32 = 64;
const CALIBRATION_INTERVAL: Duration = Duration::from_millis(2);

/// Register access shared by the InvenSense MPU family.
struct MpuCore<B> {
    bus: B,
    accel_bias: [i32; 3],
    gyro_bias: [i32; 3],
}

impl<B: RegisterBus> MpuCore<B> {
    fn new(bus: B) -> Self {
        MpuCore {
            bus,
            accel_bias: [0; 3],
            gyro_bias: [0; 3],
        }
    }

    fn initialize(&mut self) -> Result<(), B::Error> {
        self.bus.write_register(
            MpuRegisters::PwrMgmt1 as u8,
            MpuConstants::ClockPllX as u8,
        )?;
        self.bus.write_register(
            MpuRegisters::GyroConfig as u8,
            MpuConstants::FullScaleMin as u8,
        )?;
        self.bus.write_register(
            MpuRegisters::AccelConfig as u8,
            MpuConstants::FullScaleMin as u8,
        )
    }

    fn who_am_i(&mut self) -> Result<u8, B::Error> {
        self.bus.read_register(MpuRegisters::WhoAmI as u8)
    }

    fn read_axes(&mut self, start: MpuRegisters) -> Result<[i16; 3], B::Error> {
        let mut buf = [0u8; 6];
        self.bus.read_registers(start as u8, &mut buf)?;
        Ok([
            BigEndian::read_i16(&buf[0..2]),
            BigEndian::read_i16(&buf[2..4]),
            BigEndian::read_i16(&buf[4..6]),
        ])
    }

    fn acceleration(&mut self) -> Result<[i16; 3], B::Error> {
        let raw = self.read_axes(MpuRegisters::AccelXOutH)?;
        Ok(remove_bias(raw, self.accel_bias))
    }

    fn rotation(&mut self) -> Result<[i16; 3], B::Error> {
        let raw = self.read_axes(MpuRegisters::GyroXOutH)?;
        Ok(remove_bias(raw, self.gyro_bias))
    }

    /// Mean of `CALIBRATION_SAMPLES` raw readings taken at rest.
    fn mean(&mut self, start: MpuRegisters) -> Result<[i32; 3], B::Error> {
        let mut sum = [0i32; 3];
        for _ in 0..CALIBRATION_SAMPLES {
            let raw = self.read_axes(start)?;
            for (acc, value) in sum.iter_mut().zip(raw) {
                *acc += value as i32;
            }
            thread::sleep(CALIBRATION_INTERVAL);
        }
        Ok(sum.map(|s| s / CALIBRATION_SAMPLES))
    }
}

fn remove_bias(raw: [i16; 3], bias: [i32; 3]) -> [i16; 3] {
    std::array::from_fn(|i| {
        (raw[i] as i32 - bias[i]).clamp(i16::MIN as i32, i16::MAX as i32) as i16
    })
}

/// MPU6050 six-axis accelerometer + gyroscope at ±2 g / ±250 °/s.
pub struct Mpu6050<B> {
    core: MpuCore<B>,
}

impl<B: RegisterBus> Mpu6050<B> {
    pub fn new(bus: B) -> Self {
        Mpu6050 {
            core: MpuCore::new(bus),
        }
    }

    pub fn release(self) -> B {
        self.core.bus
    }
}

impl<B: RegisterBus> Device for Mpu6050<B> {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        debug!("Initializing MPU6050...");
        self.core.initialize()
    }

    fn test_connection(&mut self) -> Result<bool, Self::Error> {
        let id = self.core.who_am_i()?;
        if id != MpuConstants::Mpu6050Id as u8 {
            warn!("MPU6050 WHO_AM_I mismatch. Expected 0x68, got {:#04x}", id);
            return Ok(false);
        }
        Ok(true)
    }
}

impl<B: RegisterBus> RawAccelerometer for Mpu6050<B> {
    fn acceleration(&mut self) -> Result<[i16; 3], Self::Error> {
        self.core.acceleration()
    }
}

impl<B: RegisterBus> RawGyroscope for Mpu6050<B> {
    fn rotation(&mut self) -> Result<[i16; 3], Self::Error> {
        self.core.rotation()
    }
}

impl<B: RegisterBus> SelfCalibrating for Mpu6050<B> {
    /// Assumes the board lies flat, Z up.
    fn calibrate_accel(&mut self) -> Result<(), Self::Error> {
        let mean = self.core.mean(MpuRegisters::AccelXOutH)?;
        self.core.accel_bias = [mean[0], mean[1], mean[2] - ONE_G];
        debug!("MPU6050 accelerometer bias: {:?}", self.core.accel_bias);
        Ok(())
    }

    fn calibrate_gyro(&mut self) -> Result<(), Self::Error> {
        self.core.gyro_bias = self.core.mean(MpuRegisters::GyroXOutH)?;
        debug!("MPU6050 gyroscope bias: {:?}", self.core.gyro_bias);
        Ok(())
    }
}

/// MPU9250 nine-axis chip; only its accelerometer and gyroscope are used.
pub struct Mpu9250<B> {
    core: MpuCore<B>,
}

impl<B: RegisterBus> Mpu9250<B> {
    pub fn new(bus: B) -> Self {
        Mpu9250 {
            core: MpuCore::new(bus),
        }
    }

    pub fn release(self) -> B {
        self.core.bus
    }
}

impl<B: RegisterBus> Device for Mpu9250<B> {
    type Error = B::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        debug!("Initializing MPU9250...");
        self.core.initialize()
    }

    fn test_connection(&mut self) -> Result<bool, Self::Error> {
        let id = self.core.who_am_i()?;
        if id != MpuConstants::Mpu9250Id as u8 && id != MpuConstants::Mpu9255Id as u8 {
            warn!(
                "MPU9250 WHO_AM_I mismatch. Expected 0x71 or 0x73, got {:#04x}",
                id
            );
            return Ok(false);
        }
        Ok(true)
    }
}

impl<B: RegisterBus> RawAccelerometer for Mpu9250<B> {
    fn acceleration(&mut self) -> Result<[i16; 3], Self::Error> {
        self.core.acceleration()
    }
}

impl<B: RegisterBus> RawGyroscope for Mpu9250<B> {
    fn rotation(&mut self) -> Result<[i16; 3], Self::Error> {
        self.core.rotation()
    }
}
