use crate::any::AnyImu;
use crate::bno055::Bno055Imu;
use crate::config::{ImuConfig, ImuKind};
use crate::fake::FakeImu;
use crate::gy85::Gy85Imu;
use crate::mpu6050::Mpu6050Imu;
use crate::mpu9250::Mpu9250Imu;
use crate::qmi8658::Qmi8658Imu;
use imu_drivers::adxl345::ADXL345_ADDR;
use imu_drivers::bno055::BNO055_ADDR;
use imu_drivers::itg3200::ITG3200_ADDR;
use imu_drivers::mpu::MPU_ADDR;
use imu_drivers::qmi8658::QMI8658_ADDR;
use imu_drivers::{Adxl345, Bno055, Itg3200, Mpu6050, Mpu9250, Qmi8658, RegisterBus};
use imu_traits::ImuError;
use log::debug;
use std::fmt::Display;

/// Builds the configured adapter. `open_device` is called once per chip with
/// the chip's address and must return a bus handle talking to it.
///
/// Nothing is written to the hardware here; call `start_sensor` next.
pub fn open<B, E, F>(config: &ImuConfig, mut open_device: F) -> Result<AnyImu<B>, ImuError>
where
    B: RegisterBus,
    E: Display,
    F: FnMut(u16) -> Result<B, E>,
{
    let mut device = |address: u16| {
        debug!("Opening {} at {:#04x} on {}", config.kind, address, config.i2c_bus);
        open_device(address).map_err(|e| {
            ImuError::Configuration(format!(
                "cannot open {} at {:#04x}: {}",
                config.i2c_bus, address, e
            ))
        })
    };
    let address = |default: u16| config.address.unwrap_or(default);

    let imu = match config.kind {
        ImuKind::Gy85 => AnyImu::Gy85(Gy85Imu::new(
            Adxl345::new(device(ADXL345_ADDR)?),
            Itg3200::new(device(ITG3200_ADDR)?),
        )),
        ImuKind::Mpu6050 => {
            AnyImu::Mpu6050(Mpu6050Imu::new(Mpu6050::new(device(address(MPU_ADDR))?)))
        }
        ImuKind::Mpu9250 => {
            AnyImu::Mpu9250(Mpu9250Imu::new(Mpu9250::new(device(address(MPU_ADDR))?)))
        }
        ImuKind::Bno055 => AnyImu::Bno055(
            Bno055Imu::new(Bno055::new(device(address(BNO055_ADDR))?))
                .with_settings(config.bno055)
                .with_covariance(config.covariance)
                .with_frame_id(config.frame_id.clone()),
        ),
        ImuKind::Qmi8658 => {
            AnyImu::Qmi8658(Qmi8658Imu::new(Qmi8658::new(device(address(QMI8658_ADDR))?)))
        }
        ImuKind::Fake => AnyImu::Fake(FakeImu::new()),
    };
    Ok(imu)
}

/// [`open`] on the Linux I2C character device named in the config.
#[cfg(target_os = "linux")]
pub fn open_linux(
    config: &ImuConfig,
) -> Result<AnyImu<i2cdev::linux::LinuxI2CDevice>, ImuError> {
    open(config, |address| {
        i2cdev::linux::LinuxI2CDevice::new(&config.i2c_bus, address)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu_drivers::mock::RegisterMap;
    use std::io;

    #[test]
    fn default_addresses() {
        let mut seen = Vec::new();
        let mut record = |kind: ImuKind| {
            seen.clear();
            open(&ImuConfig::new(kind), |address| {
                seen.push(address);
                Ok::<_, io::Error>(RegisterMap::new())
            })
            .unwrap();
            seen.clone()
        };
        assert_eq!(record(ImuKind::Gy85), vec![0x53, 0x68]);
        assert_eq!(record(ImuKind::Mpu6050), vec![0x68]);
        assert_eq!(record(ImuKind::Mpu9250), vec![0x68]);
        assert_eq!(record(ImuKind::Bno055), vec![0x28]);
        assert_eq!(record(ImuKind::Qmi8658), vec![0x6B]);
        assert!(record(ImuKind::Fake).is_empty());
    }

    #[test]
    fn address_override() {
        let mut config = ImuConfig::new(ImuKind::Qmi8658);
        config.address = Some(0x6A);
        let mut opened = None;
        open(&config, |address| {
            opened = Some(address);
            Ok::<_, io::Error>(RegisterMap::new())
        })
        .unwrap();
        assert_eq!(opened, Some(0x6A));
    }

    #[test]
    fn open_failure_is_a_configuration_error() {
        let config = ImuConfig::new(ImuKind::Mpu6050);
        let result = open(&config, |_| {
            Err::<RegisterMap, _>(io::Error::new(io::ErrorKind::NotFound, "no such device"))
        });
        match result {
            Err(ImuError::Configuration(msg)) => {
                assert_eq!(msg, "cannot open /dev/i2c-1 at 0x68: no such device")
            }
            _ => panic!("expected a configuration error"),
        }
    }
}
