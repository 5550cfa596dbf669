use crate::bring_up;
use imu_traits::driver::{RawAccelerometer, RawGyroscope};
use imu_traits::units::{DEG_TO_RAD, GRAVITY};
use imu_traits::{Imu, ImuError, SensorState, Vector3};
use log::info;

pub use crate::mpu6050::{ACCEL_SCALE, GYRO_SCALE};

const CHIP: &str = "MPU9250";

/// MPU9250 accelerometer and gyroscope. Unlike the MPU6050 adapter, no
/// calibration runs at start.
pub struct Mpu9250Imu<D> {
    driver: D,
    state: SensorState,
}

impl<D: RawAccelerometer + RawGyroscope> Mpu9250Imu<D> {
    pub fn new(driver: D) -> Self {
        Mpu9250Imu {
            driver,
            state: SensorState::Uninitialized,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: RawAccelerometer + RawGyroscope> Imu for Mpu9250Imu<D> {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if self.state == SensorState::Running {
            return Ok(());
        }
        bring_up(CHIP, &mut self.driver)?;
        self.state = SensorState::Running;
        info!("MPU9250 started");
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = self
            .driver
            .acceleration()
            .map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(raw, ACCEL_SCALE * GRAVITY))
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = self.driver.rotation().map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(raw, GYRO_SCALE * DEG_TO_RAD))
    }

    fn is_running(&self) -> bool {
        self.state == SensorState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedChip;
    use approx::assert_relative_eq;

    #[test]
    fn start_runs_no_calibration() {
        let mut imu = Mpu9250Imu::new(ScriptedChip::default());
        imu.start_sensor().unwrap();
        assert!(imu.driver().calibrations.is_empty());
        assert_eq!(imu.driver().initialized, 1);
    }

    #[test]
    fn shares_mpu6050_scales() {
        let mut imu = Mpu9250Imu::new(ScriptedChip::with_readings([-8192, 0, 0], [0, 262, 0]));
        imu.start_sensor().unwrap();
        assert_relative_eq!(imu.read_accelerometer().unwrap().x, -GRAVITY / 2.0, epsilon = 1e-12);
        assert_relative_eq!(imu.read_gyroscope().unwrap().y, 2.0 * DEG_TO_RAD, epsilon = 1e-12);
    }

    #[test]
    fn faulty_bus_fails_start() {
        let mut imu = Mpu9250Imu::new(ScriptedChip {
            faulty: true,
            ..Default::default()
        });
        assert!(matches!(imu.start_sensor(), Err(ImuError::Bus(_))));
        assert!(!imu.is_running());
    }
}
