use crate::bring_up;
use imu_traits::driver::{RawAccelerometer, RawGyroscope, SelfCalibrating};
use imu_traits::units::{DEG_TO_RAD, GRAVITY};
use imu_traits::{Imu, ImuError, SensorState, Vector3};
use log::{debug, info};

/// g per LSB at ±2 g.
pub const ACCEL_SCALE: f64 = 1.0 / 16384.0;
/// °/s per LSB at ±250 °/s.
pub const GYRO_SCALE: f64 = 1.0 / 131.0;

const CHIP: &str = "MPU6050";

/// MPU6050 combined accelerometer and gyroscope. Starting it also runs the
/// chip's resting-bias calibration, so the board must be still and level.
pub struct Mpu6050Imu<D> {
    driver: D,
    state: SensorState,
}

impl<D> Mpu6050Imu<D>
where
    D: RawAccelerometer + RawGyroscope + SelfCalibrating,
{
    pub fn new(driver: D) -> Self {
        Mpu6050Imu {
            driver,
            state: SensorState::Uninitialized,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D> Imu for Mpu6050Imu<D>
where
    D: RawAccelerometer + RawGyroscope + SelfCalibrating,
{
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if self.state == SensorState::Running {
            return Ok(());
        }
        bring_up(CHIP, &mut self.driver)?;

        debug!("Calibrating MPU6050...");
        self.driver
            .calibrate_accel()
            .map_err(|e| ImuError::bus(CHIP, e))?;
        self.driver
            .calibrate_gyro()
            .map_err(|e| ImuError::bus(CHIP, e))?;

        self.state = SensorState::Running;
        info!("MPU6050 started");
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = RawAccelerometer::acceleration(&mut self.driver)
            .map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(raw, ACCEL_SCALE * GRAVITY))
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = RawGyroscope::rotation(&mut self.driver).map_err(|e| ImuError::bus(CHIP, e))?;
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
    fn start_calibrates_after_connection_test() {
        let mut imu = Mpu6050Imu::new(ScriptedChip::default());
        imu.start_sensor().unwrap();
        assert_eq!(imu.driver().calibrations, vec!["accel", "gyro"]);
    }

    #[test]
    fn missing_chip_skips_calibration() {
        let mut imu = Mpu6050Imu::new(ScriptedChip {
            absent: true,
            ..Default::default()
        });
        assert!(matches!(imu.start_sensor(), Err(ImuError::ConnectionFailed(_))));
        assert!(imu.driver().calibrations.is_empty());
        assert!(matches!(imu.read_gyroscope(), Err(ImuError::NotInitialized)));
    }

    #[test]
    fn one_degree_per_second() {
        let mut imu = Mpu6050Imu::new(ScriptedChip::with_readings([0, 0, 16384], [131, -131, 0]));
        imu.start_sensor().unwrap();
        let gyro = imu.read_gyroscope().unwrap();
        assert_relative_eq!(gyro.x, 0.017453292519943295, epsilon = 1e-12);
        assert_relative_eq!(gyro.y, -0.017453292519943295, epsilon = 1e-12);
        assert_eq!(gyro.z, 0.0);
        let accel = imu.read_accelerometer().unwrap();
        assert_relative_eq!(accel.z, GRAVITY, epsilon = 1e-12);
    }

    #[test]
    fn repeated_reads_agree() {
        let mut imu = Mpu6050Imu::new(ScriptedChip::with_readings([12, -7, 16000], [5, 6, 7]));
        imu.start_sensor().unwrap();
        assert_eq!(imu.read_accelerometer().unwrap(), imu.read_accelerometer().unwrap());
        assert_eq!(imu.read_gyroscope().unwrap(), imu.read_gyroscope().unwrap());
    }
}
