use imu_traits::driver::SiImuDriver;
use imu_traits::{Imu, ImuError, SensorState, Vector3};
use log::{info, warn};

const CHIP: &str = "QMI8658";

/// QMI8658 six-axis IMU. The driver already reports m/s² and rad/s.
pub struct Qmi8658Imu<D> {
    driver: D,
    state: SensorState,
}

impl<D: SiImuDriver> Qmi8658Imu<D> {
    pub fn new(driver: D) -> Self {
        Qmi8658Imu {
            driver,
            state: SensorState::Uninitialized,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: SiImuDriver> Imu for Qmi8658Imu<D> {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if self.state == SensorState::Running {
            return Ok(());
        }
        if !self.driver.begin().map_err(|e| ImuError::bus(CHIP, e))? {
            warn!("QMI8658 did not begin");
            return Err(ImuError::ConnectionFailed(CHIP.to_string()));
        }
        self.state = SensorState::Running;
        info!("QMI8658 started");
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let accel = self
            .driver
            .acceleration()
            .map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(accel, 1.0))
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let gyro = self.driver.rotation().map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(gyro, 1.0))
    }

    fn is_running(&self) -> bool {
        self.state == SensorState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSiChip;
    use approx::assert_relative_eq;

    #[test]
    fn passes_readings_through() {
        let mut imu = Qmi8658Imu::new(ScriptedSiChip {
            accel: [0.5, -0.25, 9.75],
            gyro: [0.125, 0.0, -1.5],
            ..Default::default()
        });
        imu.start_sensor().unwrap();
        let accel = imu.read_accelerometer().unwrap();
        assert_relative_eq!(accel.z, 9.75);
        assert_relative_eq!(accel.y, -0.25);
        let gyro = imu.read_gyroscope().unwrap();
        assert_relative_eq!(gyro.x, 0.125);
        assert_relative_eq!(gyro.z, -1.5);
    }

    #[test]
    fn refused_begin_is_a_connection_failure() {
        let mut imu = Qmi8658Imu::new(ScriptedSiChip {
            absent: true,
            ..Default::default()
        });
        assert!(matches!(imu.start_sensor(), Err(ImuError::ConnectionFailed(_))));
        assert!(!imu.is_running());
        assert!(matches!(imu.read_gyroscope(), Err(ImuError::NotInitialized)));
    }

    #[test]
    fn start_can_be_retried() {
        let mut imu = Qmi8658Imu::new(ScriptedSiChip {
            absent: true,
            ..Default::default()
        });
        assert!(imu.start_sensor().is_err());
        // chip shows up on the second attempt
        imu.driver.absent = false;
        imu.start_sensor().unwrap();
        assert!(imu.is_running());
    }
}
