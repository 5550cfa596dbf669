use crate::bring_up;
use imu_traits::driver::{RawAccelerometer, RawGyroscope};
use imu_traits::units::{DEG_TO_RAD, GRAVITY};
use imu_traits::{Imu, ImuError, SensorState, Vector3};
use log::info;

/// g per LSB of the ADXL345 at ±2 g.
pub const ACCEL_SCALE: f64 = 1.0 / 256.0;
/// °/s per LSB of the ITG3200.
pub const GYRO_SCALE: f64 = 1.0 / 14.375;

/// GY-85 board: an ADXL345 accelerometer next to an ITG3200 gyroscope.
pub struct Gy85Imu<A, G> {
    accelerometer: A,
    gyroscope: G,
    state: SensorState,
}

impl<A: RawAccelerometer, G: RawGyroscope> Gy85Imu<A, G> {
    pub fn new(accelerometer: A, gyroscope: G) -> Self {
        Gy85Imu {
            accelerometer,
            gyroscope,
            state: SensorState::Uninitialized,
        }
    }

    pub fn accelerometer(&self) -> &A {
        &self.accelerometer
    }

    pub fn gyroscope(&self) -> &G {
        &self.gyroscope
    }
}

impl<A: RawAccelerometer, G: RawGyroscope> Imu for Gy85Imu<A, G> {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if self.state == SensorState::Running {
            return Ok(());
        }
        bring_up("ADXL345", &mut self.accelerometer)?;
        bring_up("ITG3200", &mut self.gyroscope)?;
        self.state = SensorState::Running;
        info!("GY-85 started");
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = self
            .accelerometer
            .acceleration()
            .map_err(|e| ImuError::bus("ADXL345", e))?;
        Ok(Vector3::scaled(raw, ACCEL_SCALE * GRAVITY))
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let raw = self
            .gyroscope
            .rotation()
            .map_err(|e| ImuError::bus("ITG3200", e))?;
        Ok(Vector3::scaled(raw, GYRO_SCALE * DEG_TO_RAD))
    }

    fn is_running(&self) -> bool {
        self.state == SensorState::Running
    }
}
