//! Stand-in adapter for running the rest of a system without hardware.

use imu_traits::{Imu, ImuError, Vector3};
use log::info;

/// Reading reported by [`FakeImu::read_accelerometer`]: gravity on Z.
pub const FAKE_ACCELERATION: Vector3 = Vector3::new(0.0, 0.0, 9.8);
/// Reading reported by [`FakeImu::read_gyroscope`].
pub const FAKE_ROTATION: Vector3 = Vector3::new(0.0, 0.0, 0.0);

/// Always starts, always reports a board at rest. Reads work even before
/// `start_sensor` is called.
#[derive(Debug, Default)]
pub struct FakeImu {
    started: bool,
}

impl FakeImu {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Imu for FakeImu {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if !self.started {
            info!("Fake IMU started");
        }
        self.started = true;
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        Ok(FAKE_ACCELERATION)
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        Ok(FAKE_ROTATION)
    }

    fn is_running(&self) -> bool {
        self.started
    }
}
