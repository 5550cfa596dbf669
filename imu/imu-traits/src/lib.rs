pub mod data;
pub mod driver;
pub mod error;
pub mod units;

pub use data::{diagonal, Covariance, ImuMessage, Quaternion, Vector3};
pub use error::ImuError;

use bitflags::bitflags;

bitflags! {
    /// What an adapter can report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const ACCELEROMETER = 0b0001;
        const GYROSCOPE = 0b0010;
        const ORIENTATION = 0b0100;
        const COMPOSITE = 0b1000;

        const MOTION = Self::ACCELEROMETER.bits() | Self::GYROSCOPE.bits();
    }
}

/// Lifecycle of an adapter. There is no way back from `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorState {
    #[default]
    Uninitialized,
    Running,
}

impl SensorState {
    /// Gate for read operations.
    pub fn ensure_running(self) -> Result<(), ImuError> {
        match self {
            SensorState::Running => Ok(()),
            SensorState::Uninitialized => Err(ImuError::NotInitialized),
        }
    }
}

pub trait Imu {
    /// Initializes the hardware and tests the connection. On failure the
    /// adapter stays uninitialized and may be started again; on an adapter
    /// that is already running this does nothing.
    fn start_sensor(&mut self) -> Result<(), ImuError>;

    /// Acceleration in m/s².
    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError>;

    /// Angular velocity in rad/s.
    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::MOTION
    }

    fn is_running(&self) -> bool;
}

/// Adapters around chips that fuse their own orientation.
pub trait OrientationImu: Imu {
    fn read_orientation(&mut self) -> Result<Quaternion, ImuError>;

    /// Reads all three quantities into one message with covariance attached.
    fn get_data(&mut self) -> Result<ImuMessage, ImuError>;
}
