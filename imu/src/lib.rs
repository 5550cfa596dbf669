pub mod any;
pub mod bno055;
pub mod config;
pub mod fake;
pub mod gy85;
pub mod mpu6050;
pub mod mpu9250;
pub mod open;
pub mod qmi8658;

#[cfg(test)]
mod testing;

use imu_traits::driver::Device;
use log::{debug, warn};

// --- Re-export the shared model so callers only depend on this crate ---

pub use imu_traits::driver::{AxisRemap, AxisSign, FusionMode};
pub use imu_traits::units::{DEG_TO_RAD, GRAVITY};
pub use imu_traits::{
    Capabilities, Covariance, Imu, ImuError, ImuMessage, OrientationImu, Quaternion, SensorState,
    Vector3,
};

pub use any::AnyImu;
pub use bno055::{Bno055Imu, Bno055Settings};
pub use config::{ConfigError, ImuConfig, ImuKind};
pub use fake::FakeImu;
pub use gy85::Gy85Imu;
pub use mpu6050::Mpu6050Imu;
pub use mpu9250::Mpu9250Imu;
pub use open::open;
#[cfg(target_os = "linux")]
pub use open::open_linux;
pub use qmi8658::Qmi8658Imu;

pub use imu_drivers::mock::RegisterMap;
pub use imu_drivers::RegisterBus;

/// Initializes a raw-count chip and checks its identity.
pub(crate) fn bring_up<D: Device>(chip: &'static str, device: &mut D) -> Result<(), ImuError> {
    debug!("Bringing up {}...", chip);
    device.initialize().map_err(|e| ImuError::bus(chip, e))?;
    if !device
        .test_connection()
        .map_err(|e| ImuError::bus(chip, e))?
    {
        warn!("{} failed its connection test", chip);
        return Err(ImuError::ConnectionFailed(chip.to_string()));
    }
    Ok(())
}
