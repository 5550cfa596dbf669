use imu_traits::data::DEFAULT_FRAME_ID;
use imu_traits::driver::{AxisRemap, AxisSign, FusionDriver, FusionMode};
use imu_traits::units::DEG_TO_RAD;
use imu_traits::{
    Capabilities, Covariance, Imu, ImuError, ImuMessage, OrientationImu, Quaternion, SensorState,
    Vector3,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CHIP: &str = "BNO055";

/// Configuration applied to the chip after a successful `begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bno055Settings {
    pub external_crystal: bool,
    pub mode: FusionMode,
    pub axis_remap: AxisRemap,
    pub axis_sign: AxisSign,
}

impl Default for Bno055Settings {
    fn default() -> Self {
        Bno055Settings {
            external_crystal: true,
            mode: FusionMode::Ndof,
            axis_remap: AxisRemap::P0,
            axis_sign: AxisSign::P1,
        }
    }
}

/// BNO055 with onboard sensor fusion. Acceleration is the chip's
/// gravity-compensated linear acceleration; orientation is passed through.
pub struct Bno055Imu<D> {
    driver: D,
    settings: Bno055Settings,
    covariance: Covariance,
    frame_id: String,
    state: SensorState,
}

impl<D: FusionDriver> Bno055Imu<D> {
    pub fn new(driver: D) -> Self {
        Bno055Imu {
            driver,
            settings: Bno055Settings::default(),
            covariance: Covariance::default(),
            frame_id: DEFAULT_FRAME_ID.to_string(),
            state: SensorState::Uninitialized,
        }
    }

    pub fn with_settings(mut self, settings: Bno055Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_covariance(mut self, covariance: Covariance) -> Self {
        self.covariance = covariance;
        self
    }

    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn configure(&mut self) -> Result<(), D::Error> {
        let settings = self.settings;
        debug!("Configuring BNO055: {:?}", settings);
        self.driver.set_ext_crystal_use(settings.external_crystal)?;
        self.driver.set_mode(settings.mode)?;
        self.driver.set_axis_remap(settings.axis_remap)?;
        self.driver.set_axis_sign(settings.axis_sign)
    }
}

impl<D: FusionDriver> Imu for Bno055Imu<D> {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        if self.state == SensorState::Running {
            return Ok(());
        }
        if !self.driver.begin().map_err(|e| ImuError::bus(CHIP, e))? {
            warn!("BNO055 did not begin");
            return Err(ImuError::ConnectionFailed(CHIP.to_string()));
        }
        self.configure().map_err(|e| ImuError::bus(CHIP, e))?;
        self.state = SensorState::Running;
        info!("BNO055 started in {} mode", self.settings.mode);
        Ok(())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let accel = self
            .driver
            .linear_acceleration()
            .map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(accel, 1.0))
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        self.state.ensure_running()?;
        let gyro = self.driver.gyroscope().map_err(|e| ImuError::bus(CHIP, e))?;
        Ok(Vector3::scaled(gyro, DEG_TO_RAD))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn is_running(&self) -> bool {
        self.state == SensorState::Running
    }
}

impl<D: FusionDriver> OrientationImu for Bno055Imu<D> {
    fn read_orientation(&mut self) -> Result<Quaternion, ImuError> {
        self.state.ensure_running()?;
        self.driver.quaternion().map_err(|e| ImuError::bus(CHIP, e))
    }

    fn get_data(&mut self) -> Result<ImuMessage, ImuError> {
        let angular_velocity = self.read_gyroscope()?;
        let linear_acceleration = self.read_accelerometer()?;
        let orientation = self.read_orientation()?;
        Ok(ImuMessage::new(
            self.frame_id.clone(),
            orientation,
            angular_velocity,
            linear_acceleration,
            &self.covariance,
        ))
    }
}
