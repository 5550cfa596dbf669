use crate::bno055::Bno055Imu;
use crate::config::ImuKind;
use crate::fake::FakeImu;
use crate::gy85::Gy85Imu;
use crate::mpu6050::Mpu6050Imu;
use crate::mpu9250::Mpu9250Imu;
use crate::qmi8658::Qmi8658Imu;
use imu_drivers::{Adxl345, Bno055, Itg3200, Mpu6050, Mpu9250, Qmi8658, RegisterBus};
use imu_traits::{Capabilities, Imu, ImuError, ImuMessage, OrientationImu, Quaternion, Vector3};

/// Every supported adapter over the stock chip drivers, all on one bus type.
pub enum AnyImu<B> {
    Gy85(Gy85Imu<Adxl345<B>, Itg3200<B>>),
    Mpu6050(Mpu6050Imu<Mpu6050<B>>),
    Mpu9250(Mpu9250Imu<Mpu9250<B>>),
    Bno055(Bno055Imu<Bno055<B>>),
    Qmi8658(Qmi8658Imu<Qmi8658<B>>),
    Fake(FakeImu),
}

macro_rules! dispatch {
    ($self:expr, $imu:ident => $body:expr) => {
        match $self {
            AnyImu::Gy85($imu) => $body,
            AnyImu::Mpu6050($imu) => $body,
            AnyImu::Mpu9250($imu) => $body,
            AnyImu::Bno055($imu) => $body,
            AnyImu::Qmi8658($imu) => $body,
            AnyImu::Fake($imu) => $body,
        }
    };
}

impl<B: RegisterBus> AnyImu<B> {
    pub fn kind(&self) -> ImuKind {
        match self {
            AnyImu::Gy85(_) => ImuKind::Gy85,
            AnyImu::Mpu6050(_) => ImuKind::Mpu6050,
            AnyImu::Mpu9250(_) => ImuKind::Mpu9250,
            AnyImu::Bno055(_) => ImuKind::Bno055,
            AnyImu::Qmi8658(_) => ImuKind::Qmi8658,
            AnyImu::Fake(_) => ImuKind::Fake,
        }
    }

    /// Fused orientation; only the BNO055 has one.
    pub fn read_orientation(&mut self) -> Result<Quaternion, ImuError> {
        match self {
            AnyImu::Bno055(imu) => imu.read_orientation(),
            other => Err(ImuError::NotSupported(format!(
                "{} does not report orientation",
                other.kind()
            ))),
        }
    }

    /// Composite reading; only the BNO055 has one.
    pub fn get_data(&mut self) -> Result<ImuMessage, ImuError> {
        match self {
            AnyImu::Bno055(imu) => imu.get_data(),
            other => Err(ImuError::NotSupported(format!(
                "{} does not report composite data",
                other.kind()
            ))),
        }
    }
}

impl<B: RegisterBus> Imu for AnyImu<B> {
    fn start_sensor(&mut self) -> Result<(), ImuError> {
        dispatch!(self, imu => imu.start_sensor())
    }

    fn read_accelerometer(&mut self) -> Result<Vector3, ImuError> {
        dispatch!(self, imu => imu.read_accelerometer())
    }

    fn read_gyroscope(&mut self) -> Result<Vector3, ImuError> {
        dispatch!(self, imu => imu.read_gyroscope())
    }

    fn capabilities(&self) -> Capabilities {
        dispatch!(self, imu => imu.capabilities())
    }

    fn is_running(&self) -> bool {
        dispatch!(self, imu => imu.is_running())
    }
}
