use crate::bno055::Bno055Settings;
use imu_traits::data::DEFAULT_FRAME_ID;
use imu_traits::Covariance;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

/// Which adapter to build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImuKind {
    Gy85,
    Mpu6050,
    Mpu9250,
    Bno055,
    Qmi8658,
    Fake,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid IMU configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_i2c_bus() -> String {
    DEFAULT_I2C_BUS.to_string()
}

fn default_frame_id() -> String {
    DEFAULT_FRAME_ID.to_string()
}

/// Everything needed to open one adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImuConfig {
    pub kind: ImuKind,
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: String,
    /// Overrides the chip's default address. Ignored for the GY-85, whose
    /// two chips sit at fixed addresses.
    #[serde(default)]
    pub address: Option<u16>,
    #[serde(default = "default_frame_id")]
    pub frame_id: String,
    #[serde(default)]
    pub covariance: Covariance,
    #[serde(default)]
    pub bno055: Bno055Settings,
}

impl ImuConfig {
    pub fn new(kind: ImuKind) -> Self {
        ImuConfig {
            kind,
            i2c_bus: default_i2c_bus(),
            address: None,
            frame_id: default_frame_id(),
            covariance: Covariance::default(),
            bno055: Bno055Settings::default(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imu_traits::driver::{AxisRemap, AxisSign, FusionMode};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ImuConfig::from_toml_str(r#"kind = "mpu6050""#).unwrap();
        assert_eq!(config, ImuConfig::new(ImuKind::Mpu6050));
        assert_eq!(config.i2c_bus, "/dev/i2c-1");
        assert_eq!(config.frame_id, "imu_link");
        assert_eq!(config.covariance.gyroscope, [0.00001; 3]);
    }

    #[test]
    fn full_config() {
        let config = ImuConfig::from_toml_str(
            r#"
            kind = "bno055"
            i2c_bus = "/dev/i2c-7"
            address = 0x29
            frame_id = "chest_imu"

            [covariance]
            orientation = [0.1, 0.2, 0.3]

            [bno055]
            external_crystal = false
            mode = "imu_plus"
            axis_remap = "p2"
            axis_sign = "p5"
            "#,
        )
        .unwrap();
        assert_eq!(config.kind, ImuKind::Bno055);
        assert_eq!(config.address, Some(0x29));
        assert_eq!(config.covariance.orientation, [0.1, 0.2, 0.3]);
        assert_eq!(config.covariance.accelerometer, [0.00001; 3]);
        assert_eq!(
            config.bno055,
            Bno055Settings {
                external_crystal: false,
                mode: FusionMode::ImuPlus,
                axis_remap: AxisRemap::P2,
                axis_sign: AxisSign::P5,
            }
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = ImuConfig::from_toml_str(r#"kind = "lsm6dsl""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ImuConfig::load("/nonexistent/imu.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/imu.toml"));
    }

    #[test]
    fn kind_names_round_trip_through_strum() {
        for kind in ImuKind::iter() {
            assert_eq!(ImuKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert_eq!(ImuKind::Gy85.to_string(), "gy85");
    }
}
