//! Interfaces the adapters expect from the chip drivers they wrap.
//!
//! Each trait mirrors one shape of driver API: chips reporting raw counts
//! behind an `initialize`/`test_connection` pair, chips that scale to SI
//! themselves behind a `begin` call, and the fusion chip with its extra
//! configuration knobs.

use crate::data::Quaternion;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub trait Device {
    type Error: std::error::Error;

    /// Puts the chip into its measuring configuration.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Checks the chip's identity register. `Ok(false)` means the bus works
    /// but something else (or nothing) answered.
    fn test_connection(&mut self) -> Result<bool, Self::Error>;
}

pub trait RawAccelerometer: Device {
    /// Raw accelerometer counts (x, y, z).
    fn acceleration(&mut self) -> Result<[i16; 3], Self::Error>;
}

pub trait RawGyroscope: Device {
    /// Raw gyroscope counts (x, y, z).
    fn rotation(&mut self) -> Result<[i16; 3], Self::Error>;
}

/// Chips that can estimate and remove their own resting bias.
pub trait SelfCalibrating: Device {
    fn calibrate_accel(&mut self) -> Result<(), Self::Error>;
    fn calibrate_gyro(&mut self) -> Result<(), Self::Error>;
}

/// Drivers that hand back readings already in SI units.
pub trait SiImuDriver {
    type Error: std::error::Error;

    /// Resets and configures the chip. `Ok(false)` if it did not answer.
    fn begin(&mut self) -> Result<bool, Self::Error>;

    /// Acceleration in m/s².
    fn acceleration(&mut self) -> Result<[f32; 3], Self::Error>;

    /// Angular velocity in rad/s.
    fn rotation(&mut self) -> Result<[f32; 3], Self::Error>;
}

/// Fusion modes of a chip with onboard orientation estimation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FusionMode {
    /// Accelerometer + gyroscope, relative heading
    ImuPlus,
    /// Accelerometer + magnetometer, absolute heading
    Compass,
    /// Magnet for gyroscope
    M4g,
    /// Nine degrees of freedom, fast magnetometer calibration off
    NdofFmcOff,
    /// Nine degrees of freedom
    #[default]
    Ndof,
}

/// Axis remap placements P0..P7 (datasheet section 3.4).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AxisRemap {
    #[default]
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
}

/// Axis sign placements P0..P7, paired with [`AxisRemap`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AxisSign {
    P0,
    #[default]
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
}

pub trait FusionDriver {
    type Error: std::error::Error;

    /// Resets the chip and waits for it to come back. `Ok(false)` if it did
    /// not identify itself.
    fn begin(&mut self) -> Result<bool, Self::Error>;

    /// Selects the external 32 kHz crystal (`true`) or the internal oscillator.
    fn set_ext_crystal_use(&mut self, external: bool) -> Result<(), Self::Error>;

    fn set_mode(&mut self, mode: FusionMode) -> Result<(), Self::Error>;

    fn set_axis_remap(&mut self, remap: AxisRemap) -> Result<(), Self::Error>;

    fn set_axis_sign(&mut self, sign: AxisSign) -> Result<(), Self::Error>;

    /// Gravity-compensated acceleration in m/s².
    fn linear_acceleration(&mut self) -> Result<[f64; 3], Self::Error>;

    /// Angular velocity in °/s.
    fn gyroscope(&mut self) -> Result<[f64; 3], Self::Error>;

    /// Fused orientation.
    fn quaternion(&mut self) -> Result<Quaternion, Self::Error>;
}
