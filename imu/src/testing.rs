//! Scripted chip drivers for the adapter unit tests.

use imu_traits::driver::{
    AxisRemap, AxisSign, Device, FusionDriver, FusionMode, RawAccelerometer, RawGyroscope,
    SelfCalibrating, SiImuDriver,
};
use imu_traits::Quaternion;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("simulated bus fault")]
pub struct BusFault;

/// Raw-count chip whose answers are set by the test.
#[derive(Debug, Default)]
pub struct ScriptedChip {
    pub absent: bool,
    pub faulty: bool,
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub initialized: u32,
    pub calibrations: Vec<&'static str>,
}

impl ScriptedChip {
    pub fn with_readings(accel: [i16; 3], gyro: [i16; 3]) -> Self {
        ScriptedChip {
            accel,
            gyro,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), BusFault> {
        if self.faulty {
            return Err(BusFault);
        }
        Ok(())
    }
}

impl Device for ScriptedChip {
    type Error = BusFault;

    fn initialize(&mut self) -> Result<(), BusFault> {
        self.check()?;
        self.initialized += 1;
        Ok(())
    }

    fn test_connection(&mut self) -> Result<bool, BusFault> {
        self.check()?;
        Ok(!self.absent)
    }
}

impl RawAccelerometer for ScriptedChip {
    fn acceleration(&mut self) -> Result<[i16; 3], BusFault> {
        self.check()?;
        Ok(self.accel)
    }
}

impl RawGyroscope for ScriptedChip {
    fn rotation(&mut self) -> Result<[i16; 3], BusFault> {
        self.check()?;
        Ok(self.gyro)
    }
}

impl SelfCalibrating for ScriptedChip {
    fn calibrate_accel(&mut self) -> Result<(), BusFault> {
        self.check()?;
        self.calibrations.push("accel");
        Ok(())
    }

    fn calibrate_gyro(&mut self) -> Result<(), BusFault> {
        self.check()?;
        self.calibrations.push("gyro");
        Ok(())
    }
}

/// SI-unit chip with a scripted `begin` result.
#[derive(Debug, Default)]
pub struct ScriptedSiChip {
    pub absent: bool,
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

impl SiImuDriver for ScriptedSiChip {
    type Error = BusFault;

    fn begin(&mut self) -> Result<bool, BusFault> {
        Ok(!self.absent)
    }

    fn acceleration(&mut self) -> Result<[f32; 3], BusFault> {
        Ok(self.accel)
    }

    fn rotation(&mut self) -> Result<[f32; 3], BusFault> {
        Ok(self.gyro)
    }
}

/// Fusion chip recording the configuration it receives.
#[derive(Debug, Default)]
pub struct ScriptedFusionChip {
    pub absent: bool,
    pub linear_acceleration: [f64; 3],
    pub gyro_dps: [f64; 3],
    pub quaternion: Quaternion,
    pub crystal: Option<bool>,
    pub mode: Option<FusionMode>,
    pub remap: Option<AxisRemap>,
    pub sign: Option<AxisSign>,
}

impl FusionDriver for ScriptedFusionChip {
    type Error = BusFault;

    fn begin(&mut self) -> Result<bool, BusFault> {
        Ok(!self.absent)
    }

    fn set_ext_crystal_use(&mut self, external: bool) -> Result<(), BusFault> {
        self.crystal = Some(external);
        Ok(())
    }

    fn set_mode(&mut self, mode: FusionMode) -> Result<(), BusFault> {
        self.mode = Some(mode);
        Ok(())
    }

    fn set_axis_remap(&mut self, remap: AxisRemap) -> Result<(), BusFault> {
        self.remap = Some(remap);
        Ok(())
    }

    fn set_axis_sign(&mut self, sign: AxisSign) -> Result<(), BusFault> {
        self.sign = Some(sign);
        Ok(())
    }

    fn linear_acceleration(&mut self) -> Result<[f64; 3], BusFault> {
        Ok(self.linear_acceleration)
    }

    fn gyroscope(&mut self) -> Result<[f64; 3], BusFault> {
        Ok(self.gyro_dps)
    }

    fn quaternion(&mut self) -> Result<Quaternion, BusFault> {
        Ok(self.quaternion)
    }
}
