use num_derive::{FromPrimitive, ToPrimitive};

// --- ADXL345 ---

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Adxl345Registers {
    DevId = 0x00,
    PowerCtl = 0x2D,
    DataFormat = 0x31,
    DataX0 = 0x32,
}

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Adxl345Constants {
    DeviceId = 0xE5,
    MeasureBit = 0x08,
}

// --- ITG3200 ---

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Itg3200Registers {
    WhoAmI = 0x00,
    DlpfFs = 0x16,
    GyroXOutH = 0x1D,
    PwrMgm = 0x3E,
}

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Itg3200Constants {
    /// Bits 6..1 of WHO_AM_I
    DeviceId = 0x34,
    /// FS_SEL = 3 (±2000 °/s), DLPF_CFG = 0
    FullScale2000 = 0x18,
    /// PLL with X gyro reference
    ClockPllX = 0x01,
}

// --- MPU6050 / MPU9250 ---

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum MpuRegisters {
    GyroConfig = 0x1B,
    AccelConfig = 0x1C,
    AccelXOutH = 0x3B,
    GyroXOutH = 0x43,
    PwrMgmt1 = 0x6B,
    WhoAmI = 0x75,
}

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum MpuConstants {
    Mpu6050Id = 0x68,
    Mpu9250Id = 0x71,
    Mpu9255Id = 0x73,
    ClockPllX = 0x01,
    /// ±2 g, ±250 °/s
    FullScaleMin = 0x00,
}

// --- BNO055 ---

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Bno055Registers {
    ChipId = 0x00,
    PageId = 0x07,
    GyrDataXLsb = 0x14,
    QuaDataWLsb = 0x20,
    LiaDataXLsb = 0x28,
    OprMode = 0x3D,
    PwrMode = 0x3E,
    SysTrigger = 0x3F,
    AxisMapConfig = 0x41,
    AxisMapSign = 0x42,
}

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Bno055Constants {
    ChipId = 0xA0,
    ResetSystem = 0x20,
    ExternalClock = 0x80,
    PowerNormal = 0x00,
}

/// Register values of OPR_MODE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum OperationMode {
    Config = 0x00,
    AccOnly = 0x01,
    MagOnly = 0x02,
    GyroOnly = 0x03,
    AccMag = 0x04,
    AccGyro = 0x05,
    MagGyro = 0x06,
    Amg = 0x07,
    ImuPlus = 0x08,
    Compass = 0x09,
    M4g = 0x0A,
    NdofFmcOff = 0x0B,
    Ndof = 0x0C,
}

// --- QMI8658 ---

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Qmi8658Registers {
    WhoAmI = 0x00,
    Ctrl1 = 0x02,
    Ctrl2 = 0x03,
    Ctrl3 = 0x04,
    Ctrl7 = 0x08,
    AxL = 0x35,
    GxL = 0x3B,
    Reset = 0x60,
}

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive)]
pub enum Qmi8658Constants {
    WhoAmIValue = 0x05,
    SoftResetCmd = 0xB0,
    /// Register address auto-increment, little endian
    AddrAutoIncrement = 0x40,
    /// ±8 g, 896.8 Hz
    Accel8g = 0x23,
    /// ±512 °/s, 896.8 Hz
    Gyro512Dps = 0x53,
    EnableAccelGyro = 0x03,
}
