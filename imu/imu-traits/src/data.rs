use serde::{Deserialize, Serialize};
use std::fmt;

/// Default diagonal value for every covariance entry.
pub const DEFAULT_COVARIANCE: f64 = 0.00001;

/// Frame name stamped on composite readings unless configured otherwise.
pub const DEFAULT_FRAME_ID: &str = "imu_link";

// --- Basic Types ---
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Builds a vector from three raw counts, multiplying each by `factor`.
    pub fn scaled<T: Into<f64> + Copy>(raw: [T; 3], factor: f64) -> Self {
        Vector3 {
            x: raw[0].into() * factor,
            y: raw[1].into() * factor,
            z: raw[2].into() * factor,
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3(x={:.5}, y={:.5}, z={:.5})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Euclidean norm over (w, x, y, z). A valid orientation has norm 1.
    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion(w={:.5}, x={:.5}, y={:.5}, z={:.5})",
            self.w, self.x, self.y, self.z
        )
    }
}

/// Diagonal measurement uncertainty for each quantity of a composite reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Covariance {
    pub accelerometer: [f64; 3],
    pub gyroscope: [f64; 3],
    pub orientation: [f64; 3],
}

impl Default for Covariance {
    fn default() -> Self {
        Covariance {
            accelerometer: [DEFAULT_COVARIANCE; 3],
            gyroscope: [DEFAULT_COVARIANCE; 3],
            orientation: [DEFAULT_COVARIANCE; 3],
        }
    }
}

/// Expands a diagonal into a row-major 3x3 matrix (indices 0, 4 and 8).
pub fn diagonal(values: [f64; 3]) -> [f64; 9] {
    let mut matrix = [0.0; 9];
    matrix[0] = values[0];
    matrix[4] = values[1];
    matrix[8] = values[2];
    matrix
}

// --- Composite reading ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImuMessage {
    pub frame_id: String,
    /// Orientation as a unit quaternion (WXYZ order)
    pub orientation: Quaternion,
    pub orientation_covariance: [f64; 9],
    /// Angular velocity (rad/s)
    pub angular_velocity: Vector3,
    pub angular_velocity_covariance: [f64; 9],
    /// Linear acceleration (m/s²)
    pub linear_acceleration: Vector3,
    pub linear_acceleration_covariance: [f64; 9],
}

impl ImuMessage {
    pub fn new(
        frame_id: impl Into<String>,
        orientation: Quaternion,
        angular_velocity: Vector3,
        linear_acceleration: Vector3,
        covariance: &Covariance,
    ) -> Self {
        ImuMessage {
            frame_id: frame_id.into(),
            orientation,
            orientation_covariance: diagonal(covariance.orientation),
            angular_velocity,
            angular_velocity_covariance: diagonal(covariance.gyroscope),
            linear_acceleration,
            linear_acceleration_covariance: diagonal(covariance.accelerometer),
        }
    }
}

impl fmt::Display for ImuMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] orientation={} angular_velocity={} linear_acceleration={}",
            self.frame_id, self.orientation, self.angular_velocity, self.linear_acceleration
        )
    }
}
