//! Physical constants shared by every adapter.

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.80665;

/// Degrees to radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
