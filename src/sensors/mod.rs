//! Sensor types for the L3GD20
//!
//! This module provides the enums, lookup tables and data structures for the
//! two measurement channels of the L3GD20:
//! - Gyroscope (3-axis angular rate)
//! - Temperature (raw 8-bit reading)
//!
//! All sensor operations are performed through methods on `L3gd20Driver`.

pub mod gyroscope;
pub mod temperature;

// Re-export main types
pub use gyroscope::{
    FullScale, GyroData, GyroDataDps, GyroDataRps, HighPassCutoffMode, LowPassCutoffMode,
    OutputDataRate, RADIANS_PER_DEGREE, Status,
};
pub use temperature::{TEMPERATURE_SENSITIVITY, temperature_delta};
