//! Temperature sensor
//!
//! `OUT_TEMP` holds a signed 8-bit reading whose zero point is not
//! calibrated at the factory. It is useful for tracking temperature changes
//! (for example to compensate gyroscope drift), not as an absolute value.

/// Placeholder scale factor for the raw temperature reading, in °C per LSB
///
/// This is not a calibrated value: the datasheet gives a typical slope of
/// -1 °C/LSB with no zero-point reference. Callers needing an absolute
/// temperature must supply their own offset, for example
/// `ambient_at_reference + f32::from(raw - raw_at_reference) * TEMPERATURE_SENSITIVITY`.
pub const TEMPERATURE_SENSITIVITY: f32 = -1.0;

/// Temperature change in °C between two raw readings
#[must_use]
pub fn temperature_delta(from_raw: i8, to_raw: i8) -> f32 {
    (f32::from(to_raw) - f32::from(from_raw)) * TEMPERATURE_SENSITIVITY
}
