//! Gyroscope sensor types and lookup tables
//!
//! Provides the configuration enums, the cutoff frequency tables and the
//! sample types for the L3GD20's 3-axis angular rate sensor. The enums map
//! one-to-one onto register bit-fields; the tables are indexed by the same
//! field values the device reports.

/// Degrees to radians conversion factor
pub const RADIANS_PER_DEGREE: f32 = 0.017_453_292_519_943_295;

/// Output data rate (`CTRL_REG1.DR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    /// 95 Hz
    Hz95 = 0,
    /// 190 Hz
    Hz190 = 1,
    /// 380 Hz
    Hz380 = 2,
    /// 760 Hz
    Hz760 = 3,
}

impl OutputDataRate {
    /// Decode the 2-bit `DR` field (upper bits are ignored)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Hz95,
            1 => Self::Hz190,
            2 => Self::Hz380,
            _ => Self::Hz760,
        }
    }

    /// Field value written to `CTRL_REG1.DR`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Output data rate in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz95 => 95.0,
            Self::Hz190 => 190.0,
            Self::Hz380 => 380.0,
            Self::Hz760 => 760.0,
        }
    }
}

/// Low-pass cutoff frequencies in Hz, indexed by `(DR << 2) | BW`
const LOW_PASS_CUTOFF_HZ: [f32; 16] = [
    // 95 Hz
    15.5, 25.0, 25.0, 25.0, //
    // 190 Hz
    12.5, 25.0, 50.0, 70.0, //
    // 380 Hz
    20.0, 25.0, 50.0, 100.0, //
    // 760 Hz
    30.0, 35.0, 50.0, 100.0,
];

/// Low-pass filter cutoff mode (`CTRL_REG1.BW`)
///
/// The resulting cutoff frequency also depends on the output data rate;
/// see [`LowPassCutoffMode::cutoff_hz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPassCutoffMode {
    /// Narrowest bandwidth for the selected rate
    Mode0 = 0,
    /// Cutoff mode 1
    Mode1 = 1,
    /// Cutoff mode 2
    Mode2 = 2,
    /// Widest bandwidth for the selected rate
    Mode3 = 3,
}

impl LowPassCutoffMode {
    /// Decode the 2-bit `BW` field (upper bits are ignored)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Mode0,
            1 => Self::Mode1,
            2 => Self::Mode2,
            _ => Self::Mode3,
        }
    }

    /// Field value written to `CTRL_REG1.BW`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Cutoff frequency in Hz for this mode at the given output data rate
    #[must_use]
    pub const fn cutoff_hz(self, rate: OutputDataRate) -> f32 {
        low_pass_cutoff_hz((rate.bits() << 2) | self.bits())
    }
}

/// Low-pass cutoff frequency for the upper nibble of `CTRL_REG1` (`DR:BW`)
#[must_use]
pub const fn low_pass_cutoff_hz(dr_bw: u8) -> f32 {
    LOW_PASS_CUTOFF_HZ[(dr_bw & 0x0F) as usize]
}

/// High-pass cutoff frequencies in Hz, indexed by `(HPCF << 2) | DR`
const HIGH_PASS_CUTOFF_HZ: [f32; 40] = [
    7.2, 13.5, 27.0, 51.4, // mode 0
    3.5, 7.2, 13.5, 27.0, // mode 1
    1.8, 3.5, 7.2, 13.5, // mode 2
    0.9, 1.8, 3.5, 7.2, // mode 3
    0.45, 0.9, 1.8, 3.5, // mode 4
    0.18, 0.45, 0.9, 1.8, // mode 5
    0.09, 0.18, 0.45, 0.9, // mode 6
    0.045, 0.09, 0.18, 0.45, // mode 7
    0.018, 0.045, 0.09, 0.18, // mode 8
    0.009, 0.018, 0.045, 0.09, // mode 9
];

/// High-pass filter cutoff mode (`CTRL_REG2.HPCF`)
///
/// Only ten of the sixteen field values are defined. Values read back from
/// the device above 9 are treated as mode 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassCutoffMode {
    /// Highest cutoff for the selected rate
    Mode0 = 0,
    /// Cutoff mode 1
    Mode1 = 1,
    /// Cutoff mode 2
    Mode2 = 2,
    /// Cutoff mode 3
    Mode3 = 3,
    /// Cutoff mode 4
    Mode4 = 4,
    /// Cutoff mode 5
    Mode5 = 5,
    /// Cutoff mode 6
    Mode6 = 6,
    /// Cutoff mode 7
    Mode7 = 7,
    /// Cutoff mode 8
    Mode8 = 8,
    /// Lowest cutoff for the selected rate
    Mode9 = 9,
}

impl HighPassCutoffMode {
    /// Decode the 4-bit `HPCF` field, clamping undefined values to [`Self::Mode9`]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0 => Self::Mode0,
            1 => Self::Mode1,
            2 => Self::Mode2,
            3 => Self::Mode3,
            4 => Self::Mode4,
            5 => Self::Mode5,
            6 => Self::Mode6,
            7 => Self::Mode7,
            8 => Self::Mode8,
            _ => Self::Mode9,
        }
    }

    /// Field value written to `CTRL_REG2.HPCF`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Cutoff frequency in Hz for this mode at the given output data rate
    #[must_use]
    pub const fn cutoff_hz(self, rate: OutputDataRate) -> f32 {
        HIGH_PASS_CUTOFF_HZ[((self.bits() << 2) | rate.bits()) as usize]
    }
}

/// Gyroscope full-scale range (`CTRL_REG4.FS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±250°/s range
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl FullScale {
    /// Decode the 2-bit `FS` field (upper bits are ignored)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Dps250,
            1 => Self::Dps500,
            2 => Self::Dps1000,
            _ => Self::Dps2000,
        }
    }

    /// Field value written to `CTRL_REG4.FS`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Get the sensitivity in (°/s)/LSB
    ///
    /// Multiply a raw sample by this value to get degrees per second.
    #[must_use]
    pub const fn sensitivity_dps(self) -> f32 {
        match self {
            Self::Dps250 => 0.008_75,
            Self::Dps500 => 0.017_5,
            Self::Dps1000 => 0.035,
            Self::Dps2000 => 0.07,
        }
    }

    /// Get the sensitivity in (rad/s)/LSB
    #[must_use]
    pub const fn sensitivity_rps(self) -> f32 {
        self.sensitivity_dps() * RADIANS_PER_DEGREE
    }
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl GyroData {
    /// Decode the six output registers `OUT_X_L..=OUT_Z_H` (little-endian axes)
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Scale to degrees per second
    ///
    /// * `sensitivity` - (°/s)/LSB, from [`FullScale::sensitivity_dps`]
    #[must_use]
    pub fn to_dps(self, sensitivity: f32) -> GyroDataDps {
        GyroDataDps {
            x: f32::from(self.x) * sensitivity,
            y: f32::from(self.y) * sensitivity,
            z: f32::from(self.z) * sensitivity,
        }
    }

    /// Scale to radians per second
    ///
    /// * `sensitivity` - (rad/s)/LSB, from [`FullScale::sensitivity_rps`]
    #[must_use]
    pub fn to_rps(self, sensitivity: f32) -> GyroDataRps {
        GyroDataRps {
            x: f32::from(self.x) * sensitivity,
            y: f32::from(self.y) * sensitivity,
            z: f32::from(self.z) * sensitivity,
        }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Convert to radians per second
    #[must_use]
    pub fn to_radians_per_sec(&self) -> GyroDataRps {
        GyroDataRps {
            x: self.x * RADIANS_PER_DEGREE,
            y: self.y * RADIANS_PER_DEGREE,
            z: self.z * RADIANS_PER_DEGREE,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Gyroscope data in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataRps {
    /// X-axis rotation rate in rad/s
    pub x: f32,
    /// Y-axis rotation rate in rad/s
    pub y: f32,
    /// Z-axis rotation rate in rad/s
    pub z: f32,
}

impl GyroDataRps {
    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Data status (`STATUS_REG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct Status {
    /// New X-axis sample available
    pub x_available: bool,
    /// New Y-axis sample available
    pub y_available: bool,
    /// New Z-axis sample available
    pub z_available: bool,
    /// New sample available on all three axes
    pub xyz_available: bool,
    /// X-axis sample overwritten before it was read
    pub x_overrun: bool,
    /// Y-axis sample overwritten before it was read
    pub y_overrun: bool,
    /// Z-axis sample overwritten before it was read
    pub z_overrun: bool,
    /// A sample on any axis was overwritten before it was read
    pub xyz_overrun: bool,
}

impl Status {
    /// Decode a raw `STATUS_REG` value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            x_available: bits & 0x01 != 0,
            y_available: bits & 0x02 != 0,
            z_available: bits & 0x04 != 0,
            xyz_available: bits & 0x08 != 0,
            x_overrun: bits & 0x10 != 0,
            y_overrun: bits & 0x20 != 0,
            z_overrun: bits & 0x40 != 0,
            xyz_overrun: bits & 0x80 != 0,
        }
    }

    /// Check if a complete new sample is ready
    #[must_use]
    pub const fn data_ready(&self) -> bool {
        self.xyz_available
    }
}
