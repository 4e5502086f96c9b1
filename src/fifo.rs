//! FIFO (First In First Out) buffer management
//!
//! The L3GD20 has a 32-slot FIFO, each slot holding one X/Y/Z sample. The
//! driver runs it in stream mode when enabled: the oldest sample is
//! overwritten once the buffer is full, and the watermark level drives the
//! watermark interrupt (see [`crate::interrupt`]).
//!
//! # Example
//!
//! ```ignore
//! # use l3gd20::{L3gd20Driver, FifoWatermark};
//! # let mut gyro: L3gd20Driver<_> = todo!();
//! gyro.set_fifo_watermark(16)?;
//! gyro.set_fifo_enabled(true)?;
//! gyro.set_data_ready_interrupt_enabled(true)?; // routed to the watermark
//!
//! // On interrupt, drain the stored samples
//! let status = gyro.fifo_status()?;
//! for _ in 0..status.level {
//!     let sample = gyro.read_raw()?;
//! }
//! # Ok::<(), l3gd20::Error<()>>(())
//! ```

use crate::Error;

/// FIFO depth in samples
pub const FIFO_DEPTH: u8 = 32;

/// FIFO operating mode (`FIFO_CTRL_REG.FM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO bypassed; output registers always hold the latest sample
    #[default]
    Bypass = 0,
    /// Stop collecting when full
    Fifo = 1,
    /// Overwrite the oldest sample when full
    Stream = 2,
    /// Stream until a trigger event, then FIFO
    StreamToFifo = 3,
    /// Bypass until a trigger event, then stream
    BypassToStream = 4,
}

impl FifoMode {
    /// Decode the 3-bit `FM` field
    ///
    /// Undefined values (5 to 7) decode as `None`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x07 {
            0 => Some(Self::Bypass),
            1 => Some(Self::Fifo),
            2 => Some(Self::Stream),
            3 => Some(Self::StreamToFifo),
            4 => Some(Self::BypassToStream),
            _ => None,
        }
    }

    /// Field value written to `FIFO_CTRL_REG.FM`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// FIFO watermark level (`FIFO_CTRL_REG.WTM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoWatermark(u8);

impl FifoWatermark {
    /// Highest watermark the 5-bit field can hold
    pub const MAX: u8 = FIFO_DEPTH - 1;

    /// Validate a watermark level
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `level` is above [`Self::MAX`].
    pub const fn new<E>(level: u8) -> Result<Self, Error<E>> {
        if level > Self::MAX {
            return Err(Error::InvalidConfig);
        }
        Ok(Self(level))
    }

    /// Watermark level in samples
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

/// FIFO status (`FIFO_SRC_REG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Stored level is at or above the watermark
    pub above_watermark: bool,
    /// FIFO completely filled and at least one sample overwritten
    pub overrun: bool,
    /// No samples stored
    pub empty: bool,
    /// Number of unread samples (0 to 32)
    pub level: u8,
}

impl FifoStatus {
    /// Decode a raw `FIFO_SRC_REG` value
    ///
    /// The 5-bit `FSS` field cannot express a full FIFO, so a zero level with
    /// the overrun flag set is reported as [`FIFO_DEPTH`].
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        let overrun = bits & 0x40 != 0;
        let empty = bits & 0x20 != 0;
        let stored = bits & 0x1F;
        Self {
            above_watermark: bits & 0x80 != 0,
            overrun,
            empty,
            level: if overrun && stored == 0 && !empty {
                FIFO_DEPTH
            } else {
                stored
            },
        }
    }

    /// Check if every slot holds an unread sample
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.level >= FIFO_DEPTH
    }
}
