#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;

pub mod fifo;
pub mod interrupt;

// Re-export main types
pub use device::L3gd20Driver;
pub use interface::{BusError, BusInterface, I2cInterface, RegisterTransport, SpiInterface};
#[cfg(feature = "async")]
pub use interface::AsyncRegisterTransport;
pub use sensors::{
    FullScale, GyroData, GyroDataDps, GyroDataRps, HighPassCutoffMode, LowPassCutoffMode,
    OutputDataRate, Status, TEMPERATURE_SENSITIVITY,
};

pub use fifo::{FIFO_DEPTH, FifoMode, FifoStatus, FifoWatermark};
pub use interrupt::InterruptRouting;

/// L3GD20 I2C address when the SDO pin is low (default: 0x6A)
///
/// Use [`I2cInterface::new()`] for this configuration.
pub const I2C_ADDRESS_SDO_LOW: u8 = 0x6A;

/// L3GD20 I2C address when the SDO pin is high (alternative: 0x6B)
///
/// Use [`I2cInterface::with_address()`] for this configuration.
pub const I2C_ADDRESS_SDO_HIGH: u8 = 0x6B;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0xD4;

/// SPI mode expected by the L3GD20 (CPOL = 1, CPHA = 1, 8-bit words)
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_3;

/// Highest SPI clock the L3GD20 accepts, in Hz
///
/// A bus built exclusively for the gyroscope should be clocked at this rate.
pub const SPI_MAX_FREQUENCY_HZ: u32 = 10_000_000;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value after all identification attempts
    /// (contains the last value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
