//! Bus interface implementations for the L3GD20
//!
//! This module provides implementations of the `device-driver` register
//! interface traits for I2C and SPI communication with the L3GD20, a tagged
//! [`BusInterface`] for boards that pick the bus at runtime, and the
//! byte-level [`RegisterTransport`] contract (read, write, masked read,
//! masked update and burst read) built on top of any of them.
//!
//! # Framing
//!
//! | Operation | SPI first byte | I2C |
//! |-----------|----------------|-----|
//! | single read | `addr \| 0x80` | write `addr`, repeated start, read 1 |
//! | burst read | `addr \| 0xC0` | write `addr \| 0x80`, repeated start, read N |
//! | single write | `addr & 0x3F` | write `[addr, value]` |
//!
//! Every operation is a single blocking bus transaction (or a single
//! awaited one with the `async` feature).

use crate::I2C_ADDRESS_SDO_LOW;

use device_driver::RegisterInterface;

/// SPI read/write flag (bit 7 of the address byte)
const SPI_READ: u8 = 0x80;
/// SPI auto-increment flag (bit 6 of the address byte)
const SPI_MULTI: u8 = 0x40;
/// SPI address bits
const SPI_ADDRESS_MASK: u8 = 0x3F;
/// I2C sub-address auto-increment flag (bit 7 of the sub-address)
const I2C_AUTO_INCREMENT: u8 = 0x80;

/// I2C interface for the L3GD20
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x6A, SDO pin LOW)
    ///
    /// The bus is moved into the interface and handed back by
    /// [`release()`](Self::release). To keep using the bus elsewhere, pass
    /// `&mut i2c` instead; the interface then only borrows it.
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c);
    /// let mut gyro = L3gd20Driver::new(interface);
    /// gyro.init(true)?;
    /// ```
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SDO_LOW,
        }
    }

    /// Create a new I2C interface with a custom 7-bit device address
    ///
    /// Use [`I2C_ADDRESS_SDO_HIGH`](crate::I2C_ADDRESS_SDO_HIGH) when the SDO
    /// pin is pulled high.
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit device address used for every transaction
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }

    const fn sub_address(address: u8, len: usize) -> u8 {
        if len > 1 {
            address | I2C_AUTO_INCREMENT
        } else {
            address
        }
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        let sub_address = Self::sub_address(address, read_data.len());
        // Write the sub-address without a stop condition, then read
        self.i2c
            .write_read(self.address, &[sub_address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let sub_address = Self::sub_address(address, write_data.len());
        // Adjacent write operations go out as one transaction: [addr, data...]
        self.i2c.transaction(
            self.address,
            &mut [
                embedded_hal::i2c::Operation::Write(&[sub_address]),
                embedded_hal::i2c::Operation::Write(write_data),
            ],
        )
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        let sub_address = Self::sub_address(address, read_data.len());
        self.i2c
            .write_read(self.address, &[sub_address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let sub_address = Self::sub_address(address, write_data.len());
        self.i2c
            .transaction(
                self.address,
                &mut [
                    embedded_hal_async::i2c::Operation::Write(&[sub_address]),
                    embedded_hal_async::i2c::Operation::Write(write_data),
                ],
            )
            .await
    }
}

/// SPI interface for the L3GD20
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) line for each transaction. Who owns that line is decided
/// by the `SpiDevice` you hand in:
///
/// - `embedded_hal_bus::spi::ExclusiveDevice` owns both the bus and the CS pin
///   and releases them when dropped.
/// - The shared-bus devices (`RefCellDevice`, `CriticalSectionDevice`, ...)
///   borrow a bus that other drivers keep using.
/// - A device whose CS is tied low or driven by external logic simply never
///   toggles a pin.
///
/// The bus must be configured for [`SPI_MODE`](crate::SPI_MODE) (mode 3,
/// 8-bit words); a bus dedicated to the gyroscope should run at
/// [`SPI_MAX_FREQUENCY_HZ`](crate::SPI_MAX_FREQUENCY_HZ).
///
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    const fn read_address(address: u8, len: usize) -> u8 {
        let address = (address & SPI_ADDRESS_MASK) | SPI_READ;
        if len > 1 { address | SPI_MULTI } else { address }
    }

    const fn write_address(address: u8, len: usize) -> u8 {
        let address = address & SPI_ADDRESS_MASK;
        if len > 1 { address | SPI_MULTI } else { address }
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let read_address = Self::read_address(address, read_data.len());

        // The read operation clocks out dummy bytes while sampling MISO
        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let write_address = Self::write_address(address, write_data.len());

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[write_address]),
            embedded_hal::spi::Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations)
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let read_address = Self::read_address(address, read_data.len());

        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&[read_address]),
            embedded_hal_async::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations).await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let write_address = Self::write_address(address, write_data.len());

        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&[write_address]),
            embedded_hal_async::spi::Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations).await
    }
}

/// Bus binding chosen at runtime
///
/// Boards that fit the gyroscope on either bus (for example, depending on a
/// hardware revision strap) can hold one driver type and decide the variant
/// during start-up. When the bus is known at compile time, use
/// [`I2cInterface`] or [`SpiInterface`] directly.
///
/// ```ignore
/// let interface: BusInterface<I2cInterface<_>, SpiInterface<_>> = if uses_spi {
///     BusInterface::Spi(SpiInterface::new(spi_device))
/// } else {
///     BusInterface::I2c(I2cInterface::new(i2c))
/// };
/// ```
pub enum BusInterface<I, S> {
    /// Device attached over I2C
    I2c(I),
    /// Device attached over SPI
    Spi(S),
}

/// Error of a [`BusInterface`], tagged with the bus that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<I, S> {
    /// I2C bus error
    I2c(I),
    /// SPI bus error
    Spi(S),
}

impl<I, S> BusInterface<I, S> {
    /// Whether the I2C variant is active
    pub const fn is_i2c(&self) -> bool {
        matches!(self, Self::I2c(_))
    }

    /// Whether the SPI variant is active
    pub const fn is_spi(&self) -> bool {
        matches!(self, Self::Spi(_))
    }
}

impl<I, S> RegisterInterface for BusInterface<I, S>
where
    I: RegisterInterface<AddressType = u8>,
    S: RegisterInterface<AddressType = u8>,
{
    type Error = BusError<I::Error, S::Error>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        match self {
            Self::I2c(i2c) => i2c
                .read_register(address, size_bits, read_data)
                .map_err(BusError::I2c),
            Self::Spi(spi) => spi
                .read_register(address, size_bits, read_data)
                .map_err(BusError::Spi),
        }
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        match self {
            Self::I2c(i2c) => i2c
                .write_register(address, size_bits, write_data)
                .map_err(BusError::I2c),
            Self::Spi(spi) => spi
                .write_register(address, size_bits, write_data)
                .map_err(BusError::Spi),
        }
    }
}

#[cfg(feature = "async")]
impl<I, S> device_driver::AsyncRegisterInterface for BusInterface<I, S>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
    S: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    type Error = BusError<I::Error, S::Error>;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        match self {
            Self::I2c(i2c) => i2c
                .read_register(address, size_bits, read_data)
                .await
                .map_err(BusError::I2c),
            Self::Spi(spi) => spi
                .read_register(address, size_bits, read_data)
                .await
                .map_err(BusError::Spi),
        }
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        match self {
            Self::I2c(i2c) => i2c
                .write_register(address, size_bits, write_data)
                .await
                .map_err(BusError::I2c),
            Self::Spi(spi) => spi
                .write_register(address, size_bits, write_data)
                .await
                .map_err(BusError::Spi),
        }
    }
}

/// Byte-level register contract shared by every bus binding
///
/// Implemented for every [`RegisterInterface`] with 8-bit addresses.
/// `update_masked` is a read followed by a write: two bus transactions,
/// not atomic with respect to other users of the device.
pub trait RegisterTransport: RegisterInterface<AddressType = u8> {
    /// Read one register
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_register(address, 8, &mut value)?;
        Ok(value[0])
    }

    /// Write one register
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.write_register(address, 8, &[value])
    }

    /// Read one register and keep only the bits selected by `mask`
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    fn read_masked(&mut self, address: u8, mask: u8) -> Result<u8, Self::Error> {
        Ok(self.read_byte(address)? & mask)
    }

    /// Replace the bits selected by `mask` with the same bits of `value`
    ///
    /// # Errors
    /// Returns the bus error if either transaction fails.
    fn update_masked(&mut self, address: u8, value: u8, mask: u8) -> Result<(), Self::Error> {
        let current = self.read_byte(address)?;
        self.write_byte(address, (current & !mask) | (value & mask))
    }

    /// Read `buffer.len()` consecutive registers starting at `address` in one
    /// transaction
    ///
    /// Used for the six output registers so that X, Y and Z come from the
    /// same sample.
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    fn burst_read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.read_register(address, size_bits, buffer)
    }
}

impl<T> RegisterTransport for T where T: RegisterInterface<AddressType = u8> {}

/// Async counterpart of [`RegisterTransport`]
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterTransport: device_driver::AsyncRegisterInterface<AddressType = u8> {
    /// Read one register
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    async fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_register(address, 8, &mut value).await?;
        Ok(value[0])
    }

    /// Write one register
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    async fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.write_register(address, 8, &[value]).await
    }

    /// Read one register and keep only the bits selected by `mask`
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    async fn read_masked(&mut self, address: u8, mask: u8) -> Result<u8, Self::Error> {
        Ok(self.read_byte(address).await? & mask)
    }

    /// Replace the bits selected by `mask` with the same bits of `value`
    ///
    /// # Errors
    /// Returns the bus error if either transaction fails.
    async fn update_masked(&mut self, address: u8, value: u8, mask: u8) -> Result<(), Self::Error> {
        let current = self.read_byte(address).await?;
        self.write_byte(address, (current & !mask) | (value & mask))
            .await
    }

    /// Read `buffer.len()` consecutive registers starting at `address` in one
    /// transaction
    ///
    /// # Errors
    /// Returns the bus error if the transaction fails.
    async fn burst_read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.read_register(address, size_bits, buffer).await
    }
}

#[cfg(feature = "async")]
impl<T> AsyncRegisterTransport for T where T: device_driver::AsyncRegisterInterface<AddressType = u8> {}
