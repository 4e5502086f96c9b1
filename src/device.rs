//! High-level driver API for the L3GD20
//!
//! This module provides the configuration, query and data-read contract of
//! the gyroscope on top of the register block in [`crate::registers`]. Every
//! setting is stored on the device; the only host-side state is the cached
//! full-scale sensitivity used to scale samples.

use crate::fifo::{FifoMode, FifoStatus, FifoWatermark};
use crate::interrupt::{DRDY_INT2_MASK, InterruptRouting};
use crate::registers::L3gd20 as RegisterDevice;
use crate::registers::addresses;
use crate::sensors::{
    FullScale, GyroData, GyroDataDps, GyroDataRps, HighPassCutoffMode, LowPassCutoffMode,
    OutputDataRate, Status,
};
use crate::{Error, WHO_AM_I_VALUE};

#[cfg(feature = "async")]
use crate::interface::AsyncRegisterTransport;
#[cfg(not(feature = "async"))]
use crate::interface::RegisterTransport;
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Number of `WHO_AM_I` reads before the device is declared absent
///
/// A single read can be corrupted by a glitch on the bus right after power-up.
const IDENTIFY_ATTEMPTS: usize = 3;

/// `CTRL_REG5.OUT_SEL` value routing the output through LPF2
const OUT_SEL_LPF2: u8 = 0b11;

/// Main driver for the L3GD20
pub struct L3gd20Driver<I> {
    device: RegisterDevice<I>,
    // Cached from the last full-scale write
    sensitivity_dps: f32,
    sensitivity_rps: f32,
}

#[cfg(not(feature = "async"))]
impl<I> L3gd20Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new L3GD20 driver instance
    ///
    /// No bus traffic happens here. Call [`init()`](Self::init) to identify
    /// the device and apply the default configuration.
    ///
    /// The sensitivity cache starts at the ±250°/s power-on default.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            sensitivity_dps: FullScale::Dps250.sensitivity_dps(),
            sensitivity_rps: FullScale::Dps250.sensitivity_rps(),
        }
    }

    /// Identify the device and apply the default configuration
    ///
    /// The identity check reads `WHO_AM_I` up to three times. After that the
    /// data format is fixed to continuous update, little-endian, with the
    /// output routed through the second low-pass stage, and the defaults are
    /// applied in this order:
    ///
    /// 1. interrupt disabled
    /// 2. FIFO disabled, watermark 0
    /// 3. ±250°/s full scale
    /// 4. high-pass filter disabled, cutoff mode 0
    /// 5. low-pass cutoff mode 0
    /// 6. 95 Hz output data rate
    /// 7. gyroscope enabled if `auto_start`, powered down otherwise
    ///
    /// Calling it again restores the same configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - `WHO_AM_I` does not read 0xD4 on any attempt (`Error::InvalidDevice`
    ///   carries the last value read)
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut gyro = L3gd20Driver::new(I2cInterface::new(i2c));
    /// gyro.init(true)?;
    /// let rate = gyro.read_gyroscope()?;
    /// ```
    pub fn init(&mut self, auto_start: bool) -> Result<(), Error<I::Error>> {
        self.identify()?;

        // Continuous update, LSB at the lower address
        self.device.ctrl_reg_4().modify(|w| {
            w.set_bdu(false);
            w.set_ble(false);
        })?;
        self.device.ctrl_reg_5().modify(|w| {
            w.set_out_sel(OUT_SEL_LPF2);
        })?;

        self.set_data_ready_interrupt_enabled(false)?;
        self.set_fifo_enabled(false)?;
        self.set_fifo_watermark(0)?;
        self.set_full_scale(FullScale::Dps250)?;
        self.set_high_pass_filter_enabled(false)?;
        self.set_high_pass_cutoff_mode(HighPassCutoffMode::Mode0)?;
        self.set_low_pass_cutoff_mode(LowPassCutoffMode::Mode0)?;
        self.set_output_data_rate(OutputDataRate::Hz95)?;
        self.set_gyroscope_enabled(auto_start)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("L3GD20 initialized (auto_start: {})", auto_start);

        Ok(())
    }

    fn identify(&mut self) -> Result<(), Error<I::Error>> {
        let mut who_am_i = 0;
        for _ in 0..IDENTIFY_ATTEMPTS {
            who_am_i = self.read_who_am_i()?;
            if who_am_i == WHO_AM_I_VALUE {
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected WHO_AM_I {=u8:#x}, retrying", who_am_i);
        }

        #[cfg(feature = "defmt")]
        defmt::error!(
            "L3GD20 not found: WHO_AM_I = {=u8:#x}, expected {=u8:#x}",
            who_am_i,
            WHO_AM_I_VALUE
        );

        Err(Error::InvalidDevice(who_am_i))
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0xD4 for a valid L3GD20
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Power the gyroscope up with all three axes, or power it down
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyroscope_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_pd(enabled);
            w.set_zen(enabled);
            w.set_yen(enabled);
            w.set_xen(enabled);
        })?;
        Ok(())
    }

    /// Check whether the gyroscope is powered up (`CTRL_REG1.PD`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_gyroscope_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_1().read()?.pd())
    }

    /// Set the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_output_data_rate(&mut self, rate: OutputDataRate) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_dr(rate.bits());
        })?;
        Ok(())
    }

    /// Get the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn output_data_rate(&mut self) -> Result<OutputDataRate, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read()?;
        Ok(OutputDataRate::from_bits(reg.dr()))
    }

    /// Get the output data rate in Hz
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn output_data_rate_hz(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.output_data_rate()?.hz())
    }

    /// Set the low-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_pass_cutoff_mode(
        &mut self,
        mode: LowPassCutoffMode,
    ) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_bw(mode.bits());
        })?;
        Ok(())
    }

    /// Get the low-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_pass_cutoff_mode(&mut self) -> Result<LowPassCutoffMode, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read()?;
        Ok(LowPassCutoffMode::from_bits(reg.bw()))
    }

    /// Get the low-pass cutoff frequency in Hz for the current rate and mode
    ///
    /// Both fields come from a single `CTRL_REG1` read.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_pass_cutoff_frequency(&mut self) -> Result<f32, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read()?;
        Ok(LowPassCutoffMode::from_bits(reg.bw()).cutoff_hz(OutputDataRate::from_bits(reg.dr())))
    }

    /// Enable or disable the high-pass filter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_pass_filter_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_hpen(enabled);
        })?;
        Ok(())
    }

    /// Check whether the high-pass filter is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_high_pass_filter_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_5().read()?.hpen())
    }

    /// Set the high-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_pass_cutoff_mode(
        &mut self,
        mode: HighPassCutoffMode,
    ) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_2().modify(|w| {
            w.set_hpcf(mode.bits());
        })?;
        Ok(())
    }

    /// Get the high-pass filter cutoff mode
    ///
    /// Undefined field values (10 to 15) are reported as
    /// [`HighPassCutoffMode::Mode9`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_pass_cutoff_mode(&mut self) -> Result<HighPassCutoffMode, Error<I::Error>> {
        let reg = self.device.ctrl_reg_2().read()?;
        Ok(HighPassCutoffMode::from_bits(reg.hpcf()))
    }

    /// Get the high-pass cutoff frequency in Hz for the current mode and rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_pass_cutoff_frequency(&mut self) -> Result<f32, Error<I::Error>> {
        let mode = self.high_pass_cutoff_mode()?;
        let rate = self.output_data_rate()?;
        Ok(mode.cutoff_hz(rate))
    }

    /// Set the full-scale range
    ///
    /// The cached sensitivity used by [`read_gyroscope()`](Self::read_gyroscope)
    /// and [`read_gyroscope_radians()`](Self::read_gyroscope_radians) is
    /// updated once the register write succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_full_scale(&mut self, scale: FullScale) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_4().modify(|w| {
            w.set_fs(scale.bits());
        })?;
        self.sensitivity_dps = scale.sensitivity_dps();
        self.sensitivity_rps = scale.sensitivity_rps();
        Ok(())
    }

    /// Get the full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn full_scale(&mut self) -> Result<FullScale, Error<I::Error>> {
        let reg = self.device.ctrl_reg_4().read()?;
        Ok(FullScale::from_bits(reg.fs()))
    }

    /// Get the sensitivity in (rad/s)/LSB for the full scale set on the device
    ///
    /// Reads `CTRL_REG4`, so the result reflects writes made outside
    /// [`set_full_scale()`](Self::set_full_scale) too.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sensitivity(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.full_scale()?.sensitivity_rps())
    }

    /// Get the sensitivity in (°/s)/LSB for the full scale set on the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sensitivity_dps(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.full_scale()?.sensitivity_dps())
    }

    /// Enable or disable the FIFO
    ///
    /// Enabling selects stream mode before setting `FIFO_EN`; disabling
    /// clears `FIFO_EN` before returning to bypass mode. In both cases an
    /// enabled interrupt is then re-routed to match (see
    /// [`refresh_interrupt_routing()`](Self::refresh_interrupt_routing)).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        if enabled {
            self.device.fifo_ctrl_reg().modify(|w| {
                w.set_fm(FifoMode::Stream.bits());
            })?;
            self.device.ctrl_reg_5().modify(|w| {
                w.set_fifo_en(true);
            })?;
        } else {
            self.device.ctrl_reg_5().modify(|w| {
                w.set_fifo_en(false);
            })?;
            self.device.fifo_ctrl_reg().modify(|w| {
                w.set_fm(FifoMode::Bypass.bits());
            })?;
        }

        self.refresh_interrupt_routing()
    }

    /// Check whether the FIFO is enabled (`CTRL_REG5.FIFO_EN`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_fifo_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_5().read()?.fifo_en())
    }

    /// Get the FIFO mode set on the device
    ///
    /// Returns `None` for the undefined `FM` values 5 to 7.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_mode(&mut self) -> Result<Option<FifoMode>, Error<I::Error>> {
        let reg = self.device.fifo_ctrl_reg().read()?;
        Ok(FifoMode::from_bits(reg.fm()))
    }

    /// Set the FIFO watermark level (0 to 31)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `level` is above 31 (`Error::InvalidConfig`, nothing is written)
    /// - Communication with the device fails
    pub fn set_fifo_watermark(&mut self, level: u8) -> Result<(), Error<I::Error>> {
        let watermark = FifoWatermark::new::<I::Error>(level)?;
        self.device.fifo_ctrl_reg().modify(|w| {
            w.set_wtm(watermark.level());
        })?;
        Ok(())
    }

    /// Get the FIFO watermark level
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_watermark(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.fifo_ctrl_reg().read()?.wtm())
    }

    /// Discard the samples stored in the FIFO
    ///
    /// Passing through bypass mode empties the buffer, so the current mode is
    /// switched to bypass and then restored. Nothing is written when the FIFO
    /// is already in bypass mode.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn clear_fifo(&mut self) -> Result<(), Error<I::Error>> {
        let mode = self.device.fifo_ctrl_reg().read()?.fm();
        if mode == FifoMode::Bypass.bits() {
            return Ok(());
        }

        self.device.fifo_ctrl_reg().modify(|w| {
            w.set_fm(FifoMode::Bypass.bits());
        })?;
        self.device.fifo_ctrl_reg().modify(|w| {
            w.set_fm(mode);
        })?;
        Ok(())
    }

    /// Read the FIFO status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_status(&mut self) -> Result<FifoStatus, Error<I::Error>> {
        let value = self.device.interface.read_byte(addresses::FIFO_SRC_REG)?;
        Ok(FifoStatus::from_bits(value))
    }

    /// Enable or disable the data interrupt on the DRDY/INT2 pin
    ///
    /// When enabling, the source is chosen from the current FIFO state:
    /// FIFO watermark if the FIFO is enabled, data-ready otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_ready_interrupt_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        let routing = if enabled {
            InterruptRouting::for_fifo(self.is_fifo_enabled()?)
        } else {
            InterruptRouting::Off
        };

        self.device.interface.update_masked(
            addresses::CTRL_REG3,
            routing.ctrl_reg3_nibble(),
            DRDY_INT2_MASK,
        )?;
        Ok(())
    }

    /// Check whether any data interrupt source is routed to DRDY/INT2
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_data_ready_interrupt_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.interrupt_routing()?.is_enabled())
    }

    /// Get the interrupt source routed to DRDY/INT2
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn interrupt_routing(&mut self) -> Result<InterruptRouting, Error<I::Error>> {
        let value = self.device.interface.read_byte(addresses::CTRL_REG3)?;
        Ok(InterruptRouting::from_ctrl_reg3_nibble(value))
    }

    /// Re-select the interrupt source for the current FIFO state
    ///
    /// No-op when the interrupt is off. Called by
    /// [`set_fifo_enabled()`](Self::set_fifo_enabled).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn refresh_interrupt_routing(&mut self) -> Result<(), Error<I::Error>> {
        if self.is_data_ready_interrupt_enabled()? {
            self.set_data_ready_interrupt_enabled(true)?;
        }
        Ok(())
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        // Read all 6 bytes in one transaction to prevent torn samples
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .burst_read(addresses::OUT_X_L, &mut buffer)?;

        Ok(GyroData::from_le_bytes(buffer))
    }

    /// Read gyroscope data in degrees per second
    ///
    /// Scaled by the sensitivity cached at the last
    /// [`set_full_scale()`](Self::set_full_scale).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyroscope(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        Ok(self.read_raw()?.to_dps(self.sensitivity_dps))
    }

    /// Read gyroscope data in radians per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyroscope_radians(&mut self) -> Result<GyroDataRps, Error<I::Error>> {
        Ok(self.read_raw()?.to_rps(self.sensitivity_rps))
    }

    /// Read the raw temperature
    ///
    /// The zero point is not calibrated; see
    /// [`TEMPERATURE_SENSITIVITY`](crate::TEMPERATURE_SENSITIVITY).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<i8, Error<I::Error>> {
        let reg = self.device.out_temp().read()?;
        Ok(i8::from_le_bytes([reg.temp()]))
    }

    /// Read the data status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_status(&mut self) -> Result<Status, Error<I::Error>> {
        let value = self.device.interface.read_byte(addresses::STATUS_REG)?;
        Ok(Status::from_bits(value))
    }

    /// Read one register by address
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        Ok(self.device.interface.read_byte(address)?)
    }

    /// Read one register by address, keeping only the bits in `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register_masked(&mut self, address: u8, mask: u8) -> Result<u8, Error<I::Error>> {
        Ok(self.device.interface.read_masked(address, mask)?)
    }

    /// Write one register by address
    ///
    /// Writing `CTRL_REG4` this way bypasses the sensitivity cache; the
    /// scaled reads keep using the last [`set_full_scale()`](Self::set_full_scale)
    /// value while [`sensitivity()`](Self::sensitivity) reports the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.device.interface.write_byte(address, value)?;
        Ok(())
    }

    /// Replace the bits in `mask` of one register with those of `value`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn update_register(
        &mut self,
        address: u8,
        value: u8,
        mask: u8,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .update_masked(address, value, mask)?;
        Ok(())
    }

    /// Get a mutable reference to the underlying interface
    pub fn interface(&mut self) -> &mut I {
        &mut self.device.interface
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

#[cfg(feature = "async")]
impl<I> L3gd20Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Create a new L3GD20 driver instance
    ///
    /// No bus traffic happens here. Call [`init()`](Self::init) to identify
    /// the device and apply the default configuration.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            sensitivity_dps: FullScale::Dps250.sensitivity_dps(),
            sensitivity_rps: FullScale::Dps250.sensitivity_rps(),
        }
    }

    /// Identify the device and apply the default configuration
    ///
    /// Same sequence as the blocking driver: up to three `WHO_AM_I` reads,
    /// continuous little-endian output through LPF2, then interrupt off,
    /// FIFO off, watermark 0, ±250°/s, high-pass off in mode 0, low-pass
    /// mode 0, 95 Hz, and the gyroscope powered per `auto_start`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - `WHO_AM_I` does not read 0xD4 on any attempt
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut gyro = L3gd20Driver::new(SpiInterface::new(spi_device));
    /// gyro.init(true).await?;
    /// ```
    pub async fn init(&mut self, auto_start: bool) -> Result<(), Error<I::Error>> {
        self.identify().await?;

        self.device
            .ctrl_reg_4()
            .modify_async(|w| {
                w.set_bdu(false);
                w.set_ble(false);
            })
            .await?;
        self.device
            .ctrl_reg_5()
            .modify_async(|w| {
                w.set_out_sel(OUT_SEL_LPF2);
            })
            .await?;

        self.set_data_ready_interrupt_enabled(false).await?;
        self.set_fifo_enabled(false).await?;
        self.set_fifo_watermark(0).await?;
        self.set_full_scale(FullScale::Dps250).await?;
        self.set_high_pass_filter_enabled(false).await?;
        self.set_high_pass_cutoff_mode(HighPassCutoffMode::Mode0)
            .await?;
        self.set_low_pass_cutoff_mode(LowPassCutoffMode::Mode0)
            .await?;
        self.set_output_data_rate(OutputDataRate::Hz95).await?;
        self.set_gyroscope_enabled(auto_start).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("L3GD20 initialized (auto_start: {})", auto_start);

        Ok(())
    }

    async fn identify(&mut self) -> Result<(), Error<I::Error>> {
        let mut who_am_i = 0;
        for _ in 0..IDENTIFY_ATTEMPTS {
            who_am_i = self.read_who_am_i().await?;
            if who_am_i == WHO_AM_I_VALUE {
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected WHO_AM_I {=u8:#x}, retrying", who_am_i);
        }

        #[cfg(feature = "defmt")]
        defmt::error!(
            "L3GD20 not found: WHO_AM_I = {=u8:#x}, expected {=u8:#x}",
            who_am_i,
            WHO_AM_I_VALUE
        );

        Err(Error::InvalidDevice(who_am_i))
    }

    /// Read the `WHO_AM_I` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.who_am_i().read_async().await?;
        Ok(reg.who_am_i())
    }

    /// Power the gyroscope up with all three axes, or power it down
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_gyroscope_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_1()
            .modify_async(|w| {
                w.set_pd(enabled);
                w.set_zen(enabled);
                w.set_yen(enabled);
                w.set_xen(enabled);
            })
            .await?;
        Ok(())
    }

    /// Check whether the gyroscope is powered up
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_gyroscope_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_1().read_async().await?.pd())
    }

    /// Set the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_output_data_rate(
        &mut self,
        rate: OutputDataRate,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_1()
            .modify_async(|w| {
                w.set_dr(rate.bits());
            })
            .await?;
        Ok(())
    }

    /// Get the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn output_data_rate(&mut self) -> Result<OutputDataRate, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read_async().await?;
        Ok(OutputDataRate::from_bits(reg.dr()))
    }

    /// Get the output data rate in Hz
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn output_data_rate_hz(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.output_data_rate().await?.hz())
    }

    /// Set the low-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_low_pass_cutoff_mode(
        &mut self,
        mode: LowPassCutoffMode,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_1()
            .modify_async(|w| {
                w.set_bw(mode.bits());
            })
            .await?;
        Ok(())
    }

    /// Get the low-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_pass_cutoff_mode(&mut self) -> Result<LowPassCutoffMode, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read_async().await?;
        Ok(LowPassCutoffMode::from_bits(reg.bw()))
    }

    /// Get the low-pass cutoff frequency in Hz for the current rate and mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_pass_cutoff_frequency(&mut self) -> Result<f32, Error<I::Error>> {
        let reg = self.device.ctrl_reg_1().read_async().await?;
        Ok(LowPassCutoffMode::from_bits(reg.bw()).cutoff_hz(OutputDataRate::from_bits(reg.dr())))
    }

    /// Enable or disable the high-pass filter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_high_pass_filter_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_5()
            .modify_async(|w| {
                w.set_hpen(enabled);
            })
            .await?;
        Ok(())
    }

    /// Check whether the high-pass filter is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_high_pass_filter_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_5().read_async().await?.hpen())
    }

    /// Set the high-pass filter cutoff mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_high_pass_cutoff_mode(
        &mut self,
        mode: HighPassCutoffMode,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_2()
            .modify_async(|w| {
                w.set_hpcf(mode.bits());
            })
            .await?;
        Ok(())
    }

    /// Get the high-pass filter cutoff mode (undefined values read as mode 9)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_pass_cutoff_mode(&mut self) -> Result<HighPassCutoffMode, Error<I::Error>> {
        let reg = self.device.ctrl_reg_2().read_async().await?;
        Ok(HighPassCutoffMode::from_bits(reg.hpcf()))
    }

    /// Get the high-pass cutoff frequency in Hz for the current mode and rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_pass_cutoff_frequency(&mut self) -> Result<f32, Error<I::Error>> {
        let mode = self.high_pass_cutoff_mode().await?;
        let rate = self.output_data_rate().await?;
        Ok(mode.cutoff_hz(rate))
    }

    /// Set the full-scale range and update the cached sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_full_scale(&mut self, scale: FullScale) -> Result<(), Error<I::Error>> {
        self.device
            .ctrl_reg_4()
            .modify_async(|w| {
                w.set_fs(scale.bits());
            })
            .await?;
        self.sensitivity_dps = scale.sensitivity_dps();
        self.sensitivity_rps = scale.sensitivity_rps();
        Ok(())
    }

    /// Get the full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn full_scale(&mut self) -> Result<FullScale, Error<I::Error>> {
        let reg = self.device.ctrl_reg_4().read_async().await?;
        Ok(FullScale::from_bits(reg.fs()))
    }

    /// Get the sensitivity in (rad/s)/LSB for the full scale set on the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn sensitivity(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.full_scale().await?.sensitivity_rps())
    }

    /// Get the sensitivity in (°/s)/LSB for the full scale set on the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn sensitivity_dps(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.full_scale().await?.sensitivity_dps())
    }

    /// Enable or disable the FIFO and re-route an enabled interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_fifo_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error>> {
        if enabled {
            self.device
                .fifo_ctrl_reg()
                .modify_async(|w| {
                    w.set_fm(FifoMode::Stream.bits());
                })
                .await?;
            self.device
                .ctrl_reg_5()
                .modify_async(|w| {
                    w.set_fifo_en(true);
                })
                .await?;
        } else {
            self.device
                .ctrl_reg_5()
                .modify_async(|w| {
                    w.set_fifo_en(false);
                })
                .await?;
            self.device
                .fifo_ctrl_reg()
                .modify_async(|w| {
                    w.set_fm(FifoMode::Bypass.bits());
                })
                .await?;
        }

        self.refresh_interrupt_routing().await
    }

    /// Check whether the FIFO is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_fifo_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.device.ctrl_reg_5().read_async().await?.fifo_en())
    }

    /// Get the FIFO mode set on the device (`None` for undefined values)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn fifo_mode(&mut self) -> Result<Option<FifoMode>, Error<I::Error>> {
        let reg = self.device.fifo_ctrl_reg().read_async().await?;
        Ok(FifoMode::from_bits(reg.fm()))
    }

    /// Set the FIFO watermark level (0 to 31)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `level` is above 31 (`Error::InvalidConfig`, nothing is written)
    /// - Communication with the device fails
    pub async fn set_fifo_watermark(&mut self, level: u8) -> Result<(), Error<I::Error>> {
        let watermark = FifoWatermark::new::<I::Error>(level)?;
        self.device
            .fifo_ctrl_reg()
            .modify_async(|w| {
                w.set_wtm(watermark.level());
            })
            .await?;
        Ok(())
    }

    /// Get the FIFO watermark level
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn fifo_watermark(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.fifo_ctrl_reg().read_async().await?.wtm())
    }

    /// Discard the samples stored in the FIFO (bypass, then restore the mode)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn clear_fifo(&mut self) -> Result<(), Error<I::Error>> {
        let mode = self.device.fifo_ctrl_reg().read_async().await?.fm();
        if mode == FifoMode::Bypass.bits() {
            return Ok(());
        }

        self.device
            .fifo_ctrl_reg()
            .modify_async(|w| {
                w.set_fm(FifoMode::Bypass.bits());
            })
            .await?;
        self.device
            .fifo_ctrl_reg()
            .modify_async(|w| {
                w.set_fm(mode);
            })
            .await?;
        Ok(())
    }

    /// Read the FIFO status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn fifo_status(&mut self) -> Result<FifoStatus, Error<I::Error>> {
        let value = self
            .device
            .interface
            .read_byte(addresses::FIFO_SRC_REG)
            .await?;
        Ok(FifoStatus::from_bits(value))
    }

    /// Enable or disable the data interrupt on the DRDY/INT2 pin
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_data_ready_interrupt_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), Error<I::Error>> {
        let routing = if enabled {
            InterruptRouting::for_fifo(self.is_fifo_enabled().await?)
        } else {
            InterruptRouting::Off
        };

        self.device
            .interface
            .update_masked(
                addresses::CTRL_REG3,
                routing.ctrl_reg3_nibble(),
                DRDY_INT2_MASK,
            )
            .await?;
        Ok(())
    }

    /// Check whether any data interrupt source is routed to DRDY/INT2
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_data_ready_interrupt_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.interrupt_routing().await?.is_enabled())
    }

    /// Get the interrupt source routed to DRDY/INT2
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn interrupt_routing(&mut self) -> Result<InterruptRouting, Error<I::Error>> {
        let value = self
            .device
            .interface
            .read_byte(addresses::CTRL_REG3)
            .await?;
        Ok(InterruptRouting::from_ctrl_reg3_nibble(value))
    }

    /// Re-select the interrupt source for the current FIFO state
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn refresh_interrupt_routing(&mut self) -> Result<(), Error<I::Error>> {
        if self.is_data_ready_interrupt_enabled().await? {
            self.set_data_ready_interrupt_enabled(true).await?;
        }
        Ok(())
    }

    /// Read gyroscope data (raw 16-bit values)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_raw(&mut self) -> Result<GyroData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .burst_read(addresses::OUT_X_L, &mut buffer)
            .await?;

        Ok(GyroData::from_le_bytes(buffer))
    }

    /// Read gyroscope data in degrees per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyroscope(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        Ok(self.read_raw().await?.to_dps(self.sensitivity_dps))
    }

    /// Read gyroscope data in radians per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyroscope_radians(&mut self) -> Result<GyroDataRps, Error<I::Error>> {
        Ok(self.read_raw().await?.to_rps(self.sensitivity_rps))
    }

    /// Read the raw temperature (uncalibrated zero point)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature_raw(&mut self) -> Result<i8, Error<I::Error>> {
        let reg = self.device.out_temp().read_async().await?;
        Ok(i8::from_le_bytes([reg.temp()]))
    }

    /// Read the data status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_status(&mut self) -> Result<Status, Error<I::Error>> {
        let value = self
            .device
            .interface
            .read_byte(addresses::STATUS_REG)
            .await?;
        Ok(Status::from_bits(value))
    }

    /// Read one register by address
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        Ok(self.device.interface.read_byte(address).await?)
    }

    /// Read one register by address, keeping only the bits in `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_register_masked(
        &mut self,
        address: u8,
        mask: u8,
    ) -> Result<u8, Error<I::Error>> {
        Ok(self.device.interface.read_masked(address, mask).await?)
    }

    /// Write one register by address
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.device.interface.write_byte(address, value).await?;
        Ok(())
    }

    /// Replace the bits in `mask` of one register with those of `value`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn update_register(
        &mut self,
        address: u8,
        value: u8,
        mask: u8,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .update_masked(address, value, mask)
            .await?;
        Ok(())
    }

    /// Get a mutable reference to the underlying interface
    pub fn interface(&mut self) -> &mut I {
        &mut self.device.interface
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}
