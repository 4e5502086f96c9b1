//! Register definitions for the L3GD20
//!
//! The L3GD20 exposes a flat map of 8-bit registers. Configuration lives in
//! five control registers plus the FIFO control register; angular rate and
//! temperature samples are read from the output block starting at `OUT_TEMP`
//! (0x26).
//!
//! ## Layout
//! - **0x0F**: identification (`WHO_AM_I`, reads 0xD4)
//! - **0x20..=0x24**: control registers 1 to 5
//! - **0x25..=0x2D**: reference, temperature, status and X/Y/Z output
//! - **0x2E..=0x2F**: FIFO control and source
//! - **0x30..=0x38**: INT1 configuration, source, thresholds and duration
//!
//! Each register value read through this block is a typed, in-memory image of
//! the byte on the device; `modify` refreshes the image from the device,
//! applies the change and writes it back.

device_driver::create_device!(
    device_name: L3gd20,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// WHO_AM_I - Device identification (0x0F)
        /// Expected value: 0xD4
        register WhoAmI {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Device ID (should read 0xD4)
            who_am_i: uint = 0..8,
        },

        /// CTRL_REG1 - Data rate, bandwidth and power (0x20)
        register CtrlReg1 {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            /// X-axis enable
            xen: bool = 0,
            /// Y-axis enable
            yen: bool = 1,
            /// Z-axis enable
            zen: bool = 2,
            /// Power down control (0 = power down, 1 = normal/sleep)
            pd: bool = 3,
            /// Bandwidth (low-pass cutoff) selection
            bw: uint = 4..6,
            /// Output data rate selection
            dr: uint = 6..8,
        },

        /// CTRL_REG2 - High-pass filter configuration (0x21)
        register CtrlReg2 {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            /// High-pass filter cutoff frequency selection
            hpcf: uint = 0..4,
            /// High-pass filter mode
            hpm: uint = 4..6,
            reserved_7_6: uint = 6..8,
        },

        /// CTRL_REG3 - Interrupt pin configuration (0x22)
        register CtrlReg3 {
            const ADDRESS = 0x22;
            const SIZE_BITS = 8;

            /// FIFO empty interrupt on DRDY/INT2
            empty_irq: bool = 0,
            /// FIFO overrun interrupt on DRDY/INT2
            overrun_irq: bool = 1,
            /// FIFO watermark interrupt on DRDY/INT2
            watermark_irq: bool = 2,
            /// Data-ready interrupt on DRDY/INT2
            data_ready_irq: bool = 3,
            /// Open drain (1) or push-pull (0) interrupt pins
            open_drain: bool = 4,
            /// Interrupt active low on INT1
            active_low: bool = 5,
            /// Boot status available on INT1
            boot_irq: bool = 6,
            /// Interrupt enable on INT1
            interrupt_enable: bool = 7,
        },

        /// CTRL_REG4 - Full scale and data format (0x23)
        register CtrlReg4 {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            /// SPI serial interface mode (0 = 4-wire, 1 = 3-wire)
            sim: bool = 0,
            reserved_3_1: uint = 1..4,
            /// Full-scale selection
            fs: uint = 4..6,
            /// Big/little endian data selection (0 = LSB at lower address)
            ble: bool = 6,
            /// Block data update (0 = continuous update)
            bdu: bool = 7,
        },

        /// CTRL_REG5 - FIFO, high-pass and output selection (0x24)
        register CtrlReg5 {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            /// Output selection (0b11 = data passes through LPF2)
            out_sel: uint = 0..2,
            /// INT1 selection configuration
            int_sel: uint = 2..4,
            /// High-pass filter enable
            hpen: bool = 4,
            reserved_5: uint = 5..6,
            /// FIFO enable
            fifo_en: bool = 6,
            /// Reboot memory content
            boot: bool = 7,
        },

        /// REFERENCE - High-pass filter reference value (0x25)
        register Reference {
            const ADDRESS = 0x25;
            const SIZE_BITS = 8;

            /// Reference value for interrupt generation
            reference: uint = 0..8,
        },

        /// OUT_TEMP - Temperature data (0x26)
        register OutTemp {
            const ADDRESS = 0x26;
            const SIZE_BITS = 8;

            /// Raw temperature (two's complement, uncalibrated zero point)
            temp: uint = 0..8,
        },

        /// STATUS_REG - Data status (0x27)
        register StatusReg {
            const ADDRESS = 0x27;
            const SIZE_BITS = 8;

            /// X-axis new data available
            xda: bool = 0,
            /// Y-axis new data available
            yda: bool = 1,
            /// Z-axis new data available
            zda: bool = 2,
            /// X, Y or Z-axis new data available
            zyxda: bool = 3,
            /// X-axis data overrun
            xor: bool = 4,
            /// Y-axis data overrun
            yor: bool = 5,
            /// Z-axis data overrun
            zor: bool = 6,
            /// X, Y or Z-axis data overrun
            zyxor: bool = 7,
        },

        /// OUT_X_L - X-axis angular rate, low byte (0x28)
        register OutXL {
            const ADDRESS = 0x28;
            const SIZE_BITS = 8;

            out_x_l: uint = 0..8,
        },

        /// OUT_X_H - X-axis angular rate, high byte (0x29)
        register OutXH {
            const ADDRESS = 0x29;
            const SIZE_BITS = 8;

            out_x_h: uint = 0..8,
        },

        /// OUT_Y_L - Y-axis angular rate, low byte (0x2A)
        register OutYL {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 8;

            out_y_l: uint = 0..8,
        },

        /// OUT_Y_H - Y-axis angular rate, high byte (0x2B)
        register OutYH {
            const ADDRESS = 0x2B;
            const SIZE_BITS = 8;

            out_y_h: uint = 0..8,
        },

        /// OUT_Z_L - Z-axis angular rate, low byte (0x2C)
        register OutZL {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 8;

            out_z_l: uint = 0..8,
        },

        /// OUT_Z_H - Z-axis angular rate, high byte (0x2D)
        register OutZH {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 8;

            out_z_h: uint = 0..8,
        },

        /// FIFO_CTRL_REG - FIFO mode and watermark (0x2E)
        register FifoCtrlReg {
            const ADDRESS = 0x2E;
            const SIZE_BITS = 8;

            /// FIFO watermark level
            wtm: uint = 0..5,
            /// FIFO mode selection
            fm: uint = 5..8,
        },

        /// FIFO_SRC_REG - FIFO status (0x2F)
        register FifoSrcReg {
            const ADDRESS = 0x2F;
            const SIZE_BITS = 8;

            /// Number of unread samples stored in the FIFO
            fss: uint = 0..5,
            /// FIFO empty
            empty: bool = 5,
            /// FIFO overrun (all 32 slots filled)
            ovrn: bool = 6,
            /// Stored level at or above the watermark
            wtm: bool = 7,
        },

        /// INT1_CFG - INT1 event configuration (0x30)
        register IntOneCfg {
            const ADDRESS = 0x30;
            const SIZE_BITS = 8;

            /// X low event
            xlie: bool = 0,
            /// X high event
            xhie: bool = 1,
            /// Y low event
            ylie: bool = 2,
            /// Y high event
            yhie: bool = 3,
            /// Z low event
            zlie: bool = 4,
            /// Z high event
            zhie: bool = 5,
            /// Latch interrupt request
            lir: bool = 6,
            /// AND (1) / OR (0) combination of events
            and_or: bool = 7,
        },

        /// INT1_SRC - INT1 event source (0x31)
        register IntOneSrc {
            const ADDRESS = 0x31;
            const SIZE_BITS = 8;

            /// X low
            xl: bool = 0,
            /// X high
            xh: bool = 1,
            /// Y low
            yl: bool = 2,
            /// Y high
            yh: bool = 3,
            /// Z low
            zl: bool = 4,
            /// Z high
            zh: bool = 5,
            /// Interrupt active
            ia: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// INT1_TSH_XH - X threshold, high byte (0x32)
        register IntOneThsXh {
            const ADDRESS = 0x32;
            const SIZE_BITS = 8;

            ths_xh: uint = 0..7,
            reserved_7: uint = 7..8,
        },

        /// INT1_TSH_XL - X threshold, low byte (0x33)
        register IntOneThsXl {
            const ADDRESS = 0x33;
            const SIZE_BITS = 8;

            ths_xl: uint = 0..8,
        },

        /// INT1_TSH_YH - Y threshold, high byte (0x34)
        register IntOneThsYh {
            const ADDRESS = 0x34;
            const SIZE_BITS = 8;

            ths_yh: uint = 0..7,
            reserved_7: uint = 7..8,
        },

        /// INT1_TSH_YL - Y threshold, low byte (0x35)
        register IntOneThsYl {
            const ADDRESS = 0x35;
            const SIZE_BITS = 8;

            ths_yl: uint = 0..8,
        },

        /// INT1_TSH_ZH - Z threshold, high byte (0x36)
        register IntOneThsZh {
            const ADDRESS = 0x36;
            const SIZE_BITS = 8;

            ths_zh: uint = 0..7,
            reserved_7: uint = 7..8,
        },

        /// INT1_TSH_ZL - Z threshold, low byte (0x37)
        register IntOneThsZl {
            const ADDRESS = 0x37;
            const SIZE_BITS = 8;

            ths_zl: uint = 0..8,
        },

        /// INT1_DURATION - INT1 minimum event duration (0x38)
        register IntOneDuration {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Duration value in ODR periods
            duration: uint = 0..7,
            /// Wait before exiting the interrupt
            wait: bool = 7,
        },
    }
);

/// Raw register addresses, for byte-level access through
/// [`RegisterTransport`](crate::RegisterTransport)
pub mod addresses {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Control register 1 (data rate, bandwidth, power, axes)
    pub const CTRL_REG1: u8 = 0x20;
    /// Control register 2 (high-pass filter)
    pub const CTRL_REG2: u8 = 0x21;
    /// Control register 3 (interrupt routing)
    pub const CTRL_REG3: u8 = 0x22;
    /// Control register 4 (full scale, data format)
    pub const CTRL_REG4: u8 = 0x23;
    /// Control register 5 (FIFO, high-pass enable, output selection)
    pub const CTRL_REG5: u8 = 0x24;
    /// High-pass filter reference
    pub const REFERENCE: u8 = 0x25;
    /// Temperature output
    pub const OUT_TEMP: u8 = 0x26;
    /// Data status
    pub const STATUS_REG: u8 = 0x27;
    /// X-axis low byte, start of the 6-byte angular rate block
    pub const OUT_X_L: u8 = 0x28;
    /// X-axis high byte
    pub const OUT_X_H: u8 = 0x29;
    /// Y-axis low byte
    pub const OUT_Y_L: u8 = 0x2A;
    /// Y-axis high byte
    pub const OUT_Y_H: u8 = 0x2B;
    /// Z-axis low byte
    pub const OUT_Z_L: u8 = 0x2C;
    /// Z-axis high byte
    pub const OUT_Z_H: u8 = 0x2D;
    /// FIFO control
    pub const FIFO_CTRL_REG: u8 = 0x2E;
    /// FIFO source (status)
    pub const FIFO_SRC_REG: u8 = 0x2F;
    /// INT1 configuration
    pub const INT1_CFG: u8 = 0x30;
    /// INT1 source
    pub const INT1_SRC: u8 = 0x31;
    /// INT1 X threshold, high byte
    pub const INT1_TSH_XH: u8 = 0x32;
    /// INT1 X threshold, low byte
    pub const INT1_TSH_XL: u8 = 0x33;
    /// INT1 Y threshold, high byte
    pub const INT1_TSH_YH: u8 = 0x34;
    /// INT1 Y threshold, low byte
    pub const INT1_TSH_YL: u8 = 0x35;
    /// INT1 Z threshold, high byte
    pub const INT1_TSH_ZH: u8 = 0x36;
    /// INT1 Z threshold, low byte
    pub const INT1_TSH_ZL: u8 = 0x37;
    /// INT1 duration
    pub const INT1_DURATION: u8 = 0x38;
}
