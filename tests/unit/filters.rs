//! Unit tests for the low-pass and high-pass filter configuration

use crate::common::{assert_float_eq, create_initialized_driver};
use l3gd20::registers::addresses;
use l3gd20::{HighPassCutoffMode, LowPassCutoffMode, OutputDataRate};

const RATES: [OutputDataRate; 4] = [
    OutputDataRate::Hz95,
    OutputDataRate::Hz190,
    OutputDataRate::Hz380,
    OutputDataRate::Hz760,
];

const LOW_PASS_MODES: [LowPassCutoffMode; 4] = [
    LowPassCutoffMode::Mode0,
    LowPassCutoffMode::Mode1,
    LowPassCutoffMode::Mode2,
    LowPassCutoffMode::Mode3,
];

#[test]
fn test_low_pass_mode_round_trip() {
    let (mut driver, interface) = create_initialized_driver();

    for mode in LOW_PASS_MODES {
        driver.set_low_pass_cutoff_mode(mode).unwrap();
        assert_eq!(driver.low_pass_cutoff_mode().unwrap(), mode);
    }

    // BW sits in bits 5..4, next to DR
    assert_eq!(interface.get_register(addresses::CTRL_REG1), 0x3F);
}

#[test]
fn test_low_pass_frequency_table() {
    let (mut driver, _interface) = create_initialized_driver();

    let expected = [
        [15.5, 25.0, 25.0, 25.0],
        [12.5, 25.0, 50.0, 70.0],
        [20.0, 25.0, 50.0, 100.0],
        [30.0, 35.0, 50.0, 100.0],
    ];

    for (rate, row) in RATES.iter().zip(expected) {
        driver.set_output_data_rate(*rate).unwrap();
        for (mode, hz) in LOW_PASS_MODES.iter().zip(row) {
            driver.set_low_pass_cutoff_mode(*mode).unwrap();
            assert_float_eq(driver.low_pass_cutoff_frequency().unwrap(), hz, 1e-4);
        }
    }
}

#[test]
fn test_high_pass_enable_round_trip() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_high_pass_filter_enabled(true).unwrap();
    assert!(driver.is_high_pass_filter_enabled().unwrap());
    assert_eq!(interface.get_register(addresses::CTRL_REG5) & 0x10, 0x10);

    driver.set_high_pass_filter_enabled(false).unwrap();
    assert!(!driver.is_high_pass_filter_enabled().unwrap());
}

#[test]
fn test_high_pass_enable_is_independent_of_cutoff_mode() {
    let (mut driver, _interface) = create_initialized_driver();

    driver
        .set_high_pass_cutoff_mode(HighPassCutoffMode::Mode5)
        .unwrap();
    driver.set_high_pass_filter_enabled(true).unwrap();
    driver.set_high_pass_filter_enabled(false).unwrap();

    assert_eq!(
        driver.high_pass_cutoff_mode().unwrap(),
        HighPassCutoffMode::Mode5
    );
}

#[test]
fn test_high_pass_mode_clamps_undefined_values() {
    let (mut driver, interface) = create_initialized_driver();

    for raw in 10..16u8 {
        interface.set_register(addresses::CTRL_REG2, raw);
        assert_eq!(
            driver.high_pass_cutoff_mode().unwrap(),
            HighPassCutoffMode::Mode9
        );
    }

    interface.set_register(addresses::CTRL_REG2, 0x0F);
    driver.set_output_data_rate(OutputDataRate::Hz95).unwrap();
    assert_float_eq(driver.high_pass_cutoff_frequency().unwrap(), 0.009, 1e-6);
}

#[test]
fn test_high_pass_mode_seven_at_95_hz() {
    let (mut driver, _interface) = create_initialized_driver();

    driver
        .set_high_pass_cutoff_mode(HighPassCutoffMode::Mode7)
        .unwrap();
    driver.set_output_data_rate(OutputDataRate::Hz95).unwrap();

    assert_float_eq(driver.high_pass_cutoff_frequency().unwrap(), 0.045, 1e-6);
}

#[test]
fn test_high_pass_frequency_follows_rate() {
    let (mut driver, _interface) = create_initialized_driver();

    driver
        .set_high_pass_cutoff_mode(HighPassCutoffMode::Mode0)
        .unwrap();

    let expected = [7.2, 13.5, 27.0, 51.4];
    for (rate, hz) in RATES.iter().zip(expected) {
        driver.set_output_data_rate(*rate).unwrap();
        assert_float_eq(driver.high_pass_cutoff_frequency().unwrap(), hz, 1e-4);
    }
}

#[test]
fn test_high_pass_mode_keeps_filter_mode_bits() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(addresses::CTRL_REG2, 0x10);

    driver
        .set_high_pass_cutoff_mode(HighPassCutoffMode::Mode3)
        .unwrap();

    assert_eq!(interface.get_register(addresses::CTRL_REG2), 0x13);
}
