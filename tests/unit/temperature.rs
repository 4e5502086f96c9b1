//! Unit tests for the temperature reading

use crate::common::create_initialized_driver;
use l3gd20::registers::addresses;
use l3gd20::sensors::temperature_delta;
use l3gd20::TEMPERATURE_SENSITIVITY;

#[test]
fn test_read_temperature_raw_is_signed() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_temperature(25);
    assert_eq!(driver.read_temperature_raw().unwrap(), 25);

    interface.set_temperature(-12);
    assert_eq!(driver.read_temperature_raw().unwrap(), -12);

    interface.set_register(addresses::OUT_TEMP, 0x80);
    assert_eq!(driver.read_temperature_raw().unwrap(), i8::MIN);
}

#[test]
fn test_temperature_is_a_single_register_read() {
    let (mut driver, interface) = create_initialized_driver();

    driver.read_temperature_raw().unwrap();

    assert_eq!(interface.read_count(addresses::OUT_TEMP), 1);
    assert_eq!(interface.transaction_count(), 1);
}

#[test]
fn test_temperature_sensitivity_placeholder() {
    assert_eq!(TEMPERATURE_SENSITIVITY, -1.0);
}

#[test]
fn test_temperature_delta_between_readings() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_temperature(10);
    let before = driver.read_temperature_raw().unwrap();
    interface.set_temperature(4);
    let after = driver.read_temperature_raw().unwrap();

    assert!((temperature_delta(before, after) - 6.0).abs() < f32::EPSILON);
}
