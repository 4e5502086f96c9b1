//! Unit tests for sample reads and unit conversion

use crate::common::{Operation, assert_float_eq, create_initialized_driver};
use l3gd20::registers::addresses;
use l3gd20::{FullScale, GyroData, Status};

#[test]
fn test_raw_read_is_one_burst() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_gyro_data(100, -200, 300);

    let data = driver.read_raw().unwrap();

    assert_eq!(
        data,
        GyroData {
            x: 100,
            y: -200,
            z: 300
        }
    );
    let operations = interface.operations();
    assert_eq!(operations.len(), 1);
    assert!(matches!(
        &operations[0],
        Operation::BurstRead { address, data } if *address == addresses::OUT_X_L && data.len() == 6
    ));
}

#[test]
fn test_raw_read_byte_order() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(addresses::OUT_X_L, 0x34);
    interface.set_register(addresses::OUT_X_H, 0x12);
    interface.set_register(addresses::OUT_Y_L, 0x00);
    interface.set_register(addresses::OUT_Y_H, 0x80);
    interface.set_register(addresses::OUT_Z_L, 0xFF);
    interface.set_register(addresses::OUT_Z_H, 0x7F);

    let data = driver.read_raw().unwrap();

    assert_eq!(data.x, 0x1234);
    assert_eq!(data.y, i16::MIN);
    assert_eq!(data.z, i16::MAX);
}

#[test]
fn test_scaled_read_matches_raw_read() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_gyro_data(1234, -5678, 42);

    for scale in [
        FullScale::Dps250,
        FullScale::Dps500,
        FullScale::Dps1000,
        FullScale::Dps2000,
    ] {
        driver.set_full_scale(scale).unwrap();

        let raw = driver.read_raw().unwrap();
        let dps = driver.read_gyroscope().unwrap();
        let expected = raw.to_dps(driver.sensitivity_dps().unwrap());
        assert_float_eq(dps.x, expected.x, 1e-4);
        assert_float_eq(dps.y, expected.y, 1e-4);
        assert_float_eq(dps.z, expected.z, 1e-4);

        let rps = driver.read_gyroscope_radians().unwrap();
        let expected = raw.to_rps(driver.sensitivity().unwrap());
        assert_float_eq(rps.x, expected.x, 1e-5);
        assert_float_eq(rps.y, expected.y, 1e-5);
        assert_float_eq(rps.z, expected.z, 1e-5);
    }
}

#[test]
fn test_degrees_per_second_values() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_gyro_data(1000, -1000, 0);

    driver.set_full_scale(FullScale::Dps500).unwrap();
    let dps = driver.read_gyroscope().unwrap();

    assert_float_eq(dps.x, 17.5, 1e-4);
    assert_float_eq(dps.y, -17.5, 1e-4);
    assert_float_eq(dps.z, 0.0, 1e-6);
}

#[test]
fn test_radians_and_degrees_agree() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_gyro_data(-3000, 2000, 1000);
    driver.set_full_scale(FullScale::Dps2000).unwrap();

    let dps = driver.read_gyroscope().unwrap();
    let rps = driver.read_gyroscope_radians().unwrap();
    let converted = dps.to_radians_per_sec();

    assert_float_eq(rps.x, converted.x, 1e-5);
    assert_float_eq(rps.y, converted.y, 1e-5);
    assert_float_eq(rps.z, converted.z, 1e-5);
    assert_float_eq(rps.magnitude(), dps.magnitude() * 0.017_453_292, 1e-4);
}

#[test]
fn test_scaling_uses_cache_not_live_register() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_gyro_data(100, 0, 0);
    driver.set_full_scale(FullScale::Dps250).unwrap();

    // Changed behind the driver's back
    interface.set_register(addresses::CTRL_REG4, 0x30);
    interface.clear_operations();

    let dps = driver.read_gyroscope().unwrap();
    assert_float_eq(dps.x, 0.875, 1e-5);
    // Only the data burst hits the bus
    assert_eq!(interface.transaction_count(), 1);
}

#[test]
fn test_status_register() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_register(addresses::STATUS_REG, 0x08);
    let status = driver.read_status().unwrap();
    assert!(status.data_ready());
    assert!(!status.xyz_overrun);

    interface.set_register(addresses::STATUS_REG, 0xF0);
    let status = driver.read_status().unwrap();
    assert!(!status.data_ready());
    assert!(status.x_overrun && status.y_overrun && status.z_overrun && status.xyz_overrun);
}

#[test]
fn test_raw_register_access() {
    let (mut driver, interface) = create_initialized_driver();

    driver.write_register(addresses::REFERENCE, 0x5A).unwrap();
    assert_eq!(driver.read_register(addresses::REFERENCE).unwrap(), 0x5A);
    assert_eq!(
        driver
            .read_register_masked(addresses::REFERENCE, 0x0F)
            .unwrap(),
        0x0A
    );

    driver
        .update_register(addresses::REFERENCE, 0xF0, 0x30)
        .unwrap();
    assert_eq!(interface.get_register(addresses::REFERENCE), 0x7A);
}

#[test]
fn test_status_matches_register_decode() {
    let (mut driver, interface) = create_initialized_driver();

    for bit in 0..8 {
        let value = 1u8 << bit;
        interface.set_register(addresses::STATUS_REG, value);
        assert_eq!(driver.read_status().unwrap(), Status::from_bits(value));
    }

    interface.set_register(addresses::STATUS_REG, 0x01);
    let status = driver.read_status().unwrap();
    assert!(status.x_available);
    assert!(!status.y_available && !status.z_available && !status.data_ready());
}
