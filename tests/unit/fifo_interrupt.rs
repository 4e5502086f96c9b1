//! Unit tests for the FIFO and its coupling with interrupt routing

use crate::common::{Operation, create_initialized_driver};
use l3gd20::registers::addresses;
use l3gd20::{Error, FifoMode, InterruptRouting};

#[test]
fn test_fifo_enable_selects_stream_mode() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_enabled(true).unwrap();

    assert!(driver.is_fifo_enabled().unwrap());
    assert_eq!(driver.fifo_mode().unwrap(), Some(FifoMode::Stream));
    assert_eq!(interface.get_register(addresses::FIFO_CTRL_REG) & 0xE0, 0x40);
    assert_eq!(interface.get_register(addresses::CTRL_REG5) & 0x40, 0x40);
}

#[test]
fn test_fifo_enable_write_order() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_enabled(true).unwrap();
    let writes = interface.writes();
    assert_eq!(writes[0].0, addresses::FIFO_CTRL_REG);
    assert_eq!(writes[1].0, addresses::CTRL_REG5);

    interface.clear_operations();
    driver.set_fifo_enabled(false).unwrap();
    let writes = interface.writes();
    assert_eq!(writes[0].0, addresses::CTRL_REG5);
    assert_eq!(writes[1].0, addresses::FIFO_CTRL_REG);
}

#[test]
fn test_fifo_disable_returns_to_bypass() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_enabled(true).unwrap();
    driver.set_fifo_enabled(false).unwrap();

    assert!(!driver.is_fifo_enabled().unwrap());
    assert_eq!(driver.fifo_mode().unwrap(), Some(FifoMode::Bypass));
    assert_eq!(interface.get_register(addresses::CTRL_REG5) & 0x40, 0x00);
}

#[test]
fn test_fifo_enable_keeps_watermark() {
    let (mut driver, _interface) = create_initialized_driver();

    driver.set_fifo_watermark(20).unwrap();
    driver.set_fifo_enabled(true).unwrap();

    assert_eq!(driver.fifo_watermark().unwrap(), 20);
}

#[test]
fn test_fifo_watermark_bounds() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_watermark(31).unwrap();
    assert_eq!(driver.fifo_watermark().unwrap(), 31);

    interface.clear_operations();
    let result = driver.set_fifo_watermark(32);
    assert!(matches!(result, Err(Error::InvalidConfig)));
    // Rejected before any bus traffic
    assert_eq!(interface.transaction_count(), 0);
    assert_eq!(driver.fifo_watermark().unwrap(), 31);
}

#[test]
fn test_clear_fifo_is_noop_in_bypass() {
    let (mut driver, interface) = create_initialized_driver();

    driver.clear_fifo().unwrap();

    assert!(interface.writes().is_empty());
}

#[test]
fn test_clear_fifo_bypasses_then_restores() {
    let (mut driver, interface) = create_initialized_driver();
    driver.set_fifo_watermark(8).unwrap();
    driver.set_fifo_enabled(true).unwrap();
    interface.clear_operations();

    driver.clear_fifo().unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (addresses::FIFO_CTRL_REG, 0x08),
            (addresses::FIFO_CTRL_REG, 0x48),
        ]
    );
    assert_eq!(driver.fifo_mode().unwrap(), Some(FifoMode::Stream));
}

#[test]
fn test_clear_fifo_restores_other_modes() {
    let (mut driver, interface) = create_initialized_driver();
    // Bypass-to-stream, set outside the driver
    interface.set_register(addresses::FIFO_CTRL_REG, 0x80);

    driver.clear_fifo().unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (addresses::FIFO_CTRL_REG, 0x00),
            (addresses::FIFO_CTRL_REG, 0x80),
        ]
    );
}

#[test]
fn test_fifo_status_decode() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_register(addresses::FIFO_SRC_REG, 0x8C);
    let status = driver.fifo_status().unwrap();
    assert!(status.above_watermark);
    assert!(!status.overrun);
    assert!(!status.empty);
    assert_eq!(status.level, 12);

    interface.set_register(addresses::FIFO_SRC_REG, 0xC0);
    let status = driver.fifo_status().unwrap();
    assert!(status.overrun);
    assert_eq!(status.level, 32);
}

#[test]
fn test_interrupt_uses_data_ready_without_fifo() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_data_ready_interrupt_enabled(true).unwrap();

    assert!(driver.is_data_ready_interrupt_enabled().unwrap());
    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::DataReady
    );
    assert_eq!(interface.get_register(addresses::CTRL_REG3) & 0x0F, 0x08);
}

#[test]
fn test_interrupt_uses_watermark_with_fifo() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_enabled(true).unwrap();
    driver.set_data_ready_interrupt_enabled(true).unwrap();

    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::Watermark
    );
    assert_eq!(interface.get_register(addresses::CTRL_REG3) & 0x0F, 0x04);
}

#[test]
fn test_fifo_toggle_reroutes_enabled_interrupt() {
    let (mut driver, interface) = create_initialized_driver();
    driver.set_data_ready_interrupt_enabled(true).unwrap();

    interface.clear_operations();
    driver.set_fifo_enabled(true).unwrap();
    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::Watermark
    );

    // Switched directly, never through "off"
    let ctrl3_writes: Vec<u8> = interface
        .writes()
        .into_iter()
        .filter(|(address, _)| *address == addresses::CTRL_REG3)
        .map(|(_, value)| value & 0x0F)
        .collect();
    assert_eq!(ctrl3_writes, vec![0x04]);

    driver.set_fifo_enabled(false).unwrap();
    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::DataReady
    );
}

#[test]
fn test_fifo_toggle_leaves_disabled_interrupt_off() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_fifo_enabled(true).unwrap();
    driver.set_fifo_enabled(false).unwrap();

    assert!(!driver.is_data_ready_interrupt_enabled().unwrap());
    assert!(
        !interface
            .writes()
            .iter()
            .any(|(address, _)| *address == addresses::CTRL_REG3)
    );
}

#[test]
fn test_interrupt_disable_clears_both_sources() {
    let (mut driver, interface) = create_initialized_driver();
    driver.set_fifo_enabled(true).unwrap();
    driver.set_data_ready_interrupt_enabled(true).unwrap();

    driver.set_data_ready_interrupt_enabled(false).unwrap();

    assert_eq!(driver.interrupt_routing().unwrap(), InterruptRouting::Off);
    assert_eq!(interface.get_register(addresses::CTRL_REG3) & 0x0F, 0x00);
}

#[test]
fn test_refresh_is_noop_when_off() {
    let (mut driver, interface) = create_initialized_driver();

    driver.refresh_interrupt_routing().unwrap();

    assert_eq!(interface.read_count(addresses::CTRL_REG3), 1);
    assert!(interface.writes().is_empty());
    assert!(
        !interface
            .operations()
            .iter()
            .any(|op| matches!(op, Operation::WriteRegister { .. }))
    );
}

#[test]
fn test_interrupt_routing_decodes_raw_ctrl_reg3() {
    let (mut driver, interface) = create_initialized_driver();

    // Overrun source only: still counts as routed
    interface.set_register(addresses::CTRL_REG3, 0x02);
    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::DataReady
    );

    // Both data sources set: watermark wins
    interface.set_register(addresses::CTRL_REG3, 0x0C);
    assert_eq!(
        driver.interrupt_routing().unwrap(),
        InterruptRouting::Watermark
    );

    // INT1 and pin configuration bits alone route nothing
    interface.set_register(addresses::CTRL_REG3, 0xF0);
    assert_eq!(driver.interrupt_routing().unwrap(), InterruptRouting::Off);
}

#[test]
fn test_interrupt_routing_keeps_upper_ctrl_reg3_bits() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(addresses::CTRL_REG3, 0xA3);

    driver.set_data_ready_interrupt_enabled(true).unwrap();

    assert_eq!(interface.get_register(addresses::CTRL_REG3), 0xA8);
}
