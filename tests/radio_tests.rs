//! Driver-level tests against the simulated CC1101.

use everblu_rs::constants::ACK_CAPTURE_LEN;
use everblu_rs::radio::cc1101::DriverError;
use everblu_rs::radio::presets::PA_TABLE;
use everblu_rs::radio::registers::*;
use everblu_rs::{frequency_word, Cc1101, MockHal, OperatingState};

#[test]
fn every_transaction_refreshes_chip_status() {
    let mut radio = Cc1101::new(MockHal::new());
    radio.strobe(STROBE_SRX).unwrap();
    assert_eq!(radio.status().operating_state, OperatingState::Rx);
    radio.strobe(STROBE_SIDLE).unwrap();
    assert_eq!(radio.status().operating_state, OperatingState::Idle);
}

#[test]
fn status_reports_fifo_fill() {
    let mut hal = MockHal::new();
    hal.ack_bytes = vec![1, 2, 3];
    let mut radio = Cc1101::new(hal);
    radio.strobe(STROBE_SRX).unwrap();
    assert_eq!(radio.status().fifo_bytes, 3);
}

#[test]
fn wait_for_operating_state_sees_the_strobed_state() {
    let mut radio = Cc1101::new(MockHal::new());
    radio.strobe(STROBE_SRX).unwrap();
    assert!(radio
        .wait_for_operating_state(OperatingState::Rx, 25)
        .unwrap());
    // The wait succeeded on its first check, before any delay.
    assert_eq!(radio.hal_mut().delay_total_ms, 0);
}

#[test]
fn state_wait_consumes_exactly_its_budget_on_timeout() {
    let mut hal = MockHal::new();
    hal.rx_reachable = false;
    let mut radio = Cc1101::new(hal);
    radio.strobe(STROBE_SRX).unwrap();
    assert!(!radio
        .wait_for_operating_state(OperatingState::Rx, 24)
        .unwrap());
    assert_eq!(radio.hal_mut().delay_total_ms, 24);
}

#[test]
fn fifo_drain_returns_what_arrived_before_timeout() {
    let mut radio = Cc1101::new(MockHal::new());
    let mut out = [0u8; 10];
    let count = radio.drain_receive_fifo(50, 10, &mut out).unwrap();
    assert_eq!(count, 0);
    assert_eq!(radio.hal_mut().delay_total_ms, 50);
}

#[test]
fn fifo_drain_collects_the_requested_bytes() {
    let mut hal = MockHal::new();
    hal.ack_bytes = (0..25u8).collect();
    let mut radio = Cc1101::new(hal);
    radio.strobe(STROBE_SRX).unwrap();

    let mut out = [0u8; ACK_CAPTURE_LEN];
    let count = radio
        .drain_receive_fifo(150, ACK_CAPTURE_LEN, &mut out)
        .unwrap();
    assert_eq!(count, 25);
    assert_eq!(out[..25], *(0..25u8).collect::<Vec<u8>>());
}

#[test]
fn fifo_drain_rejects_undersized_buffers() {
    let mut radio = Cc1101::new(MockHal::new());
    let mut out = [0u8; 5];
    match radio.drain_receive_fifo(50, 10, &mut out) {
        Err(DriverError::BufferSize {
            capacity,
            requested,
        }) => {
            assert_eq!(capacity, 5);
            assert_eq!(requested, 10);
        }
        other => panic!("expected BufferSize error, got {other:?}"),
    }
}

#[test]
fn reset_strobes_and_settles() {
    let mut radio = Cc1101::new(MockHal::new());
    radio.reset().unwrap();
    assert_eq!(radio.hal_mut().delay_total_ms, 2);
    assert_eq!(
        radio.hal_mut().strobe_log,
        vec![STROBE_SRES, STROBE_SFTX, STROBE_SFRX]
    );
}

#[test]
fn set_frequency_programs_synthesizer_and_power_table() {
    let mut radio = Cc1101::new(MockHal::new());
    radio.set_frequency(433.82).unwrap();

    let word = frequency_word(433.82);
    let regs = radio.hal_mut().regs();
    assert_eq!(regs[REG_FREQ2 as usize], word[0]);
    assert_eq!(regs[REG_FREQ1 as usize], word[1]);
    assert_eq!(regs[REG_FREQ0 as usize], word[2]);
    assert_eq!(regs[REG_MDMCFG4 as usize], 0xF6);
    assert_eq!(regs[REG_MDMCFG3 as usize], 0x83);
    assert_eq!(radio.hal_mut().pa_table(), &PA_TABLE);
}

#[test]
fn config_register_image_mirrors_the_shadow() {
    let mut radio = Cc1101::new(MockHal::new());
    radio.set_frequency(433.82).unwrap();
    let image = radio.read_config_registers().unwrap();
    assert_eq!(&image[..], &radio.hal_mut().regs()[..CFG_REGISTER_COUNT]);
}

#[test]
fn chip_version_reads_the_silicon_revision() {
    let mut radio = Cc1101::new(MockHal::new());
    assert_eq!(radio.chip_version().unwrap(), (0x00, 0x14));
}

#[test]
fn calibration_settles_and_restores_foc_gain() {
    let mut radio = Cc1101::new(MockHal::new());
    assert!(radio.calibrate().unwrap());
    assert_eq!(radio.hal_mut().regs()[REG_FOCCFG as usize], 0x1D);
    assert_eq!(radio.hal_mut().delay_total_ms, 5);
}

#[test]
fn rx_stats_convert_rssi() {
    let mut hal = MockHal::new();
    hal.rssi_raw = 100;
    let mut radio = Cc1101::new(hal);
    let stats = radio.rx_stats().unwrap();
    assert_eq!(stats.rssi_dbm, -24);
    assert_eq!(stats.lqi, 0);
}
