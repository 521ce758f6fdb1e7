//! # CC1101 Driver
//!
//! Register-level driver for the TI CC1101. Every SPI transaction returns the
//! chip status byte first; the driver decodes it once per transaction and
//! keeps the result in [`Cc1101::status`], so higher layers never parse raw
//! status bytes. All waits are bounded busy-polls built on a single
//! `poll_until` primitive with explicit millisecond budgets.

use log::debug;
use thiserror::Error;

use super::hal::{Hal, HalError};
use super::presets::{PA_TABLE, RADIO_CONFIG_BASE};
use super::registers::*;
use crate::constants::CALIBRATION_TIMEOUT_MS;

/// Errors raised by the register-level driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The hardware link failed.
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),

    /// A FIFO drain was asked for more bytes than its buffer can hold.
    #[error("Buffer of {capacity} bytes cannot hold {requested} bytes")]
    BufferSize { capacity: usize, requested: usize },
}

/// Chip operating state, bits 6:4 of the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingState {
    Idle = 0,
    Rx = 1,
    Tx = 2,
    FstxOn = 3,
    Calibrating = 4,
    Settling = 5,
    RxOverflow = 6,
    TxUnderflow = 7,
}

impl OperatingState {
    /// Decode the operating state from a raw status byte.
    pub fn from_status_byte(byte: u8) -> Self {
        match (byte >> 4) & 0x07 {
            0 => OperatingState::Idle,
            1 => OperatingState::Rx,
            2 => OperatingState::Tx,
            3 => OperatingState::FstxOn,
            4 => OperatingState::Calibrating,
            5 => OperatingState::Settling,
            6 => OperatingState::RxOverflow,
            _ => OperatingState::TxUnderflow,
        }
    }
}

/// Decoded chip status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipStatus {
    pub operating_state: OperatingState,
    /// FIFO byte count reported in bits 3:0, saturating at 15.
    pub fifo_bytes: u8,
}

impl ChipStatus {
    fn from_byte(byte: u8) -> Self {
        ChipStatus {
            operating_state: OperatingState::from_status_byte(byte),
            fifo_bytes: byte & 0x0F,
        }
    }
}

/// Link quality snapshot taken after a receive window.
#[derive(Debug, Clone, Copy)]
pub struct RxStats {
    pub rssi_dbm: i16,
    pub lqi: u8,
    pub freq_offset: i8,
}

/// Convert a raw RSSI register value to dBm per the datasheet formula.
pub fn convert_rssi_to_dbm(raw: u8) -> i16 {
    if raw >= 128 {
        (raw as i16 - 256) / 2 - 74
    } else {
        raw as i16 / 2 - 74
    }
}

/// Compute the FREQ2/FREQ1/FREQ0 register word for a carrier in MHz.
///
/// The three registers weigh 26 MHz, 101.5625 kHz and 396.75 Hz per count
/// (26 MHz crystal, 2^16 divider). Computed by repeated subtraction so the
/// rounding matches the calibration tables the scan bounds were derived from.
pub fn frequency_word(mhz: f32) -> [u8; 3] {
    let mut remainder = mhz;

    let mut freq2: u8 = 0;
    while remainder >= 26.0 {
        remainder -= 26.0;
        freq2 += 1;
    }

    let mut freq1: u8 = 0;
    while remainder >= 0.101_562_5 {
        remainder -= 0.101_562_5;
        freq1 += 1;
    }

    let mut freq0: u16 = 0;
    while remainder >= 0.000_396_75 {
        remainder -= 0.000_396_75;
        freq0 += 1;
    }
    if freq0 > 0xFF {
        freq0 -= 0x100;
        freq1 += 1;
    }

    [freq2, freq1, freq0 as u8]
}

/// Register-level CC1101 driver over a [`Hal`] link.
pub struct Cc1101<H: Hal> {
    hal: H,
    status: ChipStatus,
}

impl<H: Hal> Cc1101<H> {
    pub fn new(hal: H) -> Self {
        Cc1101 {
            hal,
            status: ChipStatus {
                operating_state: OperatingState::Idle,
                fifo_bytes: 0,
            },
        }
    }

    /// Status decoded from the most recent SPI transaction.
    pub fn status(&self) -> ChipStatus {
        self.status
    }

    pub fn delay_ms(&mut self, ms: u64) {
        self.hal.delay_ms(ms);
    }

    /// Direct HAL access for signal lines the driver does not own.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), DriverError> {
        self.hal.spi_transfer(buf)?;
        self.status = ChipStatus::from_byte(buf[0]);
        Ok(())
    }

    /// Issue a command strobe.
    pub fn strobe(&mut self, strobe: u8) -> Result<(), DriverError> {
        let mut buf = [strobe];
        self.transfer(&mut buf)
    }

    /// Write a single configuration register.
    pub fn write_register(&mut self, addr: u8, value: u8) -> Result<(), DriverError> {
        let mut buf = [addr | WRITE_SINGLE, value];
        self.transfer(&mut buf)
    }

    /// Read one register. Status registers already carry the burst bit in
    /// their composite address, so the same header works for both spaces.
    pub fn read_register(&mut self, addr: u8) -> Result<u8, DriverError> {
        let mut buf = [addr | READ_SINGLE, 0];
        self.transfer(&mut buf)?;
        Ok(buf[1])
    }

    /// Burst-write consecutive registers or a FIFO.
    pub fn write_burst(&mut self, addr: u8, data: &[u8]) -> Result<(), DriverError> {
        let mut buf = Vec::with_capacity(data.len() + 1);
        buf.push(addr | WRITE_BURST);
        buf.extend_from_slice(data);
        self.transfer(&mut buf)
    }

    /// Burst-read into `out` from consecutive registers or a FIFO.
    pub fn read_burst(&mut self, addr: u8, out: &mut [u8]) -> Result<(), DriverError> {
        let mut buf = vec![0u8; out.len() + 1];
        buf[0] = addr | READ_BURST;
        self.transfer(&mut buf)?;
        out.copy_from_slice(&buf[1..]);
        Ok(())
    }

    /// Poll `check` every `interval_ms` until it reports done or the budget
    /// runs out. Elapsed time is accounted by accumulating the poll interval,
    /// which keeps the waits deterministic under simulated delays. The check
    /// runs once before any delay and once more when the budget is reached.
    fn poll_until<F>(
        &mut self,
        interval_ms: u64,
        budget_ms: u64,
        mut check: F,
    ) -> Result<bool, DriverError>
    where
        F: FnMut(&mut Self) -> Result<bool, DriverError>,
    {
        let mut elapsed: u64 = 0;
        loop {
            if check(self)? {
                return Ok(true);
            }
            if elapsed >= budget_ms {
                return Ok(false);
            }
            self.hal.delay_ms(interval_ms);
            elapsed += interval_ms;
        }
    }

    /// Wait until the chip reports `target` in its status byte.
    pub fn wait_for_operating_state(
        &mut self,
        target: OperatingState,
        budget_ms: u64,
    ) -> Result<bool, DriverError> {
        self.poll_until(2, budget_ms, |radio| {
            radio.read_register(REG_MARCSTATE)?;
            Ok(radio.status.operating_state == target)
        })
    }

    /// Wait until GDO0 reads `level`.
    pub fn wait_for_signal_edge(&mut self, level: bool, budget_ms: u64) -> Result<bool, DriverError> {
        self.poll_until(1, budget_ms, |radio| {
            Ok(radio.hal.gdo0().map_err(DriverError::Hal)? == level)
        })
    }

    /// Drain the RX FIFO into `out` until `target` bytes have been collected
    /// or the budget runs out. Returns the number of bytes collected.
    pub fn drain_receive_fifo(
        &mut self,
        budget_ms: u64,
        target: usize,
        out: &mut [u8],
    ) -> Result<usize, DriverError> {
        if target > out.len() {
            return Err(DriverError::BufferSize {
                capacity: out.len(),
                requested: target,
            });
        }

        let mut received: usize = 0;
        self.poll_until(5, budget_ms, |radio| {
            let pending = (radio.read_register(REG_RXBYTES)? & RXBYTES_MASK) as usize;
            if pending > 0 {
                let take = pending.min(target - received);
                radio.read_burst(REG_RX_FIFO, &mut out[received..received + take])?;
                received += take;
            }
            Ok(received >= target)
        })?;
        Ok(received)
    }

    /// Program the frequency synthesizer for a carrier in MHz.
    pub fn apply_frequency(&mut self, mhz: f32) -> Result<(), DriverError> {
        let word = frequency_word(mhz);
        self.write_register(REG_FREQ2, word[0])?;
        self.write_register(REG_FREQ1, word[1])?;
        self.write_register(REG_FREQ0, word[2])
    }

    /// Apply a list of register writes.
    pub fn apply_preset(&mut self, preset: &[(u8, u8)]) -> Result<(), DriverError> {
        for &(addr, value) in preset {
            self.write_register(addr, value)?;
        }
        Ok(())
    }

    /// Reset the chip and flush both FIFOs.
    pub fn reset(&mut self) -> Result<(), DriverError> {
        self.strobe(STROBE_SRES)?;
        self.hal.delay_ms(1);
        self.strobe(STROBE_SFTX)?;
        self.strobe(STROBE_SFRX)?;
        self.hal.delay_ms(1);
        Ok(())
    }

    /// Full reconfiguration for a new carrier: reset, base register image,
    /// frequency word, output power table.
    pub fn set_frequency(&mut self, mhz: f32) -> Result<(), DriverError> {
        debug!("Configuring radio for {mhz:.4} MHz");
        self.reset()?;
        self.apply_preset(RADIO_CONFIG_BASE)?;
        self.apply_frequency(mhz)?;
        self.write_burst(REG_PATABLE, &PA_TABLE)
    }

    /// Read the part number and silicon version registers.
    pub fn chip_version(&mut self) -> Result<(u8, u8), DriverError> {
        let partnum = self.read_register(REG_PARTNUM)?;
        let version = self.read_register(REG_VERSION)?;
        debug!("CC1101 partnum={partnum:#04x} version={version:#04x}");
        Ok((partnum, version))
    }

    /// Snapshot the receive-quality status registers.
    pub fn rx_stats(&mut self) -> Result<RxStats, DriverError> {
        let lqi = self.read_register(REG_LQI)?;
        let freqest = self.read_register(REG_FREQEST)?;
        let rssi = self.read_register(REG_RSSI)?;
        Ok(RxStats {
            rssi_dbm: convert_rssi_to_dbm(rssi),
            lqi: lqi & 0x7F,
            freq_offset: freqest as i8,
        })
    }

    /// Run a manual synthesizer calibration and restore the frequency offset
    /// compensation loop gain afterwards.
    pub fn calibrate(&mut self) -> Result<bool, DriverError> {
        self.strobe(STROBE_SCAL)?;
        let settled = self.poll_until(2, CALIBRATION_TIMEOUT_MS, |radio| {
            let marc = radio.read_register(REG_MARCSTATE)?;
            Ok(marc == MARCSTATE_IDLE || marc == MARCSTATE_RX)
        })?;
        self.write_register(REG_FOCCFG, 0x1D)?;
        self.hal.delay_ms(5);
        Ok(settled)
    }

    /// Burst-read the whole configuration register image.
    pub fn read_config_registers(&mut self) -> Result<[u8; CFG_REGISTER_COUNT], DriverError> {
        let mut image = [0u8; CFG_REGISTER_COUNT];
        self.read_burst(REG_IOCFG2, &mut image)?;
        Ok(image)
    }

    /// Burst-read the output power table.
    pub fn read_pa_table(&mut self) -> Result<[u8; 8], DriverError> {
        let mut table = [0u8; 8];
        self.read_burst(REG_PATABLE, &mut table)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operating_state_decodes_all_values() {
        assert_eq!(OperatingState::from_status_byte(0x00), OperatingState::Idle);
        assert_eq!(OperatingState::from_status_byte(0x1F), OperatingState::Rx);
        assert_eq!(OperatingState::from_status_byte(0x2A), OperatingState::Tx);
        assert_eq!(OperatingState::from_status_byte(0x6B), OperatingState::RxOverflow);
        assert_eq!(
            OperatingState::from_status_byte(0xF0),
            OperatingState::TxUnderflow
        );
    }

    #[test]
    fn status_byte_splits_state_and_fifo_count() {
        let status = ChipStatus::from_byte(0x1B);
        assert_eq!(status.operating_state, OperatingState::Rx);
        assert_eq!(status.fifo_bytes, 11);
    }

    #[test]
    fn rssi_conversion_matches_datasheet() {
        assert_eq!(convert_rssi_to_dbm(0), -74);
        assert_eq!(convert_rssi_to_dbm(128), -138);
        assert_eq!(convert_rssi_to_dbm(255), -74);
        assert_eq!(convert_rssi_to_dbm(100), -24);
    }

    #[test]
    fn frequency_word_for_433_92() {
        assert_eq!(frequency_word(433.92), [0x10, 0xB0, 0x71]);
    }

    #[test]
    fn frequency_word_low_byte_carry_stays_in_range() {
        let mut mhz = crate::constants::FREQ_MIN_MHZ;
        while mhz <= crate::constants::FREQ_MAX_MHZ {
            let word = frequency_word(mhz);
            assert_eq!(word[0], 0x10, "FREQ2 fixed across the scan band");
            mhz += crate::constants::FREQ_SCAN_STEP_MHZ;
        }
    }
}
