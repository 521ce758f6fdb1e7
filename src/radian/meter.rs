//! Everblu Cyble read-out engine.
//!
//! Drives the CC1101 through one full Radian exchange: wake-up preamble and
//! request on the transmit side, then the acknowledgement and data windows on
//! the receive side, each with its own modem preset and time budget. Also
//! hosts the frequency discovery scan that walks the 433.76-433.89 MHz band
//! until a meter answers.

use log::{debug, info, warn};

use super::frame::{MeterReading, RadianRequest};
use crate::constants::*;
use crate::error::MeterError;
use crate::radian::codec::decode_line;
use crate::radio::cc1101::{Cc1101, OperatingState};
use crate::radio::hal::Hal;
use crate::radio::presets::{
    PRESET_DATA_CAPTURE, PRESET_IDLE_DEFAULT, PRESET_MODEM_RESTORE, PRESET_SYNC_DETECT,
    PRESET_WAKEUP_TX,
};
use crate::radio::registers::{REG_TX_FIFO, STROBE_SFRX, STROBE_SFTX, STROBE_SIDLE, STROBE_SRX, STROBE_STX};
use crate::storage::FrequencyStore;
use crate::util::format_hex_compact;

/// Read-out engine for one Everblu Cyble meter.
pub struct EverbluCyble<H: Hal> {
    radio: Cc1101<H>,
    request: RadianRequest,
    frequency: Option<f32>,
    reading: MeterReading,
}

impl<H: Hal> EverbluCyble<H> {
    /// Build an engine for the meter identified by its label year and serial.
    pub fn new(radio: Cc1101<H>, year: u8, serial: u32) -> Self {
        EverbluCyble {
            radio,
            request: RadianRequest::new(year, serial),
            frequency: None,
            reading: MeterReading::default(),
        }
    }

    /// The last decoded reading; zeroed after a failed attempt.
    pub fn reading(&self) -> MeterReading {
        self.reading
    }

    /// The carrier the meter was last heard on, if known.
    pub fn frequency(&self) -> Option<f32> {
        self.frequency
    }

    pub fn radio_mut(&mut self) -> &mut Cc1101<H> {
        &mut self.radio
    }

    /// Load the meter frequency from `store`, falling back to a band scan if
    /// nothing usable is stored. Returns the frequency a meter answered on.
    pub fn attach(&mut self, store: &mut dyn FrequencyStore) -> Result<Option<f32>, MeterError> {
        if let Some(mhz) = store.load()? {
            if (FREQ_MIN_MHZ..=FREQ_MAX_MHZ).contains(&mhz) {
                info!("Using stored meter frequency {mhz:.4} MHz");
                self.frequency = Some(mhz);
                return Ok(Some(mhz));
            }
            warn!("Stored frequency {mhz:.4} MHz is outside the Cyble band, rescanning");
        }
        self.look_for_meter(store)
    }

    /// Scan the band in 0.5 kHz steps until the meter answers. The first
    /// frequency that produces a populated reading is persisted to `store`.
    pub fn look_for_meter(
        &mut self,
        store: &mut dyn FrequencyStore,
    ) -> Result<Option<f32>, MeterError> {
        info!(
            "Scanning {FREQ_MIN_MHZ:.4}-{FREQ_MAX_MHZ:.4} MHz for meter {:02}-{}",
            self.request.year, self.request.serial
        );
        let mut mhz = FREQ_MIN_MHZ;
        while mhz <= FREQ_MAX_MHZ {
            self.radio.set_frequency(mhz)?;
            match self.exchange() {
                Ok(()) if self.reading.is_populated() => {
                    info!("Meter answered at {mhz:.4} MHz");
                    store.store(mhz)?;
                    self.frequency = Some(mhz);
                    return Ok(Some(mhz));
                }
                Ok(()) => debug!("Empty reading at {mhz:.4} MHz"),
                Err(MeterError::Timeout(what)) => {
                    debug!("No answer at {mhz:.4} MHz ({what})");
                }
                Err(MeterError::MalformedFrame { required, actual }) => {
                    debug!("Garbled answer at {mhz:.4} MHz ({actual}/{required} bytes)");
                }
                Err(other) => return Err(other),
            }
            mhz += FREQ_SCAN_STEP_MHZ;
        }
        warn!("No meter found in the scan band");
        Ok(None)
    }

    /// Run one read-out on the known frequency.
    pub fn read_meter(&mut self) -> Result<MeterReading, MeterError> {
        let mhz = self.frequency.ok_or(MeterError::NoFrequency)?;
        self.radio.set_frequency(mhz)?;
        self.exchange()?;
        Ok(self.reading)
    }

    /// One full exchange: request, acknowledgement window, response window,
    /// decode. Leaves `self.reading` zeroed on any failure.
    fn exchange(&mut self) -> Result<(), MeterError> {
        self.reading = MeterReading::default();
        self.send_request()?;
        self.wait_for_ack()?;
        let raw = self.wait_for_response()?;
        let decoded = decode_line(&raw);
        debug!("Decoded {} bytes from {} captured", decoded.len(), raw.len());
        self.reading = MeterReading::decode(&decoded)?;
        Ok(())
    }

    /// Transmit the wake-up preamble followed by the request frame.
    fn send_request(&mut self) -> Result<(), MeterError> {
        self.radio.apply_preset(PRESET_WAKEUP_TX)?;
        self.radio.strobe(STROBE_STX)?;
        self.radio.delay_ms(TX_CALIBRATION_SETTLE_MS);
        if !self
            .radio
            .wait_for_operating_state(OperatingState::Tx, STATE_CHANGE_TIMEOUT_MS)?
        {
            return Err(MeterError::Timeout("transmit state"));
        }

        // Stream the preamble in FIFO-sized chunks. Each refill is charged a
        // nominal cost against the budget; the pacing delay keeps the FIFO
        // from running dry at 2400 baud.
        let mut spent: u64 = 0;
        let mut sent: u32 = 0;
        while sent < WAKEUP_BURST_COUNT && spent < PREAMBLE_BUDGET_MS {
            self.radio.write_burst(REG_TX_FIFO, &WAKEUP_BURST)?;
            sent += 1;
            spent += PREAMBLE_REFILL_COST_MS;
            self.radio.delay_ms(PREAMBLE_PACING_MS);
        }
        debug!("Sent {sent} wake-up bursts");
        self.radio.delay_ms(TX_SETTLE_MS);

        let frame = self.request.frame();
        debug!("Request frame: {}", format_hex_compact(&frame));
        self.radio.write_burst(REG_TX_FIFO, &frame)?;
        // Let the frame clear the FIFO before flushing it.
        self.radio.delay_ms(REQUEST_TX_DRAIN_MS);
        self.radio.strobe(STROBE_SFTX)?;
        self.radio.apply_preset(PRESET_MODEM_RESTORE)?;
        Ok(())
    }

    /// Wait for the meter's wake-up acknowledgement and drain it.
    fn wait_for_ack(&mut self) -> Result<(), MeterError> {
        self.radio.strobe(STROBE_SFRX)?;
        self.radio.apply_preset(PRESET_SYNC_DETECT)?;
        self.enter_rx()?;

        if !self.radio.wait_for_signal_edge(true, ACK_TIMEOUT_MS)? {
            self.restore_idle_default()?;
            return Err(MeterError::Timeout("meter acknowledgement"));
        }

        let mut ack = [0u8; ACK_CAPTURE_LEN];
        let captured = self
            .radio
            .drain_receive_fifo(ACK_TIMEOUT_MS, ACK_CAPTURE_LEN, &mut ack)?;
        if captured == 0 {
            self.restore_idle_default()?;
            return Err(MeterError::Timeout("acknowledgement data"));
        }
        let stats = self.radio.rx_stats()?;
        info!(
            "Ack: {captured} bytes, RSSI {} dBm, LQI {}, offset {}",
            stats.rssi_dbm, stats.lqi, stats.freq_offset
        );
        Ok(())
    }

    /// Capture the data response. The idle configuration is restored whether
    /// or not the capture succeeds.
    fn wait_for_response(&mut self) -> Result<Vec<u8>, MeterError> {
        self.radio.apply_preset(PRESET_DATA_CAPTURE)?;
        self.radio.strobe(STROBE_SFRX)?;
        self.enter_rx()?;

        let result = self.capture_response();
        self.restore_idle_default()?;
        result
    }

    fn capture_response(&mut self) -> Result<Vec<u8>, MeterError> {
        // GDO0 deasserts when the meter finishes its answer; only then is the
        // capture complete enough to drain.
        if !self
            .radio
            .wait_for_signal_edge(false, RESPONSE_TIMEOUT_MS)?
        {
            return Err(MeterError::Timeout("end of response"));
        }

        let mut raw = vec![0u8; RESPONSE_CAPTURE_LEN];
        let captured =
            self.radio
                .drain_receive_fifo(RESPONSE_TIMEOUT_MS, RESPONSE_CAPTURE_LEN, &mut raw)?;
        if captured == 0 {
            return Err(MeterError::Timeout("response data"));
        }
        raw.truncate(captured);
        Ok(raw)
    }

    fn enter_rx(&mut self) -> Result<(), MeterError> {
        self.radio.strobe(STROBE_SIDLE)?;
        self.radio.strobe(STROBE_SRX)?;
        if !self
            .radio
            .wait_for_operating_state(OperatingState::Rx, STATE_CHANGE_TIMEOUT_MS)?
        {
            return Err(MeterError::Timeout("receive state"));
        }
        Ok(())
    }

    fn restore_idle_default(&mut self) -> Result<(), MeterError> {
        self.radio.strobe(STROBE_SFRX)?;
        self.radio.strobe(STROBE_SIDLE)?;
        self.radio.apply_preset(PRESET_IDLE_DEFAULT)?;
        Ok(())
    }
}
