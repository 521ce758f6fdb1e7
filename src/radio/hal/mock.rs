//! Simulated CC1101 and meter for tests.
//!
//! [`MockHal`] decodes the SPI header bytes the driver sends and keeps the
//! same externally observable state a real chip would: a register image, the
//! operating state nibble and FIFO count reported in every status byte, and
//! an RX FIFO. A simulated meter can be parked on one frequency so that the
//! discovery scan only gets an answer when the FREQ registers match.

use std::collections::VecDeque;

use super::{Hal, HalError};
use crate::radio::registers::*;

const STATE_IDLE: u8 = 0;
const STATE_RX: u8 = 1;
const STATE_TX: u8 = 2;

/// In-memory CC1101 simulator.
pub struct MockHal {
    regs: [u8; 0x30],
    pa_table: [u8; 8],
    state: u8,
    /// Whether TX/RX strobes succeed; unreachable states exercise timeouts.
    pub tx_reachable: bool,
    pub rx_reachable: bool,
    fifo: VecDeque<u8>,
    /// Raw bytes the simulated meter answers with in the ack window.
    pub ack_bytes: Vec<u8>,
    /// Raw bytes the simulated meter answers with in the response window.
    pub response_bytes: Vec<u8>,
    /// Frequency word the meter listens on; `None` answers everywhere.
    pub answer_at: Option<[u8; 3]>,
    /// Raw RSSI returned by the RSSI status register.
    pub rssi_raw: u8,
    rx_entries: u32,
    /// Every burst written to the TX FIFO, in order.
    pub tx_fifo_log: Vec<Vec<u8>>,
    /// Every command strobe issued, in order.
    pub strobe_log: Vec<u8>,
    /// Total simulated time spent in `delay_ms`.
    pub delay_total_ms: u64,
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHal {
    pub fn new() -> Self {
        MockHal {
            regs: [0; 0x30],
            pa_table: [0; 8],
            state: STATE_IDLE,
            tx_reachable: true,
            rx_reachable: true,
            fifo: VecDeque::new(),
            ack_bytes: Vec::new(),
            response_bytes: Vec::new(),
            answer_at: None,
            rssi_raw: 0,
            rx_entries: 0,
            tx_fifo_log: Vec::new(),
            strobe_log: Vec::new(),
            delay_total_ms: 0,
        }
    }

    /// Shadow copy of the configuration registers.
    pub fn regs(&self) -> &[u8; 0x30] {
        &self.regs
    }

    pub fn pa_table(&self) -> &[u8; 8] {
        &self.pa_table
    }

    fn answering(&self) -> bool {
        match self.answer_at {
            None => true,
            Some(word) => {
                self.regs[REG_FREQ2 as usize] == word[0]
                    && self.regs[REG_FREQ1 as usize] == word[1]
                    && self.regs[REG_FREQ0 as usize] == word[2]
            }
        }
    }

    fn status_byte(&self) -> u8 {
        (self.state << 4) | (self.fifo.len().min(15) as u8)
    }

    fn strobe(&mut self, addr: u8) {
        self.strobe_log.push(addr);
        match addr {
            STROBE_SRES => {
                self.regs = [0; 0x30];
                self.state = STATE_IDLE;
                self.fifo.clear();
            }
            STROBE_SCAL | STROBE_SIDLE => self.state = STATE_IDLE,
            STROBE_SRX => {
                if self.rx_reachable {
                    self.state = STATE_RX;
                    if self.answering() {
                        self.rx_entries += 1;
                        // The meter answers once per window: the wake-up ack
                        // on the first RX entry, the data frame on the second.
                        let payload = match self.rx_entries {
                            1 => &self.ack_bytes,
                            2 => &self.response_bytes,
                            _ => return,
                        };
                        self.fifo.extend(payload.iter().copied());
                    }
                }
            }
            STROBE_STX => {
                if self.tx_reachable {
                    self.state = STATE_TX;
                }
            }
            STROBE_SFRX => self.fifo.clear(),
            _ => {}
        }
    }

    fn read_status_register(&mut self, addr: u8) -> u8 {
        match addr {
            0x31 => 0x14, // VERSION
            0x34 => self.rssi_raw,
            0x35 => match self.state {
                STATE_RX => MARCSTATE_RX,
                STATE_TX => 0x13,
                _ => MARCSTATE_IDLE,
            },
            0x3B => self.fifo.len().min(RXBYTES_MASK as usize) as u8,
            _ => 0, // PARTNUM, FREQEST, LQI and the rest read as zero
        }
    }
}

impl Hal for MockHal {
    fn spi_transfer(&mut self, buf: &mut [u8]) -> Result<(), HalError> {
        if buf.is_empty() {
            return Err(HalError::Spi("empty transfer".into()));
        }
        let header = buf[0];
        let read = header & READ_SINGLE != 0;
        let burst = header & WRITE_BURST != 0;
        let addr = header & 0x3F;

        if buf.len() == 1 && !read && (0x30..=0x3D).contains(&addr) {
            self.strobe(addr);
        } else if read && burst && (0x30..=0x3D).contains(&addr) {
            let value = self.read_status_register(addr);
            for slot in buf.iter_mut().skip(1) {
                *slot = value;
            }
        } else if read && addr == 0x3F {
            for slot in buf.iter_mut().skip(1) {
                *slot = self.fifo.pop_front().unwrap_or(0);
            }
        } else if read && addr == 0x3E {
            for (i, slot) in buf.iter_mut().skip(1).enumerate() {
                *slot = self.pa_table.get(i).copied().unwrap_or(0);
            }
        } else if read {
            for (i, slot) in buf.iter_mut().skip(1).enumerate() {
                *slot = self
                    .regs
                    .get(addr as usize + i)
                    .copied()
                    .unwrap_or(0);
            }
        } else if addr == 0x3F {
            self.tx_fifo_log.push(buf[1..].to_vec());
        } else if addr == 0x3E {
            for (i, b) in buf[1..].iter().enumerate() {
                if i < self.pa_table.len() {
                    self.pa_table[i] = *b;
                }
            }
        } else {
            for (i, b) in buf[1..].iter().enumerate() {
                let slot = addr as usize + i;
                if slot < self.regs.len() {
                    self.regs[slot] = *b;
                }
            }
        }

        buf[0] = self.status_byte();
        Ok(())
    }

    fn gdo0(&mut self) -> Result<bool, HalError> {
        // Sync asserts only while the meter's wake-up answer is on the air.
        Ok(self.answering() && self.rx_entries == 1)
    }

    fn delay_ms(&mut self, ms: u64) {
        self.delay_total_ms += ms;
    }
}
