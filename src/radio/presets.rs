//! Register presets for each phase of the Radian exchange.
//!
//! The base configuration sets up 2-FSK at 2400 baud on GDO0 sync detect.
//! Phase presets are small deltas applied on top of whatever the chip holds,
//! so order matters: the engine always applies [`RADIO_CONFIG_BASE`] after a
//! reset, then layers the phase preset for the step it is about to run.

use super::registers::*;

/// Base register image applied after every chip reset.
pub const RADIO_CONFIG_BASE: &[(u8, u8)] = &[
    (REG_IOCFG2, 0x0D),   // GDO2: serial data output
    (REG_IOCFG0, 0x06),   // GDO0: asserts on sync word, deasserts at end of packet
    (REG_FIFOTHR, 0x47),  // RX attenuation 0 dB, FIFO threshold 33/32
    (REG_SYNC1, 0x55),    // sync word high byte
    (REG_SYNC0, 0x00),    // sync word low byte
    (REG_PKTCTRL1, 0x00), // no address check, no status append
    (REG_PKTCTRL0, 0x00), // fixed packet length, FIFO in and out
    (REG_FSCTRL1, 0x08),  // IF frequency
    (REG_MDMCFG4, 0xF6),  // channel bandwidth 58 kHz, DRATE_E
    (REG_MDMCFG3, 0x83),  // DRATE_M: 2400 baud with DRATE_E above
    (REG_MDMCFG2, 0x02),  // 2-FSK, 16/16 sync bits detected
    (REG_MDMCFG1, 0x00),  // no preamble, no forward error correction
    (REG_MDMCFG0, 0x00),  // channel spacing mantissa
    (REG_DEVIATN, 0x15),  // 5.2 kHz deviation
    (REG_MCSM1, 0x00),    // CCA always, return to IDLE after RX and TX
    (REG_MCSM0, 0x18),    // auto-calibrate on IDLE -> RX/TX
    (REG_FOCCFG, 0x1D),   // frequency offset compensation, 4K/4K gain
    (REG_BSCFG, 0x1C),    // bit synchronization configuration
    (REG_AGCCTRL2, 0xC7), // max DVGA gain reduction, 42 dB target
    (REG_AGCCTRL1, 0x00), // carrier sense relative threshold disabled
    (REG_AGCCTRL0, 0xB2), // AGC filter length 16 samples
    (REG_WORCTRL, 0xFB),  // wake-on-radio control
    (REG_FREND1, 0xB6),   // RX front end configuration
    (REG_FSCAL3, 0xE9),   // charge pump calibration
    (REG_FSCAL2, 0x2A),   // VCO high band
    (REG_FSCAL1, 0x00),   // VCO capacitance calibration result
    (REG_FSCAL0, 0x1F),   // frequency synthesizer calibration control
    (REG_TEST2, 0x81),    // datasheet value for the selected bandwidth
    (REG_TEST1, 0x35),    // datasheet value for the selected bandwidth
    (REG_TEST0, 0x09),    // VCO selection calibration disabled
];

/// Wake-up preamble transmission: asynchronous serial TX, no modulation sync.
pub const PRESET_WAKEUP_TX: &[(u8, u8)] = &[
    (REG_PKTCTRL0, 0x02), // infinite packet length, stream the FIFO
    (REG_MDMCFG2, 0x00),  // no sync word in TX
];

/// Undo [`PRESET_WAKEUP_TX`] once the request frame has been handed over.
pub const PRESET_MODEM_RESTORE: &[(u8, u8)] = &[
    (REG_PKTCTRL0, 0x00), // fixed packet length
    (REG_MDMCFG2, 0x02),  // 16/16 sync bits detected
];

/// Acknowledgement window: match on the meter's 0x5550 wake-up answer.
pub const PRESET_SYNC_DETECT: &[(u8, u8)] = &[
    (REG_SYNC1, 0x55),
    (REG_SYNC0, 0x50),
    (REG_PKTLEN, 0x01),
    (REG_MDMCFG4, 0xF6), // 2400 baud, line rate
    (REG_MDMCFG3, 0x83),
    (REG_MDMCFG2, 0x02),
    (REG_MCSM1, 0x0F), // stay in RX after a packet
];

/// Response window: match the 0xFFF0 start-of-data flag and oversample 4x.
pub const PRESET_DATA_CAPTURE: &[(u8, u8)] = &[
    (REG_SYNC1, 0xFF),
    (REG_SYNC0, 0xF0),
    (REG_PKTCTRL0, 0x02), // infinite packet length, stream into the FIFO
    (REG_MDMCFG4, 0xF8),  // 9600 baud: 4 samples per 2400 baud line bit
    (REG_MDMCFG3, 0x83),
];

/// Quiescent configuration restored after every receive attempt.
pub const PRESET_IDLE_DEFAULT: &[(u8, u8)] = &[
    (REG_SYNC1, 0x55),
    (REG_SYNC0, 0x00),
    (REG_PKTLEN, 0x26),
    (REG_PKTCTRL0, 0x00),
    (REG_MDMCFG4, 0xF6),
    (REG_MDMCFG3, 0x83),
];

/// Output power table: index 0 selects 0 dBm at 433 MHz.
pub const PA_TABLE: [u8; 8] = [0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
