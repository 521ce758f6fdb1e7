//! Radian Protocol Constants
//!
//! This module defines the timings, frame geometry and frequency-scan bounds
//! of the Everblu Cyble read-out, as observed on deployed meters.

/// Lowest carrier frequency a Cyble meter has been seen on (MHz)
pub const FREQ_MIN_MHZ: f32 = 433.76;

/// Highest carrier frequency a Cyble meter has been seen on (MHz)
pub const FREQ_MAX_MHZ: f32 = 433.890;

/// Frequency-scan increment during meter discovery (MHz)
pub const FREQ_SCAN_STEP_MHZ: f32 = 0.0005;

/// Budget for a radio operating-state change (ms)
pub const STATE_CHANGE_TIMEOUT_MS: u64 = 25;

/// Settle time after the TX strobe while the synthesizer calibrates (ms)
pub const TX_CALIBRATION_SETTLE_MS: u64 = 5;

/// Quiet period between the wake-up preamble and the request frame (ms)
pub const TX_SETTLE_MS: u64 = 130;

/// Budget for the wake-up preamble refill loop (ms)
pub const PREAMBLE_BUDGET_MS: u64 = 300;

/// Nominal cost charged against the preamble budget per FIFO refill (ms)
pub const PREAMBLE_REFILL_COST_MS: u64 = 2;

/// Pacing delay between preamble FIFO refills so the TX FIFO never runs dry (ms)
pub const PREAMBLE_PACING_MS: u64 = 20;

/// One FIFO refill worth of the alternating-bit wake-up pattern
pub const WAKEUP_BURST: [u8; 8] = [0x55; 8];

/// Number of wake-up bursts: 77 * 64 = 4928 preamble bits at 2400 bit/s
pub const WAKEUP_BURST_COUNT: u32 = 77;

/// Time for the request frame to drain out of the TX FIFO: ~33 symbols of
/// ten line bits each at 2400 bit/s (ms)
pub const REQUEST_TX_DRAIN_MS: u64 = 140;

/// Budget for the meter acknowledgement window (ms)
pub const ACK_TIMEOUT_MS: u64 = 150;

/// Budget for the meter response window (ms)
pub const RESPONSE_TIMEOUT_MS: u64 = 700;

/// Budget for a manual synthesizer calibration (ms)
pub const CALIBRATION_TIMEOUT_MS: u64 = 100;

/// Decoded length of the meter acknowledgement
pub const ACK_FRAME_LEN: usize = 0x12;

/// Decoded length of the meter response
pub const RESPONSE_FRAME_LEN: usize = 0x7C;

/// Oversampling factor of the data-capture phase relative to the line rate
pub const DATA_OVERSAMPLE_FACTOR: usize = 4;

/// On-air span of a line-coded Radian frame of `decoded_len` payload bytes.
///
/// The 11/8 factor is the line-coding overhead observed on real captures; the
/// ack and response spans are deliberately derived through independent
/// constants rather than from each other.
pub const fn radian_air_len(decoded_len: usize) -> usize {
    decoded_len * 11 / 8 + 1
}

/// Capture span for the acknowledgement window (line rate, no oversampling)
pub const ACK_CAPTURE_LEN: usize = radian_air_len(ACK_FRAME_LEN);

/// Capture span for the response window (4x oversampled by the faster modem)
pub const RESPONSE_CAPTURE_LEN: usize =
    radian_air_len(RESPONSE_FRAME_LEN) * DATA_OVERSAMPLE_FACTOR;
