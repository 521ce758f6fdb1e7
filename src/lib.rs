//! # everblu-rs - A Rust Crate for Everblu Cyble Water Meter Read-Out
//!
//! The everblu-rs crate drives a TI CC1101 sub-GHz transceiver to read an
//! Itron Everblu Cyble water meter over the vendor "Radian" protocol: tune to
//! the meter's carrier frequency, wake the sleeping meter with a long
//! preamble, send an authenticated request frame, then receive, de-bitstuff
//! and decode the reply into structured readings.
//!
//! ## Features
//!
//! - Register-level CC1101 control with chip-status bookkeeping
//! - Radian line codec (start/stop-bit framing, oversampled bit-pairs)
//! - CRC-16/KERMIT request authentication
//! - Carrier frequency discovery with persistent storage
//! - Two-phase receive (sync-pattern detection, then payload capture)
//! - Hardware abstraction layer with a Raspberry Pi implementation
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use everblu_rs::{Cc1101, EverbluCyble, JsonFrequencyStore, MockHal};
//!
//! let mut meter = EverbluCyble::new(Cc1101::new(MockHal::new()), 16, 123_456);
//! let mut store = JsonFrequencyStore::new("frequency.json");
//! meter.attach(&mut store).unwrap();
//! let reading = meter.read_meter().unwrap();
//! println!("index: {} liters", reading.liters);
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod publish;
pub mod radian;
pub mod radio;
pub mod storage;
pub mod util;

pub use crate::error::MeterError;
pub use crate::logging::{init_logger, log_info};

// Core meter types
pub use radian::frame::{MeterReading, RadianRequest};
pub use radian::meter::EverbluCyble;

// Radio driver
pub use radio::cc1101::{convert_rssi_to_dbm, frequency_word, Cc1101, ChipStatus, OperatingState};
pub use radio::hal::{Hal, HalError, MockHal};

// External collaborators
pub use publish::{LogPublisher, ReadingPublisher};
pub use storage::{FrequencyStore, JsonFrequencyStore};
