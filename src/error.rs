//! # Meter Read-Out Error Handling
//!
//! This module defines the MeterError enum, which represents the different
//! error types that can occur during an Everblu Cyble read-out attempt. Every
//! variant is recoverable at the attempt level: a failed attempt leaves the
//! reading zeroed and the discovery loop simply moves to the next candidate
//! frequency.

use thiserror::Error;

use crate::publish::PublishError;
use crate::radio::cc1101::DriverError;
use crate::radio::hal::HalError;
use crate::storage::StoreError;

/// Represents the different error types that can occur during a read-out.
#[derive(Debug, Error)]
pub enum MeterError {
    /// A bounded wait exceeded its budget (state change, GDO0 edge, FIFO fill).
    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    /// A read-out was requested before a meter frequency was known.
    #[error("No known meter frequency; run discovery first")]
    NoFrequency,

    /// The decoded byte count is insufficient for field extraction.
    #[error("Malformed frame: {actual} decoded bytes, need {required}")]
    MalformedFrame { required: usize, actual: usize },

    /// Indicates an error in the radio driver (transport or buffer sizing).
    #[error("Radio driver error: {0}")]
    Radio(#[from] DriverError),

    /// Indicates an error on the hardware link itself.
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),

    /// Indicates an error in the persistent frequency store.
    #[error("Frequency store error: {0}")]
    Store(#[from] StoreError),

    /// Indicates an error while publishing a reading.
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}
