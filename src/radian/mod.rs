//! # Radian Protocol Engine
//!
//! Implements the Radian 0x10 exchange an Everblu Cyble meter speaks: a long
//! wake-up preamble, a CRC-protected request frame, a short acknowledgement
//! and the data response. `codec` and `crc` cover the line coding and frame
//! check sequence, `frame` the frame layouts, and `meter` drives the radio
//! through the exchange and the frequency discovery scan.

pub mod codec;
pub mod crc;
pub mod frame;
pub mod meter;

pub use frame::{MeterReading, RadianRequest};
pub use meter::EverbluCyble;
