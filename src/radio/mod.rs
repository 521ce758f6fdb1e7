//! # CC1101 Radio Stack
//!
//! Driver for the TI CC1101 sub-GHz transceiver used to talk to Everblu Cyble
//! meters. The stack is split into the register map (`registers`), the
//! configuration presets for each protocol phase (`presets`), the hardware
//! abstraction layer (`hal`) and the driver itself (`cc1101`).

pub mod cc1101;
pub mod hal;
pub mod presets;
pub mod registers;

pub use cc1101::{
    convert_rssi_to_dbm, frequency_word, Cc1101, ChipStatus, DriverError, OperatingState, RxStats,
};
pub use hal::{Hal, HalError, MockHal};
