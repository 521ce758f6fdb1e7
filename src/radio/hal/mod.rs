//! Hardware abstraction for the CC1101 link.
//!
//! The driver talks to the chip through the [`Hal`] trait: a full-duplex SPI
//! transfer, the GDO0 line and a blocking delay. [`MockHal`] simulates a chip
//! and a meter well enough to exercise the whole read-out path in tests; the
//! `raspberry-pi` feature provides the real SPI/GPIO implementation.

use thiserror::Error;

pub mod mock;

#[cfg(feature = "raspberry-pi")]
pub mod raspberry_pi;

pub use mock::MockHal;

#[cfg(feature = "raspberry-pi")]
pub use raspberry_pi::RaspberryPiHal;

/// Errors from the hardware link itself.
#[derive(Debug, Error)]
pub enum HalError {
    /// SPI transfer failed.
    #[error("SPI error: {0}")]
    Spi(String),

    /// GPIO access failed.
    #[error("GPIO error: {0}")]
    Gpio(String),
}

/// Hardware access needed by the CC1101 driver.
pub trait Hal {
    /// Full-duplex SPI transfer: `buf` is sent out and overwritten with the
    /// bytes clocked in. The first byte received is always the chip status.
    fn spi_transfer(&mut self, buf: &mut [u8]) -> Result<(), HalError>;

    /// Sample the GDO0 line.
    fn gdo0(&mut self) -> Result<bool, HalError>;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64);
}
