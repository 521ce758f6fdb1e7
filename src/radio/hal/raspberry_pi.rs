//! Raspberry Pi SPI/GPIO implementation of the radio HAL.
//!
//! Uses SPI0 with CE0 for the chip and a free GPIO for GDO0. Wire GDO0 to the
//! pin passed to [`RaspberryPiHal::new`]; the internal pull-up keeps the line
//! defined while the chip reconfigures.

use std::thread;
use std::time::Duration;

use rppal::gpio::{Gpio, InputPin};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use super::{Hal, HalError};
use crate::radio::registers::SPI_SPEED;

pub struct RaspberryPiHal {
    spi: Spi,
    gdo0: InputPin,
}

impl RaspberryPiHal {
    /// Open SPI0/CE0 and claim `gdo0_pin` as an input.
    pub fn new(gdo0_pin: u8) -> Result<Self, HalError> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_SPEED, Mode::Mode0)
            .map_err(|e| HalError::Spi(e.to_string()))?;
        let gdo0 = Gpio::new()
            .map_err(|e| HalError::Gpio(e.to_string()))?
            .get(gdo0_pin)
            .map_err(|e| HalError::Gpio(e.to_string()))?
            .into_input_pullup();
        Ok(RaspberryPiHal { spi, gdo0 })
    }
}

impl Hal for RaspberryPiHal {
    fn spi_transfer(&mut self, buf: &mut [u8]) -> Result<(), HalError> {
        let write_copy = buf.to_vec();
        self.spi
            .transfer(buf, &write_copy)
            .map_err(|e| HalError::Spi(e.to_string()))?;
        Ok(())
    }

    fn gdo0(&mut self) -> Result<bool, HalError> {
        Ok(self.gdo0.is_high())
    }

    fn delay_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
