//! Publishing decoded readings to the outside world.
//!
//! The seam is the [`ReadingPublisher`] trait; [`LogPublisher`] emits each
//! field on its own topic-style line, matching the layout home-automation
//! integrations expect to scrape.

use log::info;
use thiserror::Error;

use crate::radian::frame::MeterReading;

/// Errors from a publishing backend.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The backend rejected or failed to deliver the reading.
    #[error("Publish backend error: {0}")]
    Backend(String),
}

/// Sink for decoded meter readings.
pub trait ReadingPublisher {
    fn publish(&mut self, reading: &MeterReading) -> Result<(), PublishError>;
}

/// Publisher that logs each field on its own topic line.
#[derive(Debug, Default)]
pub struct LogPublisher;

impl ReadingPublisher for LogPublisher {
    fn publish(&mut self, reading: &MeterReading) -> Result<(), PublishError> {
        info!("everblu/cyble/liters {}", reading.liters);
        info!("everblu/cyble/battery {}", reading.battery_months);
        info!("everblu/cyble/counter {}", reading.reads_counter);
        info!(
            "everblu/cyble/wakeup {:02}:00-{:02}:00",
            reading.wakeup_start_hour, reading.wakeup_stop_hour
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_publisher_accepts_any_reading() {
        let reading = MeterReading {
            liters: 123_456,
            battery_months: 42,
            wakeup_start_hour: 6,
            wakeup_stop_hour: 18,
            reads_counter: 9,
        };
        assert!(LogPublisher.publish(&reading).is_ok());
    }
}
