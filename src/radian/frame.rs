//! Radian frame layouts: the read-out request and the decoded meter response.

use serde::Serialize;

use super::codec::encode_line;
use super::crc::crc16;
use crate::error::MeterError;

/// Raw sync pattern sent ahead of the line-coded request.
const REQUEST_SYNC: [u8; 9] = [0x50, 0x00, 0x00, 0x00, 0x03, 0xFF, 0xFF, 0xFF, 0xFF];

/// Number of payload bytes covered by the frame check sequence.
const FCS_SPAN: usize = 17;

// Field offsets in the decoded response.
const OFFSET_INDEX: usize = 18;
const OFFSET_BATTERY: usize = 31;
const OFFSET_WAKEUP_START: usize = 44;
const OFFSET_WAKEUP_STOP: usize = 45;
const OFFSET_READS_COUNTER: usize = 48;

/// Minimum decoded length for all fields to be addressable.
const MIN_RESPONSE_LEN: usize = OFFSET_READS_COUNTER + 1;

/// A Radian 0x10 read-out request for one meter.
#[derive(Debug, Clone, Copy)]
pub struct RadianRequest {
    /// Production year printed on the meter label (two digits).
    pub year: u8,
    /// Meter serial number, without the year prefix.
    pub serial: u32,
}

impl RadianRequest {
    pub fn new(year: u8, serial: u32) -> Self {
        RadianRequest { year, serial }
    }

    /// The 19-byte request payload, frame check sequence included.
    pub fn payload(&self) -> [u8; 19] {
        let mut payload = [
            0x13,
            0x10,
            0x00,
            0x45,
            self.year,
            (self.serial >> 16) as u8,
            (self.serial >> 8) as u8,
            self.serial as u8,
            0x00,
            0x45,
            0x20,
            0x0A,
            0x50,
            0x14,
            0x00,
            0x0A,
            0x40,
            0x00,
            0x00,
        ];
        let crc = crc16(&payload[..FCS_SPAN]);
        payload[17] = (crc >> 8) as u8;
        payload[18] = crc as u8;
        payload
    }

    /// The complete on-air frame: raw sync pattern plus line-coded payload.
    pub fn frame(&self) -> Vec<u8> {
        let mut frame = REQUEST_SYNC.to_vec();
        frame.extend(encode_line(&self.payload()));
        frame
    }
}

/// Decoded meter read-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeterReading {
    /// Totalizer index in liters.
    pub liters: u32,
    /// Months of battery life left.
    pub battery_months: u8,
    /// Hour of day the meter starts listening for requests.
    pub wakeup_start_hour: u8,
    /// Hour of day the meter stops listening.
    pub wakeup_stop_hour: u8,
    /// Read-out counter maintained by the meter.
    pub reads_counter: u8,
}

impl MeterReading {
    /// Extract the reading fields from a decoded response.
    pub fn decode(decoded: &[u8]) -> Result<Self, MeterError> {
        if decoded.len() < MIN_RESPONSE_LEN {
            return Err(MeterError::MalformedFrame {
                required: MIN_RESPONSE_LEN,
                actual: decoded.len(),
            });
        }
        let liters = u32::from_le_bytes([
            decoded[OFFSET_INDEX],
            decoded[OFFSET_INDEX + 1],
            decoded[OFFSET_INDEX + 2],
            decoded[OFFSET_INDEX + 3],
        ]);
        Ok(MeterReading {
            liters,
            battery_months: decoded[OFFSET_BATTERY],
            wakeup_start_hour: decoded[OFFSET_WAKEUP_START],
            wakeup_stop_hour: decoded[OFFSET_WAKEUP_STOP],
            reads_counter: decoded[OFFSET_READS_COUNTER],
        })
    }

    /// An all-zero reading means the exchange produced no usable data.
    pub fn is_populated(&self) -> bool {
        *self != MeterReading::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radian::codec::decode_line;

    #[test]
    fn request_payload_carries_meter_identity() {
        let request = RadianRequest::new(14, 0x0A1B2C);
        let payload = request.payload();
        assert_eq!(payload[0], 0x13);
        assert_eq!(payload[1], 0x10);
        assert_eq!(payload[4], 14);
        assert_eq!(&payload[5..8], &[0x0A, 0x1B, 0x2C]);
    }

    #[test]
    fn request_fcs_covers_first_seventeen_bytes() {
        let payload = RadianRequest::new(98, 123_456).payload();
        let crc = crc16(&payload[..17]);
        assert_eq!(payload[17], (crc >> 8) as u8);
        assert_eq!(payload[18], crc as u8);
    }

    #[test]
    fn frame_starts_with_sync_and_decodes_back() {
        let request = RadianRequest::new(20, 42);
        let frame = request.frame();
        assert_eq!(&frame[..9], &REQUEST_SYNC);
        assert_eq!(decode_line(&frame[9..]), request.payload());
    }

    #[test]
    fn short_response_is_rejected() {
        let err = MeterReading::decode(&[0u8; 48]).unwrap_err();
        match err {
            MeterError::MalformedFrame { required, actual } => {
                assert_eq!(required, 49);
                assert_eq!(actual, 48);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn response_fields_extracted_at_documented_offsets() {
        let mut decoded = vec![0u8; 64];
        decoded[18..22].copy_from_slice(&10_000u32.to_le_bytes());
        decoded[31] = 36;
        decoded[44] = 6;
        decoded[45] = 18;
        decoded[48] = 7;
        let reading = MeterReading::decode(&decoded).unwrap();
        assert_eq!(reading.liters, 10_000);
        assert_eq!(reading.battery_months, 36);
        assert_eq!(reading.wakeup_start_hour, 6);
        assert_eq!(reading.wakeup_stop_hour, 18);
        assert_eq!(reading.reads_counter, 7);
        assert!(reading.is_populated());
    }

    #[test]
    fn zeroed_response_is_not_populated() {
        let reading = MeterReading::decode(&vec![0u8; 64]).unwrap();
        assert!(!reading.is_populated());
    }
}
