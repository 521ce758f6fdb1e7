//! CRC-16/KERMIT as used by the Radian frame check sequence.

/// Compute the Radian frame check sequence over `data`.
///
/// This is CRC-16/KERMIT (reflected, polynomial 0x8408, zero init) with the
/// result byte-swapped, since the frame carries the high byte first.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ 0x8408;
            } else {
                crc >>= 1;
            }
        }
    }
    crc.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_zero() {
        assert_eq!(crc16(&[]), 0x0000);
    }

    #[test]
    fn check_value() {
        // KERMIT check value is 0x2189; byte-swapped for transmission order.
        assert_eq!(crc16(b"123456789"), 0x8921);
    }

    #[test]
    fn single_byte() {
        assert_eq!(crc16(b"A"), 0x8D53);
    }
}
