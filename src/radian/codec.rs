//! Radian line coding.
//!
//! The meter frames every payload byte UART-style on the air: a zero start
//! bit, the byte least-significant-bit first, a one stop bit. Ten line bits
//! per byte, packed most-significant-bit first into the transmitted bytes,
//! with the final byte padded with ones (the idle level).
//!
//! On receive the capture runs at four samples per line bit and the sync word
//! eats part of the first symbol; a captured byte of exactly 0xF0 stands for
//! the two-bit remnant `1 0` of a start-bit boundary rather than eight line
//! bits, which realigns the scanner with the symbol grid.

/// Line-encode `data` for transmission.
pub fn encode_line(data: &[u8]) -> Vec<u8> {
    let mut bits: Vec<u8> = Vec::with_capacity(data.len() * 10);
    for &byte in data {
        bits.push(0);
        for k in 0..8 {
            bits.push((byte >> k) & 1);
        }
        bits.push(1);
    }

    let mut out = vec![0xFFu8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        let mask = 0x80 >> (i % 8);
        if bit == 0 {
            out[i / 8] &= !mask;
        }
    }
    out
}

/// Decode a line-coded capture back into payload bytes.
///
/// Trailing or truncated symbols are dropped; garbage between symbols is
/// skipped as idle.
pub fn decode_line(raw: &[u8]) -> Vec<u8> {
    let mut bits: Vec<u8> = Vec::with_capacity(raw.len() * 8);
    for &byte in raw {
        if byte == 0xF0 {
            bits.push(1);
            bits.push(0);
        } else {
            for k in (0..8).rev() {
                bits.push((byte >> k) & 1);
            }
        }
    }

    let mut out = Vec::new();
    let mut i = 0;
    while i < bits.len() {
        if bits[i] != 0 {
            i += 1;
            continue;
        }
        if i + 9 > bits.len() {
            break;
        }
        let mut value = 0u8;
        for k in 0..8 {
            value |= bits[i + 1 + k] << k;
        }
        out.push(value);
        i += 10;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_length_is_ten_bits_per_byte() {
        for n in 1..=32 {
            let data = vec![0u8; n];
            assert_eq!(encode_line(&data).len(), (10 * n + 7) / 8);
        }
    }

    #[test]
    fn round_trip_counting_sequences() {
        for n in 1..=64usize {
            let data: Vec<u8> = (0..n as u8).collect();
            assert_eq!(decode_line(&encode_line(&data)), data, "length {n}");
        }
    }

    #[test]
    fn round_trip_single_bytes() {
        for b in 0..=255u8 {
            assert_eq!(decode_line(&encode_line(&[b])), [b], "byte {b:#04x}");
        }
    }

    #[test]
    fn round_trip_repeated_patterns() {
        for pattern in [0x00u8, 0xFF, 0x55] {
            let data = vec![pattern; 48];
            assert_eq!(decode_line(&encode_line(&data)), data);
        }
    }

    #[test]
    fn start_bit_remnant_byte_realigns_decoder() {
        // 0x40 carries a start bit and the low bits of a symbol; the 0xF0
        // remnant supplies the final data bit and the stop bit.
        assert_eq!(decode_line(&[0x40, 0xF0]), [0x81]);
    }

    #[test]
    fn lone_remnant_decodes_to_nothing() {
        assert_eq!(decode_line(&[0xF0]), Vec::<u8>::new());
    }

    #[test]
    fn idle_padding_is_ignored() {
        let mut raw = vec![0xFF, 0xFF];
        raw.extend(encode_line(&[0x42]));
        raw.push(0xFF);
        assert_eq!(decode_line(&raw), [0x42]);
    }
}
