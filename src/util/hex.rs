//! # Hex Dump Utilities
//!
//! Hex encoding helpers used for frame visualization and register dumps.
//! These back the debug logging around the radio transactions and the
//! `registers` CLI command.

/// Encode bytes to a lowercase hex string.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Format data as "68 31 31 68" with spaces between bytes (useful for logs).
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty-print hex data with offsets and line breaks.
///
/// Produces a compact dump suitable for register-map and capture inspection.
pub fn pretty_hex(data: &[u8], bytes_per_line: usize) -> String {
    let mut result = String::new();

    for (i, chunk) in data.chunks(bytes_per_line).enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(&format!("{:04x}: ", i * bytes_per_line));
        result.push_str(&format_hex_compact(chunk));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0xAB, 0xCD, 0xEF]), "abcdef");
    }

    #[test]
    fn test_format_compact() {
        let data = vec![0x68, 0x31, 0x31, 0x68];
        assert_eq!(format_hex_compact(&data), "68 31 31 68");
    }

    #[test]
    fn test_pretty_hex() {
        let data: Vec<u8> = (0..20).collect();
        let pretty = pretty_hex(&data, 16);
        assert!(pretty.starts_with("0000: 00 01"));
        assert!(pretty.contains("\n0010: 10 11 12 13"));
    }

    #[test]
    fn test_pretty_hex_empty() {
        assert_eq!(pretty_hex(&[], 16), "");
    }
}
