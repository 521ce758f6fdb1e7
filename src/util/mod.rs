//! Utility helpers shared across the crate.

pub mod hex;

pub use hex::{encode_hex, format_hex_compact, pretty_hex};
