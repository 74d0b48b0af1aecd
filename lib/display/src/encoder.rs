//! Text to holding register encoding.
//!
//! A line is fitted to the display width by *characters* first and only then
//! turned into UTF-8, so a line with multi-byte characters takes more than
//! `width / 2` registers.

use std::iter;

/// Pads `text` with spaces or truncates it to exactly `width` characters.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut line: String = text.chars().take(width).collect();
    let len = line.chars().count();
    line.extend(iter::repeat(' ').take(width - len));
    line
}

/// Packs bytes two per register, first byte in the high half. An odd
/// trailing byte gets a zero low half.
pub fn pack_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]))
        .collect()
}

pub fn encode_line(text: &str, width: usize) -> Vec<u16> {
    pack_bytes(fit_to_width(text, width).as_bytes())
}
