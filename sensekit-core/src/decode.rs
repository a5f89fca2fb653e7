//! Register payload decoding
//!
//! Sensor output registers hold little-endian two's-complement integers of
//! 16 or 24 bits. Widening a 24-bit value into an `i32` must replicate its
//! sign bit into the unused top byte, otherwise negative readings come back
//! as large positive numbers.

/// Decode a 16-bit little-endian unsigned value
pub fn u16_le(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Decode a 16-bit little-endian two's-complement value
pub fn i16_le(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

/// Decode a 24-bit little-endian unsigned value
pub fn u24_le(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0x00])
}

/// Decode a 24-bit little-endian two's-complement value
///
/// The high byte of the result is `0xFF` when bit 7 of `bytes[2]` is set
/// and `0x00` otherwise.
pub fn i24_le(bytes: [u8; 3]) -> i32 {
    let pad = if bytes[2] & 0x80 != 0 { 0xFF } else { 0x00 };
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], pad])
}

/// Decode a little-endian two's-complement value of 1 to 4 bytes
///
/// Returns `None` for an empty slice or one wider than 4 bytes.
pub fn signed_le(bytes: &[u8]) -> Option<i32> {
    let (&msb, _) = bytes.split_last()?;
    if bytes.len() > 4 {
        return None;
    }

    let pad = if msb & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut wide = [pad; 4];
    wide[..bytes.len()].copy_from_slice(bytes);
    Some(i32::from_le_bytes(wide))
}
