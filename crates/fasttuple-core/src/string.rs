//! Fixed-capacity string encoding.
//!
//! A string field occupies [`STRING_FOOTPRINT`] bytes: a 4-byte
//! native-order length prefix followed by up to [`STRING_CAPACITY`] bytes
//! of UTF-8. Longer input is cut at the last character boundary that fits,
//! so the stored bytes are always valid UTF-8.

use crate::kind::{STRING_CAPACITY, STRING_FOOTPRINT, STRING_PREFIX};

/// Longest prefix of `value` that fits in [`STRING_CAPACITY`] bytes
/// without splitting a character.
pub fn truncate_to_capacity(value: &str) -> &str {
    if value.len() <= STRING_CAPACITY {
        return value;
    }
    let mut end = STRING_CAPACITY;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Encode `value` into `out`, returning the number of payload bytes stored.
///
/// # Panics
///
/// Panics if `out` is shorter than [`STRING_FOOTPRINT`].
pub fn encode_string(out: &mut [u8], value: &str) -> usize {
    let out = &mut out[..STRING_FOOTPRINT];
    let stored = truncate_to_capacity(value).as_bytes();
    out[..STRING_PREFIX].copy_from_slice(&(stored.len() as u32).to_ne_bytes());
    out[STRING_PREFIX..STRING_PREFIX + stored.len()].copy_from_slice(stored);
    stored.len()
}

/// Decode a string previously written by [`encode_string`].
///
/// The length prefix is clamped to the capacity and invalid UTF-8 is
/// replaced rather than rejected, so decoding arbitrary bytes never fails.
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`STRING_FOOTPRINT`].
pub fn decode_string(bytes: &[u8]) -> String {
    let bytes = &bytes[..STRING_FOOTPRINT];
    let mut prefix = [0u8; STRING_PREFIX];
    prefix.copy_from_slice(&bytes[..STRING_PREFIX]);
    let len = (u32::from_ne_bytes(prefix) as usize).min(STRING_CAPACITY);
    String::from_utf8_lossy(&bytes[STRING_PREFIX..STRING_PREFIX + len]).into_owned()
}
