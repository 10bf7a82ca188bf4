//! Whole-payload base64 detection for subscription feeds.
//!
//! Many feeds publish their whole URI list as one base64 blob. The decoder
//! sniffs for that convention and decodes when it applies, passing anything
//! else through untouched.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::borrow::Cow;

use crate::config::SchemeSet;

/// Bytes permitted in a standard, padded base64 payload (newlines included,
/// feeds often wrap the blob).
fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'\r' | b'\n')
}

/// Decode a fetched payload if it is one whole base64 blob of a URI list.
///
/// The payload is returned unchanged when any of these hold:
/// - it is empty after trimming,
/// - it contains bytes outside the base64 alphabet (already plain text),
/// - it does not decode as standard padded base64 (with and without its
///   newlines),
/// - it decodes, but the result contains no `<scheme>://` marker for any
///   allowed scheme (alphanumeric plain text that merely looked like
///   base64).
pub fn decode_payload<'a>(raw: &'a [u8], schemes: &SchemeSet) -> Cow<'a, [u8]> {
    let trimmed = raw.trim_ascii();
    if trimmed.is_empty() {
        return Cow::Borrowed(trimmed);
    }
    if !trimmed.iter().all(|&b| is_base64_byte(b)) {
        return Cow::Borrowed(raw);
    }

    let decoded = match STANDARD.decode(trimmed) {
        Ok(decoded) => decoded,
        Err(_) => {
            // Feeds sometimes hard-wrap the blob; retry without newlines
            let unwrapped: Vec<u8> = trimmed
                .iter()
                .copied()
                .filter(|&b| b != b'\r' && b != b'\n')
                .collect();
            match STANDARD.decode(&unwrapped) {
                Ok(decoded) => decoded,
                Err(_) => return Cow::Borrowed(raw),
            }
        }
    };

    if schemes.any_marker_in(&decoded) {
        Cow::Owned(decoded)
    } else {
        Cow::Borrowed(raw)
    }
}
