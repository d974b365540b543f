//! Hex encoding helpers shared by addresses, handles, keys and signatures.
//!
//! Decoding accepts an optional `0x` prefix and either case.

use crate::error::CcrError;

/// Lowercase hex, no prefix.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// First four bytes as hex, for redacted `Debug` output.
pub fn prefix(bytes: &[u8]) -> String {
    encode(&bytes[..bytes.len().min(4)])
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CcrError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if s.len() != N * 2 {
        return Err(CcrError::Validation(format!(
            "expected {} hex chars, got {}",
            N * 2,
            s.len()
        )));
    }
    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let pair = s
            .get(i * 2..i * 2 + 2)
            .filter(|p| p.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| CcrError::Validation(format!("invalid hex at position {}", i * 2)))?;
        *slot = u8::from_str_radix(pair, 16)
            .map_err(|e| CcrError::Validation(format!("invalid hex at position {}: {e}", i * 2)))?;
    }
    Ok(out)
}
