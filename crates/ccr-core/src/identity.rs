//! # Identity Newtypes
//!
//! Account addresses, processing-activity identifiers and audit ids.
//!
//! ## Security Invariant
//!
//! Each identifier namespace is its own type. An `AuditId` is a sequence
//! number assigned by the registry, an `ActivityId` is chosen by the data
//! controller, and an `Address` is derived from a signing key. None of them
//! convert into each other.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::CcrError;
use crate::hex;

/// A 20-byte account address.
///
/// Serializes as a `0x`-prefixed lowercase hex string. Addresses of signing
/// keys are produced by `ccr_crypto::Ed25519PublicKey::address()`. The
/// registry's own address (the grantee of every ciphertext it stores) comes
/// from configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Render as `0x` + 40 lowercase hex chars.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Parse from 40 hex chars, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, CcrError> {
        Ok(Self(hex::decode_fixed::<20>(s)?))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = CcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Caller-chosen 32-byte key of a data-processing activity.
///
/// Writing an existing id overwrites the previous record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(pub [u8; 32]);

impl ActivityId {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, CcrError> {
        Ok(Self(hex::decode_fixed::<32>(s)?))
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActivityId(0x{}...)", hex::prefix(&self.0))
    }
}

impl FromStr for ActivityId {
    type Err = CcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ActivityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ActivityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Sequence number of an audit record.
///
/// Assigned by the registry starting at [`AuditId::FIRST`]. Id 0 is never
/// issued. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditId(pub u64);

impl AuditId {
    /// The id given to the first audit ever scheduled.
    pub const FIRST: AuditId = AuditId(1);

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    ///
    /// Saturates at `u64::MAX`; the registry refuses to schedule past it.
    pub fn next(&self) -> AuditId {
        AuditId(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for AuditId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "audit:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_hex_roundtrip() {
        let addr = Address([0xab; 20]);
        let s = addr.to_hex();
        assert_eq!(s.len(), 42);
        assert!(s.starts_with("0x"));
        assert_eq!(Address::from_hex(&s).unwrap(), addr);
    }

    #[test]
    fn address_parses_without_prefix() {
        let s = "11".repeat(20);
        assert_eq!(s.parse::<Address>().unwrap(), Address([0x11; 20]));
    }

    #[test]
    fn address_rejects_short_input() {
        assert!(Address::from_hex("0x1234").is_err());
    }

    #[test]
    fn address_serde_is_hex_string() {
        let json = serde_json::to_string(&Address([1; 20])).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Address([1; 20]));
    }

    #[test]
    fn zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address([1; 20]).is_zero());
    }

    #[test]
    fn activity_id_debug_is_truncated() {
        let id = ActivityId([0xcd; 32]);
        assert_eq!(format!("{id:?}"), "ActivityId(0xcdcdcdcd...)");
        assert_eq!(id.to_string().len(), 66);
    }

    #[test]
    fn activity_id_serde_roundtrip() {
        let id = ActivityId([7; 32]);
        let json = serde_json::to_string(&id).unwrap();
        let back: ActivityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn audit_id_is_transparent_integer() {
        assert_eq!(serde_json::to_string(&AuditId(3)).unwrap(), "3");
        assert_eq!(AuditId::FIRST.next(), AuditId(2));
        assert_eq!(AuditId(u64::MAX).next(), AuditId(u64::MAX));
        assert_eq!(AuditId(9).to_string(), "audit:9");
    }
}
