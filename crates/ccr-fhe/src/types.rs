//! # Encrypted Types and Handles
//!
//! A [`Handle`] is a 32-byte reference to a ciphertext held by the engine.
//! [`Ciphertext<T>`] pairs a handle with a zero-sized marker naming the
//! encrypted type, so an `euint8` score cannot be subtracted from an
//! `euint64` penalty at compile time.
//!
//! ## Security Invariant
//!
//! Handles are opaque. Nothing in this module can recover a plaintext from a
//! handle; that requires a [`DecryptionBackend`](crate::DecryptionBackend)
//! and an ACL check.

use std::marker::PhantomData;

use ccr_core::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The encrypted scalar types the engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FheType {
    Ebool,
    Euint8,
    Euint16,
    Euint32,
    Euint64,
}

impl FheType {
    pub fn bits(&self) -> u32 {
        match self {
            Self::Ebool => 1,
            Self::Euint8 => 8,
            Self::Euint16 => 16,
            Self::Euint32 => 32,
            Self::Euint64 => 64,
        }
    }

    /// Largest value representable in this type.
    pub fn max_value(&self) -> u64 {
        match self {
            Self::Euint64 => u64::MAX,
            other => (1u64 << other.bits()) - 1,
        }
    }

    /// Reduce a raw value into this type's range (wrapping).
    pub fn mask(&self, raw: u64) -> u64 {
        raw & self.max_value()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ebool => "ebool",
            Self::Euint8 => "euint8",
            Self::Euint16 => "euint16",
            Self::Euint32 => "euint32",
            Self::Euint64 => "euint64",
        }
    }
}

impl std::fmt::Display for FheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque 32-byte ciphertext reference. Serializes as `0x` + 64 hex chars.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub [u8; 32]);

impl Handle {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, ccr_core::CcrError> {
        Ok(Self(hex::decode_fixed::<32>(s)?))
    }
}

impl std::str::FromStr for Handle {
    type Err = ccr_core::CcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}...", hex::prefix(&self.0))
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle(0x{}...)", hex::prefix(&self.0))
    }
}

impl Serialize for Handle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Type markers ──────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// A type the engine can encrypt. Sealed; the five markers below are the
/// only implementors.
pub trait EncryptedType: sealed::Sealed + Copy + Send + Sync + 'static {
    const KIND: FheType;
    type Plain: Copy + std::fmt::Debug + Send + Sync;

    fn to_raw(value: Self::Plain) -> u64;
    fn from_raw(raw: u64) -> Self::Plain;
}

/// Encrypted unsigned integers. Booleans are excluded from arithmetic.
pub trait Arithmetic: EncryptedType {}

macro_rules! encrypted_uint {
    ($marker:ident, $plain:ty, $kind:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $marker;

        impl sealed::Sealed for $marker {}

        impl EncryptedType for $marker {
            const KIND: FheType = FheType::$kind;
            type Plain = $plain;

            fn to_raw(value: $plain) -> u64 {
                u64::from(value)
            }

            fn from_raw(raw: u64) -> $plain {
                // Engines mask to width before calling this.
                raw as $plain
            }
        }

        impl Arithmetic for $marker {}
    };
}

encrypted_uint!(Euint8, u8, Euint8, "Encrypted `u8`: risk and compliance scores, processing purpose.");
encrypted_uint!(Euint16, u16, Euint16, "Encrypted `u16`: retention period in months.");
encrypted_uint!(Euint32, u32, Euint32, "Encrypted `u32`: data points, findings, subject counts.");
encrypted_uint!(Euint64, u64, Euint64, "Encrypted `u64`: penalty amounts.");

/// Encrypted boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ebool;

impl sealed::Sealed for Ebool {}

impl EncryptedType for Ebool {
    const KIND: FheType = FheType::Ebool;
    type Plain = bool;

    fn to_raw(value: bool) -> u64 {
        u64::from(value)
    }

    fn from_raw(raw: u64) -> bool {
        raw != 0
    }
}

// ─── Ciphertext ────────────────────────────────────────────────────────

/// A typed reference to an encrypted value.
///
/// Serializes as its bare handle. The type parameter is restored from
/// context on deserialization; engines check it against the stored type
/// before any arithmetic.
pub struct Ciphertext<T: EncryptedType> {
    handle: Handle,
    _kind: PhantomData<T>,
}

impl<T: EncryptedType> Ciphertext<T> {
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            _kind: PhantomData,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn kind(&self) -> FheType {
        T::KIND
    }
}

impl<T: EncryptedType> Clone for Ciphertext<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: EncryptedType> Copy for Ciphertext<T> {}

impl<T: EncryptedType> PartialEq for Ciphertext<T> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<T: EncryptedType> Eq for Ciphertext<T> {}

impl<T: EncryptedType> std::fmt::Debug for Ciphertext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ciphertext<{}>({})", T::KIND, self.handle)
    }
}

impl<T: EncryptedType> Serialize for Ciphertext<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.handle.serialize(serializer)
    }
}

impl<'de, T: EncryptedType> Deserialize<'de> for Ciphertext<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Handle::deserialize(deserializer).map(Self::from_handle)
    }
}
