//! # Revealed Plaintexts
//!
//! Decryption results travel as 32-bit limbs. Types up to 32 bits use one
//! limb; `euint64` uses two, ordered `[high, low]`, and is rebuilt as
//! `(high << 32) | low`.

use serde::{Deserialize, Serialize};

use crate::error::FheError;
use crate::types::FheType;

/// A plaintext as returned by a [`DecryptionBackend`](crate::DecryptionBackend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedPlaintext {
    pub ty: FheType,
    pub limbs: Vec<u32>,
}

impl RevealedPlaintext {
    /// Split a raw value into limbs for `ty`. The value is masked to width.
    pub fn from_raw(ty: FheType, raw: u64) -> Self {
        let raw = ty.mask(raw);
        let limbs = match ty {
            FheType::Euint64 => vec![(raw >> 32) as u32, raw as u32],
            _ => vec![raw as u32],
        };
        Self { ty, limbs }
    }
}

/// A decoded plaintext value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClearValue {
    Ebool(bool),
    Euint8(u8),
    Euint16(u16),
    Euint32(u32),
    Euint64(u64),
}

impl ClearValue {
    /// Decode limbs, checking the limb count and that each value fits its type.
    pub fn from_revealed(revealed: &RevealedPlaintext) -> Result<Self, FheError> {
        let wide = revealed.ty == FheType::Euint64;
        let raw = match (wide, revealed.limbs.as_slice()) {
            (true, [high, low]) => (u64::from(*high) << 32) | u64::from(*low),
            (false, [single]) => u64::from(*single),
            (_, limbs) => {
                return Err(FheError::MalformedPlaintext(format!(
                    "{} expects {} limb(s), got {}",
                    revealed.ty,
                    if wide { 2 } else { 1 },
                    limbs.len()
                )))
            }
        };
        if raw > revealed.ty.max_value() {
            return Err(FheError::MalformedPlaintext(format!(
                "value {raw} exceeds {} range",
                revealed.ty
            )));
        }

        Ok(match revealed.ty {
            FheType::Ebool => Self::Ebool(raw != 0),
            FheType::Euint8 => Self::Euint8(raw as u8),
            FheType::Euint16 => Self::Euint16(raw as u16),
            FheType::Euint32 => Self::Euint32(raw as u32),
            FheType::Euint64 => Self::Euint64(raw),
        })
    }

    pub fn ty(&self) -> FheType {
        match self {
            Self::Ebool(_) => FheType::Ebool,
            Self::Euint8(_) => FheType::Euint8,
            Self::Euint16(_) => FheType::Euint16,
            Self::Euint32(_) => FheType::Euint32,
            Self::Euint64(_) => FheType::Euint64,
        }
    }

    pub fn as_u64(&self) -> u64 {
        match *self {
            Self::Ebool(b) => u64::from(b),
            Self::Euint8(v) => u64::from(v),
            Self::Euint16(v) => u64::from(v),
            Self::Euint32(v) => u64::from(v),
            Self::Euint64(v) => v,
        }
    }
}
