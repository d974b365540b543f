//! # ccr-fhe — Encrypted Value Collaborator
//!
//! The registry stores numeric compliance data as opaque ciphertext handles
//! and never reads a plaintext. This crate defines the interface it relies
//! on and a transparent implementation of it.
//!
//! ## Architecture
//!
//! - [`FheEngine`]: encrypt, homomorphic subtraction, and the per-handle
//!   access control list (`allow`, `is_allowed`). This is the only
//!   capability the registry is bounded by.
//! - [`DecryptionBackend`]: reveals a handle's plaintext as 32-bit limbs.
//!   Only the decryption flows in [`decryption`] call it, after checking
//!   the ACL (and for user decryption, a signed request).
//! - [`MockFheEngine`]: stores plaintexts in memory. Handles are SHA-256
//!   digests of a sequence number, so they carry no information about the
//!   value.
//!
//! ## Security Notice
//!
//! `MockFheEngine` provides NO confidentiality. It satisfies the trait
//! contracts so the registry's access rules can be exercised end to end. A
//! production deployment substitutes a real coprocessor behind the same
//! traits.

pub mod decryption;
pub mod engine;
pub mod error;
pub mod mock;
pub mod plaintext;
pub mod types;

pub use decryption::{
    public_decrypt, user_decrypt, DecryptedValue, DecryptionDomain, UserDecryptRequest,
    MAX_DURATION_DAYS,
};
pub use engine::{DecryptionBackend, FheEngine};
pub use error::FheError;
pub use mock::MockFheEngine;
pub use plaintext::{ClearValue, RevealedPlaintext};
pub use types::{
    Arithmetic, Ciphertext, Ebool, EncryptedType, Euint16, Euint32, Euint64, Euint8, FheType,
    Handle,
};
