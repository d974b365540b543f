//! # ccr-crypto — Signing Primitives
//!
//! Ed25519 keys and signatures for the two signed artifacts in the system:
//! registry calls (`ccr_registry::SignedCall`) and user decryption requests
//! (`ccr_fhe::UserDecryptRequest`). Also derives the account [`Address`]
//! the registry's role gate sees for a given public key.
//!
//! ## Crate Policy
//!
//! - Depends only on `ccr-core` internally.
//! - Tests use real Ed25519, never a mock.
//!
//! [`Address`]: ccr_core::Address

pub mod ed25519;

pub use ed25519::{verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
