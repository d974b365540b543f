//! # Ed25519 Signing and Verification
//!
//! ## Security Invariant
//!
//! - Signing and verification take `&CanonicalBytes`. Raw bytes cannot be
//!   signed, so a call signed by the CLI and re-canonicalized by the server
//!   always yields the same signature input.
//! - `Ed25519KeyPair` does not implement `Serialize` and its `Debug` output
//!   is redacted. The seed leaves the type only through
//!   [`Ed25519KeyPair::seed_hex()`], which the CLI uses to write key files.
//!
//! ## Addresses
//!
//! An account address is the last 20 bytes of SHA-256 over the 32-byte
//! public key. The key encoding is already fixed-width, so it is hashed
//! directly rather than through `CanonicalBytes`.

use ccr_core::error::CryptoError;
use ccr_core::{hex, Address, CanonicalBytes};
use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// An Ed25519 public key. Serializes as 64 hex chars.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// An Ed25519 signature. Serializes as 128 hex chars.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 signing key pair.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_fixed::<32>(s)
            .map(Self)
            .map_err(|e| CryptoError::KeyError(format!("public key: {e}")))
    }

    /// The account address controlled by this key.
    pub fn address(&self) -> Address {
        let hash = Sha256::digest(self.0);
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash[12..32]);
        Address(out)
    }

    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid public key: {e}")))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_fixed::<64>(s)
            .map(Self)
            .map_err(|e| CryptoError::VerificationFailed(format!("signature: {e}")))
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex::prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a key pair from the OS RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Parse a key pair from a 64-char hex seed, as written by `ccr keygen`.
    pub fn from_seed_hex(s: &str) -> Result<Self, CryptoError> {
        let seed = hex::decode_fixed::<32>(s)
            .map_err(|e| CryptoError::KeyError(format!("private key: {e}")))?;
        Ok(Self::from_seed(&seed))
    }

    /// Hex-encoded 32-byte seed.
    pub fn seed_hex(&self) -> String {
        hex::encode(&self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Sign canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify a signature over canonical bytes against a public key.
pub fn verify_with_public_key(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let vk = public_key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    vk.verify(data.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519 verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(v: serde_json::Value) -> CanonicalBytes {
        CanonicalBytes::new(&v).unwrap()
    }

    #[test]
    fn sign_and_verify() {
        let kp = Ed25519KeyPair::generate();
        let data = canonical(serde_json::json!({"call": "schedule_audit", "nonce": 0}));
        let sig = kp.sign(&data);
        verify_with_public_key(&data, &sig, &kp.public_key()).expect("valid signature");
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        let data = canonical(serde_json::json!({"x": 1}));
        let sig = kp1.sign(&data);
        assert!(verify_with_public_key(&data, &sig, &kp2.public_key()).is_err());
    }

    #[test]
    fn tampered_message_fails() {
        let kp = Ed25519KeyPair::generate();
        let sig = kp.sign(&canonical(serde_json::json!({"risk_score": 30})));
        let tampered = canonical(serde_json::json!({"risk_score": 31}));
        assert!(verify_with_public_key(&tampered, &sig, &kp.public_key()).is_err());
    }

    #[test]
    fn seed_is_deterministic() {
        let a = Ed25519KeyPair::from_seed(&[42u8; 32]);
        let b = Ed25519KeyPair::from_seed(&[42u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn seed_hex_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let restored = Ed25519KeyPair::from_seed_hex(&kp.seed_hex()).unwrap();
        assert_eq!(kp.public_key(), restored.public_key());
    }

    #[test]
    fn address_is_stable_and_distinct() {
        let a = Ed25519KeyPair::from_seed(&[1u8; 32]).address();
        let b = Ed25519KeyPair::from_seed(&[2u8; 32]).address();
        assert_ne!(a, b);
        assert!(!a.is_zero());
        assert_eq!(a, Ed25519KeyPair::from_seed(&[1u8; 32]).public_key().address());
    }

    #[test]
    fn public_key_serde_is_hex() {
        let pk = Ed25519KeyPair::generate().public_key();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json.len(), 64 + 2);
        assert_eq!(serde_json::from_str::<Ed25519PublicKey>(&json).unwrap(), pk);
    }

    #[test]
    fn signature_hex_rejects_short_input() {
        assert!(Ed25519Signature::from_hex("abcd").is_err());
    }

    #[test]
    fn keypair_debug_is_redacted() {
        let kp = Ed25519KeyPair::from_seed(&[9u8; 32]);
        let dbg = format!("{kp:?}");
        assert!(!dbg.contains(&kp.seed_hex()));
        assert!(dbg.contains("<private>"));
    }
}
