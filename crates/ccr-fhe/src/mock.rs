//! # Mock Engine
//!
//! A transparent [`FheEngine`] + [`DecryptionBackend`]. Plaintexts live in a
//! map keyed by handle; arithmetic is performed on those plaintexts and
//! masked to the type's width, matching the wrapping semantics of encrypted
//! integer types.
//!
//! Handles are `sha256(canonical({"engine", "seq", "type"}))`, with `seq` a
//! per-engine counter, so equal plaintexts encrypt to distinct handles.
//!
//! ## Security Notice
//!
//! NO confidentiality. Anyone holding the engine can read every value via
//! [`DecryptionBackend::reveal`]. Suitable for tests and single-process
//! deployments that exercise access rules, nothing more.

use std::collections::{HashMap, HashSet};

use ccr_core::{sha256_digest, Address, CanonicalBytes};
use parking_lot::RwLock;
use serde::Serialize;

use crate::engine::{DecryptionBackend, FheEngine};
use crate::error::FheError;
use crate::plaintext::RevealedPlaintext;
use crate::types::{Arithmetic, Ciphertext, EncryptedType, FheType, Handle};

#[derive(Debug, Clone, Copy)]
struct StoredValue {
    ty: FheType,
    raw: u64,
}

#[derive(Debug, Default)]
struct MockState {
    seq: u64,
    values: HashMap<Handle, StoredValue>,
    acl: HashMap<Handle, HashSet<Address>>,
    public: HashSet<Handle>,
}

#[derive(Serialize)]
struct HandleSeed<'a> {
    engine: &'a str,
    seq: u64,
    #[serde(rename = "type")]
    ty: FheType,
}

/// In-memory engine with no confidentiality.
#[derive(Debug, Default)]
pub struct MockFheEngine {
    state: RwLock<MockState>,
}

impl MockFheEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ciphertexts stored, including ones no record references.
    pub fn ciphertext_count(&self) -> usize {
        self.state.read().values.len()
    }

    fn insert(&self, ty: FheType, raw: u64) -> Result<Handle, FheError> {
        let mut state = self.state.write();
        let seed = HandleSeed {
            engine: "ccr-mock-fhe",
            seq: state.seq,
            ty,
        };
        let handle = Handle(sha256_digest(&CanonicalBytes::new(&seed)?).0);
        state.seq += 1;
        state.values.insert(
            handle,
            StoredValue {
                ty,
                raw: ty.mask(raw),
            },
        );
        tracing::trace!(%handle, %ty, "stored ciphertext");
        Ok(handle)
    }

    fn load(&self, handle: Handle, expected: FheType) -> Result<u64, FheError> {
        let state = self.state.read();
        let stored = state
            .values
            .get(&handle)
            .ok_or(FheError::UnknownHandle(handle))?;
        if stored.ty != expected {
            return Err(FheError::TypeMismatch {
                handle,
                expected,
                actual: stored.ty,
            });
        }
        Ok(stored.raw)
    }

    fn require_exists(&self, handle: Handle) -> Result<(), FheError> {
        if self.state.read().values.contains_key(&handle) {
            Ok(())
        } else {
            Err(FheError::UnknownHandle(handle))
        }
    }
}

impl FheEngine for MockFheEngine {
    fn encrypt<T: EncryptedType>(&self, value: T::Plain) -> Result<Ciphertext<T>, FheError> {
        let handle = self.insert(T::KIND, T::to_raw(value))?;
        Ok(Ciphertext::from_handle(handle))
    }

    fn sub<T: Arithmetic>(
        &self,
        lhs: &Ciphertext<T>,
        rhs: &Ciphertext<T>,
    ) -> Result<Ciphertext<T>, FheError> {
        let a = self.load(lhs.handle(), T::KIND)?;
        let b = self.load(rhs.handle(), T::KIND)?;
        let handle = self.insert(T::KIND, T::KIND.mask(a.wrapping_sub(b)))?;
        Ok(Ciphertext::from_handle(handle))
    }

    fn allow(&self, handle: Handle, grantee: Address) -> Result<(), FheError> {
        self.require_exists(handle)?;
        self.state
            .write()
            .acl
            .entry(handle)
            .or_default()
            .insert(grantee);
        tracing::trace!(%handle, %grantee, "acl grant");
        Ok(())
    }

    fn is_allowed(&self, handle: Handle, account: Address) -> bool {
        self.state
            .read()
            .acl
            .get(&handle)
            .is_some_and(|set| set.contains(&account))
    }

    fn make_publicly_decryptable(&self, handle: Handle) -> Result<(), FheError> {
        self.require_exists(handle)?;
        self.state.write().public.insert(handle);
        Ok(())
    }

    fn is_publicly_decryptable(&self, handle: Handle) -> bool {
        self.state.read().public.contains(&handle)
    }

    fn type_of(&self, handle: Handle) -> Option<FheType> {
        self.state.read().values.get(&handle).map(|v| v.ty)
    }
}

impl DecryptionBackend for MockFheEngine {
    fn reveal(&self, handle: Handle) -> Result<RevealedPlaintext, FheError> {
        let state = self.state.read();
        let stored = state
            .values
            .get(&handle)
            .ok_or(FheError::UnknownHandle(handle))?;
        Ok(RevealedPlaintext::from_raw(stored.ty, stored.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plaintext::ClearValue;
    use crate::types::{Euint32, Euint64, Euint8};

    fn reveal_u64(engine: &MockFheEngine, handle: Handle) -> u64 {
        ClearValue::from_revealed(&engine.reveal(handle).unwrap())
            .unwrap()
            .as_u64()
    }

    #[test]
    fn equal_plaintexts_get_distinct_handles() {
        let engine = MockFheEngine::new();
        let a = engine.encrypt::<Euint8>(85).unwrap();
        let b = engine.encrypt::<Euint8>(85).unwrap();
        assert_ne!(a.handle(), b.handle());
        assert_eq!(engine.ciphertext_count(), 2);
    }

    #[test]
    fn subtraction() {
        let engine = MockFheEngine::new();
        let score = engine.encrypt::<Euint8>(85).unwrap();
        let reduction = engine.encrypt::<Euint8>(80).unwrap();
        let result = engine.sub(&score, &reduction).unwrap();
        assert_eq!(reveal_u64(&engine, result.handle()), 5);
    }

    #[test]
    fn subtraction_wraps_at_width() {
        let engine = MockFheEngine::new();
        let score = engine.encrypt::<Euint8>(10).unwrap();
        let reduction = engine.encrypt::<Euint8>(20).unwrap();
        let result = engine.sub(&score, &reduction).unwrap();
        assert_eq!(reveal_u64(&engine, result.handle()), 246);
    }

    #[test]
    fn type_mismatch_detected() {
        let engine = MockFheEngine::new();
        let wide = engine.encrypt::<Euint32>(1).unwrap();
        // Forge a ciphertext of the wrong type over the same handle.
        let forged: Ciphertext<Euint8> = Ciphertext::from_handle(wide.handle());
        let other = engine.encrypt::<Euint8>(1).unwrap();
        assert!(matches!(
            engine.sub(&forged, &other),
            Err(FheError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn acl_is_per_handle() {
        let engine = MockFheEngine::new();
        let alice = Address([1; 20]);
        let bob = Address([2; 20]);
        let ct = engine.encrypt::<Euint64>(50_000).unwrap();
        assert!(!engine.is_allowed(ct.handle(), alice));

        engine.allow(ct.handle(), alice).unwrap();
        assert!(engine.is_allowed(ct.handle(), alice));
        assert!(!engine.is_allowed(ct.handle(), bob));

        let other = engine.encrypt::<Euint64>(1).unwrap();
        assert!(!engine.is_allowed(other.handle(), alice));
    }

    #[test]
    fn allow_unknown_handle_fails() {
        let engine = MockFheEngine::new();
        assert!(matches!(
            engine.allow(Handle([9; 32]), Address([1; 20])),
            Err(FheError::UnknownHandle(_))
        ));
    }

    #[test]
    fn public_flag() {
        let engine = MockFheEngine::new();
        let ct = engine.encrypt::<Euint8>(1).unwrap();
        assert!(!engine.is_publicly_decryptable(ct.handle()));
        engine.make_publicly_decryptable(ct.handle()).unwrap();
        assert!(engine.is_publicly_decryptable(ct.handle()));
    }

    #[test]
    fn type_of_reports_stored_kind() {
        let engine = MockFheEngine::new();
        let ct = engine.encrypt::<Euint64>(7).unwrap();
        assert_eq!(engine.type_of(ct.handle()), Some(FheType::Euint64));
        assert_eq!(engine.type_of(Handle([0; 32])), None);
    }
}
