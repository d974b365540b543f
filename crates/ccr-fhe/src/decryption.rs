//! # Decryption Flows
//!
//! Two ways to turn a handle back into a plaintext:
//!
//! - **User decryption.** The requester signs a [`UserDecryptRequest`]
//!   naming the handles, the contract that owns them, and a validity
//!   window. Every handle's ACL must include both the requester's address
//!   and the contract.
//! - **Public decryption.** No signature. Only handles explicitly marked
//!   publicly decryptable are revealed.
//!
//! ## Security Invariant
//!
//! The signature covers the canonical bytes of
//! `{"domain", "message", "primary_type"}`. The domain binds the request to
//! one deployment (name, version, chain id, verifying contract), so a
//! request signed for one registry cannot be replayed against another.
//! All checks run before the first `reveal`; a request either reveals every
//! handle or none.

use ccr_core::{Address, CanonicalBytes, Timestamp};
use ccr_crypto::{verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};

use crate::engine::{DecryptionBackend, FheEngine};
use crate::error::FheError;
use crate::plaintext::ClearValue;
use crate::types::Handle;

/// Longest validity window a user decryption request may declare.
pub const MAX_DURATION_DAYS: u32 = 365;

const USER_DECRYPT_PRIMARY_TYPE: &str = "UserDecryptRequestVerification";

/// Deployment binding for signed decryption requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

/// A request to decrypt handles for the signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDecryptRequest {
    pub handles: Vec<Handle>,
    /// The contract whose stored ciphertexts are being read.
    pub contract: Address,
    /// The requester's key. Its address must be on every handle's ACL.
    pub public_key: Ed25519PublicKey,
    pub start_timestamp: Timestamp,
    pub duration_days: u32,
}

#[derive(Serialize)]
struct SigningEnvelope<'a> {
    domain: &'a DecryptionDomain,
    primary_type: &'static str,
    message: &'a UserDecryptRequest,
}

impl UserDecryptRequest {
    /// The canonical bytes a requester signs.
    pub fn signing_payload(&self, domain: &DecryptionDomain) -> Result<CanonicalBytes, FheError> {
        Ok(CanonicalBytes::new(&SigningEnvelope {
            domain,
            primary_type: USER_DECRYPT_PRIMARY_TYPE,
            message: self,
        })?)
    }

    /// Sign this request. The key pair should own `self.public_key`.
    pub fn sign(
        &self,
        domain: &DecryptionDomain,
        key: &Ed25519KeyPair,
    ) -> Result<Ed25519Signature, FheError> {
        Ok(key.sign(&self.signing_payload(domain)?))
    }

    pub fn requester(&self) -> Address {
        self.public_key.address()
    }

    /// Last instant the request is accepted.
    pub fn expires_at(&self) -> Result<Timestamp, FheError> {
        self.start_timestamp
            .checked_add_days(self.duration_days)
            .ok_or(FheError::InvalidDuration(self.duration_days))
    }
}

/// One handle and its decrypted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedValue {
    pub handle: Handle,
    #[serde(flatten)]
    pub value: ClearValue,
}

/// Verify a signed user decryption request and reveal its handles.
pub fn user_decrypt<B>(
    backend: &B,
    domain: &DecryptionDomain,
    request: &UserDecryptRequest,
    signature: &Ed25519Signature,
    now: Timestamp,
) -> Result<Vec<DecryptedValue>, FheError>
where
    B: FheEngine + DecryptionBackend,
{
    if request.handles.is_empty() {
        return Err(FheError::EmptyRequest);
    }
    if request.duration_days == 0 || request.duration_days > MAX_DURATION_DAYS {
        return Err(FheError::InvalidDuration(request.duration_days));
    }

    let payload = request.signing_payload(domain)?;
    verify_with_public_key(&payload, signature, &request.public_key)
        .map_err(|e| FheError::InvalidSignature(e.to_string()))?;

    if now < request.start_timestamp {
        return Err(FheError::RequestNotYetValid {
            start: request.start_timestamp,
        });
    }
    let expires_at = request.expires_at()?;
    if now > expires_at {
        return Err(FheError::RequestExpired { expired_at: expires_at });
    }

    let requester = request.requester();
    for handle in &request.handles {
        for account in [requester, request.contract] {
            if !backend.is_allowed(*handle, account) {
                tracing::debug!(%handle, %account, "user decryption denied");
                return Err(FheError::AccessDenied {
                    handle: *handle,
                    account,
                });
            }
        }
    }

    let values = reveal_all(backend, &request.handles)?;
    tracing::info!(%requester, count = values.len(), "user decryption served");
    Ok(values)
}

/// Reveal handles that were marked publicly decryptable.
pub fn public_decrypt<B>(backend: &B, handles: &[Handle]) -> Result<Vec<DecryptedValue>, FheError>
where
    B: FheEngine + DecryptionBackend,
{
    if handles.is_empty() {
        return Err(FheError::EmptyRequest);
    }
    if let Some(handle) = handles
        .iter()
        .find(|h| !backend.is_publicly_decryptable(**h))
    {
        return Err(FheError::NotPubliclyDecryptable(*handle));
    }
    reveal_all(backend, handles)
}

fn reveal_all<B: DecryptionBackend>(
    backend: &B,
    handles: &[Handle],
) -> Result<Vec<DecryptedValue>, FheError> {
    handles
        .iter()
        .map(|handle| {
            let revealed = backend.reveal(*handle)?;
            Ok(DecryptedValue {
                handle: *handle,
                value: ClearValue::from_revealed(&revealed)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFheEngine;
    use crate::types::{Euint64, Euint8};

    const CONTRACT: Address = Address([0xcc; 20]);

    fn domain() -> DecryptionDomain {
        DecryptionDomain {
            name: "ConfidentialComplianceRegistry".into(),
            version: "1".into(),
            chain_id: 9000,
            verifying_contract: CONTRACT,
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse("2026-05-01T00:00:00Z").unwrap()
    }

    struct Fixture {
        engine: MockFheEngine,
        key: Ed25519KeyPair,
        score: Handle,
        penalty: Handle,
    }

    fn fixture() -> Fixture {
        let engine = MockFheEngine::new();
        let key = Ed25519KeyPair::from_seed(&[3u8; 32]);
        let score = engine.encrypt::<Euint8>(85).unwrap().handle();
        let penalty = engine.encrypt::<Euint64>(50_000).unwrap().handle();
        for h in [score, penalty] {
            engine.allow(h, CONTRACT).unwrap();
            engine.allow(h, key.address()).unwrap();
        }
        Fixture {
            engine,
            key,
            score,
            penalty,
        }
    }

    fn request(fx: &Fixture, handles: Vec<Handle>) -> UserDecryptRequest {
        UserDecryptRequest {
            handles,
            contract: CONTRACT,
            public_key: fx.key.public_key(),
            start_timestamp: Timestamp::parse("2026-04-30T00:00:00Z").unwrap(),
            duration_days: 10,
        }
    }

    #[test]
    fn user_decrypt_reveals_allowed_handles() {
        let fx = fixture();
        let req = request(&fx, vec![fx.score, fx.penalty]);
        let sig = req.sign(&domain(), &fx.key).unwrap();
        let values = user_decrypt(&fx.engine, &domain(), &req, &sig, now()).unwrap();
        assert_eq!(values[0].value, ClearValue::Euint8(85));
        assert_eq!(values[1].value, ClearValue::Euint64(50_000));
    }

    #[test]
    fn signature_from_other_key_rejected() {
        let fx = fixture();
        let req = request(&fx, vec![fx.score]);
        let intruder = Ed25519KeyPair::from_seed(&[4u8; 32]);
        let sig = req.sign(&domain(), &intruder).unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
            Err(FheError::InvalidSignature(_))
        ));
    }

    #[test]
    fn signature_bound_to_domain() {
        let fx = fixture();
        let req = request(&fx, vec![fx.score]);
        let mut other = domain();
        other.chain_id = 1;
        let sig = req.sign(&other, &fx.key).unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
            Err(FheError::InvalidSignature(_))
        ));
    }

    #[test]
    fn requester_must_be_on_acl() {
        let fx = fixture();
        let outsider = Ed25519KeyPair::from_seed(&[5u8; 32]);
        let mut req = request(&fx, vec![fx.score]);
        req.public_key = outsider.public_key();
        let sig = req.sign(&domain(), &outsider).unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
            Err(FheError::AccessDenied { account, .. }) if account == outsider.address()
        ));
    }

    #[test]
    fn contract_must_be_on_acl() {
        let fx = fixture();
        let orphan = fx.engine.encrypt::<Euint8>(1).unwrap().handle();
        fx.engine.allow(orphan, fx.key.address()).unwrap();
        let req = request(&fx, vec![orphan]);
        let sig = req.sign(&domain(), &fx.key).unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
            Err(FheError::AccessDenied { account, .. }) if account == CONTRACT
        ));
    }

    #[test]
    fn expired_request_rejected() {
        let fx = fixture();
        let req = request(&fx, vec![fx.score]);
        let sig = req.sign(&domain(), &fx.key).unwrap();
        let late = Timestamp::parse("2026-05-11T00:00:01Z").unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, late),
            Err(FheError::RequestExpired { .. })
        ));
    }

    #[test]
    fn future_request_rejected() {
        let fx = fixture();
        let req = request(&fx, vec![fx.score]);
        let sig = req.sign(&domain(), &fx.key).unwrap();
        let early = Timestamp::parse("2026-04-29T23:59:59Z").unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, early),
            Err(FheError::RequestNotYetValid { .. })
        ));
    }

    #[test]
    fn duration_bounds() {
        let fx = fixture();
        for days in [0, MAX_DURATION_DAYS + 1] {
            let mut req = request(&fx, vec![fx.score]);
            req.duration_days = days;
            let sig = req.sign(&domain(), &fx.key).unwrap();
            assert!(matches!(
                user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
                Err(FheError::InvalidDuration(d)) if d == days
            ));
        }
    }

    #[test]
    fn empty_request_rejected() {
        let fx = fixture();
        let req = request(&fx, vec![]);
        let sig = req.sign(&domain(), &fx.key).unwrap();
        assert!(matches!(
            user_decrypt(&fx.engine, &domain(), &req, &sig, now()),
            Err(FheError::EmptyRequest)
        ));
    }

    #[test]
    fn public_decrypt_requires_flag() {
        let fx = fixture();
        assert!(matches!(
            public_decrypt(&fx.engine, &[fx.score]),
            Err(FheError::NotPubliclyDecryptable(_))
        ));
        fx.engine.make_publicly_decryptable(fx.score).unwrap();
        let values = public_decrypt(&fx.engine, &[fx.score]).unwrap();
        assert_eq!(values[0].value, ClearValue::Euint8(85));
    }

    #[test]
    fn decrypted_value_json_is_flat() {
        let v = DecryptedValue {
            handle: Handle([1; 32]),
            value: ClearValue::Euint8(5),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "euint8");
        assert_eq!(json["value"], 5);
        assert!(json["handle"].as_str().unwrap().starts_with("0x"));
    }
}
