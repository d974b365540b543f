use ccr_core::{Address, CanonicalizationError, Timestamp};
use thiserror::Error;

use crate::types::{FheType, Handle};

/// Failures of the encryption collaborator and the decryption flows.
#[derive(Error, Debug)]
pub enum FheError {
    /// No ciphertext is stored under this handle.
    #[error("unknown ciphertext handle {0}")]
    UnknownHandle(Handle),

    /// The handle holds a different encrypted type than the caller expected.
    #[error("handle {handle} holds {actual}, expected {expected}")]
    TypeMismatch {
        handle: Handle,
        expected: FheType,
        actual: FheType,
    },

    /// The account is not on the handle's access control list.
    #[error("{account} is not allowed to decrypt {handle}")]
    AccessDenied { handle: Handle, account: Address },

    /// Public decryption was requested for a handle not marked public.
    #[error("handle {0} is not publicly decryptable")]
    NotPubliclyDecryptable(Handle),

    /// A decryption request named no handles.
    #[error("decryption request contains no handles")]
    EmptyRequest,

    /// The request signature did not verify against the requester key.
    #[error("invalid decryption request signature: {0}")]
    InvalidSignature(String),

    /// The request's validity window has not opened yet.
    #[error("decryption request not valid before {start}")]
    RequestNotYetValid { start: Timestamp },

    /// The request's validity window has closed.
    #[error("decryption request expired at {expired_at}")]
    RequestExpired { expired_at: Timestamp },

    /// `duration_days` outside `1..=MAX_DURATION_DAYS`.
    #[error("invalid decryption request duration: {0} days")]
    InvalidDuration(u32),

    /// Revealed limbs do not match the declared type.
    #[error("malformed plaintext: {0}")]
    MalformedPlaintext(String),

    /// Handle derivation or signing payload canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
