//! # Engine Traits
//!
//! [`FheEngine`] is the capability the registry holds. [`DecryptionBackend`]
//! is held only by the decryption flows. Keeping them separate means a
//! registry generic over `E: FheEngine` has no path to a plaintext.
//!
//! Both traits take `&self`; implementations keep their ciphertext store
//! behind interior synchronization, as an external coprocessor would.

use ccr_core::Address;

use crate::error::FheError;
use crate::plaintext::RevealedPlaintext;
use crate::types::{Arithmetic, Ciphertext, EncryptedType, FheType, Handle};

/// Homomorphic operations and the ciphertext access control list.
pub trait FheEngine: Send + Sync {
    /// Encrypt a plaintext and return a fresh handle. The new handle's ACL
    /// is empty; callers grant access explicitly with [`allow`](Self::allow).
    fn encrypt<T: EncryptedType>(&self, value: T::Plain) -> Result<Ciphertext<T>, FheError>;

    /// `lhs - rhs`, wrapping at the type's bit width.
    fn sub<T: Arithmetic>(
        &self,
        lhs: &Ciphertext<T>,
        rhs: &Ciphertext<T>,
    ) -> Result<Ciphertext<T>, FheError>;

    /// Add `grantee` to the handle's ACL.
    fn allow(&self, handle: Handle, grantee: Address) -> Result<(), FheError>;

    fn is_allowed(&self, handle: Handle, account: Address) -> bool;

    /// Mark a handle as decryptable by anyone without a signed request.
    fn make_publicly_decryptable(&self, handle: Handle) -> Result<(), FheError>;

    fn is_publicly_decryptable(&self, handle: Handle) -> bool;

    /// The stored type of a handle, if it exists.
    fn type_of(&self, handle: Handle) -> Option<FheType>;
}

/// Reveals plaintexts. Performs no authorization of its own.
pub trait DecryptionBackend: Send + Sync {
    fn reveal(&self, handle: Handle) -> Result<RevealedPlaintext, FheError>;
}
