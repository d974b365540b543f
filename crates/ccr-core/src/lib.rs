//! # ccr-core — Foundational Types for the Compliance Registry
//!
//! Leaf crate of the workspace. Every other `ccr-*` crate depends on it; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `Address`, `ActivityId` and `AuditId` are
//!    distinct types. An audit id cannot be passed where an activity id is
//!    expected, and addresses are never bare strings.
//!
//! 2. **`CanonicalBytes` newtype.** Everything that is signed or hashed flows
//!    through `CanonicalBytes::new()`. Signed calls, decryption requests and
//!    handle derivation all share the one pipeline.
//!
//! 3. **Closed enums.** `ComplianceStandard` (6 variants) and `RiskLevel`
//!    (4 ordered variants) are matched exhaustively everywhere.
//!
//! 4. **UTC-only timestamps**, truncated to seconds.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ccr-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod domain;
pub mod error;
pub mod hex;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use domain::{ComplianceStandard, RiskLevel, COMPLIANCE_STANDARD_COUNT};
pub use error::{CanonicalizationError, CcrError, CryptoError};
pub use identity::{ActivityId, Address, AuditId};
pub use temporal::Timestamp;
