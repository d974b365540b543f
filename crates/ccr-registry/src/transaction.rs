//! # Signed Calls
//!
//! A [`RegistryCall`] names one mutating operation and its plaintext
//! arguments. Hosts accept calls wrapped in a [`SignedCall`], whose Ed25519
//! signature identifies the caller: the caller's address is derived from
//! the signing key, never taken from the request body.
//!
//! ## Security Invariant
//!
//! The signature covers the canonical bytes of
//! `{"call", "domain", "nonce", "signer"}`. The [`TransactionDomain`] binds a
//! call to one registry deployment; the nonce lets the host reject replays.
//! Nonce bookkeeping belongs to the host, not to this module.

use ccr_core::{Address, AuditId, CanonicalBytes, ComplianceStandard};
use ccr_crypto::{verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::inputs::{AuditFindings, ComplianceData, ProcessingActivityData};

/// Deployment binding for signed calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub registry: Address,
}

/// One mutating registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RegistryCall {
    SetRegulator {
        regulator: Address,
    },
    AuthorizeAuditor {
        auditor: Address,
    },
    RevokeAuditor {
        auditor: Address,
    },
    AuthorizeDataController {
        controller: Address,
    },
    RevokeDataController {
        controller: Address,
    },
    RegisterComplianceData(ComplianceData),
    RegisterProcessingActivity(ProcessingActivityData),
    ScheduleAudit {
        auditee: Address,
        standard: ComplianceStandard,
    },
    StartAudit {
        audit_id: AuditId,
    },
    CompleteAudit {
        audit_id: AuditId,
        #[serde(flatten)]
        findings: AuditFindings,
    },
    GrantCertification {
        entity: Address,
        standard: ComplianceStandard,
    },
    RevokeCertification {
        entity: Address,
        standard: ComplianceStandard,
    },
}

impl RegistryCall {
    /// The operation name, matching the serde tag. Safe to log; the
    /// arguments are not.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetRegulator { .. } => "set_regulator",
            Self::AuthorizeAuditor { .. } => "authorize_auditor",
            Self::RevokeAuditor { .. } => "revoke_auditor",
            Self::AuthorizeDataController { .. } => "authorize_data_controller",
            Self::RevokeDataController { .. } => "revoke_data_controller",
            Self::RegisterComplianceData(_) => "register_compliance_data",
            Self::RegisterProcessingActivity(_) => "register_processing_activity",
            Self::ScheduleAudit { .. } => "schedule_audit",
            Self::StartAudit { .. } => "start_audit",
            Self::CompleteAudit { .. } => "complete_audit",
            Self::GrantCertification { .. } => "grant_certification",
            Self::RevokeCertification { .. } => "revoke_certification",
        }
    }
}

/// A call, its signer and nonce, and a signature over all three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCall {
    pub signer: Ed25519PublicKey,
    pub nonce: u64,
    pub call: RegistryCall,
    pub signature: Ed25519Signature,
}

#[derive(Serialize)]
struct CallPayload<'a> {
    domain: &'a TransactionDomain,
    signer: &'a Ed25519PublicKey,
    nonce: u64,
    call: &'a RegistryCall,
}

fn signing_payload(
    domain: &TransactionDomain,
    signer: &Ed25519PublicKey,
    nonce: u64,
    call: &RegistryCall,
) -> Result<CanonicalBytes, RegistryError> {
    Ok(CanonicalBytes::new(&CallPayload {
        domain,
        signer,
        nonce,
        call,
    })?)
}

impl SignedCall {
    pub fn sign(
        domain: &TransactionDomain,
        key: &Ed25519KeyPair,
        nonce: u64,
        call: RegistryCall,
    ) -> Result<Self, RegistryError> {
        let signer = key.public_key();
        let payload = signing_payload(domain, &signer, nonce, &call)?;
        Ok(Self {
            signer,
            nonce,
            signature: key.sign(&payload),
            call,
        })
    }

    /// Verify the signature against `domain` and return the caller address.
    pub fn verify(&self, domain: &TransactionDomain) -> Result<Address, RegistryError> {
        let payload = signing_payload(domain, &self.signer, self.nonce, &self.call)?;
        verify_with_public_key(&payload, &self.signature, &self.signer)
            .map_err(|e| RegistryError::InvalidSignature(e.to_string()))?;
        Ok(self.signer.address())
    }
}
