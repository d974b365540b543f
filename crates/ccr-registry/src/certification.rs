//! # Certifications
//!
//! A flag per (entity, standard). Flags are independent of each other and
//! of audit history: granting GDPR touches nothing but the GDPR flag of one
//! entity, and no audit outcome grants or revokes anything.

use std::collections::{BTreeMap, BTreeSet};

use ccr_core::{Address, ComplianceStandard};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationBook {
    granted: BTreeMap<Address, BTreeSet<ComplianceStandard>>,
}

impl CertificationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns `false` if it was already set.
    pub fn grant(&mut self, entity: Address, standard: ComplianceStandard) -> bool {
        self.granted.entry(entity).or_default().insert(standard)
    }

    /// Clear the flag. Returns `false` if it was not set.
    pub fn revoke(&mut self, entity: Address, standard: ComplianceStandard) -> bool {
        let Some(set) = self.granted.get_mut(&entity) else {
            return false;
        };
        let removed = set.remove(&standard);
        if set.is_empty() {
            self.granted.remove(&entity);
        }
        removed
    }

    pub fn has(&self, entity: &Address, standard: ComplianceStandard) -> bool {
        self.granted
            .get(entity)
            .is_some_and(|set| set.contains(&standard))
    }

    /// Standards currently granted to `entity`, in index order.
    pub fn standards_of(&self, entity: &Address) -> Vec<ComplianceStandard> {
        self.granted
            .get(entity)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}
