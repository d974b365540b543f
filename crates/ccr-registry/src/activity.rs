//! Data-processing activities, keyed by a controller-chosen [`ActivityId`].
//!
//! A write to an existing id replaces the record, including its controller.

use ccr_core::{ActivityId, Address, Timestamp};
use ccr_fhe::{Ciphertext, Euint16, Euint32, Euint8};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcessingActivity {
    pub activity_id: ActivityId,
    pub purpose: Ciphertext<Euint8>,
    pub data_subject_count: Ciphertext<Euint32>,
    pub retention_months: Ciphertext<Euint16>,
    pub has_consent: bool,
    pub is_minimized: bool,
    pub has_security_measures: bool,
    pub registered_at: Timestamp,
    pub controller: Address,
}
