use ccr_core::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// Who is calling, and the block time the host assigned to the call.
///
/// The host derives `caller` from a verified signature; the registry
/// trusts it as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub timestamp: Timestamp,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }
}
