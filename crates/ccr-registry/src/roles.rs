//! # Roles and Authorization Context
//!
//! Four roles gate every mutating operation:
//!
//! | Role | Granted by | Capabilities |
//! |------|------------|--------------|
//! | Owner | construction | set regulator |
//! | Regulator | owner | auditor and controller membership, certifications |
//! | Auditor | regulator | schedule, start and complete audits |
//! | DataController | regulator | compliance data, processing activities |
//!
//! ## Design
//!
//! Membership lives in a [`RoleStore`] injected into the registry. Each
//! operation resolves an [`AuthContext`] for its caller from the store and
//! calls [`AuthContext::require`]; there is no ambient role state.
//!
//! The regulator starts out equal to the owner, so a freshly deployed
//! registry is administrable by its owner until a separate regulator is
//! appointed.

use std::collections::BTreeSet;

use ccr_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Regulator,
    Auditor,
    DataController,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Regulator => "regulator",
            Self::Auditor => "auditor",
            Self::DataController => "data_controller",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent role membership.
pub trait RoleStore: Send + Sync {
    fn owner(&self) -> Address;
    fn regulator(&self) -> Address;
    fn set_regulator(&mut self, regulator: Address);

    fn is_auditor(&self, account: &Address) -> bool;
    fn set_auditor(&mut self, account: Address, authorized: bool);

    fn is_data_controller(&self, account: &Address) -> bool;
    fn set_data_controller(&mut self, account: Address, authorized: bool);

    fn auditors(&self) -> Vec<Address>;
    fn data_controllers(&self) -> Vec<Address>;
}

/// Role membership held in memory. Serializable so a host can snapshot it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryRoleStore {
    owner: Address,
    regulator: Address,
    auditors: BTreeSet<Address>,
    data_controllers: BTreeSet<Address>,
}

impl InMemoryRoleStore {
    /// A store whose regulator is initially the owner.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            regulator: owner,
            auditors: BTreeSet::new(),
            data_controllers: BTreeSet::new(),
        }
    }
}

impl RoleStore for InMemoryRoleStore {
    fn owner(&self) -> Address {
        self.owner
    }

    fn regulator(&self) -> Address {
        self.regulator
    }

    fn set_regulator(&mut self, regulator: Address) {
        self.regulator = regulator;
    }

    fn is_auditor(&self, account: &Address) -> bool {
        self.auditors.contains(account)
    }

    fn set_auditor(&mut self, account: Address, authorized: bool) {
        if authorized {
            self.auditors.insert(account);
        } else {
            self.auditors.remove(&account);
        }
    }

    fn is_data_controller(&self, account: &Address) -> bool {
        self.data_controllers.contains(account)
    }

    fn set_data_controller(&mut self, account: Address, authorized: bool) {
        if authorized {
            self.data_controllers.insert(account);
        } else {
            self.data_controllers.remove(&account);
        }
    }

    fn auditors(&self) -> Vec<Address> {
        self.auditors.iter().copied().collect()
    }

    fn data_controllers(&self) -> Vec<Address> {
        self.data_controllers.iter().copied().collect()
    }
}

/// The roles one caller holds at the moment a call is admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    caller: Address,
    roles: BTreeSet<Role>,
}

impl AuthContext {
    pub fn resolve<R: RoleStore + ?Sized>(store: &R, caller: Address) -> Self {
        let mut roles = BTreeSet::new();
        if store.owner() == caller {
            roles.insert(Role::Owner);
        }
        if store.regulator() == caller {
            roles.insert(Role::Regulator);
        }
        if store.is_auditor(&caller) {
            roles.insert(Role::Auditor);
        }
        if store.is_data_controller(&caller) {
            roles.insert(Role::DataController);
        }
        Self { caller, roles }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn holds(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn roles(&self) -> Vec<Role> {
        self.roles.iter().copied().collect()
    }

    pub fn require(&self, role: Role) -> Result<(), RegistryError> {
        if self.holds(role) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller: self.caller,
                required: role,
            })
        }
    }
}
