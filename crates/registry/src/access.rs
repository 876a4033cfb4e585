//! Owner/admin privilege model.
//!
//! A single owner is fixed at creation and can never be reassigned or
//! stripped of write privilege; there is no ownership transfer. The
//! owner alone mutates the admin set.

use crate::errors::{RegistryError, Result};
use roadledger_types::Identity;
use std::collections::HashSet;

/// Privilege state embedded in the registry, so admin-set mutations
/// share the registry write lock.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Identity,
    admins: HashSet<Identity>,
}

impl AccessControl {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            admins: HashSet::new(),
        }
    }

    /// Rebuild from persisted state.
    pub fn from_parts(owner: Identity, admins: HashSet<Identity>) -> Self {
        Self { owner, admins }
    }

    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn admins(&self) -> &HashSet<Identity> {
        &self.admins
    }

    /// True iff `identity` may perform data writes. The owner is always
    /// authorized regardless of admin-set membership.
    pub fn is_authorized_writer(&self, identity: Identity) -> bool {
        identity == self.owner || self.admins.contains(&identity)
    }

    /// Add `target` to the admin set. Only the owner may call this;
    /// the zero identity is rejected. Granting an existing admin is
    /// idempotent.
    pub fn grant(&mut self, caller: Identity, target: Identity) -> Result<()> {
        self.require_owner(caller)?;
        if target.is_zero() {
            return Err(RegistryError::InvalidIdentity);
        }
        self.admins.insert(target);
        Ok(())
    }

    /// Remove `target` from the admin set. Revoking a non-member is not
    /// an error. Revoking the owner has no effect on its privilege.
    pub fn revoke(&mut self, caller: Identity, target: Identity) -> Result<()> {
        self.require_owner(caller)?;
        if target.is_zero() {
            return Err(RegistryError::InvalidIdentity);
        }
        self.admins.remove(&target);
        Ok(())
    }

    fn require_owner(&self, caller: Identity) -> Result<()> {
        if caller != self.owner {
            return Err(RegistryError::Unauthorized { identity: caller });
        }
        Ok(())
    }
}
