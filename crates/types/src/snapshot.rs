use crate::accident::AccidentRecord;
use crate::driver::{DriverId, DriverProfile};
use crate::identity::Identity;
use crate::vehicle::VehicleRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Serializable view of the registry tables, used for external
/// persistence and for rebuilding a registry on restart.
///
/// The external format is the host's choice; this type only fixes the
/// entity relationships: one owner, one admin set, one profile per id,
/// at most one vehicle per id, an ordered accident history per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub owner: Identity,
    pub admins: HashSet<Identity>,
    /// Next identifier the registry will assign.
    pub next_id: u32,
    pub drivers: BTreeMap<DriverId, DriverProfile>,
    pub vehicles: BTreeMap<DriverId, VehicleRecord>,
    pub accidents: BTreeMap<DriverId, Vec<AccidentRecord>>,
}
