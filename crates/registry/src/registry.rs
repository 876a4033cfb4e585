//! Driver registry implementation.
//!
//! Owns the persistent tables (drivers, vehicles, accident histories)
//! plus the privilege state, all behind a single lock so every write is
//! applied atomically: validation, mutation, counter increment, and
//! event emission form one unit. A failed call has zero effect on state
//! and emits nothing.

use crate::access::AccessControl;
use crate::errors::{RegistryError, Result};
use crate::events::{EventHub, EventStats};
use parking_lot::RwLock;
use roadledger_types::{
    AccidentDetails, AccidentRecord, DriverData, DriverDetails, DriverId, DriverProfile, Identity,
    RegistryEvent, RegistrySnapshot, VehicleDetails, VehicleRecord, FIRST_DRIVER_ID,
};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Configuration for [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Capacity of the broadcast channel backing the event stream.
    pub event_channel_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 512,
        }
    }
}

#[derive(Debug)]
struct RegistryState {
    access: AccessControl,
    next_id: u32,
    drivers: HashMap<DriverId, DriverProfile>,
    vehicles: HashMap<DriverId, VehicleRecord>,
    accidents: HashMap<DriverId, Vec<AccidentRecord>>,
}

impl RegistryState {
    fn driver_exists(&self, driver_id: DriverId) -> bool {
        self.drivers
            .get(&driver_id)
            .map(|profile| profile.exists)
            .unwrap_or(false)
    }

    fn require_driver(&self, driver_id: DriverId) -> Result<()> {
        if !self.driver_exists(driver_id) {
            return Err(RegistryError::DriverNotFound { driver_id });
        }
        Ok(())
    }

    fn require_writer(&self, caller: Identity) -> Result<()> {
        if !self.access.is_authorized_writer(caller) {
            return Err(RegistryError::Unauthorized { identity: caller });
        }
        Ok(())
    }
}

/// Tamper-evident driver registry.
///
/// The owner identity is fixed at construction and can never be
/// reassigned; there is no ownership transfer and no delete operation
/// for any record.
#[derive(Debug)]
pub struct Registry {
    state: RwLock<RegistryState>,
    events: EventHub,
}

impl Registry {
    /// Create an empty registry owned by `owner`.
    pub fn new(owner: Identity) -> Self {
        Self::with_config(owner, RegistryConfig::default())
    }

    pub fn with_config(owner: Identity, config: RegistryConfig) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                access: AccessControl::new(owner),
                next_id: FIRST_DRIVER_ID,
                drivers: HashMap::new(),
                vehicles: HashMap::new(),
                accidents: HashMap::new(),
            }),
            events: EventHub::new(config.event_channel_capacity),
        }
    }

    /// Rebuild a registry from a persisted snapshot. Identifier
    /// assignment continues from the snapshot's `next_id`.
    pub fn from_snapshot(snapshot: RegistrySnapshot, config: RegistryConfig) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                access: AccessControl::from_parts(snapshot.owner, snapshot.admins),
                next_id: snapshot.next_id,
                drivers: snapshot.drivers.into_iter().collect(),
                vehicles: snapshot.vehicles.into_iter().collect(),
                accidents: snapshot.accidents.into_iter().collect(),
            }),
            events: EventHub::new(config.event_channel_capacity),
        }
    }

    /// The fixed owner identity.
    pub fn owner(&self) -> Identity {
        self.state.read().access.owner()
    }

    /// Current admin set (the owner is authorized regardless of
    /// membership here).
    pub fn admins(&self) -> HashSet<Identity> {
        self.state.read().access.admins().clone()
    }

    /// Attach a subscriber to the notification stream.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    pub fn event_stats(&self) -> EventStats {
        self.events.stats()
    }

    /// True iff `identity` may perform data writes.
    pub fn is_authorized_writer(&self, identity: Identity) -> bool {
        self.state.read().access.is_authorized_writer(identity)
    }

    /// Grant admin privilege to `target`. Owner only.
    pub fn grant_admin(&self, caller: Identity, target: Identity) -> Result<()> {
        let state = &mut *self.state.write();
        state.access.grant(caller, target)?;
        info!(%target, "admin granted");
        self.events.emit(RegistryEvent::AdminGranted { identity: target });
        Ok(())
    }

    /// Revoke admin privilege from `target`. Owner only; revoking a
    /// non-member succeeds and still emits the event.
    pub fn revoke_admin(&self, caller: Identity, target: Identity) -> Result<()> {
        let state = &mut *self.state.write();
        state.access.revoke(caller, target)?;
        info!(%target, "admin revoked");
        self.events.emit(RegistryEvent::AdminRevoked { identity: target });
        Ok(())
    }

    /// Register a new driver and return the minted identifier.
    ///
    /// Field contents are not validated; the only failure mode is an
    /// unauthorized caller. Identifiers are assigned sequentially from
    /// [`FIRST_DRIVER_ID`] and never reused.
    pub fn add_driver(&self, caller: Identity, details: DriverDetails) -> Result<DriverId> {
        let state = &mut *self.state.write();
        state.require_writer(caller)?;

        let driver_id = DriverId::new(state.next_id);
        state.next_id += 1;

        let profile = DriverProfile::from_details(driver_id, details);
        let name = profile.name.clone();
        state.drivers.insert(driver_id, profile);

        info!(%driver_id, %name, "driver registered");
        self.events.emit(RegistryEvent::DriverAdded { driver_id, name });
        Ok(driver_id)
    }

    /// True iff `driver_id` was ever returned by [`Registry::add_driver`].
    pub fn driver_exists(&self, driver_id: DriverId) -> bool {
        self.state.read().driver_exists(driver_id)
    }

    /// Attach or replace the vehicle record for an existing driver.
    /// Replace semantics: a second write overwrites the first.
    pub fn add_vehicle(
        &self,
        caller: Identity,
        driver_id: DriverId,
        details: VehicleDetails,
    ) -> Result<()> {
        let state = &mut *self.state.write();
        state.require_writer(caller)?;
        state.require_driver(driver_id)?;

        let record = VehicleRecord::from_details(details);
        let registration_number = record.registration_number.clone();
        state.vehicles.insert(driver_id, record);

        info!(%driver_id, %registration_number, "vehicle recorded");
        self.events.emit(RegistryEvent::VehicleAdded {
            driver_id,
            registration_number,
        });
        Ok(())
    }

    /// Append an accident record to an existing driver's history.
    pub fn add_accident(
        &self,
        caller: Identity,
        driver_id: DriverId,
        details: AccidentDetails,
    ) -> Result<()> {
        let state = &mut *self.state.write();
        state.require_writer(caller)?;
        state.require_driver(driver_id)?;

        let record = AccidentRecord::from_details(details);
        let location = record.location.clone();
        state.accidents.entry(driver_id).or_default().push(record);

        info!(%driver_id, %location, "accident recorded");
        self.events.emit(RegistryEvent::AccidentAdded {
            driver_id,
            location,
        });
        Ok(())
    }

    /// Fetch a driver's profile.
    pub fn get_driver_info(&self, driver_id: DriverId) -> Result<DriverProfile> {
        let state = self.state.read();
        state.require_driver(driver_id)?;
        Ok(state.drivers[&driver_id].clone())
    }

    /// Fetch a driver's current vehicle record. Returns the zero-valued
    /// record with `exists = false` if no vehicle was ever added.
    pub fn get_vehicle_info(&self, driver_id: DriverId) -> Result<VehicleRecord> {
        let state = self.state.read();
        state.require_driver(driver_id)?;
        Ok(state.vehicles.get(&driver_id).cloned().unwrap_or_default())
    }

    /// Fetch a driver's accident history in recording order. The
    /// returned vector is a snapshot, not a live view.
    pub fn get_accident_history(&self, driver_id: DriverId) -> Result<Vec<AccidentRecord>> {
        let state = self.state.read();
        state.require_driver(driver_id)?;
        Ok(state.accidents.get(&driver_id).cloned().unwrap_or_default())
    }

    /// Fetch profile, vehicle record, and accident history at a single
    /// instant.
    pub fn get_driver_data(&self, driver_id: DriverId) -> Result<DriverData> {
        let state = self.state.read();
        state.require_driver(driver_id)?;
        Ok(DriverData {
            profile: state.drivers[&driver_id].clone(),
            vehicle: state.vehicles.get(&driver_id).cloned().unwrap_or_default(),
            accidents: state.accidents.get(&driver_id).cloned().unwrap_or_default(),
        })
    }

    /// Serializable view of all tables for external persistence.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.read();
        RegistrySnapshot {
            owner: state.access.owner(),
            admins: state.access.admins().clone(),
            next_id: state.next_id,
            drivers: state.drivers.clone().into_iter().collect(),
            vehicles: state.vehicles.clone().into_iter().collect(),
            accidents: state.accidents.clone().into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> Identity {
        Identity::new([byte; 32])
    }

    fn driver(name: &str) -> DriverDetails {
        DriverDetails {
            name: name.to_string(),
            license_number: format!("LIC-{name}"),
            ..Default::default()
        }
    }

    fn vehicle(registration: &str) -> VehicleDetails {
        VehicleDetails {
            make: "Toyota".into(),
            model: "Corolla".into(),
            registration_number: registration.into(),
            ..Default::default()
        }
    }

    fn accident(location: &str) -> AccidentDetails {
        AccidentDetails {
            timestamp: "2026-01-01T00:00:00Z".into(),
            location: location.into(),
            case_status: "open".into(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_sequential_from_first() {
        let registry = Registry::new(id(1));
        for offset in 0..5u32 {
            let assigned = registry.add_driver(id(1), driver("d")).unwrap();
            assert_eq!(assigned, DriverId::new(FIRST_DRIVER_ID + offset));
        }
    }

    #[test]
    fn empty_fields_are_permitted() {
        let registry = Registry::new(id(1));
        let assigned = registry
            .add_driver(id(1), DriverDetails::default())
            .unwrap();
        let profile = registry.get_driver_info(assigned).unwrap();
        assert!(profile.exists);
        assert!(profile.name.is_empty());
    }

    #[test]
    fn unauthorized_writes_leave_state_unchanged() {
        let registry = Registry::new(id(1));
        let driver_id = registry.add_driver(id(1), driver("Alice")).unwrap();

        let stranger = id(9);
        assert_eq!(
            registry.add_driver(stranger, driver("Mallory")).unwrap_err(),
            RegistryError::Unauthorized { identity: stranger }
        );
        assert_eq!(
            registry
                .add_vehicle(stranger, driver_id, vehicle("REG1"))
                .unwrap_err(),
            RegistryError::Unauthorized { identity: stranger }
        );
        assert_eq!(
            registry
                .add_accident(stranger, driver_id, accident("NH48"))
                .unwrap_err(),
            RegistryError::Unauthorized { identity: stranger }
        );

        // The failed add_driver must not have consumed an id.
        let next = registry.add_driver(id(1), driver("Bob")).unwrap();
        assert_eq!(next, DriverId::new(FIRST_DRIVER_ID + 1));
        assert!(!registry.get_vehicle_info(driver_id).unwrap().exists);
        assert!(registry.get_accident_history(driver_id).unwrap().is_empty());
    }

    #[test]
    fn admin_can_write_until_revoked() {
        let owner = id(1);
        let admin = id(2);
        let registry = Registry::new(owner);

        registry.grant_admin(owner, admin).unwrap();
        let driver_id = registry.add_driver(admin, driver("Alice")).unwrap();
        registry
            .add_vehicle(admin, driver_id, vehicle("REG1"))
            .unwrap();

        registry.revoke_admin(owner, admin).unwrap();
        assert_eq!(
            registry.add_driver(admin, driver("Bob")).unwrap_err(),
            RegistryError::Unauthorized { identity: admin }
        );
    }

    #[test]
    fn vehicle_writes_replace() {
        let registry = Registry::new(id(1));
        let driver_id = registry.add_driver(id(1), driver("Alice")).unwrap();

        registry
            .add_vehicle(id(1), driver_id, vehicle("REG1"))
            .unwrap();
        registry
            .add_vehicle(id(1), driver_id, vehicle("REG2"))
            .unwrap();

        let record = registry.get_vehicle_info(driver_id).unwrap();
        assert!(record.exists);
        assert_eq!(record.registration_number, "REG2");
    }

    #[test]
    fn accidents_append_in_recording_order() {
        let registry = Registry::new(id(1));
        let driver_id = registry.add_driver(id(1), driver("Alice")).unwrap();

        for location in ["NH48", "Ring Road", "Outer Bypass"] {
            registry
                .add_accident(id(1), driver_id, accident(location))
                .unwrap();
        }

        let history = registry.get_accident_history(driver_id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].location, "NH48");
        assert_eq!(history[2].location, "Outer Bypass");
        assert!(history.iter().all(|record| record.exists));
    }

    #[test]
    fn records_require_existing_driver() {
        let registry = Registry::new(id(1));
        let missing = DriverId::new(FIRST_DRIVER_ID);

        assert!(!registry.driver_exists(missing));
        assert_eq!(
            registry
                .add_vehicle(id(1), missing, vehicle("REG1"))
                .unwrap_err(),
            RegistryError::DriverNotFound { driver_id: missing }
        );
        assert_eq!(
            registry
                .add_accident(id(1), missing, accident("NH48"))
                .unwrap_err(),
            RegistryError::DriverNotFound { driver_id: missing }
        );
        assert!(registry.get_driver_info(missing).is_err());
        assert!(registry.get_vehicle_info(missing).is_err());
        assert!(registry.get_accident_history(missing).is_err());
        assert!(registry.get_driver_data(missing).is_err());
    }

    #[test]
    fn driver_exists_is_permanent() {
        let registry = Registry::new(id(1));
        let driver_id = registry.add_driver(id(1), driver("Alice")).unwrap();
        assert!(registry.driver_exists(driver_id));
        // No delete operation exists; existence never flips back.
        assert!(registry.driver_exists(driver_id));
        assert!(!registry.driver_exists(DriverId::new(driver_id.as_u32() + 1)));
    }

    #[test]
    fn aggregate_read_matches_individual_reads() {
        let registry = Registry::new(id(1));
        let driver_id = registry.add_driver(id(1), driver("Alice")).unwrap();
        registry
            .add_vehicle(id(1), driver_id, vehicle("REG1"))
            .unwrap();
        registry
            .add_accident(id(1), driver_id, accident("NH48"))
            .unwrap();

        let data = registry.get_driver_data(driver_id).unwrap();
        assert_eq!(data.profile, registry.get_driver_info(driver_id).unwrap());
        assert_eq!(data.vehicle, registry.get_vehicle_info(driver_id).unwrap());
        assert_eq!(
            data.accidents,
            registry.get_accident_history(driver_id).unwrap()
        );
    }

    #[test]
    fn successful_writes_emit_events_in_order() {
        let owner = id(1);
        let registry = Registry::new(owner);
        let mut rx = registry.subscribe();

        registry.grant_admin(owner, id(2)).unwrap();
        let driver_id = registry.add_driver(owner, driver("Alice")).unwrap();
        registry
            .add_vehicle(owner, driver_id, vehicle("REG1"))
            .unwrap();
        registry
            .add_accident(owner, driver_id, accident("NH48"))
            .unwrap();
        registry.revoke_admin(owner, id(2)).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::AdminGranted { identity: id(2) }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::DriverAdded {
                driver_id,
                name: "Alice".into(),
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::VehicleAdded {
                driver_id,
                registration_number: "REG1".into(),
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::AccidentAdded {
                driver_id,
                location: "NH48".into(),
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RegistryEvent::AdminRevoked { identity: id(2) }
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(registry.event_stats().emitted, 5);
    }

    #[test]
    fn failed_writes_emit_nothing() {
        let registry = Registry::new(id(1));
        let mut rx = registry.subscribe();

        assert!(registry.add_driver(id(9), driver("Mallory")).is_err());
        assert!(registry.grant_admin(id(9), id(3)).is_err());
        assert!(registry
            .add_vehicle(id(1), DriverId::new(FIRST_DRIVER_ID), vehicle("REG1"))
            .is_err());

        assert!(rx.try_recv().is_err());
        assert_eq!(registry.event_stats().emitted, 0);
    }

    #[test]
    fn snapshot_round_trip_preserves_state() {
        let owner = id(1);
        let registry = Registry::new(owner);
        registry.grant_admin(owner, id(2)).unwrap();
        let driver_id = registry.add_driver(owner, driver("Alice")).unwrap();
        registry
            .add_vehicle(owner, driver_id, vehicle("REG1"))
            .unwrap();
        registry
            .add_accident(owner, driver_id, accident("NH48"))
            .unwrap();

        let snapshot = registry.snapshot();
        let restored = Registry::from_snapshot(snapshot.clone(), RegistryConfig::default());

        assert_eq!(restored.owner(), owner);
        assert!(restored.is_authorized_writer(id(2)));
        assert_eq!(
            restored.get_driver_info(driver_id).unwrap(),
            registry.get_driver_info(driver_id).unwrap()
        );
        assert_eq!(
            restored.get_vehicle_info(driver_id).unwrap(),
            registry.get_vehicle_info(driver_id).unwrap()
        );
        assert_eq!(
            restored.get_accident_history(driver_id).unwrap(),
            registry.get_accident_history(driver_id).unwrap()
        );

        // Id assignment continues where the snapshot left off.
        let next = restored.add_driver(owner, driver("Bob")).unwrap();
        assert_eq!(next, DriverId::new(FIRST_DRIVER_ID + 1));
        assert_eq!(restored.snapshot().next_id, snapshot.next_id + 1);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let registry = Registry::new(id(1));
        registry.add_driver(id(1), driver("Alice")).unwrap();

        let snapshot = registry.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RegistrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
