use crate::accident::AccidentRecord;
use crate::vehicle::VehicleRecord;
use serde::{Deserialize, Serialize};

/// First identifier handed out by the registry. Identifiers are assigned
/// sequentially from here and never reused.
pub const FIRST_DRIVER_ID: u32 = 100_000;

/// Sequential driver identifier assigned by the registry.
///
/// Never caller-supplied: the registry mints the next value on every
/// successful driver registration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DriverId(pub u32);

impl DriverId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied profile fields for a driver registration.
///
/// Field contents are not validated; callers are trusted to supply
/// well-formed strings and empty strings are permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverDetails {
    pub name: String,
    pub date_of_birth: String,
    pub mobile: String,
    pub email: String,
    pub license_number: String,
    pub address: String,
    pub blood_group: String,
    pub vehicle_type: String,
    pub image_ref: String,
}

/// Persistent driver profile, created exactly once per [`DriverId`] and
/// immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverProfile {
    pub id: DriverId,
    pub name: String,
    pub date_of_birth: String,
    pub mobile: String,
    pub email: String,
    pub license_number: String,
    pub address: String,
    pub blood_group: String,
    pub vehicle_type: String,
    pub image_ref: String,
    /// True for every created profile; the `Default` profile is the
    /// absent placeholder with `exists = false`.
    pub exists: bool,
}

impl DriverProfile {
    /// Materialize a profile from caller-supplied details.
    pub fn from_details(id: DriverId, details: DriverDetails) -> Self {
        Self {
            id,
            name: details.name,
            date_of_birth: details.date_of_birth,
            mobile: details.mobile,
            email: details.email,
            license_number: details.license_number,
            address: details.address,
            blood_group: details.blood_group,
            vehicle_type: details.vehicle_type,
            image_ref: details.image_ref,
            exists: true,
        }
    }
}

/// Aggregate read of everything the registry holds for one driver,
/// taken at a single instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverData {
    pub profile: DriverProfile,
    pub vehicle: VehicleRecord,
    pub accidents: Vec<AccidentRecord>,
}
