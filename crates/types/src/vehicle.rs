use serde::{Deserialize, Serialize};

/// Caller-supplied vehicle fields. Not validated beyond existence of the
/// target driver; writing twice for the same driver replaces the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub make: String,
    pub model: String,
    pub registration_number: String,
    pub chassis_number: String,
    pub engine_number: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub insurance_valid_until: String,
    pub owner_name: String,
}

/// Current vehicle record for a driver. At most one per driver; a new
/// write overwrites the previous record (last-write-wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub registration_number: String,
    pub chassis_number: String,
    pub engine_number: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub insurance_valid_until: String,
    pub owner_name: String,
    /// False only for the `Default` placeholder returned when an existing
    /// driver has no vehicle on record.
    pub exists: bool,
}

impl VehicleRecord {
    pub fn from_details(details: VehicleDetails) -> Self {
        Self {
            make: details.make,
            model: details.model,
            registration_number: details.registration_number,
            chassis_number: details.chassis_number,
            engine_number: details.engine_number,
            insurance_provider: details.insurance_provider,
            insurance_policy_number: details.insurance_policy_number,
            insurance_valid_until: details.insurance_valid_until,
            owner_name: details.owner_name,
            exists: true,
        }
    }
}
