use crate::driver::DriverId;
use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// Notification emitted after every successful registry write.
///
/// Exactly one event fires per successful call, strictly after the state
/// mutation it describes is committed; failed calls emit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    AdminGranted {
        identity: Identity,
    },
    AdminRevoked {
        identity: Identity,
    },
    DriverAdded {
        driver_id: DriverId,
        name: String,
    },
    VehicleAdded {
        driver_id: DriverId,
        registration_number: String,
    },
    AccidentAdded {
        driver_id: DriverId,
        location: String,
    },
}
