use serde::{Deserialize, Serialize};

/// Caller-supplied accident fields. The `timestamp` describes the event
/// itself and is opaque to the registry; ordering of the stored history
/// follows recording order, not this field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentDetails {
    pub timestamp: String,
    pub location: String,
    pub description: String,
    pub cause: String,
    pub case_status: String,
    pub claim_status: String,
    pub photo_ref: String,
    pub fir_number: String,
}

/// One entry in a driver's append-only accident history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRecord {
    pub timestamp: String,
    pub location: String,
    pub description: String,
    pub cause: String,
    pub case_status: String,
    pub claim_status: String,
    pub photo_ref: String,
    pub fir_number: String,
    pub exists: bool,
}

impl AccidentRecord {
    pub fn from_details(details: AccidentDetails) -> Self {
        Self {
            timestamp: details.timestamp,
            location: details.location,
            description: details.description,
            cause: details.cause,
            case_status: details.case_status,
            claim_status: details.claim_status,
            photo_ref: details.photo_ref,
            fir_number: details.fir_number,
            exists: true,
        }
    }
}
