//! Error types for the driver registry.

use roadledger_types::{DriverId, Identity};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unauthorized: {identity} lacks the required privilege")]
    Unauthorized { identity: Identity },

    #[error("invalid identity: the zero identity cannot be used for admin management")]
    InvalidIdentity,

    #[error("driver not found: {driver_id}")]
    DriverNotFound { driver_id: DriverId },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
