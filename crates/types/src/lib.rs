//! Core data types for the Roadledger driver registry.
//!
//! Defines the opaque caller [`Identity`], the sequential [`DriverId`],
//! the persistent record types (driver profile, vehicle record, accident
//! record), the registry event stream payloads, and the serializable
//! snapshot of the registry tables.

pub mod accident;
pub mod driver;
pub mod event;
pub mod identity;
pub mod snapshot;
pub mod vehicle;

pub use accident::*;
pub use driver::*;
pub use event::*;
pub use identity::*;
pub use snapshot::*;
pub use vehicle::*;
