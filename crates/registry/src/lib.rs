//! Roadledger driver registry.
//!
//! A tamper-evident registry that maps sequential driver identifiers to
//! an immutable profile, one current vehicle record, and an append-only
//! accident history. Writes are gated by a two-tier privilege model
//! (a single immutable owner plus an owner-managed admin set); reads are
//! unrestricted. Every successful write emits a [`RegistryEvent`] on a
//! broadcast stream, after the mutation is committed.

pub mod access;
pub mod errors;
pub mod events;
pub mod registry;

pub use access::AccessControl;
pub use errors::*;
pub use events::{EventHub, EventStats};
pub use registry::{Registry, RegistryConfig};

pub use roadledger_types::RegistryEvent;
