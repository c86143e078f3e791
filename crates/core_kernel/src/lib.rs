//! Core Kernel - Foundational types for the bill analytics service
//!
//! This crate provides the building blocks shared by the domain, storage and
//! API layers:
//! - Strongly-typed identifiers
//! - The port error type every storage adapter reports through
//! - Marker and health-check traits for adapters

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::BillId;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
