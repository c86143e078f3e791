//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! bill analytics test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built bills and request documents
//! - `builders`: Builder for bill candidate documents
//! - `database`: PostgreSQL test containers
//! - `assertions`: Assertions that understand NaN and Infinity costs
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
