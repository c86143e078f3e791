//! Billing Domain - Utility Bill Analytics
//!
//! This crate holds the analytics over a collection of utility bills: each
//! bill records a provider, a city, the units consumed and the amount
//! charged. Everything the service reports is derived from one ratio:
//!
//! ```text
//! costPerUnit = totalAmount / unitsConsumed
//! ```
//!
//! # Operations
//!
//! - **Summarize**: every bill, the bill count, the mean cost-per-unit and
//!   the number of bills per provider
//! - **Insert**: validate and coerce a caller-supplied document, then append it
//! - **Compare**: a caller's cost-per-unit against the bills sharing its
//!   provider and city
//!
//! Averages are unweighted means of per-bill ratios, never the ratio of
//! summed amounts to summed units.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_billing::{BillingAnalytics, ComparisonRequest};
//!
//! let analytics = BillingAnalytics::new(Arc::new(store));
//! let report = analytics
//!     .compare(ComparisonRequest::new("PowerCo", "Springfield", "120", "42.50"))
//!     .await?;
//! ```

pub mod analytics;
pub mod bill;
pub mod coercion;
pub mod error;
pub mod ports;
pub mod statistics;
pub mod validation;

pub use analytics::{BillingAnalytics, BillingOverview, ComparisonReport, InsertedBill};
pub use bill::{BillRecord, NewBill};
pub use error::{BillingError, StoreOperation};
pub use ports::BillStore;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockBillStore;
pub use statistics::{CostSummary, PeerStatistics, ProviderCount};
pub use validation::{ComparisonRequest, PeerQuery, RequiredFieldPolicy};
