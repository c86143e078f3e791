//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain row
//! structs. They know nothing of the domain port; the adapters do the
//! translation.

pub mod bills;

pub use bills::BillRepository;
