//! Port adapters backed by PostgreSQL

pub mod bills;

pub use bills::PostgresBillStore;
