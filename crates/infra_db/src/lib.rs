//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the bill analytics service using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`repositories::BillRepository`]
//! owns the SQL, and [`adapters::PostgresBillStore`] implements the domain's
//! `BillStore` port on top of it, translating rows into domain types and
//! database errors into port errors.
//!
//! Counts and grouping run in PostgreSQL. Cost-per-unit averages and
//! min/max are computed in Rust from the stored amounts and units, since
//! float8 arithmetic in PostgreSQL raises on overflow instead of saturating.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PostgresBillStore};
//!
//! let pool = create_pool(DatabaseConfig::new(database_url)).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresBillStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use repositories::BillRepository;
pub use adapters::PostgresBillStore;
