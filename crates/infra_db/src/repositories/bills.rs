//! Bill repository implementation
//!
//! SQL for the `bills` table. Bills are append-only. Cost aggregates are not
//! computed here: PostgreSQL float8 arithmetic raises on overflow where
//! IEEE-754 saturates to Infinity, so the repository only hands back the
//! amounts and units and the adapter aggregates them in Rust.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for the bills collection
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    /// Creates a new BillRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one bill and returns its id
    pub async fn insert(&self, bill: NewBillRow) -> Result<Uuid, DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO bills (
                id, provider, city, units_consumed, total_amount, attributes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(bill.id)
        .bind(bill.provider)
        .bind(bill.city)
        .bind(bill.units_consumed)
        .bind(bill.total_amount)
        .bind(Json(bill.attributes))
        .bind(bill.created_at)
        .execute(&self.pool)
        .await?;

        debug!(bill_id = %bill.id, "Inserted bill row");
        Ok(bill.id)
    }

    /// Lists every bill in insertion order
    pub async fn list_all(&self) -> Result<Vec<BillRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(
            r#"
            SELECT id, provider, city, units_consumed, total_amount, attributes, created_at
            FROM bills
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Amount and units of every bill
    pub async fn cost_inputs(&self) -> Result<Vec<CostInputRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CostInputRow>(
            r#"
            SELECT total_amount, units_consumed
            FROM bills
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts bills grouped by provider
    pub async fn provider_counts(&self) -> Result<Vec<ProviderCountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProviderCountRow>(
            r#"
            SELECT provider AS name, COUNT(*) AS value
            FROM bills
            GROUP BY provider
            ORDER BY provider
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Amount and units of the bills matching provider and city exactly
    pub async fn peer_cost_inputs(
        &self,
        provider: &str,
        city: &str,
    ) -> Result<Vec<CostInputRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CostInputRow>(
            r#"
            SELECT total_amount, units_consumed
            FROM bills
            WHERE provider = $1 AND city = $2
            "#,
        )
        .bind(provider)
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Checks the database answers
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Database row for a bill
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BillRow {
    pub id: Uuid,
    pub provider: String,
    pub city: Option<String>,
    pub units_consumed: f64,
    pub total_amount: f64,
    pub attributes: Json<Value>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a bill
#[derive(Debug, Clone)]
pub struct NewBillRow {
    pub id: Uuid,
    pub provider: String,
    pub city: Option<String>,
    pub units_consumed: f64,
    pub total_amount: f64,
    pub attributes: Value,
    pub created_at: DateTime<Utc>,
}

/// The two columns a cost-per-unit is derived from
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct CostInputRow {
    pub total_amount: f64,
    pub units_consumed: f64,
}

/// Bills per provider
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProviderCountRow {
    pub name: String,
    pub value: i64,
}
