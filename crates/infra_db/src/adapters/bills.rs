//! PostgreSQL Bill Store Adapter
//!
//! Implements the billing domain's `BillStore` port on top of
//! [`BillRepository`]. The adapter:
//!
//! - converts domain bills into insert rows and rows back into records
//! - narrows SQL counts to the domain's unsigned counts
//! - aggregates cost-per-unit with `domain_billing::statistics`, so
//!   overflow saturates to Infinity exactly as it does in memory
//! - translates database errors into port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_billing::{BillStore, BillingAnalytics};
//! use infra_db::PostgresBillStore;
//!
//! let store: Arc<dyn BillStore> = Arc::new(PostgresBillStore::new(pool));
//! let analytics = BillingAnalytics::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, BillId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_billing::statistics::cost_per_unit;
use domain_billing::{BillRecord, BillStore, CostSummary, NewBill, PeerStatistics, ProviderCount};

use crate::error::DatabaseError;
use crate::repositories::bills::{BillRepository, BillRow, CostInputRow, NewBillRow};

const ADAPTER_ID: &str = "postgres-bill-store";

/// PostgreSQL-backed implementation of the BillStore port
///
/// # Error Handling
///
/// - connection and pool failures -> `PortError::Connection`
/// - malformed stored attributes -> `PortError::Transformation`
/// - everything else -> `PortError::Query`
#[derive(Debug, Clone)]
pub struct PostgresBillStore {
    repository: BillRepository,
}

impl PostgresBillStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BillRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresBillStore {}

#[async_trait]
impl HealthCheckable for PostgresBillStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BillStore for PostgresBillStore {
    #[instrument(skip(self, bill), fields(provider = %bill.provider))]
    async fn insert_one(&self, bill: NewBill) -> Result<BillId, PortError> {
        let id = BillId::new_v7();
        let row = NewBillRow {
            id: id.into(),
            provider: bill.provider,
            city: bill.city,
            units_consumed: bill.units_consumed,
            total_amount: bill.total_amount,
            attributes: Value::Object(bill.attributes),
            created_at: Utc::now(),
        };

        self.repository.insert(row).await.map_err(db_to_port_error)?;
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<BillRecord>, PortError> {
        let rows = self.repository.list_all().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Fetched bills");
        rows.into_iter().map(row_to_record).collect()
    }

    #[instrument(skip(self))]
    async fn summary_statistics(&self) -> Result<CostSummary, PortError> {
        let rows = self.repository.cost_inputs().await.map_err(db_to_port_error)?;
        Ok(CostSummary::from_costs(costs(&rows)))
    }

    #[instrument(skip(self))]
    async fn provider_counts(&self) -> Result<Vec<ProviderCount>, PortError> {
        let rows = self
            .repository
            .provider_counts()
            .await
            .map_err(db_to_port_error)?;

        Ok(rows
            .into_iter()
            .map(|r| ProviderCount {
                name: r.name,
                value: to_count(r.value),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn peer_statistics(
        &self,
        provider: &str,
        city: &str,
    ) -> Result<Option<PeerStatistics>, PortError> {
        let rows = self
            .repository
            .peer_cost_inputs(provider, city)
            .await
            .map_err(db_to_port_error)?;

        debug!(count = rows.len(), "Fetched peer group");
        Ok(PeerStatistics::from_costs(costs(&rows)))
    }
}

/// Converts repository errors to port errors
fn db_to_port_error(e: DatabaseError) -> PortError {
    if e.is_connection_error() {
        return PortError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        };
    }
    PortError::Query {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Per-bill costs, with the same IEEE-754 division the domain uses
fn costs(rows: &[CostInputRow]) -> impl Iterator<Item = f64> + '_ {
    rows.iter()
        .map(|r| cost_per_unit(r.total_amount, r.units_consumed))
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Converts a bill row to a domain record
fn row_to_record(row: BillRow) -> Result<BillRecord, PortError> {
    let attributes = match row.attributes.0 {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(PortError::transformation(format!(
                "bill {} has non-object attributes: {}",
                row.id, other
            )))
        }
    };

    Ok(BillRecord {
        id: BillId::from(row.id),
        provider: row.provider,
        city: row.city,
        units_consumed: row.units_consumed,
        total_amount: row.total_amount,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn row(attributes: Value) -> BillRow {
        BillRow {
            id: Uuid::now_v7(),
            provider: "PowerCo".to_string(),
            city: Some("Springfield".to_string()),
            units_consumed: 10.0,
            total_amount: 25.0,
            attributes: Json(attributes),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_record() {
        let source = row(json!({"meter": "M-7"}));
        let id = source.id;
        let record = row_to_record(source).unwrap();

        assert_eq!(*record.id.as_uuid(), id);
        assert_eq!(record.cost_per_unit(), 2.5);
        assert_eq!(record.attributes.get("meter"), Some(&json!("M-7")));
    }

    #[test]
    fn test_row_with_bad_attributes() {
        let err = row_to_record(row(json!([1, 2, 3]))).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));

        assert!(row_to_record(row(Value::Null)).unwrap().attributes.is_empty());
    }

    fn inputs(pairs: &[(f64, f64)]) -> Vec<CostInputRow> {
        pairs
            .iter()
            .map(|&(total_amount, units_consumed)| CostInputRow {
                total_amount,
                units_consumed,
            })
            .collect()
    }

    #[test]
    fn test_empty_peer_group_is_none() {
        assert!(PeerStatistics::from_costs(costs(&[])).is_none());

        let stats = PeerStatistics::from_costs(costs(&inputs(&[(100.0, 10.0), (300.0, 20.0)])))
            .unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_cost_per_unit, 12.5);
    }

    #[test]
    fn test_extreme_costs_do_not_overflow() {
        let rows = inputs(&[(1e160, 1.0), (3e160, 1.0)]);
        let summary = CostSummary::from_costs(costs(&rows));
        assert_eq!(summary.total_bills, 2);
        assert_eq!(summary.overall_average_cost, 2e160);

        let stats = PeerStatistics::from_costs(costs(&rows)).unwrap();
        assert_eq!(stats.min_cost_per_unit, 1e160);
        assert_eq!(stats.max_cost_per_unit, 3e160);

        let saturated: Vec<f64> = costs(&inputs(&[(1e300, 1e-300), (0.0, 0.0)])).collect();
        assert_eq!(saturated[0], f64::INFINITY);
        assert!(saturated[1].is_nan());
    }

    #[test]
    fn test_error_translation() {
        assert!(db_to_port_error(DatabaseError::from(sqlx::Error::PoolTimedOut)).is_connection());
        let refused = DatabaseError::ConnectionFailed("refused".into());
        assert!(db_to_port_error(refused).is_connection());
        assert!(matches!(
            db_to_port_error(DatabaseError::from(sqlx::Error::RowNotFound)),
            PortError::Query { .. }
        ));
    }
}
