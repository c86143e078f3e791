//! Billing Domain Ports
//!
//! The `BillStore` trait is everything the analytics engine needs from
//! persistence. The engine receives it as `Arc<dyn BillStore>` at
//! construction, so any adapter can stand behind it:
//!
//! - **PostgreSQL Adapter**: `infra_db::adapters::PostgresBillStore`
//! - **Mock Adapter**: [`mock::MockBillStore`], in-memory, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_billing::{BillStore, BillingAnalytics};
//!
//! let store: Arc<dyn BillStore> = Arc::new(PostgresBillStore::new(pool));
//! let analytics = BillingAnalytics::new(store);
//! ```
//!
//! Stores decide their own consistency: a bill appended by one request may
//! or may not be visible to a concurrent summary.

use async_trait::async_trait;

use core_kernel::{BillId, DomainPort, HealthCheckable, PortError};

use crate::bill::{BillRecord, NewBill};
use crate::statistics::{CostSummary, PeerStatistics, ProviderCount};

/// Persistence port for bills
///
/// Append-only: there is no update or delete. Aggregations are part of the
/// port so stores with a query engine can compute them server-side; they
/// must follow the arithmetic in [`crate::statistics`].
#[async_trait]
pub trait BillStore: DomainPort + HealthCheckable {
    /// Appends one bill and returns its generated identifier
    async fn insert_one(&self, bill: NewBill) -> Result<BillId, PortError>;

    /// Returns every stored bill in insertion order
    async fn find_all(&self) -> Result<Vec<BillRecord>, PortError>;

    /// Counts bills and averages their cost-per-unit
    async fn summary_statistics(&self) -> Result<CostSummary, PortError>;

    /// Counts bills per provider
    async fn provider_counts(&self) -> Result<Vec<ProviderCount>, PortError>;

    /// Aggregates the bills matching `provider` and `city` exactly
    ///
    /// Returns `None` when no bill matches.
    async fn peer_statistics(
        &self,
        provider: &str,
        city: &str,
    ) -> Result<Option<PeerStatistics>, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    use crate::statistics::count_by_provider;

    /// In-memory mock implementation of BillStore
    ///
    /// Clones share the same bills, so a test can keep a handle while the
    /// engine owns another.
    #[derive(Debug, Clone, Default)]
    pub struct MockBillStore {
        bills: Arc<RwLock<Vec<BillRecord>>>,
        failing: Arc<AtomicBool>,
    }

    impl MockBillStore {
        /// Creates an empty mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with bills for testing
        pub async fn with_bills(bills: Vec<NewBill>) -> Self {
            let store = Self::new();
            {
                let mut stored = store.bills.write().await;
                for bill in bills {
                    stored.push(bill.into_record(BillId::new_v7()));
                }
            }
            store
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Returns a copy of everything stored
        pub async fn snapshot(&self) -> Vec<BillRecord> {
            self.bills.read().await.clone()
        }

        /// Number of stored bills
        pub async fn len(&self) -> usize {
            self.bills.read().await.len()
        }

        /// Whether the store holds no bills
        pub async fn is_empty(&self) -> bool {
            self.bills.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(PortError::connection("mock store is unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockBillStore {}

    #[async_trait]
    impl HealthCheckable for MockBillStore {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = match self.check_available() {
                Ok(()) => (AdapterHealth::Healthy, None),
                Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
            };
            HealthCheckResult {
                adapter_id: "mock-bill-store".to_string(),
                status,
                latency_ms: 0,
                message,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl BillStore for MockBillStore {
        async fn insert_one(&self, bill: NewBill) -> Result<BillId, PortError> {
            self.check_available()?;
            let id = BillId::new_v7();
            self.bills.write().await.push(bill.into_record(id));
            Ok(id)
        }

        async fn find_all(&self) -> Result<Vec<BillRecord>, PortError> {
            self.check_available()?;
            Ok(self.snapshot().await)
        }

        async fn summary_statistics(&self) -> Result<CostSummary, PortError> {
            self.check_available()?;
            let bills = self.bills.read().await;
            Ok(CostSummary::from_costs(bills.iter().map(BillRecord::cost_per_unit)))
        }

        async fn provider_counts(&self) -> Result<Vec<ProviderCount>, PortError> {
            self.check_available()?;
            let bills = self.bills.read().await;
            Ok(count_by_provider(bills.iter().map(|b| b.provider.as_str())))
        }

        async fn peer_statistics(
            &self,
            provider: &str,
            city: &str,
        ) -> Result<Option<PeerStatistics>, PortError> {
            self.check_available()?;
            let bills = self.bills.read().await;
            Ok(PeerStatistics::from_costs(
                bills
                    .iter()
                    .filter(|b| b.is_peer_of(provider, city))
                    .map(BillRecord::cost_per_unit),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBillStore;
    use super::*;

    #[tokio::test]
    async fn test_mock_insert_and_find() {
        let store = MockBillStore::new();
        let id = store
            .insert_one(NewBill::new("PowerCo", Some("Springfield".into()), 10.0, 100.0))
            .await
            .unwrap();

        let bills = store.find_all().await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, id);
        assert_eq!(bills[0].provider, "PowerCo");
    }

    #[tokio::test]
    async fn test_mock_peer_statistics() {
        let store = MockBillStore::with_bills(vec![
            NewBill::new("A", Some("X".into()), 10.0, 100.0),
            NewBill::new("A", Some("X".into()), 20.0, 300.0),
            NewBill::new("A", Some("Y".into()), 1.0, 1000.0),
            NewBill::new("B", Some("X".into()), 1.0, 1000.0),
        ])
        .await;

        let stats = store.peer_statistics("A", "X").await.unwrap().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min_cost_per_unit, 10.0);
        assert_eq!(stats.max_cost_per_unit, 15.0);

        assert!(store.peer_statistics("A", "Z").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_failing_mode() {
        let store = MockBillStore::new();
        store.set_failing(true);

        assert!(store.find_all().await.unwrap_err().is_connection());
        assert!(!store.health_check().await.is_operational());

        store.set_failing(false);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
