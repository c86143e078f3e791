//! Billing analytics engine
//!
//! `BillingAnalytics` is stateless apart from the injected store handle and
//! the required-field policy; one instance is shared by every request.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use core_kernel::BillId;

use crate::bill::{BillRecord, NewBill};
use crate::error::{BillingError, StoreOperation};
use crate::ports::BillStore;
use crate::statistics::{cost_per_unit, CostSummary, PeerStatistics, ProviderCount};
use crate::validation::{ComparisonRequest, RequiredFieldPolicy};

/// Message returned when a comparison found peers
pub const ANALYSIS_COMPLETE: &str = "Analysis complete";
/// Message returned when a comparison found no peers
pub const NOT_ENOUGH_DATA: &str = "Not enough data for comparison";

/// Everything stored, with collection-wide statistics
#[derive(Debug, Clone, PartialEq)]
pub struct BillingOverview {
    pub bills: Vec<BillRecord>,
    pub summary: CostSummary,
    pub provider_counts: Vec<ProviderCount>,
}

/// Outcome of a successful insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedBill {
    pub id: BillId,
}

/// A caller's cost-per-unit set against its peer group
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub message: &'static str,
    /// `amount / units`; NaN or Infinity pass through unchanged
    pub user_cost_per_unit: f64,
    /// `None` when no stored bill shares the provider and city
    pub comparison: Option<PeerStatistics>,
}

impl ComparisonReport {
    /// Whether any peers were found
    pub fn has_peers(&self) -> bool {
        self.comparison.is_some()
    }
}

/// The analytics engine over an injected bill store
#[derive(Clone)]
pub struct BillingAnalytics {
    store: Arc<dyn BillStore>,
    policy: RequiredFieldPolicy,
}

impl std::fmt::Debug for BillingAnalytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingAnalytics")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl BillingAnalytics {
    /// Creates an engine using the default `Truthy` required-field policy
    pub fn new(store: Arc<dyn BillStore>) -> Self {
        Self {
            store,
            policy: RequiredFieldPolicy::default(),
        }
    }

    /// Sets the required-field policy applied by [`Self::insert`]
    pub fn with_policy(mut self, policy: RequiredFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The policy applied to inserts
    pub fn policy(&self) -> RequiredFieldPolicy {
        self.policy
    }

    /// The underlying store, for health checks
    pub fn store(&self) -> &Arc<dyn BillStore> {
        &self.store
    }

    /// Lists every bill with collection-wide statistics
    ///
    /// The three store reads run concurrently; the first failure aborts the
    /// whole summary.
    ///
    /// # Errors
    ///
    /// `BillingError::Storage` with `StoreOperation::Retrieve`.
    #[instrument(skip(self))]
    pub async fn summarize(&self) -> Result<BillingOverview, BillingError> {
        let (bills, summary, provider_counts) = tokio::try_join!(
            self.store.find_all(),
            self.store.summary_statistics(),
            self.store.provider_counts(),
        )
        .map_err(|e| {
            error!(error = %e, "Failed to read bills for summary");
            BillingError::storage(StoreOperation::Retrieve)(e)
        })?;

        debug!(
            total_bills = summary.total_bills,
            providers = provider_counts.len(),
            "Summarized bills"
        );

        Ok(BillingOverview {
            bills,
            summary,
            provider_counts,
        })
    }

    /// Validates, coerces and appends one bill
    ///
    /// # Errors
    ///
    /// - `BillingError::MissingField` if a required field is missing; the
    ///   store is not touched
    /// - `BillingError::Storage` with `StoreOperation::Save`
    #[instrument(skip(self, candidate))]
    pub async fn insert(
        &self,
        candidate: &serde_json::Value,
    ) -> Result<InsertedBill, BillingError> {
        let bill = NewBill::from_candidate(candidate, self.policy)?;

        let id = self.store.insert_one(bill).await.map_err(|e| {
            error!(error = %e, "Failed to save bill");
            BillingError::storage(StoreOperation::Save)(e)
        })?;

        debug!(bill_id = %id, "Saved bill");
        Ok(InsertedBill { id })
    }

    /// Compares a caller's bill with the stored bills for the same provider and city
    ///
    /// The caller's cost-per-unit is computed before the peer lookup and is
    /// returned whether or not peers exist.
    ///
    /// # Errors
    ///
    /// - `BillingError::MissingParameter` if any parameter is absent or empty
    /// - `BillingError::Storage` with `StoreOperation::Analyze`
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        request: ComparisonRequest,
    ) -> Result<ComparisonReport, BillingError> {
        let query = request.validate()?;
        let user_cost_per_unit = cost_per_unit(query.amount, query.units);

        let comparison = self
            .store
            .peer_statistics(&query.provider, &query.city)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to aggregate peer group");
                BillingError::storage(StoreOperation::Analyze)(e)
            })?;

        let message = if comparison.is_some() {
            ANALYSIS_COMPLETE
        } else {
            NOT_ENOUGH_DATA
        };

        debug!(
            provider = %query.provider,
            city = %query.city,
            peers = comparison.map(|c| c.count).unwrap_or(0),
            "Compared bill with peer group"
        );

        Ok(ComparisonReport {
            message,
            user_cost_per_unit,
            comparison,
        })
    }
}
