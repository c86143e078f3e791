//! Bill listing and insert DTOs

use serde::Serialize;

use core_kernel::BillId;
use domain_billing::{BillRecord, BillingOverview, CostSummary, InsertedBill, ProviderCount};

/// Message returned after a successful insert
pub const BILL_SAVED: &str = "Bill saved successfully";

/// Response for `GET /api/bills`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsResponse {
    pub bills: Vec<BillRecord>,
    pub summary: SummaryResponse,
    pub provider_counts: Vec<ProviderCountResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_bills: u64,
    pub overall_average_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct ProviderCountResponse {
    pub name: String,
    pub value: u64,
}

/// Response for `POST /api/bills`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertBillResponse {
    pub message: String,
    pub inserted_id: BillId,
}

impl From<CostSummary> for SummaryResponse {
    fn from(summary: CostSummary) -> Self {
        Self {
            total_bills: summary.total_bills,
            overall_average_cost: summary.overall_average_cost,
        }
    }
}

impl From<ProviderCount> for ProviderCountResponse {
    fn from(count: ProviderCount) -> Self {
        Self {
            name: count.name,
            value: count.value,
        }
    }
}

impl From<BillingOverview> for BillsResponse {
    fn from(overview: BillingOverview) -> Self {
        Self {
            bills: overview.bills,
            summary: overview.summary.into(),
            provider_counts: overview.provider_counts.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<InsertedBill> for InsertBillResponse {
    fn from(inserted: InsertedBill) -> Self {
        Self {
            message: BILL_SAVED.to_string(),
            inserted_id: inserted.id,
        }
    }
}
