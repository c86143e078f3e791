//! Comparison DTOs

use serde::Serialize;

use domain_billing::{ComparisonReport, PeerStatistics};

/// Response for `GET /api/compare`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub message: String,
    pub user_cost_per_unit: f64,
    /// `null` when no peers were found
    pub comparison: Option<PeerComparison>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerComparison {
    pub average_cost_per_unit: f64,
    pub min_cost_per_unit: f64,
    pub max_cost_per_unit: f64,
    pub count: u64,
}

impl From<PeerStatistics> for PeerComparison {
    fn from(stats: PeerStatistics) -> Self {
        Self {
            average_cost_per_unit: stats.average_cost_per_unit,
            min_cost_per_unit: stats.min_cost_per_unit,
            max_cost_per_unit: stats.max_cost_per_unit,
            count: stats.count,
        }
    }
}

impl From<ComparisonReport> for CompareResponse {
    fn from(report: ComparisonReport) -> Self {
        Self {
            message: report.message.to_string(),
            user_cost_per_unit: report.user_cost_per_unit,
            comparison: report.comparison.map(Into::into),
        }
    }
}
