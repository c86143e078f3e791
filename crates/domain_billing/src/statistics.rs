//! Cost-per-unit statistics
//!
//! Pure aggregation over per-bill ratios. Stores that cannot push these
//! aggregations down to their query engine compute them with the functions
//! here, so both paths agree on the arithmetic:
//!
//! - division follows IEEE-754 (`x / 0` is ±Infinity, `0 / 0` is NaN)
//! - averages are the unweighted mean of ratios
//! - min/max skip NaN unless every ratio is NaN

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cost of one unit for a single bill
pub fn cost_per_unit(total_amount: f64, units_consumed: f64) -> f64 {
    total_amount / units_consumed
}

/// Unweighted arithmetic mean, `None` for an empty input
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_u64), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Collection-wide totals reported by the summary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostSummary {
    /// Number of bills in the collection
    pub total_bills: u64,
    /// Mean cost-per-unit over every bill, 0 when there are none
    pub overall_average_cost: f64,
}

impl CostSummary {
    /// Builds the summary from per-bill costs
    pub fn from_costs<I>(costs: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let costs: Vec<f64> = costs.into_iter().collect();
        Self {
            total_bills: costs.len() as u64,
            overall_average_cost: mean(costs).unwrap_or(0.0),
        }
    }
}

/// Number of bills recorded against one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCount {
    pub name: String,
    pub value: u64,
}

/// Groups provider names and counts each group
///
/// Output is ordered by provider name; callers must not rely on it.
pub fn count_by_provider<'a, I>(providers: I) -> Vec<ProviderCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for provider in providers {
        *counts.entry(provider).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, value)| ProviderCount {
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Cost-per-unit figures over a peer group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeerStatistics {
    pub average_cost_per_unit: f64,
    pub min_cost_per_unit: f64,
    pub max_cost_per_unit: f64,
    pub count: u64,
}

impl PeerStatistics {
    /// Aggregates per-bill costs, `None` when the group is empty
    pub fn from_costs<I>(costs: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let costs: Vec<f64> = costs.into_iter().collect();
        let average = mean(costs.iter().copied())?;
        let min = costs.iter().copied().reduce(f64::min)?;
        let max = costs.iter().copied().reduce(f64::max)?;

        Some(Self {
            average_cost_per_unit: average,
            min_cost_per_unit: min,
            max_cost_per_unit: max,
            count: costs.len() as u64,
        })
    }
}
