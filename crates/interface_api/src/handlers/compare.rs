//! Comparison handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use domain_billing::ComparisonRequest;

use crate::{AppState, error::ApiError};
use crate::dto::compare::CompareResponse;

/// Compare a bill with stored bills from the same provider and city
pub async fn compare_bill(
    State(state): State<AppState>,
    query: Result<Query<ComparisonRequest>, QueryRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Query(request) = query?;
    let report = state.analytics.compare(request).await?;
    Ok(Json(report.into()))
}
