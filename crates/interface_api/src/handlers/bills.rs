//! Bill handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{AppState, error::ApiError};
use crate::dto::bills::*;

/// List every bill with summary statistics
pub async fn list_bills(
    State(state): State<AppState>,
) -> Result<Json<BillsResponse>, ApiError> {
    let overview = state.analytics.summarize().await?;
    Ok(Json(overview.into()))
}

/// Insert a bill
///
/// The body is any JSON document; which fields are required is decided by
/// the analytics engine, not by the extractor.
pub async fn create_bill(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<InsertBillResponse>), ApiError> {
    let Json(candidate) = payload?;
    let inserted = state.analytics.insert(&candidate).await?;
    Ok((StatusCode::CREATED, Json(inserted.into())))
}
