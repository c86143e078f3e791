//! HTTP API Layer
//!
//! REST API for the bill analytics service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: thin request handlers delegating to `BillingAnalytics`
//! - **Middleware**: request logging
//! - **DTOs**: response bodies in the wire format clients expect
//! - **Error Handling**: every failure becomes `{error, message}` JSON
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/bills` | list bills with summary statistics |
//! | POST | `/api/bills` | insert a bill |
//! | GET | `/api/compare` | compare a bill with its peer group |
//! | GET | `/health` | liveness |
//! | GET | `/health/ready` | readiness (store reachable) |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(analytics);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_billing::BillingAnalytics;

use crate::middleware::request_logging_middleware;
use crate::handlers::{bills, compare, health};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub analytics: BillingAnalytics,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `analytics` - The analytics engine, already wired to its store
pub fn create_router(analytics: BillingAnalytics) -> Router {
    let state = AppState { analytics };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/bills", get(bills::list_bills).post(bills::create_bill))
        .route("/compare", get(compare::compare_bill))
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
