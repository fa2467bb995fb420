//! Winter Garden Inquiry API
//!
//! HTTP surface of the intake form.
//!
//! # Endpoints
//!
//! ```text
//!  GET  /health                  liveness
//!  POST /api/lead                inquiry submission (JSON, urlencoded, multipart)
//!  GET  /api/public/locations    serviceable cities, publicly cacheable
//!  GET  /api-docs/openapi.json   OpenAPI document
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use intake_core::{Clock, SystemClock};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use config::ApiConfig;
pub use error::ApiError;
pub use models::*;

/// API state
#[derive(Clone)]
pub struct ApiState {
    pub config: ApiConfig,
    /// Source of "today" for lead-time checks
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Winter Garden Inquiry API",
        description = "Lead intake for made-to-order winter gardens",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::lead::submit_lead,
        routes::locations::list_locations,
    ),
    components(
        schemas(
            routes::health::HealthResponse, routes::health::BookingWindow,
            LeadSubmission, LeadResponse, AttachmentInfo, Location
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "lead", description = "Inquiry submission"),
        (name = "public", description = "Public, cacheable data")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/api/lead",
            post(routes::lead::submit_lead).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/public/locations", get(routes::locations::list_locations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
