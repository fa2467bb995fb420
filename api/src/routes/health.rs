//! Health check endpoint
//!
//! Besides liveness, reports the booking window the service currently
//! enforces so a deploy with the wrong clock or lead-time config shows up.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::NaiveDate;
use intake_core::DateAvailability;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::ApiState;

/// Booking window derived from today and the lead-time rules
#[derive(Serialize, ToSchema)]
pub struct BookingWindow {
    #[schema(value_type = String, format = Date)]
    pub today: NaiveDate,
    /// First date accepted with the express warning
    #[schema(value_type = String, format = Date)]
    pub earliest_express: NaiveDate,
    /// First date accepted without warning
    #[schema(value_type = String, format = Date)]
    pub earliest_standard: NaiveDate,
    pub max_attachments: usize,
    pub max_attachment_bytes: u64,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub booking: BookingWindow,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let today = state.clock.today();
    let availability = DateAvailability::new(today, state.config.lead_time);

    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        booking: BookingWindow {
            today,
            earliest_express: availability.express_min_date(),
            earliest_standard: availability.min_allowed_date(),
            max_attachments: state.config.attachments.max_files,
            max_attachment_bytes: state.config.attachments.max_file_size,
        },
    })
}
