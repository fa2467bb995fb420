//! Serviceable locations

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::config::DEFAULT_CACHE_CONTROL;
use crate::models::Location;
use crate::ApiState;

/// List serviceable cities
#[utoipa::path(
    get,
    path = "/api/public/locations",
    responses(
        (status = 200, description = "Serviceable cities", body = [Location])
    ),
    tag = "public"
)]
pub async fn list_locations(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let locations: Vec<Location> = state
        .config
        .locations
        .iter()
        .map(|city| Location { city: city.clone() })
        .collect();

    let cache_control = HeaderValue::from_str(&state.config.cache_control)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CACHE_CONTROL));

    ([(header::CACHE_CONTROL, cache_control)], Json(locations))
}
