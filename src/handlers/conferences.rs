use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;

use crate::config::{load_conferences, AppConfig};
use crate::models::EnrichedConference;
use crate::utils::enrich_conferences;

/// Load the data file and enrich it against the current local time.
///
/// Shared by the JSON and HTML handlers; any failure is logged and mapped to 500.
pub fn current_conferences(config: &AppConfig) -> Result<Vec<EnrichedConference>, StatusCode> {
    let records = load_conferences(&config.base_dir).map_err(|e| {
        tracing::error!("Failed to load conferences: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    enrich_conferences(records, Local::now().naive_local()).map_err(|e| {
        tracing::error!("Failed to enrich conferences: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[utoipa::path(
    get,
    path = "/api/conferences",
    tag = "conferences",
    responses(
        (status = 200, description = "Conferences ordered by next deadline", body = Vec<EnrichedConference>),
        (status = 500, description = "Conference data could not be loaded")
    )
)]
pub async fn list_conferences(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Vec<EnrichedConference>>, StatusCode> {
    current_conferences(&config).map(Json)
}
