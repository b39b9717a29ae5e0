use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::models::{ConferenceRecord, DeadlineEntry, EnrichedConference};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Conference Deadline Tracker",
        description = "Upcoming submission deadlines, recomputed on every request"
    ),
    paths(handlers::conferences::list_conferences),
    components(schemas(ConferenceRecord, DeadlineEntry, EnrichedConference)),
    tags((name = "conferences", description = "Conference deadline listing"))
)]
pub struct ApiDoc;

/// Build the application router with security headers and request tracing
pub fn create_app(config: AppConfig) -> Router {
    let state = Arc::new(config);

    Router::new()
        .route("/", get(handlers::web::home))
        .route("/api/conferences", get(handlers::list_conferences))
        .route("/health", get(|| async { "ok" }))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware::from_fn(crate::middleware::security_headers))
        .layer(TraceLayer::new_for_http())
}
