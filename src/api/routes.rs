//! Application route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health_routes, property_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the read API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(property_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
