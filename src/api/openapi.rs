//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{health, properties};
use crate::domain::PropertyResponse;

/// OpenAPI document for the read API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM Inmobiliario API",
        version = "0.1.0",
        description = "Read-only access to property listings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        health::health,
        properties::list_properties,
        properties::get_property,
    ),
    components(schemas(health::HealthResponse, PropertyResponse)),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Properties", description = "Property listings")
    )
)]
pub struct ApiDoc;
