//! Property listing handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::config::MAX_PAGE_SIZE;
use crate::domain::{PropertyResponse, PropiedadFilter};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

/// Listing filters. Every supplied filter must match.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyQuery {
    /// Zone, compared ignoring case
    pub zone: Option<String>,
    /// Inclusive lower price bound
    pub price_min: Option<f64>,
    /// Inclusive upper price bound
    pub price_max: Option<f64>,
    /// Property type, compared ignoring case
    pub tipo: Option<String>,
    /// Exact number of bedrooms
    pub bedrooms: Option<i32>,
    /// Required amenities; repeat the key (`amenities=a&amenities=b` or `amenities[]=a`)
    #[serde(default, alias = "amenities[]")]
    pub amenities: Vec<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PropertyQuery {
    fn filter(&self) -> PropiedadFilter {
        PropiedadFilter {
            zona: self.zone.clone(),
            tipo: self.tipo.clone(),
            precio_min: self.price_min,
            precio_max: self.price_max,
            habitaciones: self.bedrooms,
            amenidades: self.amenities.clone(),
            ..Default::default()
        }
    }

    /// Unpaged requests get every match up to the page cap.
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(MAX_PAGE_SIZE),
        )
    }
}

/// Create property routes
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/properties/:id", get(get_property))
}

/// List properties matching the filters
#[utoipa::path(
    get,
    path = "/properties",
    tag = "Properties",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Matching properties, newest first", body = Vec<PropertyResponse>),
        (status = 400, description = "Malformed filter value")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> AppResult<Json<Vec<PropertyResponse>>> {
    let items = state
        .propiedades
        .listar_propiedades(query.filter(), query.pagination())
        .await?;

    Ok(Json(items.into_iter().map(PropertyResponse::from).collect()))
}

/// Get one property by id
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "Properties",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property found", body = PropertyResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PropertyResponse>> {
    let propiedad = state
        .propiedades
        .obtener_propiedad(id)
        .await?
        .ok_or_not_found("Property")?;

    Ok(Json(PropertyResponse::from(propiedad)))
}
