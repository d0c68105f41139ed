//! Integration tests for the read API.
//!
//! The router runs over a JSON store in a temp directory; requests go
//! through `tower::ServiceExt::oneshot` without binding a socket.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crm_inmobiliario::api::{create_router, AppState};
use crm_inmobiliario::domain::{
    Patch, Propiedad, PropiedadFilter, PropiedadPatch, Query,
};
use crm_inmobiliario::errors::{AppError, AppResult};
use crm_inmobiliario::infra::Persistence;
use crm_inmobiliario::services::PropiedadService;
use crm_inmobiliario::types::{Paginated, PaginationParams};

async fn seeded_app(dir: &tempfile::TempDir) -> Router {
    let persistence = Persistence::json(dir.path());
    for form in [
        json!({"titulo": "Casa Centro", "zona": "Centro", "tipo": "Casa", "precio": 1800000,
               "habitaciones": 3, "amenidades": "alberca, jardin"}),
        json!({"titulo": "Depto Centro", "zona": "centro", "tipo": "Departamento", "precio": 950000,
               "habitaciones": 2, "amenidades": "alberca"}),
        json!({"titulo": "Casa Norte", "zona": "Norte", "tipo": "casa", "precio": 2400000,
               "habitaciones": 3, "amenidades": "Jardin, Alberca, cochera"}),
    ] {
        persistence
            .propiedades
            .save(PropiedadPatch::from_form(form.as_object().unwrap()))
            .await
            .unwrap();
    }
    create_router(AppState::from_persistence(&persistence))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Extractor rejections are plain text
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded_app(&dir).await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded_app(&dir).await, "/properties").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1]);
    assert_eq!(body[0]["amenidades"], json!(["Jardin", "Alberca", "cochera"]));
    assert_eq!(body[0]["precio"], json!(2400000.0));
    assert!(body[0]["descripcion"].is_null());
}

#[tokio::test]
async fn test_filters_combine() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let (_, by_zone) = get(app.clone(), "/properties?zone=CENTRO").await;
    assert_eq!(ids(&by_zone), vec![2, 1]);

    let (_, by_price) = get(app.clone(), "/properties?price_min=950000&price_max=1800000").await;
    assert_eq!(ids(&by_price), vec![2, 1]);

    let (_, by_type) = get(app.clone(), "/properties?tipo=Casa&bedrooms=3").await;
    assert_eq!(ids(&by_type), vec![3, 1]);

    let (_, paged) = get(app, "/properties?page=2&page_size=2").await;
    assert_eq!(ids(&paged), vec![1]);
}

#[tokio::test]
async fn test_huge_page_is_an_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(
        seeded_app(&dir).await,
        "/properties?page=18446744073709551615&page_size=1000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_amenities_are_conjunctive() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let (status, repeated) = get(app.clone(), "/properties?amenities=alberca&amenities=jardin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&repeated), vec![3, 1]);

    let (status, bracketed) = get(
        app.clone(),
        "/properties?amenities%5B%5D=alberca&amenities%5B%5D=jardin",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&bracketed), vec![3, 1]);

    let (_, single) = get(app, "/properties?amenities=cochera").await;
    assert_eq!(ids(&single), vec![3]);
}

#[tokio::test]
async fn test_get_property() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let (status, body) = get(app.clone(), "/properties/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titulo"], "Depto Centro");
    assert_eq!(body["habitaciones"], 2);

    let (status, body) = get(app, "/properties/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": {"code": "NOT_FOUND", "message": "Property not found"}})
    );
}

#[tokio::test]
async fn test_malformed_filter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = get(seeded_app(&dir).await, "/properties?price_min=barato").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(seeded_app(&dir).await, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/properties"].is_object());
}

/// Property service whose storage is unreachable
struct BrokenStore;

#[async_trait]
impl PropiedadService for BrokenStore {
    async fn obtener_propiedad(&self, _id: i32) -> AppResult<Option<Propiedad>> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn guardar_propiedad(&self, _patch: PropiedadPatch) -> AppResult<Propiedad> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn eliminar_propiedad(&self, _id: i32) -> AppResult<bool> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn listar_propiedades(
        &self,
        _filter: PropiedadFilter,
        _page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn buscar_propiedades(
        &self,
        _text: String,
        _filter: PropiedadFilter,
        _page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn contar_propiedades(&self, _query: Query<PropiedadFilter>) -> AppResult<u64> {
        Err(AppError::internal("connection reset by peer"))
    }

    async fn pagina_propiedades(
        &self,
        _query: Query<PropiedadFilter>,
        _page: PaginationParams,
    ) -> AppResult<Paginated<Propiedad>> {
        Err(AppError::internal("connection reset by peer"))
    }
}

#[tokio::test]
async fn test_storage_failure_hides_details() {
    let app = create_router(AppState::new(Arc::new(BrokenStore)));
    let (status, body) = get(app, "/properties").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(!body.to_string().contains("connection reset"));
}
