//! JSON file repository integration tests.

use serde_json::{json, Value};

use crm_inmobiliario::domain::{
    Asesor, Cliente, ClienteFilter, ClientePatch, Patch, Propiedad, PropiedadFilter,
    PropiedadPatch, Query, Rol,
};
use crm_inmobiliario::errors::AppError;
use crm_inmobiliario::infra::{JsonFileRepository, Persistence, Repository};
use crm_inmobiliario::services::{AuthService, Authenticator};
use crm_inmobiliario::types::PaginationParams;
use crm_inmobiliario::Password;

fn propiedad(value: Value) -> PropiedadPatch {
    PropiedadPatch::from_form(value.as_object().unwrap())
}

fn cliente(value: Value) -> ClientePatch {
    ClientePatch::from_form(value.as_object().unwrap())
}

#[tokio::test]
async fn test_missing_file_is_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Propiedad>::new(dir.path().join("propiedades_store.json"));

    assert_eq!(repo.count(&Query::default()).await.unwrap(), 0);
    assert!(repo
        .list(&Query::default(), PaginationParams::default())
        .await
        .unwrap()
        .is_empty());
    assert!(repo.find_by_id(1).await.unwrap().is_none());
    assert!(!repo.delete(1).await.unwrap());
}

#[tokio::test]
async fn test_insert_takes_max_id_plus_one() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Cliente>::new(dir.path().join("clientes_store.json"));

    let first = repo.save(cliente(json!({"primer_nombre": "Ana"}))).await.unwrap();
    let second = repo.save(cliente(json!({"primer_nombre": "Luis"}))).await.unwrap();
    assert_eq!((first.id, second.id), (1, 2));

    assert!(repo.delete(first.id).await.unwrap());
    let third = repo.save(cliente(json!({"primer_nombre": "Eva"}))).await.unwrap();
    assert_eq!(third.id, 3);
    assert!(repo.find_by_id(first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Propiedad>::new(dir.path().join("propiedades_store.json"));

    let saved = repo
        .save(propiedad(json!({"titulo": "Casa", "precio": 900000})))
        .await
        .unwrap();
    let update = propiedad(json!({"id": saved.id, "zona": "Centro", "habitaciones": "3"}));

    let once = repo.save(update.clone()).await.unwrap();
    let twice = repo.save(update).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.titulo.as_deref(), Some("Casa"));
    assert_eq!(twice.habitaciones, Some(3));
    assert_eq!(repo.count(&Query::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_of_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Propiedad>::new(dir.path().join("propiedades_store.json"));

    let result = repo.save(propiedad(json!({"id": 42, "titulo": "Nada"}))).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_legacy_seed_documents_are_flattened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("propiedades_store.json");
    let seed = json!([
        {
            "id": "7",
            "titulo": "Casa legado",
            "precio": "2500000",
            "tipo_propiedad": "Casa",
            "ubicacion": {"Ciudad": "Zapopan", "Estado": "Jalisco", "Colonia": "Chapalita"},
            "caracteristicas": {"alberca": true, "jardin": "si", "elevador": false}
        },
        {
            "id": 3,
            "titulo": "Depto",
            "precio": 1200000,
            "amenidades": ["gimnasio", " roof garden "]
        },
        "not an object"
    ]);
    std::fs::write(&path, serde_json::to_string_pretty(&seed).unwrap()).unwrap();

    let repo = JsonFileRepository::<Propiedad>::new(&path);
    let all = repo
        .list(&Query::default(), PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7, 3]);

    let casa = &all[0];
    assert_eq!(casa.tipo.as_deref(), Some("Casa"));
    assert_eq!(casa.ciudad.as_deref(), Some("Zapopan"));
    assert_eq!(casa.zona.as_deref(), Some("Chapalita"));
    assert!(casa.activo);
    assert!(casa.has_amenities(&["ALBERCA".into(), "jardin".into()]));
    assert!(!casa.has_amenities(&["elevador".into()]));

    assert_eq!(all[1].amenity_list(), vec!["gimnasio", "roof garden"]);
}

#[tokio::test]
async fn test_amenity_filter_is_conjunctive() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Propiedad>::new(dir.path().join("propiedades_store.json"));
    for amenidades in ["alberca, jardin", "alberca", "Jardin, Alberca, gimnasio"] {
        repo.save(propiedad(json!({"titulo": "P", "amenidades": amenidades})))
            .await
            .unwrap();
    }

    let query = Query::filtered(PropiedadFilter {
        amenidades: vec!["alberca".into(), "jardin".into()],
        ..Default::default()
    });
    let found = repo.list(&query, PaginationParams::default()).await.unwrap();

    assert_eq!(found.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1]);
    assert_eq!(repo.count(&query).await.unwrap(), 2);
}

#[tokio::test]
async fn test_search_matches_literal_wildcards() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::<Cliente>::new(dir.path().join("clientes_store.json"));
    repo.save(cliente(json!({"primer_nombre": "100%_real"}))).await.unwrap();
    repo.save(cliente(json!({"primer_nombre": "100 real"}))).await.unwrap();

    let hits = repo
        .list(
            &Query::search("%_", ClienteFilter::default()),
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].primer_nombre.as_deref(), Some("100%_real"));
}

#[tokio::test]
async fn test_store_is_a_pretty_printed_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("propiedades_store.json");
    let repo = JsonFileRepository::<Propiedad>::new(&path);
    repo.save(propiedad(json!({"titulo": "Casa"}))).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains('\n'));
    let docs: Vec<Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], 1);
    assert_eq!(docs[0]["activo"], true);
}

#[tokio::test]
async fn test_legacy_advisor_keeps_hash_and_access_stamp() {
    let dir = tempfile::tempdir().unwrap();
    let hash = Password::new("clave-legada").unwrap().into_string();
    let seed = json!([{
        "id": 4,
        "username": "marta",
        "password_hash": hash,
        "rol": "Admin",
        "activo": "1",
        "ultimo_acceso": "2024-03-01 08:30:00",
        "sucursal": "Norte"
    }]);
    std::fs::write(
        dir.path().join("asesores_store.json"),
        serde_json::to_string(&seed).unwrap(),
    )
    .unwrap();

    let repo = JsonFileRepository::<Asesor>::new(dir.path().join("asesores_store.json"));
    let marta = repo.find_by_id(4).await.unwrap().unwrap();
    assert_eq!(marta.password_hash, hash);
    assert_eq!(marta.rol, Rol::Admin);
    assert!(marta.activo);
    assert_eq!(
        marta.ultimo_acceso.map(|t| t.to_rfc3339()).as_deref(),
        Some("2024-03-01T08:30:00+00:00")
    );

    let auth = Authenticator::new(Persistence::json(dir.path()).asesores);
    assert!(auth.login("marta".into(), "clave-legada".into()).await.is_success());
    assert!(auth.is_admin());
}

#[tokio::test]
async fn test_legacy_client_keeps_registration_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clientes_store.json");
    let seed = json!([
        {"id": 1, "primer_nombre": "Rosa", "fecha_registro": "2023-11-20T17:05:00Z", "notas": "x"},
        {"id": 2, "primer_nombre": "Iker", "origen": "feria"}
    ]);
    std::fs::write(&path, serde_json::to_string(&seed).unwrap()).unwrap();

    let repo = JsonFileRepository::<Cliente>::new(&path);
    let rosa = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(
        rosa.fecha_registro.map(|t| t.to_rfc3339()).as_deref(),
        Some("2023-11-20T17:05:00+00:00")
    );
    assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().fecha_registro, None);

    let updated = repo
        .save(cliente(json!({"id": 1, "zona": "Centro"})))
        .await
        .unwrap();
    assert_eq!(updated.fecha_registro, rosa.fecha_registro);
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap(), updated);
    assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().fecha_registro, None);
}
