//! Authentication flow tests over the JSON backend, plus storage failures
//! through a mocked advisor repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use crm_inmobiliario::domain::{
    Asesor, AsesorFilter, AsesorPatch, LoginFailure, LoginOutcome, PasswordChange, Query, Record, Rol,
};
use crm_inmobiliario::errors::{AppError, AppResult};
use crm_inmobiliario::infra::{Persistence, Repository};
use crm_inmobiliario::services::{AuthService, Authenticator, NuevoAsesor};
use crm_inmobiliario::types::PaginationParams;
use crm_inmobiliario::Password;

mock! {
    pub Asesores {}

    #[async_trait]
    impl Repository<Asesor> for Asesores {
        async fn find_by_id(&self, id: i32) -> AppResult<Option<Asesor>>;
        async fn save(&self, patch: AsesorPatch) -> AppResult<Asesor>;
        async fn delete(&self, id: i32) -> AppResult<bool>;
        async fn list(&self, query: &Query<AsesorFilter>, page: PaginationParams) -> AppResult<Vec<Asesor>>;
        async fn count(&self, query: &Query<AsesorFilter>) -> AppResult<u64>;
    }
}

fn authenticator(dir: &tempfile::TempDir) -> (Authenticator, Arc<dyn Repository<Asesor>>) {
    let asesores = Persistence::json(dir.path()).asesores;
    (Authenticator::new(asesores.clone()), asesores)
}

/// Seed an admin and sign in as them.
async fn admin_session(auth: &Authenticator) -> i32 {
    let id = auth
        .crear_usuario(NuevoAsesor::new("admin", "admin-pass").with_rol(Rol::Admin))
        .await
        .unwrap();
    assert!(auth.login("admin".into(), "admin-pass".into()).await.is_success());
    id
}

#[tokio::test]
async fn test_login_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, asesores) = authenticator(&dir);

    let id = auth
        .crear_usuario(NuevoAsesor::new("u1second", "p1"))
        .await
        .unwrap();

    let outcome = auth.login("u1second".into(), "p1".into()).await;
    let profile = outcome.profile().unwrap();
    assert_eq!(profile.username, "u1second");
    assert_eq!(profile.role, Rol::Asesor);
    assert_eq!(auth.current_user().unwrap().id, id);
    assert!(!auth.is_admin());

    let stored = asesores.find_by_id(id).await.unwrap().unwrap();
    assert!(stored.ultimo_acceso.is_some());
    assert_ne!(stored.password_hash, "p1");

    let before = auth.current_user();
    let refused = auth.login("u1second".into(), "wrong".into()).await;
    assert_eq!(
        refused,
        LoginOutcome::Failure(LoginFailure::InvalidCredentials)
    );
    assert!(refused.error_message().is_some());
    assert_eq!(auth.current_user(), before);

    auth.logout();
    assert!(auth.current_user().is_none());
    assert!(!auth.requiere_cambio_password());
}

#[tokio::test]
async fn test_unknown_and_inactive_accounts_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, asesores) = authenticator(&dir);

    let id = auth
        .crear_usuario(NuevoAsesor::new("baja", "secreto"))
        .await
        .unwrap();
    assert!(asesores.delete(id).await.unwrap());

    for username in ["baja", "nadie"] {
        let outcome = auth.login(username.into(), "secreto".into()).await;
        assert_eq!(
            outcome,
            LoginOutcome::Failure(LoginFailure::NotFoundOrInactive)
        );
    }
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn test_forced_password_change_flow() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = authenticator(&dir);
    admin_session(&auth).await;

    let id = auth
        .crear_usuario(NuevoAsesor::new("carla", "inicial1"))
        .await
        .unwrap();
    auth.resetear_password(id, "temp123".into()).await.unwrap();
    auth.logout();

    assert!(auth.login("carla".into(), "temp123".into()).await.is_success());
    assert!(auth.requiere_cambio_password());

    let short = auth
        .cambiar_password(PasswordChange::Forced {
            username: "carla".into(),
            new_password: "corta".into(),
        })
        .await;
    assert!(matches!(short, Err(AppError::Validation(_))));
    assert!(auth.requiere_cambio_password());

    auth.cambiar_password(PasswordChange::Forced {
        username: "carla".into(),
        new_password: "newpass123".into(),
    })
    .await
    .unwrap();
    assert!(!auth.requiere_cambio_password());

    auth.logout();
    assert!(!auth.login("carla".into(), "temp123".into()).await.is_success());
    assert!(auth.login("carla".into(), "newpass123".into()).await.is_success());
    assert!(!auth.requiere_cambio_password());
}

#[tokio::test]
async fn test_forced_change_needs_the_flag() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = authenticator(&dir);

    let change = || PasswordChange::Forced {
        username: "admin".into(),
        new_password: "newpass123".into(),
    };
    assert!(matches!(
        auth.cambiar_password(change()).await,
        Err(AppError::Unauthorized)
    ));

    admin_session(&auth).await;
    assert!(matches!(
        auth.cambiar_password(change()).await,
        Err(AppError::Forbidden)
    ));
}

#[tokio::test]
async fn test_change_with_current_password() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = authenticator(&dir);
    let id = auth
        .crear_usuario(NuevoAsesor::new("dani", "original1"))
        .await
        .unwrap();

    let wrong = auth
        .cambiar_password(PasswordChange::WithCurrent {
            asesor_id: id,
            current: "otra".into(),
            new_password: "cambiada1".into(),
        })
        .await;
    assert!(matches!(wrong, Err(AppError::Validation(_))));

    auth.cambiar_password(PasswordChange::WithCurrent {
        asesor_id: id,
        current: "original1".into(),
        new_password: "cambiada1".into(),
    })
    .await
    .unwrap();
    assert!(auth.login("dani".into(), "cambiada1".into()).await.is_success());
}

#[tokio::test]
async fn test_reset_requires_admin() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = authenticator(&dir);
    let id = auth
        .crear_usuario(NuevoAsesor::new("eli", "secreto1"))
        .await
        .unwrap();

    let anonymous = auth.resetear_password(id, "temp123".into()).await;
    assert!(matches!(anonymous, Err(AppError::Unauthorized)));

    assert!(auth.login("eli".into(), "secreto1".into()).await.is_success());
    let advisor = auth.resetear_password(id, "temp123".into()).await;
    assert!(matches!(advisor, Err(AppError::Forbidden)));
    assert!(advisor.unwrap_err().is_permission());
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = authenticator(&dir);
    auth.crear_usuario(NuevoAsesor::new("fer", "uno")).await.unwrap();

    let dup = auth.crear_usuario(NuevoAsesor::new(" fer ", "dos")).await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));

    let blank = auth.crear_usuario(NuevoAsesor::new("  ", "tres")).await;
    assert!(matches!(blank, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_storage_failure_is_an_unexpected_login_failure() {
    let mut asesores = MockAsesores::new();
    asesores
        .expect_list()
        .returning(|_, _| Err(AppError::internal("connection refused")));
    asesores.expect_save().never();
    let auth = Authenticator::new(Arc::new(asesores));

    let outcome = auth.login("admin".into(), "admin-pass".into()).await;
    assert_eq!(outcome, LoginOutcome::Failure(LoginFailure::Unexpected));
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn test_failed_access_stamp_does_not_block_login() {
    let stored = Asesor {
        password_hash: Password::new("secreto1")
            .unwrap()
            .into_string(),
        username: "gabi".into(),
        ..Asesor::blank(5)
    };

    let mut asesores = MockAsesores::new();
    asesores
        .expect_list()
        .returning(move |_, _| Ok(vec![stored.clone()]));
    asesores
        .expect_save()
        .times(1)
        .returning(|_| Err(AppError::internal("disk full")));
    let auth = Authenticator::new(Arc::new(asesores));

    assert!(auth.login("gabi".into(), "secreto1".into()).await.is_success());
    assert_eq!(auth.current_user().unwrap().id, 5);
}

#[tokio::test]
async fn test_bcrypt_account_logs_in_and_is_upgraded() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, asesores) = authenticator(&dir);
    let legacy = asesores
        .save(AsesorPatch {
            username: Some("legado".into()),
            password_hash: Some(
                "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW".into(),
            ),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!auth.login("legado".into(), "U*V".into()).await.is_success());
    assert!(auth.login("legado".into(), "U*U".into()).await.is_success());

    let stored = asesores.find_by_id(legacy.id).await.unwrap().unwrap();
    let hash = Password::from_hash(stored.password_hash);
    assert!(!hash.is_legacy());
    assert!(hash.verify("U*U"));

    auth.logout();
    assert!(auth.login("legado".into(), "U*U".into()).await.is_success());
}
