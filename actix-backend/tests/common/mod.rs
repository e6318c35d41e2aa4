#![allow(dead_code)]

use actix_web::web::Data;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use snippets_backend::{
    db,
    models::{Snippet, SnippetFields, User},
    utils::auth::{hash_password, issue_token},
    AppState, Settings,
};

pub const PASSWORD: &str = "Password123";

pub fn settings() -> Settings {
    Settings::from_lookup(|key| match key {
        "JWT_ACCESS_SECRET" => Some("test-access-secret".into()),
        "JWT_REFRESH_SECRET" => Some("test-refresh-secret".into()),
        "BCRYPT_COST" => Some("4".into()),
        _ => None,
    })
    .expect("test settings")
}

pub async fn state() -> Data<AppState> {
    let pool = db::connect_in_memory().await.expect("in-memory database");
    db::migrate(&pool).await.expect("migrations");
    Data::new(AppState { db: pool, settings: settings() })
}

/// Builds the full application around `$state`, wired as in `main`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new().app_data($state.clone()).configure(|cfg| {
                snippets_backend::routes::config(
                    cfg,
                    snippets_backend::middleware::Authenticate::new($state.clone()),
                )
            }),
        )
        .await
    };
}

pub async fn user(state: &AppState, username: &str) -> User {
    let hash = hash_password(PASSWORD, state.settings.bcrypt_cost).expect("hash");
    User::create(&state.db, username, &hash).await.expect("create user")
}

pub async fn snippet(state: &AppState, owner: &User, code: &str) -> Snippet {
    Snippet::create(&state.db, owner.id, &SnippetFields::new(code))
        .await
        .expect("create snippet")
}

/// Users have no HTTP delete; the cascade is checked against the table directly.
pub async fn delete_user(state: &AppState, id: i64) -> bool {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await
        .expect("delete user")
        .rows_affected()
        > 0
}

pub fn bearer(state: &AppState, user: &User) -> (&'static str, String) {
    let token = issue_token(user.id, &state.settings.jwt_access_secret, state.settings.access_token_ttl)
        .expect("token");
    ("Authorization", format!("Bearer {token}"))
}

pub fn basic(username: &str, password: &str) -> (&'static str, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    ("Authorization", format!("Basic {encoded}"))
}
