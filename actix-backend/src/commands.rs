//! Management commands run from the CLI rather than over HTTP.

use sqlx::SqlitePool;
use thiserror::Error;

use crate::{
    models::User,
    utils::auth::{check_password_strength, hash_password},
    Settings,
};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Username must not be blank")]
    BlankUsername,
    #[error("{0}")]
    WeakPassword(&'static str),
    #[error("A user with that username already exists.")]
    UsernameTaken,
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn create_user(
    db: &SqlitePool,
    settings: &Settings,
    username: &str,
    password: &str,
) -> Result<User, CommandError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CommandError::BlankUsername);
    }

    if let Some(reason) = check_password_strength(password) {
        return Err(CommandError::WeakPassword(reason));
    }

    let password_hash = hash_password(password, settings.bcrypt_cost)?;

    match User::create(db, username, &password_hash).await {
        Ok(user) => {
            log::info!("created user {} ({})", user.username, user.id);
            Ok(user)
        }
        Err(sqlx::Error::Database(e)) if e.message().contains("UNIQUE constraint failed: users.username") => {
            Err(CommandError::UsernameTaken)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use rstest::rstest;

    fn settings() -> Settings {
        Settings::from_lookup(|key| match key {
            "JWT_ACCESS_SECRET" => Some("access".into()),
            "JWT_REFRESH_SECRET" => Some("refresh".into()),
            "BCRYPT_COST" => Some("4".into()),
            _ => None,
        })
        .unwrap()
    }

    async fn pool() -> SqlitePool {
        let pool = db::connect_in_memory().await.unwrap();
        db::migrate(&pool).await.unwrap();
        pool
    }

    #[actix_web::test]
    async fn creates_user_with_hashed_password() {
        let pool = pool().await;
        let user = create_user(&pool, &settings(), " alice ", "Password123").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "Password123");
        assert!(crate::utils::auth::verify_password("Password123", &user.password_hash));
    }

    #[actix_web::test]
    async fn duplicate_username_is_reported() {
        let pool = pool().await;
        create_user(&pool, &settings(), "alice", "Password123").await.unwrap();

        let err = create_user(&pool, &settings(), "alice", "Password456").await.unwrap_err();
        assert!(matches!(err, CommandError::UsernameTaken));
    }

    #[rstest]
    #[case("short1A")]
    #[case("alllowercase1")]
    #[case("ALLUPPERCASE1")]
    #[case("NoDigitsHere")]
    #[actix_web::test]
    async fn weak_passwords_are_refused(#[case] password: &str) {
        let pool = pool().await;
        let err = create_user(&pool, &settings(), "bob", password).await.unwrap_err();
        assert!(matches!(err, CommandError::WeakPassword(_)));
    }

    #[actix_web::test]
    async fn blank_username_is_refused() {
        let pool = pool().await;
        let err = create_user(&pool, &settings(), "   ", "Password123").await.unwrap_err();
        assert!(matches!(err, CommandError::BlankUsername));
    }
}
