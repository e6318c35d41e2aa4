use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

// ______________________________________ User ______________________________________
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub async fn create(db: &SqlitePool, username: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        let rec = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, date_joined)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(db)
        .await?;

        User::find(db, rec.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, username, password_hash, date_joined FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, username, password_hash, date_joined FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(db)
            .await
    }

    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn page(db: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, date_joined
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }
}
