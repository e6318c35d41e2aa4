use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::highlight;
use crate::models::{Language, Style};

// ______________________________________ Snippets ______________________________________
#[derive(Debug, Clone, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub created: DateTime<Utc>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    #[sqlx(try_from = "String")]
    pub language: Language,
    #[sqlx(try_from = "String")]
    pub style: Style,
    pub owner_id: i64,
    pub owner_username: String,
    pub highlighted: String,
}

/// The writable part of a snippet, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetFields {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl SnippetFields {
    pub fn new(code: impl Into<String>) -> Self {
        SnippetFields {
            title: String::new(),
            code: code.into(),
            linenos: false,
            language: Language::default(),
            style: Style::default(),
        }
    }

    pub fn highlighted(&self) -> String {
        highlight::render(&self.code, self.language, self.style, self.linenos, &self.title)
    }
}

impl From<&Snippet> for SnippetFields {
    fn from(snippet: &Snippet) -> Self {
        SnippetFields {
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            linenos: snippet.linenos,
            language: snippet.language,
            style: snippet.style,
        }
    }
}

const SELECT_SNIPPET: &str = r#"
    SELECT
        s.id,
        s.created,
        s.title,
        s.code,
        s.linenos,
        s.language,
        s.style,
        s.owner_id,
        u.username AS owner_username,
        s.highlighted
    FROM snippets s
    JOIN users u
      ON u.id = s.owner_id
"#;

impl Snippet {
    pub async fn create(db: &SqlitePool, owner_id: i64, fields: &SnippetFields) -> Result<Snippet, sqlx::Error> {
        let rec = sqlx::query(
            r#"
            INSERT INTO snippets (created, title, code, linenos, language, style, owner_id, highlighted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Utc::now())
        .bind(&fields.title)
        .bind(&fields.code)
        .bind(fields.linenos)
        .bind(fields.language.as_str())
        .bind(fields.style.as_str())
        .bind(owner_id)
        .bind(fields.highlighted())
        .execute(db)
        .await?;

        Snippet::find(db, rec.last_insert_rowid())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<Snippet>, sqlx::Error> {
        sqlx::query_as::<_, Snippet>(&format!("{SELECT_SNIPPET} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM snippets")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    /// One page of snippets in creation order.
    pub async fn page(db: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Snippet>, sqlx::Error> {
        sqlx::query_as::<_, Snippet>(&format!(
            "{SELECT_SNIPPET} ORDER BY s.created, s.id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Overwrites every writable field and regenerates the highlighted page.
    pub async fn update(db: &SqlitePool, id: i64, fields: &SnippetFields) -> Result<Option<Snippet>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE snippets
            SET
                title       = $1,
                code        = $2,
                linenos     = $3,
                language    = $4,
                style       = $5,
                highlighted = $6
            WHERE
                id = $7
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.code)
        .bind(fields.linenos)
        .bind(fields.language.as_str())
        .bind(fields.style.as_str())
        .bind(fields.highlighted())
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Snippet::find(db, id).await
    }

    pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Snippet ids grouped by owner, each group in id order.
    pub async fn ids_by_owner(db: &SqlitePool, owner_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>, sqlx::Error> {
        let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
        if owner_ids.is_empty() {
            return Ok(grouped);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT owner_id, id FROM snippets WHERE owner_id IN (");
        let mut separated = qb.separated(", ");
        for owner_id in owner_ids {
            separated.push_bind(*owner_id);
        }
        separated.push_unseparated(") ORDER BY id");

        let rows: Vec<(i64, i64)> = qb.build_query_as().fetch_all(db).await?;
        for (owner_id, id) in rows {
            grouped.entry(owner_id).or_default().push(id);
        }
        Ok(grouped)
    }
}
