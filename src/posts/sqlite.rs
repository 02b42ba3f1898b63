//! SQLite-backed primary store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::posts::{NewPost, Post, PostRepository};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts (created_at DESC)",
];

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    title: String,
    content: String,
    created_at: String,
    updated_at: Option<String>,
}

impl TryFrom<PostRow> for Post {
    type Error = AppError;

    fn try_from(row: PostRow) -> AppResult<Self> {
        Ok(Post {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: row.updated_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

// Fixed-width UTC text, so lexical order in SQL matches time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Store(format!("invalid timestamp '{raw}': {e}")))
}

// == SQLite Post Repository ==
/// Posts table in a SQLite database reached through a `sqlx` pool.
#[derive(Debug, Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    /// Opens (creating if needed) the database at `database_url` and applies the schema.
    ///
    /// In-memory URLs are pinned to one long-lived connection, since each
    /// SQLite connection would otherwise see its own empty database.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Config(format!("invalid database URL: {e}")))?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(10))
        };

        let pool = pool_options.connect_with(options).await?;
        let repo = Self::from_pool(pool);
        repo.migrate().await?;

        info!(in_memory, "SQLite post repository ready");
        Ok(repo)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the posts table and its index if they are missing.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Inserts a fully formed post, keeping its id and timestamps.
    pub async fn insert_post(&self, post: &Post) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO posts (id, title, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(format_timestamp(&post.created_at))
        .bind(post.updated_at.as_ref().map(format_timestamp))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::try_from).transpose()
    }

    async fn insert(&self, new_post: NewPost) -> AppResult<Post> {
        let post = Post::from_new(new_post);
        self.insert_post(&post).await?;
        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Post>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, created_at, updated_at FROM posts \
             ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Post::try_from).collect()
    }
}
