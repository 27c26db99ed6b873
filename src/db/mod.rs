// Database access layer (SQLite via sqlx).

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Score {
    pub name: String,
    pub score: i64,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The highest scores, best first. Ties break on submission order.
    pub async fn top_scores(&self, limit: i64) -> Result<Vec<Score>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Score>(
            "SELECT name, score FROM scores ORDER BY score DESC, id ASC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_score(&self, name: &str, score: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO scores (name, score) VALUES (?, ?)")
            .bind(name)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
