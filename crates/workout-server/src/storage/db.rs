//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use workout_core::workout::timestamp;
use workout_core::{
    NewWorkoutEntry, UserId, WorkoutEntry, WorkoutError, WorkoutStore, TIMESTAMP_FORMAT,
};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        let parent = match Path::new(database_path).parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        tokio::fs::create_dir_all(&parent).await.with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;

        // Check if directory is writable
        let test_file = parent.join(".write_test");
        match tokio::fs::write(&test_file, b"test").await {
            Ok(_) => {
                let _ = tokio::fs::remove_file(&test_file).await;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Database directory is not writable: {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// Private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // A single long-lived connection, otherwise each one sees its own empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                entry TEXT NOT NULL,
                type TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts (user_id, id)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl WorkoutStore for Database {
    async fn append(&self, entry: NewWorkoutEntry) -> workout_core::Result<WorkoutEntry> {
        let result = sqlx::query(
            r#"
            INSERT INTO workouts (user_id, timestamp, entry, type)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(entry.user_id.get())
        .bind(entry.timestamp.format(TIMESTAMP_FORMAT).to_string())
        .bind(&entry.entry)
        .bind(&entry.category)
        .execute(&self.pool)
        .await
        .map_err(WorkoutError::storage)?;

        Ok(entry.with_id(result.last_insert_rowid()))
    }

    async fn recent(&self, user_id: UserId, limit: usize) -> workout_core::Result<Vec<WorkoutEntry>> {
        let rows: Vec<WorkoutRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, timestamp, entry, type
            FROM workouts WHERE user_id = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id.get())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(WorkoutError::storage)?;

        rows.into_iter().map(WorkoutEntry::try_from).collect()
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    user_id: i64,
    timestamp: String,
    entry: String,
    #[sqlx(rename = "type")]
    category: Option<String>,
}

impl TryFrom<WorkoutRow> for WorkoutEntry {
    type Error = WorkoutError;

    fn try_from(r: WorkoutRow) -> Result<Self, Self::Error> {
        let parsed = timestamp::parse(&r.timestamp).map_err(|e| {
            WorkoutError::Storage(format!("Bad timestamp {:?} in row {}: {}", r.timestamp, r.id, e))
        })?;

        Ok(WorkoutEntry {
            id: r.id,
            user_id: UserId(r.user_id),
            timestamp: parsed,
            entry: r.entry,
            category: r.category,
        })
    }
}
