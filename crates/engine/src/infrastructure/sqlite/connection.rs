//! SQLite connection management and schema initialization.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Open (or create) the database at `db_path` and ensure the schema exists.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))?;
    ensure_schema(&pool).await?;
    tracing::info!("Connected to SQLite at {}", db_path);
    Ok(pool)
}

/// Create tables and indexes. Structured values (dates, calendars, metadata)
/// are stored as JSON text columns.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS game_clocks (
            game_id TEXT PRIMARY KEY,
            current_time_json TEXT NOT NULL,
            calendar_json TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS scheduled_events (
            id TEXT PRIMARY KEY,
            game_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            trigger_time_json TEXT NOT NULL,
            recurring TEXT,
            triggered INTEGER NOT NULL DEFAULT 0,
            metadata_json TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_scheduled_events_game
            ON scheduled_events (game_id, triggered)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS status_effects (
            id TEXT PRIMARY KEY,
            game_id TEXT NOT NULL,
            character_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            duration_rounds INTEGER
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_status_effects_game
            ON status_effects (game_id)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS abilities (
            id TEXT PRIMARY KEY,
            game_id TEXT NOT NULL,
            character_id TEXT NOT NULL,
            name TEXT NOT NULL,
            cooldown_max INTEGER NOT NULL,
            current_cooldown INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_abilities_game
            ON abilities (game_id)
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::debug!("Database schema initialized");
    Ok(())
}

/// In-memory pool for tests. A single connection keeps the database alive
/// and shared for the whole test.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    ensure_schema(&pool).await.expect("schema should apply");
    pool
}
