//! SQLite-backed game clock storage.

use std::sync::Arc;

use async_trait::async_trait;
use chroniclr_domain::{CalendarConfig, GameClock, GameDateTime, GameId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, GameClockRepo, RepoError};

/// One row per game: current time and calendar as JSON columns.
pub struct SqliteGameClockRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteGameClockRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl GameClockRepo for SqliteGameClockRepo {
    async fn get(&self, game_id: GameId) -> Result<Option<GameClock>, RepoError> {
        let row = sqlx::query(
            "SELECT current_time_json, calendar_json FROM game_clocks WHERE game_id = ?",
        )
        .bind(game_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("game_clocks.get", e))?;

        match row {
            Some(row) => {
                let current_time: GameDateTime =
                    serde_json::from_str(row.get::<String, _>("current_time_json").as_str())
                        .map_err(RepoError::serialization)?;
                let calendar: CalendarConfig =
                    serde_json::from_str(row.get::<String, _>("calendar_json").as_str())
                        .map_err(RepoError::serialization)?;
                Ok(Some(GameClock::new(game_id, current_time, calendar)))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, clock: &GameClock) -> Result<(), RepoError> {
        let current_time_json =
            serde_json::to_string(&clock.current_time).map_err(RepoError::serialization)?;
        let calendar_json =
            serde_json::to_string(&clock.calendar).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO game_clocks (game_id, current_time_json, calendar_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(game_id) DO UPDATE SET
                current_time_json = excluded.current_time_json,
                calendar_json = excluded.calendar_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(clock.game_id.to_string())
        .bind(current_time_json)
        .bind(calendar_json)
        .bind(self.clock.now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("game_clocks.save", e))?;

        tracing::debug!(game_id = %clock.game_id, "Saved game clock");
        Ok(())
    }

    async fn delete(&self, game_id: GameId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM game_clocks WHERE game_id = ?")
            .bind(game_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("game_clocks.delete", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::sqlite::connection::memory_pool;
    use chrono::Utc;

    fn repo(pool: SqlitePool) -> SqliteGameClockRepo {
        SqliteGameClockRepo::new(pool, Arc::new(FixedClock(Utc::now())))
    }

    #[tokio::test]
    async fn save_then_get_round_trips_the_clock() {
        let repo = repo(memory_pool().await);
        let game_id = GameId::new();
        let clock = GameClock::new(
            game_id,
            GameDateTime::new(3, 1, 4, 9, 15),
            CalendarConfig::default(),
        );

        repo.save(&clock).await.expect("save should succeed");
        let loaded = repo.get(game_id).await.expect("get should succeed");
        assert_eq!(loaded, Some(clock));
    }

    #[tokio::test]
    async fn save_is_an_upsert_keyed_by_game_id() {
        let repo = repo(memory_pool().await);
        let game_id = GameId::new();
        let mut clock = GameClock::new(
            game_id,
            GameDateTime::new(1, 0, 0, 8, 0),
            CalendarConfig::default(),
        );

        repo.save(&clock).await.expect("first save");
        clock.current_time = GameDateTime::new(1, 0, 2, 12, 30);
        repo.save(&clock).await.expect("second save");

        let loaded = repo.get(game_id).await.expect("get").expect("clock exists");
        assert_eq!(loaded.current_time, GameDateTime::new(1, 0, 2, 12, 30));
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_game() {
        let repo = repo(memory_pool().await);
        let loaded = repo.get(GameId::new()).await.expect("get");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = repo(memory_pool().await);
        let game_id = GameId::new();
        let clock = GameClock::new(
            game_id,
            GameDateTime::new(1, 0, 0, 8, 0),
            CalendarConfig::default(),
        );
        repo.save(&clock).await.expect("save");
        repo.delete(game_id).await.expect("delete");
        assert!(repo.get(game_id).await.expect("get").is_none());
    }
}
