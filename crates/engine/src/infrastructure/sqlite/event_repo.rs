//! SQLite-backed scheduled event storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chroniclr_domain::{GameDateTime, GameId, Recurrence, ScheduledEvent, ScheduledEventId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{RepoError, ScheduledEventRepo};

pub struct SqliteScheduledEventRepo {
    pool: SqlitePool,
}

impl SqliteScheduledEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, game_id, name, description, trigger_time_json, \
                              recurring, triggered, metadata_json, created_at FROM scheduled_events";

fn row_to_event(row: SqliteRow) -> Result<ScheduledEvent, RepoError> {
    let id = Uuid::parse_str(row.get::<String, _>("id").as_str())
        .map_err(RepoError::serialization)?;
    let game_id = Uuid::parse_str(row.get::<String, _>("game_id").as_str())
        .map_err(RepoError::serialization)?;
    let trigger_time: GameDateTime =
        serde_json::from_str(row.get::<String, _>("trigger_time_json").as_str())
            .map_err(RepoError::serialization)?;
    let metadata: serde_json::Value =
        serde_json::from_str(row.get::<String, _>("metadata_json").as_str())
            .map_err(RepoError::serialization)?;
    let recurring = row
        .get::<Option<String>, _>("recurring")
        .as_deref()
        .map(|s| {
            Recurrence::parse(s)
                .ok_or_else(|| RepoError::serialization(format!("unknown recurrence: {s}")))
        })
        .transpose()?;
    let created_at = DateTime::parse_from_rfc3339(row.get::<String, _>("created_at").as_str())
        .map_err(RepoError::serialization)?
        .with_timezone(&Utc);

    Ok(ScheduledEvent {
        id: ScheduledEventId::from_uuid(id),
        game_id: GameId::from_uuid(game_id),
        name: row.get("name"),
        description: row.get("description"),
        trigger_time,
        recurring,
        triggered: row.get::<i64, _>("triggered") != 0,
        metadata,
        created_at,
    })
}

#[async_trait]
impl ScheduledEventRepo for SqliteScheduledEventRepo {
    async fn get(&self, id: ScheduledEventId) -> Result<Option<ScheduledEvent>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("scheduled_events.get", e))?;

        row.map(row_to_event).transpose()
    }

    async fn save(&self, event: &ScheduledEvent) -> Result<(), RepoError> {
        let trigger_time_json =
            serde_json::to_string(&event.trigger_time).map_err(RepoError::serialization)?;
        let metadata_json =
            serde_json::to_string(&event.metadata).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO scheduled_events
                (id, game_id, name, description, trigger_time_json,
                 recurring, triggered, metadata_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                trigger_time_json = excluded.trigger_time_json,
                recurring = excluded.recurring,
                triggered = excluded.triggered,
                metadata_json = excluded.metadata_json
            "#,
        )
        .bind(event.id.to_string())
        .bind(event.game_id.to_string())
        .bind(&event.name)
        .bind(&event.description)
        .bind(trigger_time_json)
        .bind(event.recurring.map(|r| r.as_str()))
        .bind(event.triggered as i64)
        .bind(metadata_json)
        .bind(event.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("scheduled_events.save", e))?;

        tracing::debug!(event_id = %event.id, game_id = %event.game_id, "Saved scheduled event");
        Ok(())
    }

    async fn delete(&self, id: ScheduledEventId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM scheduled_events WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("scheduled_events.delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_game(
        &self,
        game_id: GameId,
        include_triggered: bool,
    ) -> Result<Vec<ScheduledEvent>, RepoError> {
        let query = if include_triggered {
            format!("{SELECT_COLUMNS} WHERE game_id = ?")
        } else {
            format!("{SELECT_COLUMNS} WHERE game_id = ? AND triggered = 0")
        };

        let rows = sqlx::query(&query)
            .bind(game_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("scheduled_events.list_for_game", e))?;

        rows.into_iter().map(row_to_event).collect()
    }

    async fn list_pending(&self, game_id: GameId) -> Result<Vec<ScheduledEvent>, RepoError> {
        self.list_for_game(game_id, false).await
    }

    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM scheduled_events WHERE game_id = ?")
            .bind(game_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("scheduled_events.delete_for_game", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::connection::memory_pool;
    use serde_json::json;

    fn sample_event(game_id: GameId) -> ScheduledEvent {
        ScheduledEvent::new(
            game_id,
            "Festival of the Moon",
            GameDateTime::new(2, 3, 14, 20, 0),
            Utc::now(),
        )
        .with_description("Fireworks over the harbor")
        .with_recurrence(Recurrence::Yearly)
        .with_metadata(json!({"location": "harbor", "importance": "major"}))
    }

    #[tokio::test]
    async fn save_then_get_round_trips_all_fields() {
        let repo = SqliteScheduledEventRepo::new(memory_pool().await);
        let event = sample_event(GameId::new());

        repo.save(&event).await.expect("save");
        let loaded = repo.get(event.id).await.expect("get").expect("row exists");

        assert_eq!(loaded.name, event.name);
        assert_eq!(loaded.description, event.description);
        assert_eq!(loaded.trigger_time, event.trigger_time);
        assert_eq!(loaded.recurring, Some(Recurrence::Yearly));
        assert!(!loaded.triggered);
        assert_eq!(loaded.metadata, event.metadata);
    }

    #[tokio::test]
    async fn listing_excludes_triggered_events_unless_asked() {
        let repo = SqliteScheduledEventRepo::new(memory_pool().await);
        let game_id = GameId::new();

        let pending = sample_event(game_id);
        let mut fired = sample_event(game_id);
        fired.triggered = true;
        repo.save(&pending).await.expect("save pending");
        repo.save(&fired).await.expect("save fired");

        let visible = repo.list_for_game(game_id, false).await.expect("list");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, pending.id);

        let all = repo.list_for_game(game_id, true).await.expect("list all");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_game() {
        let repo = SqliteScheduledEventRepo::new(memory_pool().await);
        let game_a = GameId::new();
        let game_b = GameId::new();
        repo.save(&sample_event(game_a)).await.expect("save a");
        repo.save(&sample_event(game_b)).await.expect("save b");

        let events = repo.list_pending(game_a).await.expect("list");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].game_id, game_a);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let repo = SqliteScheduledEventRepo::new(memory_pool().await);
        let event = sample_event(GameId::new());
        repo.save(&event).await.expect("save");

        assert!(repo.delete(event.id).await.expect("first delete"));
        assert!(!repo.delete(event.id).await.expect("second delete"));
        assert!(repo.get(event.id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn delete_for_game_removes_every_event_of_that_game() {
        let repo = SqliteScheduledEventRepo::new(memory_pool().await);
        let game_id = GameId::new();
        repo.save(&sample_event(game_id)).await.expect("save");
        repo.save(&sample_event(game_id)).await.expect("save");

        repo.delete_for_game(game_id).await.expect("purge");
        assert!(repo
            .list_for_game(game_id, true)
            .await
            .expect("list")
            .is_empty());
    }
}
